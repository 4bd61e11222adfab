//! Declaration-scoped configuration for a split accessor set

use std::fmt;
use std::sync::Arc;

use chrono::{Local, NaiveDate, NaiveDateTime};

/// Shared supplier for the merge base used when the field is unset.
pub type DefaultSupplier = Arc<dyn Fn() -> NaiveDateTime + Send + Sync>;

/// Configuration for one split accessor declaration.
///
/// Built once at declaration time and only read afterwards; all instances
/// of the host type share it. Cloning is cheap (the default supplier is
/// reference-counted).
#[derive(Clone)]
pub struct SplitConfig {
    /// Output pattern for `date` reads, and the parse pattern for `date`
    /// writes unless [`with_date_parse_format`](Self::with_date_parse_format)
    /// overrides it
    pub date_format: String,

    /// Output pattern for `time` reads. When unset, reads render the raw
    /// time-of-day and writes go through the generic `HH:MM[:SS]` parser
    pub time_format: Option<String>,

    /// Parse pattern for `date` writes. When unset, writes go through the
    /// generic date parser
    pub date_parse_format: Option<String>,

    default: DefaultSupplier,
}

impl SplitConfig {
    /// Create a configuration with the stock settings: ISO `%Y-%m-%d`
    /// dates, raw time output, generic input parsing, and the epoch-zero
    /// timestamp as the merge base for unset fields.
    pub fn new() -> Self {
        Self {
            date_format: "%Y-%m-%d".to_string(),
            time_format: None,
            date_parse_format: None,
            default: Arc::new(epoch_zero),
        }
    }

    /// Create a configuration whose merge base for unset fields is the
    /// current local time instead of the epoch-zero timestamp.
    pub fn default_now() -> Self {
        Self::new().with_default(|| Local::now().naive_local())
    }

    /// Set the output (and, absent an explicit parse format, input)
    /// pattern for the `date` component.
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Set the output and input pattern for the `time` component.
    pub fn with_time_format(mut self, format: impl Into<String>) -> Self {
        self.time_format = Some(format.into());
        self
    }

    /// Set the parse pattern for `date` writes, independent of the output
    /// format.
    pub fn with_date_parse_format(mut self, format: impl Into<String>) -> Self {
        self.date_parse_format = Some(format.into());
        self
    }

    /// Replace the default supplier used as the merge base when the field
    /// is unset at write time.
    pub fn with_default<F>(mut self, supplier: F) -> Self
    where
        F: Fn() -> NaiveDateTime + Send + Sync + 'static,
    {
        self.default = Arc::new(supplier);
        self
    }

    /// Materialize the default merge base. Only writes call this; reads
    /// report absence instead.
    pub fn default_timestamp(&self) -> NaiveDateTime {
        (self.default)()
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SplitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplitConfig")
            .field("date_format", &self.date_format)
            .field("time_format", &self.time_format)
            .field("date_parse_format", &self.date_parse_format)
            .field("default", &"<supplier>")
            .finish()
    }
}

/// Year 0, January 1, midnight (proleptic Gregorian). Naive timestamps
/// carry no zone; callers treating values as UTC is a convention, not an
/// enforcement.
fn epoch_zero() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(0, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn stock_default_is_epoch_zero() {
        let config = SplitConfig::new();
        let base = config.default_timestamp();
        assert_eq!(
            (base.year(), base.month(), base.day()),
            (0, 1, 1)
        );
        assert_eq!((base.hour(), base.minute(), base.second()), (0, 0, 0));
    }

    #[test]
    fn custom_default_supplier_wins() {
        let config = SplitConfig::new().with_default(|| {
            NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap()
        });
        assert_eq!(
            config.default_timestamp(),
            NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap()
        );
    }

    #[test]
    fn builder_settings_stick() {
        let config = SplitConfig::new()
            .with_date_format("%d/%m/%Y")
            .with_time_format("%H:%M")
            .with_date_parse_format("%Y.%m.%d");
        assert_eq!(config.date_format, "%d/%m/%Y");
        assert_eq!(config.time_format.as_deref(), Some("%H:%M"));
        assert_eq!(config.date_parse_format.as_deref(), Some("%Y.%m.%d"));
    }
}
