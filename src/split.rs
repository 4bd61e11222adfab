//! The bound accessor engine: read, merge, write

use std::fmt::Write as _;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use log::{debug, trace};

use crate::component::{Component, ComponentValue};
use crate::config::SplitConfig;
use crate::error::{SplitError, SplitResult};
use crate::parse;

/// Read-only view over a base timestamp field.
///
/// Usable from `&self` host methods; every reader reports absence (`None`)
/// when the field is unset. Reads never materialize the configured
/// default.
#[derive(Debug, Clone, Copy)]
pub struct SplitView<'a> {
    base: Option<&'a NaiveDateTime>,
    config: &'a SplitConfig,
}

impl<'a> SplitView<'a> {
    /// Bind a read-only view to a field and its declaration config.
    pub fn new(base: Option<&'a NaiveDateTime>, config: &'a SplitConfig) -> Self {
        Self { base, config }
    }

    /// Current base value, if set.
    pub fn get(&self) -> Option<NaiveDateTime> {
        self.base.copied()
    }

    /// Calendar year of the base value.
    pub fn year(&self) -> Option<i32> {
        self.get().map(|t| t.year())
    }

    /// Calendar month of the base value.
    pub fn month(&self) -> Option<u32> {
        self.get().map(|t| t.month())
    }

    /// Day of month of the base value.
    pub fn day(&self) -> Option<u32> {
        self.get().map(|t| t.day())
    }

    /// Hour of day of the base value.
    pub fn hour(&self) -> Option<u32> {
        self.get().map(|t| t.hour())
    }

    /// Minute of hour of the base value.
    pub fn min(&self) -> Option<u32> {
        self.get().map(|t| t.minute())
    }

    /// Date part of the base value.
    pub fn date_value(&self) -> Option<NaiveDate> {
        self.get().map(|t| t.date())
    }

    /// Time-of-day part of the base value.
    pub fn time_value(&self) -> Option<NaiveTime> {
        self.get().map(|t| t.time())
    }

    /// Date part rendered with the declaration's date format.
    ///
    /// A format string chrono cannot render yields `None`; the declaration
    /// owns its patterns.
    pub fn date(&self) -> Option<String> {
        let date = self.date_value()?;
        render(date.format(&self.config.date_format))
    }

    /// Time-of-day part, rendered with the declaration's time format when
    /// one is set, raw (`HH:MM:SS`) otherwise.
    pub fn time(&self) -> Option<String> {
        let time = self.time_value()?;
        match self.config.time_format.as_deref() {
            Some(format) => render(time.format(format)),
            None => Some(time.to_string()),
        }
    }

    /// Read one component in its form-field shape.
    pub fn read(&self, component: Component) -> Option<ComponentValue> {
        match component {
            Component::Date => self.date().map(ComponentValue::Text),
            Component::Year => self.year().map(|v| ComponentValue::Int(v.into())),
            Component::Month => self.month().map(|v| ComponentValue::Int(v.into())),
            Component::Day => self.day().map(|v| ComponentValue::Int(v.into())),
            Component::Hour => self.hour().map(|v| ComponentValue::Int(v.into())),
            Component::Min => self.min().map(|v| ComponentValue::Int(v.into())),
            Component::Time => self.time().map(ComponentValue::Text),
        }
    }
}

fn render(formatted: impl std::fmt::Display) -> Option<String> {
    let mut out = String::new();
    match write!(out, "{formatted}") {
        Ok(()) => Some(out),
        Err(_) => {
            debug!("date/time format failed to render, reporting absence");
            None
        }
    }
}

/// Read/write accessor bound to a base timestamp field.
///
/// Writes merge into the current value, or into the configured default
/// when the field is unset; exactly the addressed component is replaced
/// and every other one, seconds included, is preserved.
#[derive(Debug)]
pub struct Split<'a> {
    base: &'a mut Option<NaiveDateTime>,
    config: &'a SplitConfig,
}

impl<'a> Split<'a> {
    /// Bind an accessor to a field and its declaration config.
    pub fn new(base: &'a mut Option<NaiveDateTime>, config: &'a SplitConfig) -> Self {
        Self { base, config }
    }

    /// Read-only view with the same binding.
    pub fn view(&self) -> SplitView<'_> {
        SplitView::new(self.base.as_ref(), self.config)
    }

    /// The declaration config this accessor was bound with.
    pub fn config(&self) -> &SplitConfig {
        self.config
    }

    /// Current base value, if set.
    pub fn get(&self) -> Option<NaiveDateTime> {
        *self.base
    }

    /// Reset the base field to absence.
    pub fn clear(&mut self) {
        *self.base = None;
    }

    // Readers, mirroring `SplitView`.

    /// Calendar year of the base value.
    pub fn year(&self) -> Option<i32> {
        self.view().year()
    }

    /// Calendar month of the base value.
    pub fn month(&self) -> Option<u32> {
        self.view().month()
    }

    /// Day of month of the base value.
    pub fn day(&self) -> Option<u32> {
        self.view().day()
    }

    /// Hour of day of the base value.
    pub fn hour(&self) -> Option<u32> {
        self.view().hour()
    }

    /// Minute of hour of the base value.
    pub fn min(&self) -> Option<u32> {
        self.view().min()
    }

    /// Date part rendered with the declaration's date format.
    pub fn date(&self) -> Option<String> {
        self.view().date()
    }

    /// Time-of-day part rendered per the declaration.
    pub fn time(&self) -> Option<String> {
        self.view().time()
    }

    /// Read one component in its form-field shape.
    pub fn read(&self, component: Component) -> Option<ComponentValue> {
        self.view().read(component)
    }

    /// Merge base: the current value, or the configured default when the
    /// field is unset. Only writes call this.
    fn or_new(&self) -> NaiveDateTime {
        self.base
            .unwrap_or_else(|| self.config.default_timestamp())
    }

    fn store(&mut self, merged: NaiveDateTime) {
        trace!("base timestamp merged to {merged}");
        *self.base = Some(merged);
    }

    // Typed writers.

    /// Replace the calendar year.
    pub fn set_year(&mut self, year: i32) -> SplitResult<()> {
        let merged = self
            .or_new()
            .with_year(year)
            .ok_or_else(|| out_of_range(Component::Year, year.into()))?;
        self.store(merged);
        Ok(())
    }

    /// Replace the calendar month.
    pub fn set_month(&mut self, month: u32) -> SplitResult<()> {
        let merged = self
            .or_new()
            .with_month(month)
            .ok_or_else(|| out_of_range(Component::Month, month.into()))?;
        self.store(merged);
        Ok(())
    }

    /// Replace the day of month.
    pub fn set_day(&mut self, day: u32) -> SplitResult<()> {
        let merged = self
            .or_new()
            .with_day(day)
            .ok_or_else(|| out_of_range(Component::Day, day.into()))?;
        self.store(merged);
        Ok(())
    }

    /// Replace the hour; minute and second are preserved.
    pub fn set_hour(&mut self, hour: u32) -> SplitResult<()> {
        let merged = self
            .or_new()
            .with_hour(hour)
            .ok_or_else(|| out_of_range(Component::Hour, hour.into()))?;
        self.store(merged);
        Ok(())
    }

    /// Replace the minute.
    pub fn set_min(&mut self, minute: u32) -> SplitResult<()> {
        let merged = self
            .or_new()
            .with_minute(minute)
            .ok_or_else(|| out_of_range(Component::Min, minute.into()))?;
        self.store(merged);
        Ok(())
    }

    /// Replace the whole date part; time-of-day is preserved.
    ///
    /// The date is replaced wholesale rather than component by component,
    /// so a Jan 31 base can move to Feb 10 without a transient invalid
    /// intermediate.
    pub fn set_date(&mut self, date: NaiveDate) {
        let merged = date.and_time(self.or_new().time());
        self.store(merged);
    }

    /// Replace hour and minute from a time-of-day; date and second are
    /// preserved.
    pub fn set_time(&mut self, time: NaiveTime) -> SplitResult<()> {
        let merged = self
            .or_new()
            .with_hour(time.hour())
            .and_then(|t| t.with_minute(time.minute()))
            .ok_or_else(|| out_of_range(Component::Time, time.hour().into()))?;
        self.store(merged);
        Ok(())
    }

    // String writers, the form path: blank input is a defined no-op.

    /// Parse and write a `date` input string. Blank input is a no-op.
    pub fn set_date_str(&mut self, input: &str) -> SplitResult<()> {
        self.assign(Component::Date, input)
    }

    /// Parse and write a `time` input string. Blank input is a no-op.
    pub fn set_time_str(&mut self, input: &str) -> SplitResult<()> {
        self.assign(Component::Time, input)
    }

    /// Write one component from a raw form value.
    ///
    /// The input is trimmed; an empty result leaves the base untouched and
    /// returns `Ok`, so forms may submit blank fields freely. Anything
    /// else is parsed per component and merged.
    pub fn assign(&mut self, component: Component, raw: &str) -> SplitResult<()> {
        let input = raw.trim();
        if input.is_empty() {
            debug!("ignoring empty {component} input");
            return Ok(());
        }
        match component {
            Component::Date => {
                let date = parse::parse_date(input, self.config)?;
                self.set_date(date);
                Ok(())
            }
            Component::Time => {
                let time = parse::parse_time(input, self.config)?;
                self.set_time(time)
            }
            Component::Year => {
                let value = parse::parse_int(component, input)?;
                let year = i32::try_from(value)
                    .map_err(|_| out_of_range(component, value))?;
                self.set_year(year)
            }
            Component::Month | Component::Day | Component::Hour | Component::Min => {
                let value = parse::parse_int(component, input)?;
                let narrowed = u32::try_from(value)
                    .map_err(|_| out_of_range(component, value))?;
                match component {
                    Component::Month => self.set_month(narrowed),
                    Component::Day => self.set_day(narrowed),
                    Component::Hour => self.set_hour(narrowed),
                    _ => self.set_min(narrowed),
                }
            }
        }
    }

    /// Apply `(suffix, value)` parameter pairs in submission order,
    /// stopping at the first error. Suffixes that name no derived accessor
    /// fail with [`SplitError::UnknownComponent`].
    pub fn apply<I, K, V>(&mut self, params: I) -> SplitResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (name, value) in params {
            let suffix = name.as_ref();
            let component = Component::from_suffix(suffix).ok_or_else(|| {
                SplitError::UnknownComponent {
                    name: suffix.to_string(),
                }
            })?;
            self.assign(component, value.as_ref())?;
        }
        Ok(())
    }
}

fn out_of_range(component: Component, value: i64) -> SplitError {
    SplitError::OutOfRange {
        component: component.to_string(),
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    #[test]
    fn readers_report_absence_on_unset_base() {
        let config = SplitConfig::new();
        let base = None;
        let view = SplitView::new(base.as_ref(), &config);
        assert_eq!(view.get(), None);
        assert_eq!(view.year(), None);
        assert_eq!(view.date(), None);
        assert_eq!(view.time(), None);
        for component in Component::ALL {
            assert_eq!(view.read(component), None);
        }
    }

    #[test]
    fn writes_touch_only_their_component() {
        let config = SplitConfig::new();
        let mut base = Some(ts(2222, 12, 22, 13, 44, 17));
        let mut split = Split::new(&mut base, &config);

        split.set_hour(11).unwrap();
        assert_eq!(split.get(), Some(ts(2222, 12, 22, 11, 44, 17)));

        split.set_min(55).unwrap();
        assert_eq!(split.get(), Some(ts(2222, 12, 22, 11, 55, 17)));

        split.set_year(1999).unwrap();
        assert_eq!(split.get(), Some(ts(1999, 12, 22, 11, 55, 17)));
    }

    #[test]
    fn date_write_preserves_time_of_day() {
        let config = SplitConfig::new();
        let mut base = Some(ts(2222, 12, 22, 13, 44, 0));
        let mut split = Split::new(&mut base, &config);

        split.set_date_str("1111-01-01").unwrap();
        assert_eq!(split.get(), Some(ts(1111, 1, 1, 13, 44, 0)));
    }

    #[test]
    fn time_write_preserves_date_and_second() {
        let config = SplitConfig::new();
        let mut base = Some(ts(2222, 12, 22, 13, 44, 17));
        let mut split = Split::new(&mut base, &config);

        split.set_time_str("08:33").unwrap();
        assert_eq!(split.get(), Some(ts(2222, 12, 22, 8, 33, 17)));
    }

    #[test]
    fn absent_base_merges_into_the_default() {
        let config = SplitConfig::new();
        let mut base = None;
        let mut split = Split::new(&mut base, &config);

        split.set_min(55).unwrap();
        assert_eq!(split.get(), Some(ts(0, 1, 1, 0, 55, 0)));
    }

    #[test]
    fn default_is_lazy_and_never_read_back() {
        let config = SplitConfig::new();
        let mut base = None;
        let split = Split::new(&mut base, &config);
        assert_eq!(split.min(), None);
        assert_eq!(split.get(), None);
    }

    #[test]
    fn blank_input_is_a_no_op_for_every_component() {
        let config = SplitConfig::new();
        let original = ts(2222, 12, 22, 13, 44, 0);
        let mut base = Some(original);
        let mut split = Split::new(&mut base, &config);

        for component in Component::ALL {
            split.assign(component, "").unwrap();
            split.assign(component, "   ").unwrap();
        }
        assert_eq!(split.get(), Some(original));
    }

    #[test]
    fn whole_date_replacement_avoids_transient_invalids() {
        let config = SplitConfig::new();
        let mut base = Some(ts(2020, 1, 31, 9, 0, 0));
        let mut split = Split::new(&mut base, &config);

        split.set_date_str("2020-02-10").unwrap();
        assert_eq!(split.get(), Some(ts(2020, 2, 10, 9, 0, 0)));
    }

    #[test]
    fn out_of_range_merges_are_rejected() {
        let config = SplitConfig::new();
        let mut base = Some(ts(2020, 1, 31, 9, 0, 0));
        let mut split = Split::new(&mut base, &config);

        assert_eq!(
            split.set_month(2),
            Err(SplitError::OutOfRange {
                component: "month".to_string(),
                value: 2,
            })
        );
        assert!(split.set_hour(24).is_err());
        assert!(split.set_min(60).is_err());
        // Failed merges leave the base untouched.
        assert_eq!(split.get(), Some(ts(2020, 1, 31, 9, 0, 0)));
    }

    #[test]
    fn apply_routes_suffixes_in_order() {
        let config = SplitConfig::new();
        let mut base = None;
        let mut split = Split::new(&mut base, &config);

        split
            .apply([("date", "2024-06-03"), ("hour", "14"), ("min", "5")])
            .unwrap();
        assert_eq!(split.get(), Some(ts(2024, 6, 3, 14, 5, 0)));
    }

    #[test]
    fn apply_rejects_unknown_suffixes() {
        let config = SplitConfig::new();
        let mut base = None;
        let mut split = Split::new(&mut base, &config);

        assert_eq!(
            split.apply([("sec", "30")]),
            Err(SplitError::UnknownComponent {
                name: "sec".to_string(),
            })
        );
        assert_eq!(split.get(), None);
    }

    #[test]
    fn read_yields_form_shaped_values() {
        let config = SplitConfig::new();
        let base = Some(ts(2222, 12, 22, 13, 44, 0));
        let view = SplitView::new(base.as_ref(), &config);

        assert_eq!(
            view.read(Component::Date),
            Some(ComponentValue::Text("2222-12-22".to_string()))
        );
        assert_eq!(view.read(Component::Hour), Some(ComponentValue::Int(13)));
        assert_eq!(
            view.read(Component::Time),
            Some(ComponentValue::Text("13:44:00".to_string()))
        );
    }

    #[test]
    fn clear_resets_to_absence() {
        let config = SplitConfig::new();
        let mut base = Some(ts(2222, 12, 22, 13, 44, 0));
        let mut split = Split::new(&mut base, &config);
        split.clear();
        assert_eq!(split.get(), None);
        assert_eq!(split.date(), None);
    }
}
