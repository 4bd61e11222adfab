//! Strict and generic parsers for form input strings

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

use crate::component::Component;
use crate::config::SplitConfig;
use crate::error::{SplitError, SplitResult};

// Generic parsers accept ISO-flavored input only; anything looser has to
// come in through an explicit format on the declaration.
static GENERIC_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,4})[-/](\d{1,2})[-/](\d{1,2})$").unwrap());
static GENERIC_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2}):(\d{1,2})(?::(\d{1,2}))?$").unwrap());

/// Parse a `date` input.
///
/// An explicit parse format is strict. Otherwise the declaration's output
/// date format is tried first (so formatted reads always round-trip), and
/// the generic `YYYY-MM-DD` / `YYYY/MM/DD` parser is the fallback.
pub fn parse_date(input: &str, config: &SplitConfig) -> SplitResult<NaiveDate> {
    if let Some(format) = config.date_parse_format.as_deref() {
        return NaiveDate::parse_from_str(input, format).map_err(|_| malformed(
            Component::Date,
            input,
            format!("pattern '{format}'"),
        ));
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, &config.date_format) {
        return Ok(date);
    }

    let captures = GENERIC_DATE.captures(input).ok_or_else(|| {
        malformed(
            Component::Date,
            input,
            format!("pattern '{}' or a date like 2024-12-31", config.date_format),
        )
    })?;
    let year: i32 = captures[1].parse().unwrap();
    let month: u32 = captures[2].parse().unwrap();
    let day: u32 = captures[3].parse().unwrap();
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| malformed(Component::Date, input, "a real calendar date"))
}

/// Parse a `time` input: with the declaration's time format when one is
/// configured, otherwise through the generic `HH:MM[:SS]` parser.
pub fn parse_time(input: &str, config: &SplitConfig) -> SplitResult<NaiveTime> {
    if let Some(format) = config.time_format.as_deref() {
        return NaiveTime::parse_from_str(input, format).map_err(|_| malformed(
            Component::Time,
            input,
            format!("pattern '{format}'"),
        ));
    }

    let captures = GENERIC_TIME
        .captures(input)
        .ok_or_else(|| malformed(Component::Time, input, "a time like 08:33"))?;
    let hour: u32 = captures[1].parse().unwrap();
    let minute: u32 = captures[2].parse().unwrap();
    let second: u32 = captures.get(3).map_or(0, |s| s.as_str().parse().unwrap());
    NaiveTime::from_hms_opt(hour, minute, second)
        .ok_or_else(|| malformed(Component::Time, input, "a real time of day"))
}

/// Parse a numeric component input (`year`, `month`, `day`, `hour`, `min`).
pub fn parse_int(component: Component, input: &str) -> SplitResult<i64> {
    input
        .parse::<i64>()
        .map_err(|_| malformed(component, input, "an integer"))
}

fn malformed(component: Component, input: &str, expected: impl Into<String>) -> SplitError {
    SplitError::MalformedInput {
        component: component.to_string(),
        input: input.to_string(),
        expected: expected.into(),
    }
}
