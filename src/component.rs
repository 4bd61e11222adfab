//! The derived accessor family and its form-field naming

use std::fmt;

use serde::{Deserialize, Serialize};

/// One derived accessor over the base timestamp field.
///
/// The family is closed: these seven components are what a split form can
/// address, and the form-field suffix of each (`starts_at_date`,
/// `starts_at_hour`, ...) is fixed by [`Component::suffix`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    /// Whole date part (year, month and day at once)
    Date,
    /// Calendar year
    Year,
    /// Calendar month (1-12)
    Month,
    /// Day of month (1-31)
    Day,
    /// Hour of day (0-23)
    Hour,
    /// Minute of hour (0-59)
    Min,
    /// Time-of-day part (hour and minute at once)
    Time,
}

impl Component {
    /// All components, in the order form fields are conventionally laid out.
    pub const ALL: [Component; 7] = [
        Component::Date,
        Component::Year,
        Component::Month,
        Component::Day,
        Component::Hour,
        Component::Min,
        Component::Time,
    ];

    /// Form-field suffix for this component.
    pub fn suffix(&self) -> &'static str {
        match self {
            Component::Date => "date",
            Component::Year => "year",
            Component::Month => "month",
            Component::Day => "day",
            Component::Hour => "hour",
            Component::Min => "min",
            Component::Time => "time",
        }
    }

    /// Resolve a form-field suffix back to its component.
    pub fn from_suffix(name: &str) -> Option<Component> {
        Component::ALL.iter().copied().find(|c| c.suffix() == name)
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Value produced by reading a derived accessor, in the shape a form
/// field renders: integers for the numeric components, formatted text
/// for `date` and `time`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComponentValue {
    /// Numeric component (`year`, `month`, `day`, `hour`, `min`)
    Int(i64),
    /// Formatted component (`date`, `time`)
    Text(String),
}

impl fmt::Display for ComponentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentValue::Int(n) => write!(f, "{n}"),
            ComponentValue::Text(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_round_trips() {
        for component in Component::ALL {
            assert_eq!(Component::from_suffix(component.suffix()), Some(component));
        }
    }

    #[test]
    fn unknown_suffix_resolves_to_none() {
        assert_eq!(Component::from_suffix("sec"), None);
        assert_eq!(Component::from_suffix(""), None);
        assert_eq!(Component::from_suffix("DATE"), None);
    }

    #[test]
    fn component_value_displays_like_a_form_field() {
        assert_eq!(ComponentValue::Int(7).to_string(), "7");
        assert_eq!(ComponentValue::Text("08:33".into()).to_string(), "08:33");
    }
}
