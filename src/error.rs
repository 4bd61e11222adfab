//! Error types for split accessor operations

use thiserror::Error;

/// Result type for split accessor operations
pub type SplitResult<T> = Result<T, SplitError>;

/// Errors that can occur while reading or writing a derived accessor
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SplitError {
    /// Input string does not match the expected pattern
    #[error("malformed {component} input '{input}', expected {expected}")]
    MalformedInput {
        /// Component the input was addressed to
        component: String,
        /// Raw input as received
        input: String,
        /// Pattern or shape the input was checked against
        expected: String,
    },

    /// Numeric component outside its domain, or a merge that does not
    /// denote a real timestamp (e.g. day 31 of a 30-day month)
    #[error("{component} value {value} is out of range")]
    OutOfRange {
        /// Component being written
        component: String,
        /// Rejected value
        value: i64,
    },

    /// Form parameter suffix that names no derived accessor
    #[error("'{name}' does not name a derived accessor")]
    UnknownComponent {
        /// Offending parameter suffix
        name: String,
    },
}
