//! Error types for recur-mapper operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapperError {
    /// The grammar parser rejected the rule text.
    #[error("Invalid RRULE: {0}")]
    InvalidRule(String),

    /// `to_rule` was called on settings with no frequency selected.
    #[error("Recurrence settings have no frequency")]
    MissingFrequency,

    #[error("Interval must be at least 1, got {0}")]
    InvalidInterval(u16),

    #[error("Month of year must be between 1 and 12, got {0}")]
    InvalidMonth(u8),

    /// BYDAY carried an ordinal prefix the widget cannot represent.
    #[error("Unsupported week ordinal: {0} (expected -1 or +1..+5)")]
    UnsupportedOrdinal(i16),

    #[error("Unknown frequency: {0}")]
    UnknownFrequency(String),

    #[error("Unknown weekday code: {0}")]
    UnknownWeekday(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid reference date: {0}")]
    InvalidReference(String),

    #[error("Invalid widget config: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MapperError>;
