//! Error types for datepicker-engine operations.

use thiserror::Error;

use crate::date::CalendarDate;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PickerError {
    #[error("Invalid range: min {min} is after max {max}")]
    InvalidRange { min: CalendarDate, max: CalendarDate },

    #[error("Date {date} is outside the selectable range")]
    OutOfRange { date: CalendarDate },

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, PickerError>;
