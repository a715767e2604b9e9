//! Calendar error types.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

/// Result type for calendar operations.
pub type CalendarResult<T> = Result<T, CalendarError>;

/// Errors returned by the calendar engine.
///
/// None of these are fatal: the caller reports the failure and carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    /// The end of a time interval is not after its start.
    #[error("invalid interval: end {end} is not after start {start}")]
    InvalidInterval { start: NaiveTime, end: NaiveTime },

    /// An hour or minute is outside the clock.
    #[error("invalid time {hour}:{minute:02}")]
    InvalidTime { hour: u32, minute: u32 },

    /// A recurrence range or weekday set cannot produce any occurrence.
    #[error("invalid range {start} to {end}: {reason}")]
    InvalidRange {
        start: NaiveDate,
        end: NaiveDate,
        reason: &'static str,
    },

    /// The new event overlaps an event already stored on the same date.
    #[error("conflicts with \"{existing}\" ({interval}) on {date}")]
    Conflict {
        existing: String,
        date: NaiveDate,
        interval: String,
    },

    /// No event with this name exists on this date.
    #[error("no event named \"{name}\" on {date}")]
    NotFound { name: String, date: NaiveDate },
}

impl CalendarError {
    /// Creates an invalid range error.
    pub fn invalid_range(start: NaiveDate, end: NaiveDate, reason: &'static str) -> Self {
        Self::InvalidRange { start, end, reason }
    }

    /// Creates a not found error.
    pub fn not_found(name: impl Into<String>, date: NaiveDate) -> Self {
        Self::NotFound {
            name: name.into(),
            date,
        }
    }

    /// Returns true if this error reports a scheduling conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}
