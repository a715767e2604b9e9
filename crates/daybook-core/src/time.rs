//! Time-of-day intervals.
//!
//! A [`TimeInterval`] is the slot an event occupies within a single day. It
//! never wraps past midnight and is never empty.

use std::fmt;

use chrono::{Duration, NaiveTime};
use serde::Serialize;

use crate::error::{CalendarError, CalendarResult};

/// A half-open interval `[start, end)` within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimeInterval {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeInterval {
    /// Creates a new interval.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidInterval`] if `end` is not strictly
    /// after `start`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> CalendarResult<Self> {
        if end <= start {
            return Err(CalendarError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates an interval from hour/minute pairs.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidTime`] for a component outside the
    /// clock, then fails as [`TimeInterval::new`] does.
    pub fn from_hm(start: (u32, u32), end: (u32, u32)) -> CalendarResult<Self> {
        Self::new(clock_time(start)?, clock_time(end)?)
    }

    /// Returns the start time (inclusive).
    pub fn start(&self) -> NaiveTime {
        self.start
    }

    /// Returns the end time (exclusive).
    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Returns the length of the interval.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Returns true if the two intervals share any instant.
    ///
    /// `[a, b)` and `[c, d)` conflict iff `a < d && c < b`. An interval that
    /// ends exactly when the other starts does not conflict.
    pub fn is_conflicting(&self, other: &TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

fn clock_time((hour, minute): (u32, u32)) -> CalendarResult<NaiveTime> {
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or(CalendarError::InvalidTime { hour, minute })
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}
