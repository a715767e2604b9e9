//! Event types for calendar entries.
//!
//! This module provides:
//! - [`Event`]: a named time slot, either one-time or weekly recurring
//! - [`EventKind`]: the variant-specific part of an event

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::error::CalendarResult;
use crate::recurrence::{Recurrence, WeekdaySet};
use crate::time::TimeInterval;

/// What makes an event one-time or recurring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// Happens once, on `date`.
    OneTime { date: NaiveDate },
    /// Repeats weekly; see [`Recurrence`].
    Recurring(Recurrence),
}

/// A calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    name: String,
    interval: TimeInterval,
    #[serde(flatten)]
    kind: EventKind,
}

impl Event {
    /// Creates a one-time event.
    pub fn one_time(name: impl Into<String>, date: NaiveDate, interval: TimeInterval) -> Self {
        Self {
            name: name.into(),
            interval,
            kind: EventKind::OneTime { date },
        }
    }

    /// Creates a recurring event, expanding its occurrence dates.
    ///
    /// # Errors
    ///
    /// Fails with [`crate::CalendarError::InvalidRange`] when the range or
    /// weekday set produces no occurrence.
    pub fn recurring(
        name: impl Into<String>,
        weekdays: WeekdaySet,
        range_start: NaiveDate,
        range_end: NaiveDate,
        interval: TimeInterval,
    ) -> CalendarResult<Self> {
        let recurrence = Recurrence::new(weekdays, range_start, range_end)?;
        Ok(Self {
            name: name.into(),
            interval,
            kind: EventKind::Recurring(recurrence),
        })
    }

    /// Returns the event name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the time slot.
    pub fn interval(&self) -> TimeInterval {
        self.interval
    }

    /// Returns the start time of the slot.
    pub fn start(&self) -> NaiveTime {
        self.interval.start()
    }

    /// Returns the variant-specific data.
    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut EventKind {
        &mut self.kind
    }

    /// Returns true for one-time events.
    pub fn is_one_time(&self) -> bool {
        matches!(self.kind, EventKind::OneTime { .. })
    }

    /// Returns true for recurring events.
    pub fn is_recurring(&self) -> bool {
        matches!(self.kind, EventKind::Recurring(_))
    }

    /// Returns the recurrence, if this is a recurring event.
    pub fn recurrence(&self) -> Option<&Recurrence> {
        match &self.kind {
            EventKind::Recurring(recurrence) => Some(recurrence),
            EventKind::OneTime { .. } => None,
        }
    }

    /// Returns every date the event currently occupies.
    pub fn dates(&self) -> &[NaiveDate] {
        match &self.kind {
            EventKind::OneTime { date } => std::slice::from_ref(date),
            EventKind::Recurring(recurrence) => recurrence.dates(),
        }
    }

    /// Key used to order event listings.
    ///
    /// One-time events sort by `(date, start)`, recurring events by
    /// `(range_start, start)`.
    pub fn sort_key(&self) -> (NaiveDate, NaiveTime) {
        let date = match &self.kind {
            EventKind::OneTime { date } => *date,
            EventKind::Recurring(recurrence) => recurrence.range_start(),
        };
        (date, self.start())
    }
}
