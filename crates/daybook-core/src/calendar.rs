//! The calendar store.
//!
//! Events live in an arena keyed by an opaque handle. A date index maps every
//! occupied date to the handles of the events on it, so a recurring event is
//! stored once and referenced from each of its occurrence dates. Two ordered
//! handle lists back the one-time and recurring listings.
//!
//! Every add is checked for conflicts against all events already on each of
//! the new event's dates, whatever their kind, and is rejected as a whole.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Local, NaiveDate};
use tracing::{debug, trace};

use crate::cursor::Cursor;
use crate::error::{CalendarError, CalendarResult};
use crate::event::{Event, EventKind};
use crate::grid::MonthGrid;
use crate::recurrence::WeekdaySet;
use crate::time::TimeInterval;

/// Handle of a stored event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct EventId(u64);

/// An in-memory calendar of one-time and weekly recurring events.
#[derive(Debug, Clone)]
pub struct Calendar {
    /// Event records keyed by handle.
    records: BTreeMap<EventId, Event>,
    /// Occupied dates mapped to the events on them. Never holds an empty set.
    by_date: BTreeMap<NaiveDate, BTreeSet<EventId>>,
    /// One-time events ordered by `(date, start)`.
    one_time: Vec<EventId>,
    /// Recurring events ordered by `(range_start, start)`.
    recurring: Vec<EventId>,
    next_id: u64,
    cursor: Cursor,
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new()
    }
}

impl Calendar {
    /// Creates an empty calendar with the cursor on the local current date.
    pub fn new() -> Self {
        Self::with_today(Local::now().date_naive())
    }

    /// Creates an empty calendar that treats `today` as the current date.
    pub fn with_today(today: NaiveDate) -> Self {
        Self {
            records: BTreeMap::new(),
            by_date: BTreeMap::new(),
            one_time: Vec::new(),
            recurring: Vec::new(),
            next_id: 0,
            cursor: Cursor::new(today),
        }
    }

    // ---------------------------------------------------------------------
    // Adding
    // ---------------------------------------------------------------------

    /// Adds a one-time event.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::Conflict`] if the interval overlaps any event
    /// already on `date`. Nothing is stored in that case.
    pub fn add_one_time(
        &mut self,
        name: impl Into<String>,
        date: NaiveDate,
        interval: TimeInterval,
    ) -> CalendarResult<()> {
        self.add(Event::one_time(name, date, interval))
    }

    /// Adds a weekly recurring event.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidRange`] if the pattern produces no
    /// occurrence, or [`CalendarError::Conflict`] if any occurrence overlaps an
    /// event already on that date. Nothing is stored in either case.
    pub fn add_recurring(
        &mut self,
        name: impl Into<String>,
        weekdays: WeekdaySet,
        range_start: NaiveDate,
        range_end: NaiveDate,
        interval: TimeInterval,
    ) -> CalendarResult<()> {
        self.add(Event::recurring(
            name,
            weekdays,
            range_start,
            range_end,
            interval,
        )?)
    }

    /// Adds an already constructed event.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::Conflict`] if the event overlaps an existing
    /// event on any of its dates.
    pub fn add(&mut self, event: Event) -> CalendarResult<()> {
        if let Err(err) = self.check_conflicts(&event) {
            debug!(name = %event.name(), error = %err, "Rejected event");
            return Err(err);
        }

        let id = EventId(self.next_id);
        self.next_id += 1;

        for date in event.dates() {
            self.by_date.entry(*date).or_default().insert(id);
        }

        let list = match event.kind() {
            EventKind::OneTime { date } => {
                debug!(name = %event.name(), %date, interval = %event.interval(), "Added one-time event");
                &mut self.one_time
            }
            EventKind::Recurring(recurrence) => {
                debug!(
                    name = %event.name(),
                    weekdays = %recurrence.weekdays(),
                    occurrences = recurrence.dates().len(),
                    "Added recurring event"
                );
                &mut self.recurring
            }
        };
        self.records.insert(id, event);
        list.push(id);
        reorder(&self.records, list);

        Ok(())
    }

    fn check_conflicts(&self, event: &Event) -> CalendarResult<()> {
        let interval = event.interval();
        for date in event.dates() {
            let Some(ids) = self.by_date.get(date) else {
                continue;
            };
            for existing in ids.iter().filter_map(|id| self.records.get(id)) {
                if interval.is_conflicting(&existing.interval()) {
                    return Err(CalendarError::Conflict {
                        existing: existing.name().to_string(),
                        date: *date,
                        interval: existing.interval().to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Deleting
    // ---------------------------------------------------------------------

    /// Deletes every event named `name` from `date`.
    ///
    /// A one-time event is removed entirely. A recurring event only loses
    /// this occurrence, and is removed once it has none left.
    ///
    /// Returns the number of events removed from the date.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::NotFound`] if no event with that name is on
    /// `date`.
    pub fn delete_by_name_and_date(&mut self, name: &str, date: NaiveDate) -> CalendarResult<usize> {
        let matched: Vec<EventId> = self
            .by_date
            .get(&date)
            .map(|ids| {
                ids.iter()
                    .copied()
                    .filter(|id| self.records.get(id).is_some_and(|e| e.name() == name))
                    .collect()
            })
            .unwrap_or_default();

        if matched.is_empty() {
            return Err(CalendarError::not_found(name, date));
        }

        for id in &matched {
            self.unindex(*id, date);
            self.release_occurrence(*id, date);
        }
        debug!(%name, %date, removed = matched.len(), "Deleted event");
        Ok(matched.len())
    }

    /// Deletes everything on `date`, including recurring occurrences.
    ///
    /// Returns the number of events removed from the date.
    pub fn delete_all_on(&mut self, date: NaiveDate) -> usize {
        let Some(ids) = self.by_date.remove(&date) else {
            return 0;
        };
        for id in &ids {
            self.release_occurrence(*id, date);
        }
        debug!(%date, removed = ids.len(), "Deleted all events on date");
        ids.len()
    }

    /// Deletes every recurring event with all of its occurrences.
    ///
    /// Returns the number of recurring events removed.
    pub fn delete_all_recurring(&mut self) -> usize {
        let ids = std::mem::take(&mut self.recurring);
        for id in &ids {
            if let Some(event) = self.records.remove(id) {
                for date in event.dates() {
                    self.unindex(*id, *date);
                }
            }
        }
        debug!(removed = ids.len(), "Deleted all recurring events");
        ids.len()
    }

    /// Deletes every event. The cursor is left untouched.
    ///
    /// Returns the number of events removed.
    pub fn delete_all(&mut self) -> usize {
        let removed = self.records.len();
        self.records.clear();
        self.by_date.clear();
        self.one_time.clear();
        self.recurring.clear();
        debug!(removed, "Deleted all events");
        removed
    }

    fn unindex(&mut self, id: EventId, date: NaiveDate) {
        if let Some(ids) = self.by_date.get_mut(&date) {
            ids.remove(&id);
            if ids.is_empty() {
                self.by_date.remove(&date);
            }
        }
    }

    /// Drops the record side of an occurrence that has left the date index.
    fn release_occurrence(&mut self, id: EventId, date: NaiveDate) {
        let Some(event) = self.records.get_mut(&id) else {
            return;
        };
        let exhausted = match event.kind_mut() {
            EventKind::OneTime { .. } => true,
            EventKind::Recurring(recurrence) => {
                recurrence.remove_date(date);
                recurrence.is_exhausted()
            }
        };
        if exhausted {
            trace!(?id, "Releasing event record");
            self.records.remove(&id);
            self.one_time.retain(|other| *other != id);
            self.recurring.retain(|other| *other != id);
        }
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    /// Returns the events on `date` ordered by start time.
    pub fn events_on(&self, date: NaiveDate) -> Vec<&Event> {
        let mut events: Vec<&Event> = self
            .by_date
            .get(&date)
            .into_iter()
            .flatten()
            .filter_map(|id| self.records.get(id))
            .collect();
        events.sort_by(|a, b| a.start().cmp(&b.start()).then_with(|| a.name().cmp(b.name())));
        events
    }

    /// Returns true if any event occurs on `date`.
    pub fn has_events_on(&self, date: NaiveDate) -> bool {
        self.by_date.contains_key(&date)
    }

    /// Iterates one-time events ordered by `(date, start)`.
    pub fn one_time_events(&self) -> impl Iterator<Item = &Event> + '_ {
        self.one_time.iter().filter_map(|id| self.records.get(id))
    }

    /// Iterates recurring events ordered by `(range_start, start)`.
    pub fn recurring_events(&self) -> impl Iterator<Item = &Event> + '_ {
        self.recurring.iter().filter_map(|id| self.records.get(id))
    }

    /// Returns the dates that hold at least one event, ascending.
    pub fn occupied_dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.by_date.keys().copied()
    }

    /// Returns the number of stored events (a recurring event counts once).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no event is stored.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Lays out the month containing `day`.
    pub fn month_grid(&self, day: NaiveDate) -> MonthGrid {
        MonthGrid::new(day)
    }

    // ---------------------------------------------------------------------
    // Navigation
    // ---------------------------------------------------------------------

    /// Returns the navigation cursor.
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Returns the date the calendar treats as today.
    pub fn today(&self) -> NaiveDate {
        self.cursor.today()
    }

    /// Selects `date`.
    pub fn go_to(&mut self, date: NaiveDate) {
        self.cursor.go_to(date);
    }

    /// Selects the following day.
    pub fn next_day(&mut self) {
        self.cursor.next_day();
    }

    /// Selects the preceding day.
    pub fn previous_day(&mut self) {
        self.cursor.previous_day();
    }

    /// Displays the following month.
    pub fn next_month(&mut self) {
        self.cursor.next_month();
    }

    /// Displays the preceding month.
    pub fn prev_month(&mut self) {
        self.cursor.prev_month();
    }
}

fn reorder(records: &BTreeMap<EventId, Event>, list: &mut [EventId]) {
    list.sort_by_key(|id| records.get(id).map(Event::sort_key));
}
