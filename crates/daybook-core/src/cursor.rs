//! Navigation state for the day and month views.

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

/// The selected day and the month currently on display.
///
/// The cursor is independent of stored events. Day navigation never moves the
/// displayed month, and month navigation never moves the selected day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cursor {
    today: NaiveDate,
    selected_day: NaiveDate,
    displayed_month: NaiveDate,
}

/// Returns the first day of the month containing `date`.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

impl Cursor {
    /// Creates a cursor with both the selected day and the displayed month on `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            selected_day: today,
            displayed_month: first_of_month(today),
        }
    }

    /// Returns the date the cursor treats as today.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Returns the selected day.
    pub fn selected_day(&self) -> NaiveDate {
        self.selected_day
    }

    /// Returns the first day of the displayed month.
    pub fn displayed_month(&self) -> NaiveDate {
        self.displayed_month
    }

    /// Selects `date`.
    pub fn go_to(&mut self, date: NaiveDate) {
        self.selected_day = date;
    }

    /// Selects the following day.
    pub fn next_day(&mut self) {
        if let Some(next) = self.selected_day.succ_opt() {
            self.selected_day = next;
        }
    }

    /// Selects the preceding day.
    pub fn previous_day(&mut self) {
        if let Some(prev) = self.selected_day.pred_opt() {
            self.selected_day = prev;
        }
    }

    /// Displays the following month.
    pub fn next_month(&mut self) {
        if let Some(next) = self.displayed_month.checked_add_months(Months::new(1)) {
            self.displayed_month = next;
        }
    }

    /// Displays the preceding month.
    pub fn prev_month(&mut self) {
        if let Some(prev) = self.displayed_month.checked_sub_months(Months::new(1)) {
            self.displayed_month = prev;
        }
    }

    /// Moves both the selected day and the displayed month back to today.
    pub fn reset(&mut self) {
        *self = Self::new(self.today);
    }
}
