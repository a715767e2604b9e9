//! Month grid layout.

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

use crate::cursor::first_of_month;

/// Column headers, Sunday first.
pub const WEEKDAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// A month laid out as Sunday-first weeks of day numbers.
///
/// Cells outside the month are `None`. Markers such as "today" or "has
/// events" are left to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    first_day: NaiveDate,
    weeks: Vec<[Option<u32>; 7]>,
}

impl MonthGrid {
    /// Lays out the month containing `day`.
    pub fn new(day: NaiveDate) -> Self {
        let first_day = first_of_month(day);
        let lead = first_day.weekday().num_days_from_sunday() as usize;
        let days = days_in_month(first_day) as usize;

        let mut weeks = vec![[None; 7]; (lead + days).div_ceil(7)];
        for day in 1..=days {
            let pos = lead + day - 1;
            weeks[pos / 7][pos % 7] = Some(day as u32);
        }

        Self { first_day, weeks }
    }

    /// Returns the first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// Returns the weeks of the month, each a row of seven cells.
    pub fn weeks(&self) -> &[[Option<u32>; 7]] {
        &self.weeks
    }

    /// Returns the date of a day number within this month.
    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        self.first_day.with_day(day)
    }

    /// Returns the number of days in the month.
    pub fn day_count(&self) -> u32 {
        days_in_month(self.first_day)
    }
}

/// Returns the number of days in the month containing `date`.
pub fn days_in_month(date: NaiveDate) -> u32 {
    let first = first_of_month(date);
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .map_or(31, |last| last.day())
}
