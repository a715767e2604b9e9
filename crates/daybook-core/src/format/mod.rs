//! Text rendering for calendar views.
//!
//! This module renders the views the interactive menu shows:
//! - **Month**: a Sunday-first grid with `[d]` marking today and `{d}` marking
//!   days that have events
//! - **Day**: the events on one date, ordered by start time
//! - **Event list**: every one-time event, then every recurring event
//!
//! # Example
//!
//! ```rust
//! use daybook_core::format::OutputFormatter;
//! use daybook_core::Calendar;
//! use chrono::NaiveDate;
//!
//! let calendar = Calendar::with_today(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
//! let formatter = OutputFormatter::with_defaults();
//! let month = formatter.format_month(&calendar);
//! assert!(month.starts_with("Jan 2024"));
//! ```

use std::borrow::Cow;

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::calendar::Calendar;
use crate::event::{Event, EventKind};
use crate::grid::{MonthGrid, WEEKDAY_HEADERS};
use crate::time::TimeInterval;

const NO_EVENTS: &str = "No Events Today";

/// Time format preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFormat {
    /// 24-hour format (e.g., "14:30").
    #[default]
    H24,
    /// 12-hour format with AM/PM (e.g., "2:30 PM").
    H12,
}

/// Configuration options for text rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Time format preference.
    pub time_format: TimeFormat,
    /// Maximum length for event names (truncated with ellipsis).
    pub max_name_length: Option<usize>,
}

/// Renders calendar views as plain text.
#[derive(Debug, Clone)]
pub struct OutputFormatter {
    options: FormatOptions,
}

impl OutputFormatter {
    /// Creates a new OutputFormatter with the given options.
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    /// Creates a new OutputFormatter with default options.
    pub fn with_defaults() -> Self {
        Self::new(FormatOptions::default())
    }

    /// Returns the active options.
    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Renders the month the cursor is displaying.
    pub fn format_month(&self, calendar: &Calendar) -> String {
        self.format_month_of(calendar, calendar.cursor().displayed_month())
    }

    /// Renders the month containing `day`.
    ///
    /// Each cell is four characters wide so it lines up under the weekday
    /// headers. Today wins over the event marker.
    pub fn format_month_of(&self, calendar: &Calendar, day: NaiveDate) -> String {
        let grid: MonthGrid = calendar.month_grid(day);
        let today = calendar.today();

        let mut out = format!(
            "{}\n{}\n",
            grid.first_day().format("%b %Y"),
            WEEKDAY_HEADERS.join(" ")
        );

        for week in grid.weeks() {
            let mut row = String::new();
            for cell in week {
                let Some(day) = cell else {
                    row.push_str("    ");
                    continue;
                };
                let date = grid.date(*day);
                let cell = if date == Some(today) {
                    format!("[{day:<2}]")
                } else if date.is_some_and(|d| calendar.has_events_on(d)) {
                    format!("{{{day:<2}}}")
                } else {
                    format!(" {day:<2} ")
                };
                row.push_str(&cell);
            }
            out.push_str(row.trim_end());
            out.push('\n');
        }
        out
    }

    /// Renders the events on `date` under a `Weekday, Month d` heading.
    pub fn format_day(&self, calendar: &Calendar, date: NaiveDate) -> String {
        let mut out = format!("{}\n", date.format("%A, %B %-d"));
        self.push_day_events(&mut out, calendar, date);
        out
    }

    /// Renders the selected day.
    pub fn format_selected_day(&self, calendar: &Calendar) -> String {
        self.format_day(calendar, calendar.cursor().selected_day())
    }

    /// Renders today's events.
    pub fn format_today(&self, calendar: &Calendar) -> String {
        let mut out = String::from("Today's Events:\n");
        self.push_day_events(&mut out, calendar, calendar.today());
        out
    }

    /// Renders the month view followed by today's events.
    pub fn format_overview(&self, calendar: &Calendar) -> String {
        format!(
            "{}\n{}",
            self.format_month(calendar),
            self.format_today(calendar)
        )
    }

    /// Renders every one-time event, then every recurring event.
    pub fn format_event_list(&self, calendar: &Calendar) -> String {
        let mut out = String::from("One Time Events:\n");
        for event in calendar.one_time_events() {
            if let EventKind::OneTime { date } = event.kind() {
                out.push_str(&format!(
                    "{} {} {}\n",
                    date.format("%A, %B %-d"),
                    self.format_interval(event.interval()),
                    self.name(event)
                ));
            }
        }

        out.push_str("\nRecurring Events:\n");
        for event in calendar.recurring_events() {
            if let Some(recurrence) = event.recurrence() {
                let (Some(first), Some(last)) =
                    (recurrence.first_occurrence(), recurrence.last_occurrence())
                else {
                    continue;
                };
                out.push_str(&format!(
                    "{}: {} every {} from {} to {}\n",
                    self.name(event),
                    self.format_interval(event.interval()),
                    recurrence.weekdays(),
                    short_date(first),
                    short_date(last)
                ));
            }
        }
        out
    }

    /// Formats a time according to the configured time format.
    pub fn format_time(&self, time: NaiveTime) -> String {
        match self.options.time_format {
            TimeFormat::H24 => time.format("%H:%M").to_string(),
            TimeFormat::H12 => time.format("%-I:%M %p").to_string(),
        }
    }

    /// Formats an interval as `start-end`.
    pub fn format_interval(&self, interval: TimeInterval) -> String {
        format!(
            "{}-{}",
            self.format_time(interval.start()),
            self.format_time(interval.end())
        )
    }

    fn name<'a>(&self, event: &'a Event) -> Cow<'a, str> {
        match self.options.max_name_length {
            Some(max) => ellipsis(event.name(), max),
            None => Cow::Borrowed(event.name()),
        }
    }

    fn push_day_events(&self, out: &mut String, calendar: &Calendar, date: NaiveDate) {
        let events = calendar.events_on(date);
        if events.is_empty() {
            out.push_str(NO_EVENTS);
            out.push('\n');
            return;
        }
        for event in events {
            out.push_str(&format!(
                "{}: {}\n",
                self.name(event),
                self.format_interval(event.interval())
            ));
        }
    }
}

/// Formats a date as `M/d/yy`, or `M/d/yyyy` outside 2000-2099.
pub fn short_date(date: NaiveDate) -> String {
    if (2000..=2099).contains(&date.year()) {
        date.format("%-m/%-d/%y").to_string()
    } else {
        date.format("%-m/%-d/%Y").to_string()
    }
}

/// Truncates a string with ellipsis if it exceeds the given length.
pub fn ellipsis(s: &str, max_len: usize) -> Cow<'_, str> {
    if max_len == 0 {
        return Cow::Borrowed("");
    }

    if s.chars().count() <= max_len {
        return Cow::Borrowed(s);
    }

    let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
    Cow::Owned(format!("{}...", truncated))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    mod ellipsis_tests {
        use super::*;

        #[test]
        fn short_string_unchanged() {
            assert_eq!(ellipsis("hello", 10), "hello");
        }

        #[test]
        fn exact_length_unchanged() {
            assert_eq!(ellipsis("hello", 5), "hello");
        }

        #[test]
        fn long_string_truncated() {
            assert_eq!(ellipsis("hello world", 8), "hello...");
        }

        #[test]
        fn zero_length() {
            assert_eq!(ellipsis("hello", 0), "");
        }
    }

    mod times {
        use super::*;

        #[test]
        fn twenty_four_hour() {
            let formatter = OutputFormatter::with_defaults();
            assert_eq!(formatter.format_time(time(9, 5)), "09:05");
            assert_eq!(formatter.format_time(time(18, 30)), "18:30");
        }

        #[test]
        fn twelve_hour() {
            let formatter = OutputFormatter::new(FormatOptions {
                time_format: TimeFormat::H12,
                ..Default::default()
            });
            assert_eq!(formatter.format_time(time(9, 5)), "9:05 AM");
            assert_eq!(formatter.format_time(time(18, 30)), "6:30 PM");
            assert_eq!(formatter.format_time(time(0, 0)), "12:00 AM");
        }

        #[test]
        fn short_dates() {
            assert_eq!(short_date(date(2024, 1, 5)), "1/5/24");
            assert_eq!(short_date(date(2023, 12, 25)), "12/25/23");
            assert_eq!(short_date(date(1999, 12, 30)), "12/30/1999");
            assert_eq!(short_date(date(2100, 1, 1)), "1/1/2100");
        }
    }

    mod views {
        use super::*;

        #[test]
        fn empty_day() {
            let calendar = Calendar::with_today(date(2024, 1, 10));
            let formatter = OutputFormatter::with_defaults();
            assert_eq!(
                formatter.format_day(&calendar, date(2024, 1, 11)),
                "Thursday, January 11\nNo Events Today\n"
            );
        }

        #[test]
        fn truncated_names() {
            let mut calendar = Calendar::with_today(date(2024, 1, 10));
            calendar
                .add_one_time(
                    "Quarterly planning offsite",
                    date(2024, 1, 10),
                    TimeInterval::from_hm((9, 0), (17, 0)).unwrap(),
                )
                .unwrap();
            let formatter = OutputFormatter::new(FormatOptions {
                max_name_length: Some(10),
                ..Default::default()
            });
            assert_eq!(
                formatter.format_today(&calendar),
                "Today's Events:\nQuarter...: 09:00-17:00\n"
            );
        }

        #[test]
        fn options_deserialize_with_defaults() {
            let options: FormatOptions = serde_json::from_str(r#"{"time_format":"h12"}"#).unwrap();
            assert_eq!(options.time_format, TimeFormat::H12);
            assert_eq!(options.max_name_length, None);
        }
    }
}
