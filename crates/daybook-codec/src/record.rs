//! Parsed event records and the text forms of dates and times.
//!
//! A details line is either
//!
//! ```text
//! M/d/yy H:m H:m                      one-time
//! <letters> H:m H:m M/d/yy M/d/yy     recurring, e.g. `MW 18:00 19:00 1/1/24 1/15/24`
//! ```
//!
//! Years may be written with two digits (meaning `20yy`) or four.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate, NaiveTime};
use daybook_core::{CalendarResult, Event, TimeInterval, WeekdaySet};
use regex::Regex;

use crate::error::{CodecError, CodecResult};

/// Regex for a one-time details line.
static ONE_TIME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2}/\d{1,2}/\d+)\s+(\d{1,2}:\d{1,2})\s+(\d{1,2}:\d{1,2})$")
        .expect("Invalid one-time regex")
});

/// Regex for a recurring details line.
static RECURRING_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([A-Za-z]+)\s+(\d{1,2}:\d{1,2})\s+(\d{1,2}:\d{1,2})\s+(\d{1,2}/\d{1,2}/\d+)\s+(\d{1,2}/\d{1,2}/\d+)$",
    )
    .expect("Invalid recurring regex")
});

/// A leading token with any weekday letter marks a recurring line.
static WEEKDAY_HINT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)[SMTWRFA]").expect("Invalid weekday regex"));

/// When an event happens, as written on its details line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schedule {
    /// A single date.
    OneTime {
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    },
    /// A weekly pattern between two dates.
    Recurring {
        weekdays: WeekdaySet,
        start: NaiveTime,
        end: NaiveTime,
        range_start: NaiveDate,
        range_end: NaiveDate,
    },
}

impl Schedule {
    /// Parses a details line. `line` is used for error reporting only.
    pub fn parse(details: &str, line: usize) -> CodecResult<Self> {
        let details = details.trim();
        let first = details.split_whitespace().next().unwrap_or_default();

        if WEEKDAY_HINT_REGEX.is_match(first) {
            let caps = RECURRING_REGEX.captures(details).ok_or_else(|| {
                CodecError::syntax(
                    line,
                    format!("expected `<weekdays> H:m H:m M/d/yy M/d/yy`, got `{details}`"),
                )
            })?;
            let weekdays = WeekdaySet::from_letters(&caps[1]).ok_or_else(|| {
                CodecError::syntax(line, format!("unknown weekday letter in `{}`", &caps[1]))
            })?;
            return Ok(Self::Recurring {
                weekdays,
                start: time_field(&caps[2], line)?,
                end: time_field(&caps[3], line)?,
                range_start: date_field(&caps[4], line)?,
                range_end: date_field(&caps[5], line)?,
            });
        }

        let caps = ONE_TIME_REGEX.captures(details).ok_or_else(|| {
            CodecError::syntax(line, format!("expected `M/d/yy H:m H:m`, got `{details}`"))
        })?;
        Ok(Self::OneTime {
            date: date_field(&caps[1], line)?,
            start: time_field(&caps[2], line)?,
            end: time_field(&caps[3], line)?,
        })
    }
}

/// One event as read from a file, before the calendar has accepted it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    /// 1-based line of the event name.
    pub line: usize,
    pub name: String,
    pub schedule: Schedule,
}

impl EventRecord {
    /// Builds the calendar event for this record.
    ///
    /// # Errors
    ///
    /// Fails if the times do not form an interval or the recurrence produces
    /// no occurrence.
    pub fn into_event(self) -> CalendarResult<Event> {
        match self.schedule {
            Schedule::OneTime { date, start, end } => {
                Ok(Event::one_time(self.name, date, TimeInterval::new(start, end)?))
            }
            Schedule::Recurring {
                weekdays,
                start,
                end,
                range_start,
                range_end,
            } => Event::recurring(
                self.name,
                weekdays,
                range_start,
                range_end,
                TimeInterval::new(start, end)?,
            ),
        }
    }
}

/// Parses `M/d/yy` or `M/d/yyyy`. Two-digit years are in the 2000s.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let mut parts = text.trim().split('/');
    let month: u32 = parts.next()?.parse().ok()?;
    let day: u32 = parts.next()?.parse().ok()?;
    let year_text = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    let year: i32 = match year_text.len() {
        2 => 2000 + year_text.parse::<i32>().ok()?,
        4 => year_text.parse().ok()?,
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parses `H:m` on a 24-hour clock.
pub fn parse_time(text: &str) -> Option<NaiveTime> {
    let (hour, minute) = text.trim().split_once(':')?;
    NaiveTime::from_hms_opt(hour.parse().ok()?, minute.parse().ok()?, 0)
}

/// Formats a date the way [`parse_date`] reads it back.
pub fn format_date(date: NaiveDate) -> String {
    if (2000..=2099).contains(&date.year()) {
        date.format("%-m/%-d/%y").to_string()
    } else {
        date.format("%-m/%-d/%Y").to_string()
    }
}

/// Formats a time as `H:MM`.
pub fn format_time(time: NaiveTime) -> String {
    time.format("%-H:%M").to_string()
}

fn date_field(text: &str, line: usize) -> CodecResult<NaiveDate> {
    parse_date(text).ok_or_else(|| CodecError::syntax(line, format!("invalid date `{text}`")))
}

fn time_field(text: &str, line: usize) -> CodecResult<NaiveTime> {
    parse_time(text).ok_or_else(|| CodecError::syntax(line, format!("invalid time `{text}`")))
}
