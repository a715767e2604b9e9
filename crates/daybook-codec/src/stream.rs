//! Record-at-a-time reading and writing of event files.
//!
//! Every event takes two lines: its name, then its details.
//!
//! ```text
//! Dentist
//! 1/12/24 10:00 11:00
//! Gym
//! MW 18:00 19:00 1/1/24 1/15/24
//! ```

use std::io::{BufRead, Write};

use chrono::{Datelike, NaiveDate};
use daybook_core::{Calendar, Event, EventKind, Recurrence, WeekdaySet};
use tracing::trace;

use crate::error::{CodecError, CodecResult};
use crate::record::{format_date, format_time, EventRecord, Schedule};

/// Reads event records from a line-oriented stream.
pub struct EventReader<R> {
    reader: R,
    line: usize,
    buf: String,
}

impl<R: BufRead> EventReader<R> {
    /// Creates a new EventReader wrapping the given reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: String::new(),
        }
    }

    /// Reads a single record.
    ///
    /// Blank lines between records are skipped. Returns `Ok(None)` at the end
    /// of the stream.
    pub fn read_record(&mut self) -> CodecResult<Option<EventRecord>> {
        let name = loop {
            match self.next_line()? {
                None => return Ok(None),
                Some(line) if line.trim().is_empty() => continue,
                Some(line) => break line,
            }
        };
        let name_line = self.line;

        let details = match self.next_line()? {
            Some(details) if !details.trim().is_empty() => details,
            _ => return Err(CodecError::MissingDetails { line: name_line }),
        };
        let schedule = Schedule::parse(&details, self.line)?;

        trace!(line = name_line, %name, "Read event record");
        Ok(Some(EventRecord {
            line: name_line,
            name,
            schedule,
        }))
    }

    /// Returns the number of lines consumed so far.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Unwraps this EventReader, returning the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn next_line(&mut self) -> CodecResult<Option<String>> {
        self.buf.clear();
        if self.reader.read_line(&mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line += 1;
        let text = self.buf.strip_suffix('\n').unwrap_or(&self.buf);
        let text = text.strip_suffix('\r').unwrap_or(text);
        Ok(Some(text.to_string()))
    }
}

impl<R: BufRead> Iterator for EventReader<R> {
    type Item = CodecResult<EventRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}

/// Writes events in the form [`EventReader`] reads back.
pub struct EventWriter<W> {
    writer: W,
}

/// Splits the remaining occurrences into maximal runs with no pattern date
/// missing in between. Each run is returned as its first and last date.
fn occurrence_runs(recurrence: &Recurrence) -> Vec<(NaiveDate, NaiveDate)> {
    let (Some(first), Some(last)) = (recurrence.first_occurrence(), recurrence.last_occurrence())
    else {
        return Vec::new();
    };
    let weekdays = recurrence.weekdays();

    let mut runs = Vec::new();
    let mut current: Option<(NaiveDate, NaiveDate)> = None;
    for day in first
        .iter_days()
        .take_while(|day| *day <= last)
        .filter(|day| weekdays.contains(day.weekday()))
    {
        if recurrence.occurs_on(day) {
            current = Some(match current {
                Some((start, _)) => (start, day),
                None => (day, day),
            });
        } else if let Some(run) = current.take() {
            runs.push(run);
        }
    }
    runs.extend(current);
    runs
}

impl<W: Write> EventWriter<W> {
    /// Creates a new EventWriter wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes a single event.
    ///
    /// A recurring event is written as one record per unbroken run of its
    /// remaining occurrences, so deleted dates stay deleted on reload. A run
    /// of a single occurrence is narrowed to that weekday so its range stays
    /// non-empty.
    pub fn write_event(&mut self, event: &Event) -> CodecResult<()> {
        let interval = event.interval();
        let times = format!(
            "{} {}",
            format_time(interval.start()),
            format_time(interval.end())
        );

        match event.kind() {
            EventKind::OneTime { date } => {
                self.write_record(event.name(), &format!("{} {times}", format_date(*date)))?;
            }
            EventKind::Recurring(recurrence) => {
                let runs = occurrence_runs(recurrence);
                if runs.is_empty() {
                    trace!(name = %event.name(), "Skipping recurring event with no occurrences");
                }
                for (first, last) in runs {
                    let details = if first == last {
                        let end = first.succ_opt().unwrap_or(first);
                        let weekdays = WeekdaySet::from_weekdays([first.weekday()]);
                        format!("{weekdays} {times} {} {}", format_date(first), format_date(end))
                    } else {
                        format!(
                            "{} {times} {} {}",
                            recurrence.weekdays(),
                            format_date(first),
                            format_date(last)
                        )
                    };
                    self.write_record(event.name(), &details)?;
                }
            }
        }
        Ok(())
    }

    fn write_record(&mut self, name: &str, details: &str) -> CodecResult<()> {
        writeln!(self.writer, "{name}")?;
        writeln!(self.writer, "{details}")?;
        Ok(())
    }

    /// Writes every one-time event, then every recurring event.
    ///
    /// Returns the number of events written. A recurring event with deleted
    /// occurrences may take more than one record.
    pub fn write_calendar(&mut self, calendar: &Calendar) -> CodecResult<usize> {
        let mut written = 0;
        for event in calendar
            .one_time_events()
            .chain(calendar.recurring_events())
        {
            self.write_event(event)?;
            written += 1;
        }
        Ok(written)
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> CodecResult<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Unwraps this EventWriter, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
