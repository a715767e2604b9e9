//! Loading event files into a calendar and saving a calendar back.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};
use std::path::Path;

use daybook_core::{Calendar, CalendarError};
use tracing::{info, warn};

use crate::error::CodecResult;
use crate::stream::{EventReader, EventWriter};

/// A record the calendar refused to store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    /// 1-based line of the event name.
    pub line: usize,
    pub name: String,
    pub error: CalendarError,
}

/// Outcome of loading an event file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Number of events stored.
    pub loaded: usize,
    /// Records that parsed but were rejected by the calendar.
    pub rejected: Vec<RejectedRecord>,
}

impl LoadReport {
    /// Returns true if every record was stored.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Reads every record from `input` and adds it to `calendar`.
///
/// Records the calendar rejects are collected in the report and loading
/// carries on. A syntax error stops the load; events stored before it are
/// kept.
pub fn load_into<R: BufRead>(calendar: &mut Calendar, input: R) -> CodecResult<LoadReport> {
    let mut report = LoadReport::default();

    for record in EventReader::new(input) {
        let record = record?;
        let (line, name) = (record.line, record.name.clone());
        match record.into_event().and_then(|event| calendar.add(event)) {
            Ok(()) => report.loaded += 1,
            Err(error) => {
                warn!(line, %name, %error, "Rejected event record");
                report.rejected.push(RejectedRecord { line, name, error });
            }
        }
    }

    Ok(report)
}

/// Loads the event file at `path` into `calendar`.
///
/// # Errors
///
/// Fails if the file cannot be opened (see [`crate::CodecError::is_not_found`])
/// or contains a malformed record.
pub fn load_file(calendar: &mut Calendar, path: &Path) -> CodecResult<LoadReport> {
    let file = File::open(path)?;
    let report = load_into(calendar, BufReader::new(file))?;
    info!(
        path = %path.display(),
        loaded = report.loaded,
        rejected = report.rejected.len(),
        "Loaded events"
    );
    Ok(report)
}

/// Writes every event in `calendar` to `path`, replacing its contents.
///
/// Returns the number of events written.
pub fn save_file(calendar: &Calendar, path: &Path) -> CodecResult<usize> {
    let mut writer = EventWriter::new(BufWriter::new(File::create(path)?));
    let written = writer.write_calendar(calendar)?;
    writer.flush()?;
    info!(path = %path.display(), written, "Saved events");
    Ok(written)
}
