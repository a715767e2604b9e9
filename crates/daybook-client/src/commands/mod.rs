//! Subcommand implementations.

pub mod check;
pub mod config;
pub mod interactive;
pub mod list;

use std::path::Path;

use daybook_codec::{load_file, LoadReport};
use daybook_core::Calendar;
use tracing::info;

use crate::error::ClientResult;

/// Loads the event file at `path` into a new calendar.
///
/// A missing file gives an empty calendar and no report.
pub fn load_calendar(path: &Path) -> ClientResult<(Calendar, Option<LoadReport>)> {
    let mut calendar = Calendar::new();
    match load_file(&mut calendar, path) {
        Ok(report) => Ok((calendar, Some(report))),
        Err(err) if err.is_not_found() => {
            info!(path = %path.display(), "No events file, starting empty");
            Ok((calendar, None))
        }
        Err(err) => Err(err.into()),
    }
}
