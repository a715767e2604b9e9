//! `daybook check`: load the events file and report what was rejected.

use daybook_codec::LoadReport;

use crate::commands::load_calendar;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Loads the events file and prints a summary.
///
/// Fails if the file is missing, malformed, or has rejected records.
pub fn run(config: &ClientConfig) -> ClientResult<()> {
    let path = &config.files.events;
    let (_, report) = load_calendar(path)?;
    let report = report.ok_or_else(|| {
        ClientError::Input(format!("events file {} not found", path.display()))
    })?;

    print!("{}", summarize(&report));
    if report.is_clean() {
        Ok(())
    } else {
        Err(ClientError::Input(format!(
            "{} record(s) rejected",
            report.rejected.len()
        )))
    }
}

fn summarize(report: &LoadReport) -> String {
    let mut out = format!("{} events loaded\n", report.loaded);
    for rejected in &report.rejected {
        out.push_str(&format!(
            "line {}: {}: {}\n",
            rejected.line, rejected.name, rejected.error
        ));
    }
    out
}
