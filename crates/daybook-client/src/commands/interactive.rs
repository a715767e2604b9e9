//! The default command: load events, run the menu, save on quit.

use std::io::{self, Write};

use daybook_codec::save_file;
use daybook_core::OutputFormatter;
use tracing::debug;

use crate::commands::load_calendar;
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::menu::Session;

/// Runs an interactive session on stdin and stdout.
pub fn run(config: &ClientConfig) -> ClientResult<()> {
    let events = &config.files.events;
    let (calendar, report) = load_calendar(events)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match report {
        Some(report) => {
            for rejected in &report.rejected {
                writeln!(
                    out,
                    "Skipped \"{}\" (line {}): {}",
                    rejected.name, rejected.line, rejected.error
                )?;
            }
            writeln!(out, "Loading is done!")?;
        }
        None => writeln!(out, "No events file at {}, starting empty.", events.display())?,
    }

    let formatter = OutputFormatter::new(config.display.format_options());
    let mut session = Session::new(calendar, formatter, io::stdin().lock(), &mut out);
    session.run()?;
    let calendar = session.into_calendar();

    let output = &config.files.output;
    let written = save_file(&calendar, output)?;
    debug!(written, "Session ended");
    writeln!(out, "Events saved to {}", output.display())?;
    Ok(())
}
