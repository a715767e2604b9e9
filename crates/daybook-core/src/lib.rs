//! Core types: time intervals, recurrence, events, the calendar store, formatting

pub mod calendar;
pub mod cursor;
pub mod error;
pub mod event;
pub mod format;
pub mod grid;
pub mod recurrence;
pub mod time;
pub mod tracing;

pub use calendar::Calendar;
pub use cursor::Cursor;
pub use error::{CalendarError, CalendarResult};
pub use event::{Event, EventKind};
pub use format::{ellipsis, short_date, FormatOptions, OutputFormatter, TimeFormat};
pub use grid::{MonthGrid, WEEKDAY_HEADERS};
pub use recurrence::{Recurrence, WeekdaySet};
pub use time::TimeInterval;
pub use tracing::{init_tracing, TracingConfig, TracingError, TracingOutputFormat};
