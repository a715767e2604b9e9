//! Flat event file reader and writer for daybook.
//!
//! An event file holds two lines per event, a name and a details line:
//!
//! ```text
//! Dentist
//! 1/12/24 10:00 11:00
//! Gym
//! MW 18:00 19:00 1/1/24 1/15/24
//! ```
//!
//! Weekday letters are `S M T W R F A` for Sunday through Saturday.
//!
//! # Example
//!
//! ```rust
//! use daybook_codec::load_into;
//! use daybook_core::Calendar;
//! use chrono::NaiveDate;
//!
//! let mut calendar = Calendar::with_today(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
//! let report = load_into(&mut calendar, "Dentist\n1/12/24 10:00 11:00\n".as_bytes()).unwrap();
//! assert_eq!(report.loaded, 1);
//! ```

mod error;
mod load;
mod record;
mod stream;

pub use error::{CodecError, CodecResult};
pub use load::{load_file, load_into, save_file, LoadReport, RejectedRecord};
pub use record::{format_date, format_time, parse_date, parse_time, EventRecord, Schedule};
pub use stream::{EventReader, EventWriter};
