//! Interactive menu.
//!
//! A [`Session`] owns the calendar together with the input it reads answers
//! from and the output it writes views to, so the whole menu can be driven
//! from memory in tests.

use std::io::{BufRead, Write};

use chrono::{NaiveDate, NaiveTime};
use daybook_codec::{parse_date, parse_time};
use daybook_core::{Calendar, OutputFormatter, TimeInterval};
use tracing::debug;

use crate::error::{ClientError, ClientResult};

const MAIN_MENU: &str = "\
Main Menu
Select one of the following options
[V]iew by  [C]reate [G]o to [E]vent list [D]elete  [Q]uit
";

const VIEW_BY_MENU: &str = "\
View by...
[D]ay or [M]onth
";

const NAVIGATION_MENU: &str = "\
Go to...
[P]revious [N]ext [M]ain Menu
";

const DELETE_MENU: &str = "\
Delete...
[S]elected [A]ll [E]vents on... [R]ecurring
";

/// An interactive menu session.
pub struct Session<R, W> {
    calendar: Calendar,
    formatter: OutputFormatter,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Creates a session over `calendar`.
    pub fn new(calendar: Calendar, formatter: OutputFormatter, input: R, out: W) -> Self {
        Self {
            calendar,
            formatter,
            input,
            out,
        }
    }

    /// Returns the calendar.
    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    /// Ends the session, returning the calendar.
    pub fn into_calendar(self) -> Calendar {
        self.calendar
    }

    /// Runs the main menu until the user quits or input ends.
    ///
    /// Bad dates, bad times and refused operations are reported and the menu
    /// carries on. Only I/O failures end the session early.
    pub fn run(&mut self) -> ClientResult<()> {
        let overview = self.formatter.format_overview(&self.calendar);
        writeln!(self.out, "{overview}")?;

        loop {
            let Some(option) = self.choose(MAIN_MENU)? else {
                break;
            };
            let result = match option.as_str() {
                "V" => self.view_by(),
                "C" => self.create(),
                "G" => self.go_to(),
                "E" => self.event_list(),
                "D" => self.delete(),
                "Q" => break,
                _ => Ok(()),
            };
            match result {
                Err(err @ (ClientError::Input(_) | ClientError::Calendar(_))) => {
                    debug!(error = %err, "Menu action failed");
                    writeln!(self.out, "{err}\n")?;
                }
                other => other?,
            }
        }

        writeln!(self.out, "Goodbye!")?;
        Ok(())
    }

    fn view_by(&mut self) -> ClientResult<()> {
        loop {
            match self.choose(VIEW_BY_MENU)?.as_deref() {
                Some("D") => return self.day_view(),
                Some("M") => return self.month_view(),
                None => return Ok(()),
                Some(_) => {}
            }
        }
    }

    fn day_view(&mut self) -> ClientResult<()> {
        loop {
            let day = self.formatter.format_selected_day(&self.calendar);
            write!(self.out, "{day}")?;
            match self.choose(NAVIGATION_MENU)?.as_deref() {
                Some("P") => self.calendar.previous_day(),
                Some("N") => self.calendar.next_day(),
                Some("M") | None => return Ok(()),
                Some(_) => {}
            }
        }
    }

    fn month_view(&mut self) -> ClientResult<()> {
        loop {
            let month = self.formatter.format_month(&self.calendar);
            writeln!(self.out, "{month}")?;
            match self.choose(NAVIGATION_MENU)?.as_deref() {
                Some("P") => self.calendar.prev_month(),
                Some("N") => self.calendar.next_month(),
                Some("M") | None => return Ok(()),
                Some(_) => {}
            }
        }
    }

    fn create(&mut self) -> ClientResult<()> {
        let Some(name) = self.prompt_name("Name of event: ")? else {
            return Ok(());
        };
        let Some(date) = self.prompt_date("Date of event (mm/dd/yyyy): ")? else {
            return Ok(());
        };

        self.calendar.go_to(date);
        let day = self.formatter.format_selected_day(&self.calendar);
        write!(self.out, "Events on {day}")?;

        let Some(start) = self.prompt_time("Start time (Hour:minute): ")? else {
            return Ok(());
        };
        let Some(end) = self.prompt_time("End time (Hour:minute): ")? else {
            return Ok(());
        };

        let interval = TimeInterval::new(start, end)?;
        match self.calendar.add_one_time(name, date, interval) {
            Ok(()) => writeln!(self.out, "Event added\n")?,
            Err(err) => writeln!(self.out, "Failed to add event: {err}\n")?,
        }
        Ok(())
    }

    fn go_to(&mut self) -> ClientResult<()> {
        let Some(date) = self.prompt_date("Date of event (mm/dd/yyyy): ")? else {
            return Ok(());
        };
        self.calendar.go_to(date);
        self.day_view()
    }

    fn event_list(&mut self) -> ClientResult<()> {
        let list = self.formatter.format_event_list(&self.calendar);
        write!(self.out, "{list}")?;
        Ok(())
    }

    fn delete(&mut self) -> ClientResult<()> {
        loop {
            match self.choose(DELETE_MENU)?.as_deref() {
                Some("S") => return self.delete_selected(),
                Some("A") => {
                    let removed = self.calendar.delete_all();
                    writeln!(self.out, "Deleted {removed} events\n")?;
                    return Ok(());
                }
                Some("E") => return self.delete_on_date(),
                Some("R") => {
                    let removed = self.calendar.delete_all_recurring();
                    writeln!(self.out, "Deleted {removed} recurring events\n")?;
                    return Ok(());
                }
                None => return Ok(()),
                Some(_) => {}
            }
        }
    }

    fn delete_selected(&mut self) -> ClientResult<()> {
        let Some(date) = self.prompt_date("Enter Event Date (mm/dd/yyyy): ")? else {
            return Ok(());
        };
        self.calendar.go_to(date);
        let day = self.formatter.format_selected_day(&self.calendar);
        write!(self.out, "{day}")?;

        let Some(name) = self.prompt_name("Enter the name of the event to delete: ")? else {
            return Ok(());
        };
        match self.calendar.delete_by_name_and_date(&name, date) {
            Ok(_) => writeln!(self.out, "Event Deleted\n")?,
            Err(err) => writeln!(self.out, "Deletion failed: {err}\n")?,
        }
        Ok(())
    }

    fn delete_on_date(&mut self) -> ClientResult<()> {
        let Some(date) = self.prompt_date("Enter Event Date (mm/dd/yyyy): ")? else {
            return Ok(());
        };
        let removed = self.calendar.delete_all_on(date);
        writeln!(self.out, "Deleted {removed} events on {}\n", date.format("%-m/%-d/%Y"))?;
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Input
    // ---------------------------------------------------------------------

    /// Shows a menu and reads the chosen option, upper-cased.
    fn choose(&mut self, menu: &str) -> ClientResult<Option<String>> {
        writeln!(self.out, "{menu}")?;
        Ok(self.read_line()?.map(|line| line.trim().to_uppercase()))
    }

    fn prompt(&mut self, text: &str) -> ClientResult<Option<String>> {
        write!(self.out, "{text}")?;
        self.out.flush()?;
        self.read_line()
    }

    /// Reads a name with surrounding whitespace removed.
    fn prompt_name(&mut self, text: &str) -> ClientResult<Option<String>> {
        Ok(self.prompt(text)?.map(|name| name.trim().to_string()))
    }

    fn prompt_date(&mut self, text: &str) -> ClientResult<Option<NaiveDate>> {
        let Some(answer) = self.prompt(text)? else {
            return Ok(None);
        };
        parse_date(&answer).map(Some).ok_or_else(|| {
            ClientError::Input(format!("`{}` is not a date (mm/dd/yyyy)", answer.trim()))
        })
    }

    fn prompt_time(&mut self, text: &str) -> ClientResult<Option<NaiveTime>> {
        let Some(answer) = self.prompt(text)? else {
            return Ok(None);
        };
        parse_time(&answer).map(Some).ok_or_else(|| {
            ClientError::Input(format!("`{}` is not a time (hour:minute)", answer.trim()))
        })
    }

    /// Reads one line without its terminator. Returns `None` at end of input.
    fn read_line(&mut self) -> ClientResult<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(len);
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use daybook_core::WeekdaySet;
    use std::io::Cursor;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn iv(sh: u32, sm: u32, eh: u32, em: u32) -> TimeInterval {
        TimeInterval::from_hm((sh, sm), (eh, em)).unwrap()
    }

    fn calendar() -> Calendar {
        let mut calendar = Calendar::with_today(date(2024, 1, 10));
        calendar
            .add_recurring(
                "Gym",
                WeekdaySet::from_weekdays([Weekday::Mon, Weekday::Wed]),
                date(2024, 1, 1),
                date(2024, 1, 15),
                iv(18, 0, 19, 0),
            )
            .unwrap();
        calendar
            .add_one_time("Dentist", date(2024, 1, 12), iv(10, 0, 11, 0))
            .unwrap();
        calendar
    }

    /// Runs a session over `script` and returns the calendar and everything printed.
    fn run(calendar: Calendar, script: &str) -> (Calendar, String) {
        let mut out = Vec::new();
        let mut session = Session::new(
            calendar,
            OutputFormatter::with_defaults(),
            Cursor::new(script.to_string()),
            &mut out,
        );
        session.run().unwrap();
        let calendar = session.into_calendar();
        (calendar, String::from_utf8(out).unwrap())
    }

    mod navigation {
        use super::*;

        #[test]
        fn starts_with_overview_and_quits() {
            let (_, out) = run(calendar(), "q\n");
            assert!(out.starts_with("Jan 2024\n"));
            assert!(out.contains("Today's Events:\nGym: 18:00-19:00\n"));
            assert!(out.contains(MAIN_MENU));
            assert!(out.ends_with("Goodbye!\n"));
        }

        #[test]
        fn end_of_input_quits() {
            let (_, out) = run(calendar(), "V\nD\nN\n");
            assert!(out.contains("Thursday, January 11\nNo Events Today\n"));
            assert!(out.ends_with("Goodbye!\n"));
        }

        #[test]
        fn day_view_steps_through_days() {
            let (calendar, out) = run(calendar(), "V\nD\nN\nN\nP\nM\nQ\n");
            assert!(out.contains("Wednesday, January 10\nGym: 18:00-19:00\n"));
            assert!(out.contains("Friday, January 12\nDentist: 10:00-11:00\n"));
            assert_eq!(calendar.cursor().selected_day(), date(2024, 1, 11));
        }

        #[test]
        fn month_view_steps_through_months() {
            let (calendar, out) = run(calendar(), "v\nx\nm\nn\nn\np\nm\nq\n");
            assert!(out.contains(VIEW_BY_MENU));
            assert!(out.contains("Feb 2024\n"));
            assert!(out.contains("Mar 2024\n"));
            assert_eq!(calendar.cursor().displayed_month(), date(2024, 2, 1));
        }

        #[test]
        fn go_to_opens_day_view() {
            let (_, out) = run(calendar(), "G\n1/12/2024\nM\nQ\n");
            assert!(out.contains("Friday, January 12\nDentist: 10:00-11:00\n"));
        }

        #[test]
        fn event_list() {
            let (_, out) = run(calendar(), "E\nQ\n");
            assert!(out.contains(
                "One Time Events:\nFriday, January 12 10:00-11:00 Dentist\n\n\
                 Recurring Events:\nGym: 18:00-19:00 every MW from 1/1/24 to 1/15/24\n"
            ));
        }
    }

    mod creating {
        use super::*;

        #[test]
        fn create_shows_existing_events_then_adds() {
            let (calendar, out) = run(calendar(), "C\nLunch\n1/10/2024\n12:00\n13:00\nQ\n");
            assert!(out.contains("Events on Wednesday, January 10\nGym: 18:00-19:00\n"));
            assert!(out.contains("Event added\n"));
            let names: Vec<&str> = calendar
                .events_on(date(2024, 1, 10))
                .into_iter()
                .map(|e| e.name())
                .collect();
            assert_eq!(names, vec!["Lunch", "Gym"]);
        }

        #[test]
        fn created_name_is_trimmed() {
            let (calendar, _) = run(calendar(), "C\n  Lunch \n1/10/2024\n12:00\n13:00\nQ\n");
            let names: Vec<&str> = calendar
                .events_on(date(2024, 1, 10))
                .into_iter()
                .map(|e| e.name())
                .collect();
            assert_eq!(names, vec!["Lunch", "Gym"]);
        }

        #[test]
        fn conflicting_create_reported() {
            let (calendar, out) = run(calendar(), "C\nLate gym\n1/10/2024\n18:30\n19:30\nQ\n");
            assert!(out.contains(
                "Failed to add event: conflicts with \"Gym\" (18:00-19:00) on 2024-01-10\n"
            ));
            assert_eq!(calendar.events_on(date(2024, 1, 10)).len(), 1);
        }

        #[test]
        fn bad_date_reported_and_menu_continues() {
            let (calendar, out) = run(calendar(), "C\nLunch\n13/45/2024\nE\nQ\n");
            assert!(out.contains("invalid input: `13/45/2024` is not a date (mm/dd/yyyy)\n"));
            assert!(out.contains("One Time Events:\n"));
            assert_eq!(calendar.len(), 2);
        }

        #[test]
        fn bad_time_reported() {
            let (_, out) = run(calendar(), "C\nLunch\n1/10/2024\nnoon\nQ\n");
            assert!(out.contains("invalid input: `noon` is not a time (hour:minute)\n"));
            assert!(out.ends_with("Goodbye!\n"));
        }

        #[test]
        fn backwards_interval_reported() {
            let (calendar, out) = run(calendar(), "C\nLunch\n1/10/2024\n13:00\n12:00\nQ\n");
            assert!(out.contains("invalid interval"));
            assert_eq!(calendar.len(), 2);
        }
    }

    mod deleting {
        use super::*;

        #[test]
        fn delete_selected_event() {
            let (calendar, out) = run(calendar(), "D\nS\n1/12/2024\nDentist\nQ\n");
            assert!(out.contains("Friday, January 12\nDentist: 10:00-11:00\n"));
            assert!(out.contains("Event Deleted\n"));
            assert!(!calendar.has_events_on(date(2024, 1, 12)));
        }

        #[test]
        fn delete_selected_ignores_surrounding_spaces() {
            let (calendar, out) = run(calendar(), "D\nS\n1/12/2024\nDentist \nQ\n");
            assert!(out.contains("Event Deleted\n"));
            assert!(!calendar.has_events_on(date(2024, 1, 12)));
        }

        #[test]
        fn delete_selected_unknown_name() {
            let (calendar, out) = run(calendar(), "D\nS\n1/12/2024\nDinner\nQ\n");
            assert!(out.contains("Deletion failed: no event named \"Dinner\" on 2024-01-12\n"));
            assert_eq!(calendar.len(), 2);
        }

        #[test]
        fn delete_all_on_date() {
            let (calendar, out) = run(calendar(), "D\nE\n1/10/2024\nQ\n");
            assert!(out.contains("Deleted 1 events on 1/10/2024\n"));
            assert!(!calendar.has_events_on(date(2024, 1, 10)));
            assert!(calendar.has_events_on(date(2024, 1, 8)));
        }

        #[test]
        fn delete_recurring_then_all() {
            let (calendar, out) = run(calendar(), "d\nr\nd\nz\na\nq\n");
            assert!(out.contains("Deleted 1 recurring events\n"));
            assert!(out.contains("Deleted 1 events\n"));
            assert!(calendar.is_empty());
        }
    }
}
