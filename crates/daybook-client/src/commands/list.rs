//! `daybook list`: print every stored event.

use daybook_core::{Calendar, Event, OutputFormatter};
use serde::Serialize;

use crate::commands::load_calendar;
use crate::config::ClientConfig;
use crate::error::ClientResult;

/// JSON shape of `list --json`.
#[derive(Debug, Serialize)]
struct EventListing<'a> {
    one_time: Vec<&'a Event>,
    recurring: Vec<&'a Event>,
}

/// Loads the events file and prints the event list.
pub fn run(config: &ClientConfig, json: bool) -> ClientResult<()> {
    let (calendar, _) = load_calendar(&config.files.events)?;
    let formatter = OutputFormatter::new(config.display.format_options());
    print!("{}", render(&calendar, &formatter, json)?);
    Ok(())
}

fn render(calendar: &Calendar, formatter: &OutputFormatter, json: bool) -> ClientResult<String> {
    if !json {
        return Ok(formatter.format_event_list(calendar));
    }
    let listing = EventListing {
        one_time: calendar.one_time_events().collect(),
        recurring: calendar.recurring_events().collect(),
    };
    let mut text = serde_json::to_string_pretty(&listing).map_err(std::io::Error::from)?;
    text.push('\n');
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Weekday};
    use daybook_core::{TimeInterval, WeekdaySet};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn calendar() -> Calendar {
        let mut calendar = Calendar::with_today(date(2024, 1, 10));
        calendar
            .add_one_time(
                "Dentist",
                date(2024, 1, 12),
                TimeInterval::from_hm((10, 0), (11, 0)).unwrap(),
            )
            .unwrap();
        calendar
            .add_recurring(
                "Gym",
                WeekdaySet::from_weekdays([Weekday::Mon, Weekday::Wed]),
                date(2024, 1, 1),
                date(2024, 1, 15),
                TimeInterval::from_hm((18, 0), (19, 0)).unwrap(),
            )
            .unwrap();
        calendar
    }

    #[test]
    fn text_listing() {
        let text = render(&calendar(), &OutputFormatter::with_defaults(), false).unwrap();
        assert_eq!(
            text,
            "One Time Events:\nFriday, January 12 10:00-11:00 Dentist\n\n\
             Recurring Events:\nGym: 18:00-19:00 every MW from 1/1/24 to 1/15/24\n"
        );
    }

    #[test]
    fn json_listing() {
        let text = render(&calendar(), &OutputFormatter::with_defaults(), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["one_time"][0]["name"], "Dentist");
        assert_eq!(value["one_time"][0]["type"], "one_time");
        assert_eq!(value["recurring"][0]["name"], "Gym");
        assert_eq!(value["recurring"][0]["type"], "recurring");
        assert_eq!(value["recurring"].as_array().unwrap().len(), 1);
    }
}
