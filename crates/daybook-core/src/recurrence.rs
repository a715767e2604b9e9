//! Weekly recurrence: a set of weekdays repeated between two dates.
//!
//! Weekdays use the single-letter code of the event file format:
//! `S M T W R F A` for Sunday through Saturday.

use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Serialize, Serializer};

use crate::error::{CalendarError, CalendarResult};

/// Weekdays in display order, paired with their letter code.
const LETTERS: [(char, Weekday); 7] = [
    ('S', Weekday::Sun),
    ('M', Weekday::Mon),
    ('T', Weekday::Tue),
    ('W', Weekday::Wed),
    ('R', Weekday::Thu),
    ('F', Weekday::Fri),
    ('A', Weekday::Sat),
];

/// A set of weekdays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    /// An empty set.
    pub const EMPTY: Self = Self(0);

    fn bit(day: Weekday) -> u8 {
        1 << day.num_days_from_sunday()
    }

    /// Builds a set from any collection of weekdays.
    pub fn from_weekdays(days: impl IntoIterator<Item = Weekday>) -> Self {
        days.into_iter().fold(Self::EMPTY, |set, day| set.with(day))
    }

    /// Parses a letter code such as `MWF` or `TR`.
    ///
    /// Letters are case-insensitive and may repeat. Returns `None` if any
    /// character is not a weekday letter.
    pub fn from_letters(code: &str) -> Option<Self> {
        let mut set = Self::EMPTY;
        for c in code.chars() {
            let upper = c.to_ascii_uppercase();
            let (_, day) = LETTERS.iter().find(|(letter, _)| *letter == upper)?;
            set.insert(*day);
        }
        Some(set)
    }

    /// Returns the weekday a letter stands for.
    pub fn weekday_for_letter(letter: char) -> Option<Weekday> {
        let upper = letter.to_ascii_uppercase();
        LETTERS
            .iter()
            .find(|(l, _)| *l == upper)
            .map(|(_, day)| *day)
    }

    /// Returns a copy of this set with `day` added.
    #[must_use]
    pub fn with(mut self, day: Weekday) -> Self {
        self.insert(day);
        self
    }

    /// Adds a weekday to the set.
    pub fn insert(&mut self, day: Weekday) {
        self.0 |= Self::bit(day);
    }

    /// Returns true if `day` is in the set.
    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    /// Returns true if no weekday is selected.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns the number of selected weekdays.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates the selected weekdays, Sunday first.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        LETTERS
            .iter()
            .map(|(_, day)| *day)
            .filter(|day| self.contains(*day))
    }
}

impl fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (letter, day) in LETTERS {
            if self.contains(day) {
                write!(f, "{letter}")?;
            }
        }
        Ok(())
    }
}

impl Serialize for WeekdaySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The concrete dates a weekly pattern fires on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recurrence {
    weekdays: WeekdaySet,
    range_start: NaiveDate,
    range_end: NaiveDate,
    dates: Vec<NaiveDate>,
}

impl Recurrence {
    /// Expands `weekdays` over the inclusive range `[range_start, range_end]`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidRange`] if `range_start` is not strictly
    /// before `range_end`, if the weekday set is empty, or if no date in the
    /// range falls on a selected weekday.
    pub fn new(
        weekdays: WeekdaySet,
        range_start: NaiveDate,
        range_end: NaiveDate,
    ) -> CalendarResult<Self> {
        if range_start >= range_end {
            return Err(CalendarError::invalid_range(
                range_start,
                range_end,
                "start date must be before end date",
            ));
        }
        if weekdays.is_empty() {
            return Err(CalendarError::invalid_range(
                range_start,
                range_end,
                "no weekdays selected",
            ));
        }

        let dates: Vec<NaiveDate> = range_start
            .iter_days()
            .take_while(|date| *date <= range_end)
            .filter(|date| weekdays.contains(date.weekday()))
            .collect();

        if dates.is_empty() {
            return Err(CalendarError::invalid_range(
                range_start,
                range_end,
                "no selected weekday falls within the range",
            ));
        }

        Ok(Self {
            weekdays,
            range_start,
            range_end,
            dates,
        })
    }

    /// Returns the weekdays the pattern repeats on.
    pub fn weekdays(&self) -> WeekdaySet {
        self.weekdays
    }

    /// Returns the first day of the declared range.
    pub fn range_start(&self) -> NaiveDate {
        self.range_start
    }

    /// Returns the last day of the declared range.
    pub fn range_end(&self) -> NaiveDate {
        self.range_end
    }

    /// Returns the remaining occurrence dates in ascending order.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Returns the earliest remaining occurrence.
    pub fn first_occurrence(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    /// Returns the latest remaining occurrence.
    pub fn last_occurrence(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Returns true if the pattern still fires on `date`.
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        self.dates.binary_search(&date).is_ok()
    }

    /// Drops a single occurrence. Returns false if `date` was not an occurrence.
    pub(crate) fn remove_date(&mut self, date: NaiveDate) -> bool {
        match self.dates.binary_search(&date) {
            Ok(index) => {
                self.dates.remove(index);
                true
            }
            Err(_) => false,
        }
    }

    /// Returns true once every occurrence has been removed.
    pub fn is_exhausted(&self) -> bool {
        self.dates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    mod weekday_set {
        use super::*;

        #[test]
        fn letters_roundtrip() {
            let set = WeekdaySet::from_letters("MWF").unwrap();
            assert!(set.contains(Weekday::Mon));
            assert!(set.contains(Weekday::Wed));
            assert!(set.contains(Weekday::Fri));
            assert!(!set.contains(Weekday::Tue));
            assert_eq!(set.len(), 3);
            assert_eq!(set.to_string(), "MWF");
        }

        #[test]
        fn thursday_and_saturday_codes() {
            let set = WeekdaySet::from_letters("ra").unwrap();
            assert_eq!(
                set.iter().collect::<Vec<_>>(),
                vec![Weekday::Thu, Weekday::Sat]
            );
            assert_eq!(set.to_string(), "RA");
        }

        #[test]
        fn display_is_sunday_first() {
            let set = WeekdaySet::from_weekdays([Weekday::Sat, Weekday::Sun, Weekday::Tue]);
            assert_eq!(set.to_string(), "STA");
        }

        #[test]
        fn unknown_letter_rejected() {
            assert!(WeekdaySet::from_letters("MX").is_none());
            assert!(WeekdaySet::from_letters("3").is_none());
        }

        #[test]
        fn duplicates_collapse() {
            let set = WeekdaySet::from_letters("MMM").unwrap();
            assert_eq!(set.len(), 1);
        }

        #[test]
        fn empty() {
            assert!(WeekdaySet::EMPTY.is_empty());
            assert!(WeekdaySet::from_letters("").unwrap().is_empty());
        }

        #[test]
        fn serializes_as_letters() {
            let set = WeekdaySet::from_letters("TR").unwrap();
            assert_eq!(serde_json::to_string(&set).unwrap(), "\"TR\"");
        }
    }

    mod expansion {
        use super::*;

        #[test]
        fn monday_wednesday_two_weeks() {
            let weekdays = WeekdaySet::from_weekdays([Weekday::Mon, Weekday::Wed]);
            let recurrence = Recurrence::new(weekdays, date(2024, 1, 1), date(2024, 1, 15)).unwrap();
            assert_eq!(
                recurrence.dates(),
                &[
                    date(2024, 1, 1),
                    date(2024, 1, 3),
                    date(2024, 1, 8),
                    date(2024, 1, 10),
                    date(2024, 1, 15),
                ]
            );
            assert_eq!(recurrence.first_occurrence(), Some(date(2024, 1, 1)));
            assert_eq!(recurrence.last_occurrence(), Some(date(2024, 1, 15)));
        }

        #[test]
        fn range_start_mid_week() {
            // 2024-01-04 is a Thursday; the first Monday is 01-08.
            let weekdays = WeekdaySet::from_letters("M").unwrap();
            let recurrence = Recurrence::new(weekdays, date(2024, 1, 4), date(2024, 1, 22)).unwrap();
            assert_eq!(
                recurrence.dates(),
                &[date(2024, 1, 8), date(2024, 1, 15), date(2024, 1, 22)]
            );
        }

        #[test]
        fn crosses_leap_day() {
            let weekdays = WeekdaySet::from_letters("R").unwrap();
            let recurrence = Recurrence::new(weekdays, date(2024, 2, 20), date(2024, 3, 8)).unwrap();
            assert_eq!(
                recurrence.dates(),
                &[date(2024, 2, 22), date(2024, 2, 29), date(2024, 3, 7)]
            );
        }

        #[test]
        fn equal_bounds_rejected() {
            let weekdays = WeekdaySet::from_letters("M").unwrap();
            let err = Recurrence::new(weekdays, date(2024, 1, 1), date(2024, 1, 1)).unwrap_err();
            assert!(matches!(err, CalendarError::InvalidRange { .. }));
        }

        #[test]
        fn reversed_bounds_rejected() {
            let weekdays = WeekdaySet::from_letters("M").unwrap();
            assert!(Recurrence::new(weekdays, date(2024, 2, 1), date(2024, 1, 1)).is_err());
        }

        #[test]
        fn empty_weekdays_rejected() {
            let err =
                Recurrence::new(WeekdaySet::EMPTY, date(2024, 1, 1), date(2024, 3, 1)).unwrap_err();
            assert!(matches!(err, CalendarError::InvalidRange { .. }));
        }

        #[test]
        fn no_matching_day_rejected() {
            // Monday 01-01 to Tuesday 01-02 never hits a Friday.
            let weekdays = WeekdaySet::from_letters("F").unwrap();
            assert!(Recurrence::new(weekdays, date(2024, 1, 1), date(2024, 1, 2)).is_err());
        }

        #[test]
        fn remove_dates() {
            let weekdays = WeekdaySet::from_letters("M").unwrap();
            let mut recurrence =
                Recurrence::new(weekdays, date(2024, 1, 1), date(2024, 1, 8)).unwrap();
            assert!(recurrence.occurs_on(date(2024, 1, 8)));
            assert!(recurrence.remove_date(date(2024, 1, 8)));
            assert!(!recurrence.occurs_on(date(2024, 1, 8)));
            assert!(!recurrence.remove_date(date(2024, 1, 8)));
            assert!(!recurrence.is_exhausted());
            assert!(recurrence.remove_date(date(2024, 1, 1)));
            assert!(recurrence.is_exhausted());
            // The declared range is unaffected.
            assert_eq!(recurrence.range_start(), date(2024, 1, 1));
        }
    }
}
