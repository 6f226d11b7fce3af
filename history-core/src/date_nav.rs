//! Selected-date state and day-by-day navigation.
//!
//! The feed is keyed by month and day only. The year of the selected date is
//! kept for display and share links but never reaches the lookup key.

use std::fmt;

use chrono::{Datelike, Days, Local, NaiveDate};

use crate::error::{HistoryError, HistoryResult};

/// Year-agnostic lookup key for a calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayKey {
    month: u32,
    day: u32,
}

impl DayKey {
    /// Build a key, validating it against a leap year so that 02/29 is
    /// always accepted.
    pub fn new(month: u32, day: u32) -> HistoryResult<Self> {
        NaiveDate::from_ymd_opt(2000, month, day)
            .map(|_| DayKey { month, day })
            .ok_or_else(|| HistoryError::InvalidDate(format!("{month:02}-{day:02}")))
    }

    pub fn from_date(date: NaiveDate) -> Self {
        DayKey {
            month: date.month(),
            day: date.day(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Path segment used by the feed, e.g. "03/01".
    pub fn path(&self) -> String {
        format!("{:02}/{:02}", self.month, self.day)
    }

    /// Place this key in `year`. Falls back to the nearest earlier leap year
    /// for 02/29 in a common year.
    pub fn in_year(&self, year: i32) -> HistoryResult<NaiveDate> {
        if let Some(date) = NaiveDate::from_ymd_opt(year, self.month, self.day) {
            return Ok(date);
        }

        (1..=8)
            .filter_map(|back| year.checked_sub(back))
            .find_map(|y| NaiveDate::from_ymd_opt(y, self.month, self.day))
            .ok_or(HistoryError::DateOutOfRange)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

/// The currently selected date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateNavigator {
    selected: NaiveDate,
}

impl Default for DateNavigator {
    /// Starts on today's local date.
    fn default() -> Self {
        DateNavigator::new(Local::now().date_naive())
    }
}

impl DateNavigator {
    pub fn new(selected: NaiveDate) -> Self {
        DateNavigator { selected }
    }

    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    pub fn key(&self) -> DayKey {
        DayKey::from_date(self.selected)
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.selected = date;
    }

    pub fn next(&mut self) -> HistoryResult<NaiveDate> {
        self.selected = self
            .selected
            .checked_add_days(Days::new(1))
            .ok_or(HistoryError::DateOutOfRange)?;
        Ok(self.selected)
    }

    pub fn previous(&mut self) -> HistoryResult<NaiveDate> {
        self.selected = self
            .selected
            .checked_sub_days(Days::new(1))
            .ok_or(HistoryError::DateOutOfRange)?;
        Ok(self.selected)
    }
}

/// Parse a user supplied date.
/// - `today`
/// - `YYYY-MM-DD`
/// - `MM-DD` (placed in `today`'s year, see [`DayKey::in_year`])
pub fn parse_date(input: &str, today: NaiveDate) -> HistoryResult<NaiveDate> {
    let input = input.trim();

    if input.eq_ignore_ascii_case("today") {
        return Ok(today);
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }

    let invalid = || HistoryError::InvalidDate(input.to_string());
    let (month, day) = input.split_once('-').ok_or_else(invalid)?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    let day: u32 = day.parse().map_err(|_| invalid())?;

    DayKey::new(month, day)
        .map_err(|_| invalid())?
        .in_year(today.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_previous_from_march_first_common_year() {
        let mut nav = DateNavigator::new(date(2023, 3, 1));
        assert_eq!(nav.previous().unwrap(), date(2023, 2, 28));
    }

    #[test]
    fn test_previous_from_march_first_leap_year() {
        let mut nav = DateNavigator::new(date(2024, 3, 1));
        assert_eq!(nav.previous().unwrap(), date(2024, 2, 29));
        assert_eq!(nav.key().path(), "02/29");
    }

    #[test]
    fn test_next_crosses_year_boundary() {
        let mut nav = DateNavigator::new(date(1999, 12, 31));
        assert_eq!(nav.next().unwrap(), date(2000, 1, 1));
        assert_eq!(nav.selected(), date(2000, 1, 1));
    }

    #[test]
    fn test_next_through_leap_day() {
        let mut nav = DateNavigator::new(date(2024, 2, 28));
        assert_eq!(nav.next().unwrap(), date(2024, 2, 29));
        assert_eq!(nav.next().unwrap(), date(2024, 3, 1));
    }

    #[test]
    fn test_next_at_calendar_limit_fails_without_moving() {
        let mut nav = DateNavigator::new(NaiveDate::MAX);
        assert!(matches!(nav.next(), Err(HistoryError::DateOutOfRange)));
        assert_eq!(nav.selected(), NaiveDate::MAX);
    }

    #[test]
    fn test_key_ignores_year() {
        let a = DateNavigator::new(date(1815, 6, 18)).key();
        let b = DateNavigator::new(date(2025, 6, 18)).key();
        assert_eq!(a, b);
        assert_eq!(a.path(), "06/18");
    }

    #[test]
    fn test_leap_day_key_is_valid_in_any_year() {
        let key = DayKey::new(2, 29).unwrap();
        assert_eq!(key.in_year(2023).unwrap(), date(2020, 2, 29));
        assert_eq!(key.in_year(2024).unwrap(), date(2024, 2, 29));
        assert_eq!(key.in_year(1900).unwrap(), date(1896, 2, 29));
        assert!(DayKey::new(2, 30).is_err());
        assert!(DayKey::new(13, 1).is_err());
    }

    #[test]
    fn test_parse_date_forms() {
        let today = date(2023, 10, 19);
        assert_eq!(parse_date("today", today).unwrap(), today);
        assert_eq!(parse_date("1969-07-20", today).unwrap(), date(1969, 7, 20));
        assert_eq!(parse_date("07-20", today).unwrap(), date(2023, 7, 20));
        assert_eq!(parse_date("02-29", today).unwrap(), date(2020, 2, 29));
        assert!(parse_date("2023-02-29", today).is_err());
        assert!(parse_date("yesterday", today).is_err());
    }
}
