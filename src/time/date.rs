use core::fmt;
use core::ops::{Add, Sub};
use core::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::time::WeekDay;

/// Creates a [`Date`] from a literal, for example `date!(2024:03:04)`.
///
/// The month is checked at compile time, the day when the macro is evaluated.
#[macro_export]
macro_rules! date {
    ($year:literal : $month:literal : $day:literal) => {{
        static_assertions::const_assert!($month >= 1 && $month <= 12);
        static_assertions::const_assert!($day >= 1 && $day <= 31);

        $crate::time::Date::from_ymd($year, $month, $day)
            .expect(concat!("invalid date literal ", $year, "-", $month, "-", $day))
    }};
}

/// A calendar date without a time zone, written as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct Date(NaiveDate);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidDate {
    #[error("\"{input}\" is not valid date. Expected format: \"YYYY-MM-DD\"")]
    ParseDateError { input: String },
    #[error("{day:02} is not a valid day for {year:04}-{month:02}")]
    InvalidDay { year: i32, month: u32, day: u32 },
}

impl Date {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, InvalidDate> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(InvalidDate::InvalidDay { year, month, day })
    }

    #[must_use]
    pub fn today() -> Self {
        Self(chrono::Local::now().date_naive())
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    #[must_use]
    pub fn week_day(&self) -> WeekDay {
        WeekDay::from(self.0.weekday())
    }

    /// Returns the monday of the week this date is in.
    ///
    /// Unlike a month based view, the week may start in the previous month or year.
    #[must_use]
    pub fn week_start(&self) -> Self {
        *self - WeekDay::Monday.days_until(self.week_day())
    }

    /// Returns the sunday of the week this date is in.
    #[must_use]
    pub fn week_end(&self) -> Self {
        *self + self.week_day().days_until(WeekDay::Sunday)
    }

    /// Returns the date of the following day, or `None` at the end of the
    /// representable range.
    #[must_use]
    pub fn succ(&self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }

    /// Returns the number of days from `self` to `other`, negative if
    /// `other` is before `self`.
    ///
    /// `self + self.days_until(other) == other`
    #[must_use]
    pub fn days_until(&self, other: Self) -> i64 {
        other.0.signed_duration_since(self.0).num_days()
    }

    /// Iterates over every date in `self..=end`.
    #[must_use]
    pub fn until(self, end: Self) -> DateRange {
        DateRange::new(self, end)
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Add<usize> for Date {
    type Output = Self;

    /// Saturates at the end of the representable range.
    fn add(self, days: usize) -> Self::Output {
        Self(
            self.0
                .checked_add_days(Days::new(days as u64))
                .unwrap_or(NaiveDate::MAX),
        )
    }
}

impl Sub<usize> for Date {
    type Output = Self;

    fn sub(self, days: usize) -> Self::Output {
        Self(
            self.0
                .checked_sub_days(Days::new(days as u64))
                .unwrap_or(NaiveDate::MIN),
        )
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.year(),
            self.month(),
            self.day()
        )
    }
}

impl FromStr for Date {
    type Err = InvalidDate;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let parse_error = || InvalidDate::ParseDateError {
            input: string.to_string(),
        };

        let mut parts = string.trim().splitn(3, '-');
        let (Some(year), Some(month), Some(day)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(parse_error());
        };

        if year.len() != 4 {
            return Err(parse_error());
        }

        Self::from_ymd(
            year.parse().map_err(|_| parse_error())?,
            month.parse().map_err(|_| parse_error())?,
            day.parse().map_err(|_| parse_error())?,
        )
    }
}

impl TryFrom<String> for Date {
    type Error = <Self as FromStr>::Err;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(value.as_str())
    }
}

impl From<Date> for String {
    fn from(date: Date) -> Self {
        date.to_string()
    }
}

/// An inclusive, ascending range of dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    next: Option<Date>,
    end: Date,
}

impl DateRange {
    /// Creates the range `start..=end`. If `end` is before `start` the range is empty.
    #[must_use]
    pub fn new(start: Date, end: Date) -> Self {
        Self {
            next: (start <= end).then_some(start),
            end,
        }
    }
}

impl Iterator for DateRange {
    type Item = Date;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;

        self.next = current.succ().filter(|next| *next <= self.end);

        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.next {
            Some(next) => {
                let remaining = next.days_until(self.end) as usize + 1;
                (remaining, Some(remaining))
            }
            None => (0, Some(0)),
        }
    }
}

impl ExactSizeIterator for DateRange {}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_date_to_string() {
        assert_eq!(
            Date::from_ymd(2022, 1, 31).map(|d| d.to_string()),
            Ok("2022-01-31".to_string())
        );
    }

    #[test]
    fn test_date_from_str() {
        assert_eq!("2024-02-29".parse::<Date>(), Ok(date!(2024:02:29)));
        assert_eq!(
            "2023-02-29".parse::<Date>(),
            Err(InvalidDate::InvalidDay {
                year: 2023,
                month: 2,
                day: 29
            })
        );

        for input in ["", "2024", "2024-01", "24-01-01", "2024-xx-01", "2024/01/01"] {
            assert_eq!(
                input.parse::<Date>(),
                Err(InvalidDate::ParseDateError {
                    input: input.to_string()
                }),
                "input: {:?}",
                input
            );
        }
    }

    #[test]
    fn test_date_sorting() {
        let mut dates = [date!(2022:01:03), date!(2021:12:31), date!(2022:01:01)];
        dates.sort();

        assert_eq!(
            dates,
            [date!(2021:12:31), date!(2022:01:01), date!(2022:01:03)]
        );
    }

    #[test]
    fn test_week_start_crosses_month() {
        // 2024-03-01 is a friday
        assert_eq!(date!(2024:03:01).week_start(), date!(2024:02:26));
        assert_eq!(date!(2024:03:01).week_end(), date!(2024:03:03));
        // 2025-01-01 is a wednesday
        assert_eq!(date!(2025:01:01).week_start(), date!(2024:12:30));
        // a monday is its own week start
        assert_eq!(date!(2024:03:04).week_start(), date!(2024:03:04));
        // a sunday belongs to the previous monday
        assert_eq!(date!(2024:03:10).week_start(), date!(2024:03:04));
    }

    #[test]
    fn test_add_days() {
        assert_eq!(date!(2024:02:28) + 1, date!(2024:02:29));
        assert_eq!(date!(2024:02:28) + 2, date!(2024:03:01));
        assert_eq!(date!(2023:12:31) + 1, date!(2024:01:01));
        assert_eq!(date!(2024:01:01) - 1, date!(2023:12:31));
        assert_eq!(date!(2024:01:01).days_until(date!(2024:12:31)), 365);
        assert_eq!(date!(2024:01:02).days_until(date!(2024:01:01)), -1);
    }

    #[test]
    fn test_date_range() {
        assert_eq!(
            date!(2024:02:27)
                .until(date!(2024:03:01))
                .collect::<Vec<_>>(),
            vec![
                date!(2024:02:27),
                date!(2024:02:28),
                date!(2024:02:29),
                date!(2024:03:01),
            ]
        );
        assert_eq!(date!(2024:02:27).until(date!(2024:02:27)).len(), 1);
        assert_eq!(date!(2024:02:27).until(date!(2024:02:26)).count(), 0);
    }

    #[test]
    fn test_serde() {
        let date: Date = serde_json::from_str("\"2024-03-04\"").expect("date should be valid");
        assert_eq!(date, date!(2024:03:04));
        assert_eq!(
            serde_json::to_string(&date).expect("date should serialize"),
            "\"2024-03-04\""
        );
        assert!(serde_json::from_str::<Date>("\"2024-13-04\"").is_err());
    }
}
