use std::collections::BTreeSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::time::{Date, WeekDay};

/// Decides which dates can be worked on and how many hours fit into a day.
///
/// A date is a working day if its week day is in the configured set and it is
/// not a holiday. The calendar is immutable for a scheduling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingCalendar {
    working_days: BTreeSet<WeekDay>,
    holidays: BTreeSet<Date>,
    daily_capacity: Option<f64>,
    weekly_capacity: Option<f64>,
}

impl WorkingCalendar {
    /// The hours per day that are used when no capacity is configured.
    pub const DEFAULT_DAILY_CAPACITY: f64 = 8.0;

    #[must_use]
    pub fn new(
        working_days: impl IntoIterator<Item = WeekDay>,
        holidays: impl IntoIterator<Item = Date>,
    ) -> Self {
        Self {
            working_days: working_days.into_iter().collect(),
            holidays: holidays.into_iter().collect(),
            daily_capacity: None,
            weekly_capacity: None,
        }
    }

    #[must_use]
    pub fn with_daily_capacity(mut self, hours: impl Into<Option<f64>>) -> Self {
        self.daily_capacity = hours.into();
        self
    }

    #[must_use]
    pub fn with_weekly_capacity(mut self, hours: impl Into<Option<f64>>) -> Self {
        self.weekly_capacity = hours.into();
        self
    }

    pub fn working_days(&self) -> impl Iterator<Item = WeekDay> + '_ {
        self.working_days.iter().copied()
    }

    #[must_use]
    pub fn is_holiday(&self, date: Date) -> bool {
        self.holidays.contains(&date)
    }

    #[must_use]
    pub fn is_working_day(&self, date: Date) -> bool {
        self.working_days.contains(&date.week_day()) && !self.is_holiday(date)
    }

    /// The number of week days that are worked in a regular week (holidays are
    /// not taken into account).
    #[must_use]
    pub fn working_days_per_week(&self) -> usize {
        self.working_days.len()
    }

    fn positive(hours: Option<f64>) -> Option<f64> {
        hours.filter(|hours| hours.is_finite() && *hours > 0.0)
    }

    /// The hours per day available to automatically scheduled days.
    ///
    /// This is the explicit daily capacity if it is positive, otherwise the
    /// weekly capacity spread over the working days of a week, and otherwise
    /// [`Self::DEFAULT_DAILY_CAPACITY`].
    #[must_use]
    pub fn effective_daily_capacity(&self) -> f64 {
        if let Some(daily) = Self::positive(self.daily_capacity) {
            return daily;
        }

        match (
            Self::positive(self.weekly_capacity),
            self.working_days_per_week(),
        ) {
            (Some(weekly), days) if days > 0 => weekly / days as f64,
            _ => {
                debug!(
                    "no capacity configured, falling back to {}h per day",
                    Self::DEFAULT_DAILY_CAPACITY
                );
                Self::DEFAULT_DAILY_CAPACITY
            }
        }
    }

    /// The configured weekly capacity, or the effective daily capacity for
    /// every working day of a regular week.
    #[must_use]
    pub fn weekly_capacity(&self) -> f64 {
        Self::positive(self.weekly_capacity).unwrap_or_else(|| {
            self.effective_daily_capacity() * self.working_days_per_week() as f64
        })
    }

    /// The capacity of the concrete week starting at `week_start`.
    ///
    /// A configured weekly capacity is used as is. Otherwise holidays reduce
    /// the capacity, because only actual working days are counted.
    #[must_use]
    pub fn capacity_of_week(&self, week_start: Date) -> f64 {
        Self::positive(self.weekly_capacity).unwrap_or_else(|| {
            self.effective_daily_capacity() * self.working_days_in_week(week_start) as f64
        })
    }

    /// Returns the working days in `start..=end`.
    pub fn working_days_between(
        &self,
        start: Date,
        end: Date,
    ) -> impl Iterator<Item = Date> + '_ {
        start
            .until(end)
            .filter(move |date| self.is_working_day(*date))
    }

    /// Returns the number of working days in the week that contains `date`.
    #[must_use]
    pub fn working_days_in_week(&self, date: Date) -> usize {
        self.working_days_between(date.week_start(), date.week_end())
            .count()
    }

    /// Finds the first working day at or after `from`, looking at most
    /// `lookahead` days ahead.
    #[must_use]
    pub fn next_working_day(&self, from: Date, lookahead: usize) -> Option<Date> {
        self.working_days_between(from, from + lookahead).next()
    }
}

impl Default for WorkingCalendar {
    /// Monday to friday without holidays and without a configured capacity.
    fn default() -> Self {
        Self::new(
            [
                WeekDay::Monday,
                WeekDay::Tuesday,
                WeekDay::Wednesday,
                WeekDay::Thursday,
                WeekDay::Friday,
            ],
            [],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    use crate::date;

    #[test]
    fn test_is_working_day() {
        let calendar = WorkingCalendar::default().with_daily_capacity(8.0);

        // 2024-03-04 is a monday
        for date in date!(2024:03:04).until(date!(2024:03:08)) {
            assert_eq!(calendar.is_working_day(date), true, "{} should be worked", date);
        }

        assert_eq!(calendar.is_working_day(date!(2024:03:09)), false);
        assert_eq!(calendar.is_working_day(date!(2024:03:10)), false);
    }

    #[test]
    fn test_holiday_is_not_a_working_day() {
        let calendar = WorkingCalendar::new(WeekDay::ALL, [date!(2024:12:25)]);

        assert_eq!(calendar.is_working_day(date!(2024:12:24)), true);
        assert_eq!(calendar.is_working_day(date!(2024:12:25)), false);
        assert_eq!(calendar.working_days_in_week(date!(2024:12:25)), 6);
    }

    #[test]
    fn test_effective_daily_capacity() {
        assert_eq!(
            WorkingCalendar::default()
                .with_daily_capacity(6.5)
                .with_weekly_capacity(50.0)
                .effective_daily_capacity(),
            6.5
        );

        // a zero daily capacity counts as not configured
        assert_eq!(
            WorkingCalendar::default()
                .with_daily_capacity(0.0)
                .with_weekly_capacity(50.0)
                .effective_daily_capacity(),
            10.0
        );

        assert_eq!(
            WorkingCalendar::default().effective_daily_capacity(),
            WorkingCalendar::DEFAULT_DAILY_CAPACITY
        );

        // weekly capacity without any working day can not be spread
        assert_eq!(
            WorkingCalendar::new([], [])
                .with_weekly_capacity(40.0)
                .effective_daily_capacity(),
            WorkingCalendar::DEFAULT_DAILY_CAPACITY
        );
    }

    #[test]
    fn test_weekly_capacity() {
        assert_eq!(WorkingCalendar::default().weekly_capacity(), 40.0);
        assert_eq!(
            WorkingCalendar::default()
                .with_daily_capacity(9.0)
                .weekly_capacity(),
            45.0
        );
        assert_eq!(
            WorkingCalendar::default()
                .with_daily_capacity(9.0)
                .with_weekly_capacity(38.0)
                .weekly_capacity(),
            38.0
        );
    }

    #[test]
    fn test_capacity_of_week_with_holiday() {
        let calendar = WorkingCalendar::new(
            [
                WeekDay::Monday,
                WeekDay::Tuesday,
                WeekDay::Wednesday,
                WeekDay::Thursday,
                WeekDay::Friday,
            ],
            [date!(2024:12:25), date!(2024:12:26)],
        )
        .with_daily_capacity(8.0);

        assert_eq!(calendar.capacity_of_week(date!(2024:12:23)), 24.0);
        assert_eq!(calendar.capacity_of_week(date!(2024:12:30)), 40.0);
    }

    #[test]
    fn test_next_working_day() {
        let calendar = WorkingCalendar::default();

        // saturday -> monday
        assert_eq!(
            calendar.next_working_day(date!(2024:03:09), 10),
            Some(date!(2024:03:11))
        );
        // a working day is its own next working day
        assert_eq!(
            calendar.next_working_day(date!(2024:03:11), 0),
            Some(date!(2024:03:11))
        );
        // the lookahead is inclusive but bounded
        assert_eq!(calendar.next_working_day(date!(2024:03:09), 1), None);
        assert_eq!(
            WorkingCalendar::new([], []).next_working_day(date!(2024:03:09), 731),
            None
        );
    }
}
