use serde::Deserialize;
use thiserror::Error;

use crate::scheduler::DEFAULT_UNDER_UTILIZATION;
use crate::time::{Date, WeekDay, WorkingCalendar};

fn default_working_days() -> Vec<WeekDay> {
    WorkingCalendar::default().working_days().collect()
}

const fn default_weeks() -> usize {
    12
}

const fn default_under_utilization() -> f64 {
    DEFAULT_UNDER_UTILIZATION
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidSettings {
    #[error("`{name}` must be a finite, non-negative number of hours, got {value}")]
    Capacity { name: &'static str, value: f64 },
    #[error("the under-utilization threshold must be within 0 and 1, got {0}")]
    Threshold(f64),
    #[error("the forecast needs at least one week")]
    NoWeeks,
}

/// The `[calendar]` table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalendarSettings {
    #[serde(default = "default_working_days")]
    working_days: Vec<WeekDay>,
    #[serde(default)]
    holidays: Vec<Date>,
    daily_capacity: Option<f64>,
    weekly_capacity: Option<f64>,
}

impl CalendarSettings {
    fn check_capacity(name: &'static str, value: Option<f64>) -> Result<(), InvalidSettings> {
        match value {
            Some(value) if !value.is_finite() || value < 0.0 => {
                Err(InvalidSettings::Capacity { name, value })
            }
            _ => Ok(()),
        }
    }

    pub fn to_calendar(&self) -> Result<WorkingCalendar, InvalidSettings> {
        Self::check_capacity("daily_capacity", self.daily_capacity)?;
        Self::check_capacity("weekly_capacity", self.weekly_capacity)?;

        Ok(
            WorkingCalendar::new(self.working_days.iter().copied(), self.holidays.iter().copied())
                .with_daily_capacity(self.daily_capacity)
                .with_weekly_capacity(self.weekly_capacity),
        )
    }
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            working_days: default_working_days(),
            holidays: Vec::new(),
            daily_capacity: None,
            weekly_capacity: None,
        }
    }
}

/// The `[forecast]` table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForecastSettings {
    #[serde(default = "default_weeks")]
    weeks: usize,
    #[serde(default = "default_under_utilization")]
    under_utilization: f64,
}

impl ForecastSettings {
    /// The number of weeks that are summarized.
    pub fn weeks(&self) -> usize {
        self.weeks
    }

    /// Weeks with a utilization below this are under-utilized.
    pub fn under_utilization(&self) -> f64 {
        self.under_utilization
    }
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            weeks: default_weeks(),
            under_utilization: default_under_utilization(),
        }
    }
}

/// The content of a calendar file.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    calendar: CalendarSettings,
    #[serde(default)]
    forecast: ForecastSettings,
}

impl Settings {
    pub fn calendar(&self) -> &CalendarSettings {
        &self.calendar
    }

    pub fn forecast(&self) -> &ForecastSettings {
        &self.forecast
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    use crate::date;

    #[test]
    fn test_defaults() {
        let settings: Settings = toml::from_str("").expect("toml should be valid");

        assert_eq!(
            settings.calendar().to_calendar(),
            Ok(WorkingCalendar::default())
        );
        assert_eq!(settings.forecast().weeks(), 12);
        assert_eq!(settings.forecast().under_utilization(), 0.7);
    }

    #[test]
    fn test_parse_calendar() {
        let settings: Settings = toml::from_str(concat!(
            //
            "[calendar]\n",
            "working_days = [\"mon\", \"tue\", \"wed\", \"thu\"]\n",
            "holidays = [\"2024-12-25\"]\n",
            "weekly_capacity = 36\n",
            "\n",
            "[forecast]\n",
            "weeks = 4\n",
        ))
        .expect("toml should be valid");

        let calendar = settings
            .calendar()
            .to_calendar()
            .expect("settings should be valid");

        assert_eq!(calendar.working_days_per_week(), 4);
        assert_eq!(calendar.effective_daily_capacity(), 9.0);
        assert_eq!(calendar.is_working_day(date!(2024:12:25)), false);
        assert_eq!(calendar.is_working_day(date!(2024:12:27)), false);
        assert_eq!(settings.forecast().weeks(), 4);
    }

    #[test]
    fn test_invalid_capacity() {
        let settings: Settings =
            toml::from_str("[calendar]\ndaily_capacity = -1.0\n").expect("toml should be valid");

        assert_eq!(
            settings.calendar().to_calendar(),
            Err(InvalidSettings::Capacity {
                name: "daily_capacity",
                value: -1.0
            })
        );
    }

    #[test]
    fn test_invalid_week_day() {
        assert!(toml::from_str::<Settings>("[calendar]\nworking_days = [\"funday\"]\n").is_err());
    }
}
