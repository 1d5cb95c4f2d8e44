use std::cmp::Ordering;
use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;

use crate::scheduler::DailyTotal;
use crate::time::{Date, WorkingCalendar};

/// How many hours a single load takes up in a week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectHours {
    load_id: String,
    name: String,
    hours: f64,
}

impl ProjectHours {
    #[must_use]
    pub fn new(load_id: impl Into<String>, name: impl Into<String>, hours: f64) -> Self {
        Self {
            load_id: load_id.into(),
            name: name.into(),
            hours,
        }
    }

    pub fn load_id(&self) -> &str {
        &self.load_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hours(&self) -> f64 {
        self.hours
    }
}

/// The used hours of one week compared to its capacity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklySummary {
    week_start: Date,
    working_days: usize,
    used_hours: f64,
    capacity_hours: f64,
    /// Sorted by hours, largest first, then by load id.
    breakdown: Vec<ProjectHours>,
}

impl WeeklySummary {
    /// The monday of the week.
    #[must_use]
    pub fn week_start(&self) -> Date {
        self.week_start
    }

    #[must_use]
    pub fn week_end(&self) -> Date {
        self.week_start.week_end()
    }

    #[must_use]
    pub fn working_days(&self) -> usize {
        self.working_days
    }

    #[must_use]
    pub fn used_hours(&self) -> f64 {
        self.used_hours
    }

    #[must_use]
    pub fn capacity_hours(&self) -> f64 {
        self.capacity_hours
    }

    /// Capacity that is still free, negative if the week is overloaded.
    #[must_use]
    pub fn remaining(&self) -> f64 {
        self.capacity_hours - self.used_hours
    }

    pub fn breakdown(&self) -> &[ProjectHours] {
        &self.breakdown
    }

    fn summarize(
        daily: &BTreeMap<Date, DailyTotal>,
        calendar: &WorkingCalendar,
        week_start: Date,
    ) -> Self {
        let mut used_hours = 0.0;
        let mut breakdown: IndexMap<&str, ProjectHours> = IndexMap::new();

        for (_, total) in daily
            .range(week_start..=week_start.week_end())
            .filter(|(date, _)| calendar.is_working_day(**date))
        {
            used_hours += total.hours();

            for contribution in total.contributions() {
                breakdown
                    .entry(contribution.load_id())
                    .or_insert_with(|| {
                        ProjectHours::new(contribution.load_id(), contribution.name(), 0.0)
                    })
                    .hours += contribution.hours();
            }
        }

        let mut breakdown = breakdown
            .into_values()
            .filter(|project| project.hours > 0.0)
            .collect::<Vec<_>>();
        breakdown.sort_by(|a, b| {
            b.hours
                .partial_cmp(&a.hours)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.load_id.cmp(&b.load_id))
        });

        Self {
            week_start,
            working_days: calendar.working_days_in_week(week_start),
            used_hours,
            capacity_hours: calendar.capacity_of_week(week_start),
            breakdown,
        }
    }
}

/// Rolls the daily totals up into `week_count` consecutive weeks.
///
/// The first week is the one containing `start_week`, weeks start on monday.
/// Only working days count towards the used hours.
#[must_use]
pub fn summarize_weeks(
    daily: &BTreeMap<Date, DailyTotal>,
    calendar: &WorkingCalendar,
    start_week: Date,
    week_count: usize,
) -> Vec<WeeklySummary> {
    let first = start_week.week_start();

    (0..week_count)
        .map(|week| WeeklySummary::summarize(daily, calendar, first + week * 7))
        .collect()
}
