use std::collections::BTreeMap;

use indexmap::IndexMap;
use log::{debug, warn};
use serde::Serialize;

use crate::input::Load;
use crate::scheduler::{Allocation, AllocationEngine, Allocator, SchedulerOptions};
use crate::time::{Date, WorkingCalendar};
use crate::utils;

/// The hours one load contributes to a day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contribution {
    load_id: String,
    name: String,
    hours: f64,
}

impl Contribution {
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

/// The hours of all loads on a single day.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DailyTotal {
    hours: f64,
    /// In the order the loads have been processed.
    contributions: Vec<Contribution>,
}

impl DailyTotal {
    fn add(&mut self, contribution: Contribution) {
        self.contributions.push(contribution);
    }

    /// Sums the contributions in load id order, so the total does not depend
    /// on the order the loads are processed in.
    fn sum_up(&mut self) {
        let mut contributions = self.contributions.iter().collect::<Vec<_>>();
        contributions.sort_by(|a, b| a.load_id.cmp(&b.load_id));

        self.hours = utils::sum_hours(contributions.into_iter().map(Contribution::hours));
    }

    #[must_use]
    pub fn hours(&self) -> f64 {
        self.hours
    }

    pub fn contributions(&self) -> &[Contribution] {
        &self.contributions
    }
}

/// The allocations of all loads and what they add up to on each day.
///
/// This is derived data: it is recomputed from scratch whenever a load or the
/// calendar changes.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Schedule {
    allocations: IndexMap<String, Allocation>,
    daily: BTreeMap<Date, DailyTotal>,
}

impl Schedule {
    /// Returns the allocation of the load with the given id.
    #[must_use]
    pub fn allocation(&self, load_id: &str) -> Option<&Allocation> {
        self.allocations.get(load_id)
    }

    /// Iterates over the allocations in the order the loads were processed.
    pub fn allocations(&self) -> impl Iterator<Item = (&str, &Allocation)> + '_ {
        self.allocations
            .iter()
            .map(|(id, allocation)| (id.as_str(), allocation))
    }

    pub fn daily_totals(&self) -> &BTreeMap<Date, DailyTotal> {
        &self.daily
    }

    #[must_use]
    pub fn on(&self, date: Date) -> Option<&DailyTotal> {
        self.daily.get(&date)
    }

    /// The sum of the hours of all loads on all days.
    #[must_use]
    pub fn total_hours(&self) -> f64 {
        self.daily.values().map(DailyTotal::hours).sum()
    }
}

/// Allocates every load with `allocator` and merges the results into daily
/// totals.
///
/// Loads are independent of each other, a load that can not be scheduled does
/// not affect the others. If multiple loads share an id, only the first one
/// is scheduled.
#[must_use]
pub fn aggregate_with<'a, A, I>(loads: I, allocator: A) -> Schedule
where
    A: Allocator,
    I: IntoIterator<Item = &'a Load>,
{
    let mut schedule = Schedule::default();

    for load in loads {
        if schedule.allocations.contains_key(load.id()) {
            warn!("skipping load `{}`, its id is used twice", load.id());
            continue;
        }

        let allocation = allocator.allocate(load);

        for (date, hours) in allocation.days() {
            schedule
                .daily
                .entry(date)
                .or_default()
                .add(Contribution::new(load.id(), load.name(), hours));
        }

        schedule
            .allocations
            .insert(load.id().to_string(), allocation);
    }

    for total in schedule.daily.values_mut() {
        total.sum_up();
    }

    debug!(
        "aggregated {} loads into {} days ({:.2}h)",
        schedule.allocations.len(),
        schedule.daily.len(),
        schedule.total_hours()
    );

    schedule
}

/// Allocates every load on the `calendar` with the default options and merges
/// the results into daily totals.
#[must_use]
pub fn aggregate(loads: &[Load], calendar: &WorkingCalendar) -> Schedule {
    aggregate_with(
        loads,
        AllocationEngine::new(calendar, SchedulerOptions::default()),
    )
}
