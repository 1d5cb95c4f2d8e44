mod aggregate;
mod allocation;
mod bounded;
mod open_ended;
mod options;
mod utilization;
mod weekly;

pub use aggregate::*;
pub use allocation::*;
pub use options::*;
pub use utilization::*;
pub use weekly::*;

use std::collections::BTreeMap;

use log::{debug, warn};

use crate::input::Load;
use crate::time::{Date, WorkingCalendar};

/// Remaining hours at or below this are considered fully placed.
const EXHAUSTED: f64 = 1e-9;

pub(crate) fn is_exhausted(remaining: f64) -> bool {
    remaining <= EXHAUSTED
}

pub trait Allocator {
    /// Returns how the hours of the `load` are spread over the calendar.
    ///
    /// This must never fail: a load that can not be scheduled results in an
    /// empty allocation.
    #[must_use]
    fn allocate(&self, load: &Load) -> Allocation;
}

impl<A: Allocator> Allocator for &A {
    fn allocate(&self, load: &Load) -> Allocation {
        (**self).allocate(load)
    }
}

/// Allocates loads on a [`WorkingCalendar`].
///
/// Loads with an end date are spread evenly over their window, open-ended
/// loads are filled day by day up to the daily capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationEngine<'a> {
    calendar: &'a WorkingCalendar,
    options: SchedulerOptions,
}

impl<'a> AllocationEngine<'a> {
    #[must_use]
    pub fn new(calendar: &'a WorkingCalendar, options: SchedulerOptions) -> Self {
        Self { calendar, options }
    }

    #[must_use]
    pub fn calendar(&self) -> &'a WorkingCalendar {
        self.calendar
    }

    #[must_use]
    pub fn options(&self) -> &SchedulerOptions {
        &self.options
    }
}

/// The parsed and validated parts of a [`Load`].
#[derive(Debug, Clone, PartialEq)]
struct Request {
    total_hours: f64,
    start: Date,
    end: Option<Date>,
    overrides: BTreeMap<Date, f64>,
}

impl Request {
    fn parse(load: &Load) -> Option<Self> {
        let total_hours = load.total_hours();
        if !total_hours.is_finite() {
            warn!(
                "load `{}` has a non-finite total of {} hours",
                load.id(),
                total_hours
            );
            return None;
        }

        if total_hours <= 0.0 {
            debug!("load `{}` has no hours to schedule", load.id());
            return None;
        }

        let start = load
            .start()
            .parse::<Date>()
            .map_err(|e| warn!("load `{}` has an invalid start: {}", load.id(), e))
            .ok()?;

        let end = match load.end().map(str::parse::<Date>) {
            Some(Ok(end)) => Some(end),
            Some(Err(e)) => {
                warn!("load `{}` has an invalid end: {}", load.id(), e);
                return None;
            }
            None => None,
        };

        let mut overrides = BTreeMap::new();
        for (key, hours) in load.overrides() {
            let date = match key.parse::<Date>() {
                Ok(date) => date,
                Err(e) => {
                    warn!("ignoring override of load `{}`: {}", load.id(), e);
                    continue;
                }
            };

            if !hours.is_finite() {
                warn!(
                    "ignoring override of load `{}` on {}: {} is not a number of hours",
                    load.id(),
                    date,
                    hours
                );
                continue;
            }

            overrides.insert(date, hours.max(0.0));
        }

        Some(Self {
            total_hours,
            start,
            end,
            overrides,
        })
    }
}

impl Allocator for AllocationEngine<'_> {
    fn allocate(&self, load: &Load) -> Allocation {
        let Some(request) = Request::parse(load) else {
            return Allocation::unschedulable(load.total_hours());
        };

        let allocation = match request.end {
            Some(end) => bounded::allocate(
                request.total_hours,
                request.start,
                end,
                &request.overrides,
                self.calendar,
                &self.options,
            ),
            None => open_ended::allocate(
                request.total_hours,
                request.start,
                &request.overrides,
                self.calendar,
                &self.options,
            ),
        };

        debug!(
            "load `{}`: {:.2}h on {} days ({})",
            load.id(),
            allocation.total(),
            allocation.len(),
            allocation.outcome()
        );

        allocation
    }
}

/// Allocates a single load with the default [`SchedulerOptions`].
#[must_use]
pub fn allocate(load: &Load, calendar: &WorkingCalendar) -> Allocation {
    AllocationEngine::new(calendar, SchedulerOptions::default()).allocate(load)
}
