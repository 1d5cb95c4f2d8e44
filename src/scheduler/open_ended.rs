use std::collections::BTreeMap;

use log::{trace, warn};

use crate::scheduler::{is_exhausted, Allocation, AllocationOutcome, SchedulerOptions};
use crate::time::{Date, WorkingCalendar};

/// Walks forward from `start`, filling each working day up to the daily
/// capacity until all hours are placed.
///
/// Pinned days replace the capacity with their pinned hours. A pinned day
/// always shows up in the allocation, even when the hours ran out before it
/// was reached.
pub(super) fn allocate(
    total_hours: f64,
    start: Date,
    overrides: &BTreeMap<Date, f64>,
    calendar: &WorkingCalendar,
    options: &SchedulerOptions,
) -> Allocation {
    let capacity = calendar.effective_daily_capacity();

    // pins on days that will never be visited would keep the walk alive
    let mut pending = overrides
        .iter()
        .filter(|(date, _)| **date >= start && calendar.is_working_day(**date))
        .map(|(date, hours)| (*date, *hours))
        .collect::<BTreeMap<_, _>>();

    let mut remaining = total_hours;
    let mut days = BTreeMap::new();
    let mut date = start;
    let mut is_done = false;

    for _ in 0..options.iteration_cap {
        if is_exhausted(remaining) && pending.is_empty() {
            is_done = true;
            break;
        }

        if calendar.is_working_day(date) {
            let available = remaining.max(0.0);

            match pending.remove(&date) {
                Some(pinned) => {
                    let hours = pinned.min(available);
                    trace!("{}: {:.2}h (pinned: {:.2}h)", date, hours, pinned);

                    days.insert(date, hours);
                    remaining -= hours;
                }
                None if !is_exhausted(remaining) => {
                    let hours = capacity.min(available);
                    trace!("{}: {:.2}h", date, hours);

                    days.insert(date, hours);
                    remaining -= hours;
                }
                // only walking towards the next pinned day
                None => {}
            }
        }

        let Some(next) = date.succ() else {
            break;
        };
        date = next;
    }

    is_done |= is_exhausted(remaining) && pending.is_empty();

    let outcome = if is_done {
        AllocationOutcome::Scheduled
    } else {
        warn!(
            "stopped after {} days starting at {} with {:.2}h and {} pinned days left",
            options.iteration_cap,
            start,
            remaining.max(0.0),
            pending.len()
        );
        AllocationOutcome::Truncated
    };

    Allocation::new(days, total_hours, outcome)
}
