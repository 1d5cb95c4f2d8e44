use std::collections::BTreeMap;

use log::{debug, trace, warn};

use crate::scheduler::{Allocation, AllocationOutcome, SchedulerOptions};
use crate::time::{Date, WorkingCalendar};

/// A working day of the window together with what has to be known about the
/// days after it.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Slot {
    date: Date,
    pinned: Option<f64>,
    /// The sum of all pinned hours strictly after this day.
    future_pinned: f64,
    /// The number of automatically scheduled days from this day to the end
    /// of the window (including this day).
    auto_days: usize,
}

fn make_slots(dates: &[Date], overrides: &BTreeMap<Date, f64>) -> Vec<Slot> {
    let mut future_pinned = 0.0;
    let mut auto_days = 0;

    let mut slots = dates
        .iter()
        .rev()
        .map(|date| {
            let pinned = overrides.get(date).copied();

            let slot = Slot {
                date: *date,
                pinned,
                future_pinned,
                auto_days: auto_days + usize::from(pinned.is_none()),
            };

            match pinned {
                Some(hours) => future_pinned += hours,
                None => auto_days += 1,
            }

            slot
        })
        .collect::<Vec<_>>();

    slots.reverse();
    slots
}

/// Spreads `total_hours` over the working days in `start..=end`.
///
/// Pinned days get their pinned hours (as long as enough hours remain), the
/// other days share what is left after reserving the hours for all pinned
/// days that come after them.
pub(super) fn allocate(
    total_hours: f64,
    start: Date,
    end: Date,
    overrides: &BTreeMap<Date, f64>,
    calendar: &WorkingCalendar,
    options: &SchedulerOptions,
) -> Allocation {
    let mut outcome = AllocationOutcome::Scheduled;
    let mut dates = calendar.working_days_between(start, end).collect::<Vec<_>>();

    if dates.is_empty() {
        let Some(date) = calendar.next_working_day(start, options.lookahead_days) else {
            warn!(
                "no working day within {} days after {}, nothing can be scheduled",
                options.lookahead_days, start
            );
            return Allocation::unschedulable(total_hours);
        };

        debug!(
            "no working day in {}..={}, falling back to {}",
            start, end, date
        );
        outcome = AllocationOutcome::Fallback;
        dates.push(date);
    }

    // every day takes at most what remains, so the total is never overbooked
    let (remaining, days) = make_slots(&dates, overrides).into_iter().fold(
        (total_hours, BTreeMap::new()),
        |(remaining, mut days), slot| {
            let available: f64 = f64::max(remaining, 0.0);

            let hours = match slot.pinned {
                Some(pinned) => {
                    if pinned - available > options.tolerance {
                        warn!(
                            "{}: pinned {:.2}h, but only {:.2}h are left",
                            slot.date, pinned, available
                        );
                    }

                    pinned.min(available)
                }
                None => (available - slot.future_pinned).max(0.0) / slot.auto_days.max(1) as f64,
            };

            trace!(
                "{}: {:.2}h (pinned: {:?}, remaining: {:.2}h)",
                slot.date,
                hours,
                slot.pinned,
                remaining
            );

            days.insert(slot.date, hours);
            (remaining - hours, days)
        },
    );

    if remaining > options.tolerance {
        debug!(
            "{:.2}h could not be placed, every day in the window is pinned",
            remaining
        );
    }

    Allocation::new(days, total_hours, outcome)
}
