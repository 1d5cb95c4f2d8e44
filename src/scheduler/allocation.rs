use std::collections::BTreeMap;

use derive_more::Display;
use serde::Serialize;

use crate::time::Date;
use crate::utils;

/// How an allocation came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AllocationOutcome {
    /// The load has been spread over its own window.
    #[default]
    #[display("scheduled")]
    Scheduled,
    /// The window of a bounded load had no working day, so everything was
    /// placed on the next working day after its start.
    #[display("fallback")]
    Fallback,
    /// An open-ended load hit the iteration cap before all of its hours (or
    /// pinned days) were placed.
    #[display("truncated")]
    Truncated,
    /// The load could not be scheduled at all (no hours, malformed dates, or
    /// no working day within reach).
    #[display("unschedulable")]
    Unschedulable,
}

/// The hours of one load on each day it is worked on.
///
/// Non-working days never appear in an allocation.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Allocation {
    days: BTreeMap<Date, f64>,
    /// Hours of the load that did not fit anywhere.
    unassigned: f64,
    outcome: AllocationOutcome,
}

impl Allocation {
    #[must_use]
    pub(crate) fn new(
        days: BTreeMap<Date, f64>,
        total_hours: f64,
        outcome: AllocationOutcome,
    ) -> Self {
        let allocated = utils::sum_hours(days.values().copied());

        Self {
            days,
            unassigned: (total_hours - allocated).max(0.0),
            outcome,
        }
    }

    /// An allocation without any day, for a load that can not be scheduled.
    #[must_use]
    pub fn unschedulable(total_hours: f64) -> Self {
        Self {
            days: BTreeMap::new(),
            unassigned: if total_hours.is_finite() {
                total_hours.max(0.0)
            } else {
                0.0
            },
            outcome: AllocationOutcome::Unschedulable,
        }
    }

    /// Returns the hours allocated on the `date`, if the date is part of the
    /// allocation.
    #[must_use]
    pub fn get(&self, date: Date) -> Option<f64> {
        self.days.get(&date).copied()
    }

    /// Iterates over the days in chronological order.
    pub fn days(&self) -> impl Iterator<Item = (Date, f64)> + '_ {
        self.days.iter().map(|(date, hours)| (*date, *hours))
    }

    pub fn as_map(&self) -> &BTreeMap<Date, f64> {
        &self.days
    }

    /// The sum of all allocated hours.
    #[must_use]
    pub fn total(&self) -> f64 {
        utils::sum_hours(self.days.values().copied())
    }

    #[must_use]
    pub fn unassigned(&self) -> f64 {
        self.unassigned
    }

    #[must_use]
    pub fn outcome(&self) -> AllocationOutcome {
        self.outcome
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    #[must_use]
    pub fn first_day(&self) -> Option<Date> {
        self.days.keys().next().copied()
    }

    #[must_use]
    pub fn last_day(&self) -> Option<Date> {
        self.days.keys().next_back().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    use crate::{date, map};

    #[test]
    fn test_unassigned_hours() {
        let allocation = Allocation::new(
            map! {
                date!(2024:03:04) => 3.0,
                date!(2024:03:05) => 2.0,
            },
            8.0,
            AllocationOutcome::Scheduled,
        );

        assert_eq!(allocation.total(), 5.0);
        assert_eq!(allocation.unassigned(), 3.0);
        assert_eq!(allocation.first_day(), Some(date!(2024:03:04)));
        assert_eq!(allocation.last_day(), Some(date!(2024:03:05)));
    }

    #[test]
    fn test_unschedulable() {
        assert_eq!(Allocation::unschedulable(12.0).unassigned(), 12.0);
        assert_eq!(Allocation::unschedulable(-4.0).unassigned(), 0.0);
        assert_eq!(Allocation::unschedulable(f64::NAN).unassigned(), 0.0);
        assert_eq!(Allocation::unschedulable(1.0).is_empty(), true);
    }

    #[test]
    fn test_serialize() {
        let allocation = Allocation::new(
            map! { date!(2024:03:04) => 8.0 },
            8.0,
            AllocationOutcome::Fallback,
        );

        assert_eq!(
            serde_json::to_string(&allocation).expect("allocation should serialize"),
            "{\"days\":{\"2024-03-04\":8.0},\"unassigned\":0.0,\"outcome\":\"fallback\"}"
        );
    }
}
