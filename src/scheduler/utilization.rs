use derive_more::Display;
use serde::Serialize;

use crate::scheduler::WeeklySummary;

/// The under-utilization threshold used when none is configured.
pub const DEFAULT_UNDER_UTILIZATION: f64 = 0.7;

/// Used hours are allowed to exceed the capacity by this much before a week
/// counts as overloaded.
const OVERLOAD_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Utilization {
    #[display("under-utilized")]
    UnderUtilized,
    #[display("optimal")]
    Optimal,
    #[display("overloaded")]
    Overloaded,
}

impl WeeklySummary {
    /// The ratio of used hours to capacity, `0` for a week without capacity.
    #[must_use]
    pub fn utilization(&self) -> f64 {
        if self.capacity_hours() > 0.0 {
            self.used_hours() / self.capacity_hours()
        } else {
            0.0
        }
    }

    /// Puts the week into a bucket, see [`classify`].
    #[must_use]
    pub fn classify(&self, threshold: f64) -> Utilization {
        classify(self, threshold)
    }
}

/// A week is overloaded if more hours are used than available, and
/// under-utilized if its utilization is below `threshold`.
///
/// Overloading is checked first, so a week without capacity that still has
/// work in it is overloaded.
#[must_use]
pub fn classify(summary: &WeeklySummary, threshold: f64) -> Utilization {
    if summary.used_hours() - summary.capacity_hours() > OVERLOAD_TOLERANCE {
        Utilization::Overloaded
    } else if summary.utilization() < threshold {
        Utilization::UnderUtilized
    } else {
        Utilization::Optimal
    }
}

/// Counts how many weeks fall into each bucket.
///
/// Which weeks are passed in (for example only the weeks of the current
/// month) is up to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct UtilizationTally {
    pub under_utilized: usize,
    pub optimal: usize,
    pub overloaded: usize,
}

impl UtilizationTally {
    #[must_use]
    pub fn of<'a>(summaries: impl IntoIterator<Item = &'a WeeklySummary>, threshold: f64) -> Self {
        summaries
            .into_iter()
            .fold(Self::default(), |mut tally, summary| {
                match summary.classify(threshold) {
                    Utilization::UnderUtilized => tally.under_utilized += 1,
                    Utilization::Optimal => tally.optimal += 1,
                    Utilization::Overloaded => tally.overloaded += 1,
                }

                tally
            })
    }

    #[must_use]
    pub fn weeks(&self) -> usize {
        self.under_utilized + self.optimal + self.overloaded
    }
}
