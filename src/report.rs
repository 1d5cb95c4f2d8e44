use core::fmt;

use crate::input::Load;
use crate::scheduler::Allocation;
use crate::Forecast;

/// Renders the weeks of a [`Forecast`] as a plain text table.
pub struct ForecastReport<'a> {
    forecast: &'a Forecast,
    with_breakdown: bool,
}

impl<'a> ForecastReport<'a> {
    #[must_use]
    pub fn new(forecast: &'a Forecast) -> Self {
        Self {
            forecast,
            with_breakdown: true,
        }
    }

    #[must_use]
    pub fn with_breakdown(mut self, with_breakdown: bool) -> Self {
        self.with_breakdown = with_breakdown;
        self
    }
}

impl fmt::Display for ForecastReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<10}  {:>4}  {:>8}  {:>8}  {:>5}  status",
            "week", "days", "used", "capacity", "util"
        )?;

        for week in self.forecast.weeks() {
            let summary = week.summary();

            writeln!(
                f,
                "{}  {:>4}  {:>8.2}  {:>8.2}  {:>4.0}%  {}",
                summary.week_start(),
                summary.working_days(),
                summary.used_hours(),
                summary.capacity_hours(),
                week.utilization() * 100.0,
                week.status()
            )?;

            if self.with_breakdown {
                for project in summary.breakdown() {
                    writeln!(
                        f,
                        "            {:<12} {:>8.2}  {}",
                        project.load_id(),
                        project.hours(),
                        project.name()
                    )?;
                }
            }
        }

        let tally = self.forecast.tally();
        write!(
            f,
            "{} weeks: {} under-utilized (< {:.0}%), {} optimal, {} overloaded",
            tally.weeks(),
            tally.under_utilized,
            self.forecast.under_utilization() * 100.0,
            tally.optimal,
            tally.overloaded
        )
    }
}

/// Renders the days of a single load.
pub struct AllocationReport<'a> {
    load: &'a Load,
    allocation: &'a Allocation,
}

impl<'a> AllocationReport<'a> {
    #[must_use]
    pub fn new(load: &'a Load, allocation: &'a Allocation) -> Self {
        Self { load, allocation }
    }
}

impl fmt::Display for AllocationReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {} ({}): {:.2}h, {}",
            self.load.id(),
            self.load.name(),
            self.load.kind(),
            self.load.total_hours(),
            self.allocation.outcome()
        )?;

        for (date, hours) in self.allocation.days() {
            let pinned = if self.load.overrides().contains_key(&date.to_string()) {
                "  (pinned)"
            } else {
                ""
            };

            writeln!(
                f,
                "{} {:<9} {:>6.2}{}",
                date,
                date.week_day().to_string(),
                hours,
                pinned
            )?;
        }

        write!(f, "unassigned: {:.2}h", self.allocation.unassigned())
    }
}
