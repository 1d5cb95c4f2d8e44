mod report;
mod utils;

pub mod input;
pub mod scheduler;
pub mod time;

use log::info;
use serde::Serialize;

use crate::input::Config;
use crate::scheduler::{
    aggregate_with, summarize_weeks, AllocationEngine, Schedule, Utilization, UtilizationTally,
    WeeklySummary,
};
use crate::time::Date;

pub use report::*;

/// A week of the forecast together with its utilization bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekForecast {
    #[serde(flatten)]
    summary: WeeklySummary,
    utilization: f64,
    status: Utilization,
}

impl WeekForecast {
    pub fn summary(&self) -> &WeeklySummary {
        &self.summary
    }

    pub fn utilization(&self) -> f64 {
        self.utilization
    }

    pub fn status(&self) -> Utilization {
        self.status
    }
}

/// Everything the scheduler derives from the loads and the calendar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    start_week: Date,
    under_utilization: f64,
    schedule: Schedule,
    weeks: Vec<WeekForecast>,
    tally: UtilizationTally,
}

impl Forecast {
    /// The monday of the first week.
    pub fn start_week(&self) -> Date {
        self.start_week
    }

    pub fn under_utilization(&self) -> f64 {
        self.under_utilization
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn weeks(&self) -> &[WeekForecast] {
        &self.weeks
    }

    /// How many of the forecast weeks fall into each bucket.
    pub fn tally(&self) -> UtilizationTally {
        self.tally
    }
}

/// Allocates all loads of the `config`, rolls them up into weeks and
/// classifies each week.
pub fn forecast(config: &Config) -> Forecast {
    let engine = AllocationEngine::new(config.calendar(), *config.options());
    let schedule = aggregate_with(config.loads(), &engine);

    let threshold = config.under_utilization();
    let weeks = summarize_weeks(
        schedule.daily_totals(),
        config.calendar(),
        config.start_week(),
        config.weeks(),
    )
    .into_iter()
    .map(|summary| WeekForecast {
        utilization: summary.utilization(),
        status: summary.classify(threshold),
        summary,
    })
    .collect::<Vec<_>>();

    let tally = UtilizationTally::of(weeks.iter().map(WeekForecast::summary), threshold);

    info!(
        "{} weeks from {}: {} under-utilized, {} overloaded",
        tally.weeks(),
        config.start_week(),
        tally.under_utilized,
        tally.overloaded
    );

    Forecast {
        start_week: config.start_week(),
        under_utilization: threshold,
        schedule,
        weeks,
        tally,
    }
}
