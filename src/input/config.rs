use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Context;
use log::{debug, trace};

use crate::input::toml_input::{InvalidSettings, Loads, Settings};
use crate::input::Load;
use crate::scheduler::SchedulerOptions;
use crate::time::{Date, WorkingCalendar};
use crate::utils;

pub struct Config {
    calendar: WorkingCalendar,
    loads: Vec<Load>,
    start_week: Date,
    weeks: usize,
    under_utilization: f64,
    options: SchedulerOptions,
    output: Option<PathBuf>,
}

pub struct ConfigBuilder {
    settings: Settings,
    loads: Loads,
    start_week: Option<Date>,
    weeks: Option<usize>,
    under_utilization: Option<f64>,
    options: SchedulerOptions,
    output: Option<PathBuf>,
}

impl ConfigBuilder {
    fn new(settings: Settings, loads: Loads) -> Self {
        Self {
            settings,
            loads,
            start_week: None,
            weeks: None,
            under_utilization: None,
            options: SchedulerOptions::default(),
            output: None,
        }
    }

    /// The forecast starts in the week containing this date.
    pub fn start_week(&mut self, date: Date) -> &mut Self {
        self.start_week = Some(date);
        self
    }

    pub fn weeks(&mut self, weeks: usize) -> &mut Self {
        self.weeks = Some(weeks);
        self
    }

    pub fn under_utilization(&mut self, threshold: f64) -> &mut Self {
        self.under_utilization = Some(threshold);
        self
    }

    pub fn options(&mut self, options: SchedulerOptions) -> &mut Self {
        self.options = options;
        self
    }

    pub fn output(&mut self, output: impl Into<PathBuf>) -> &mut Self {
        self.output = Some(output.into());
        self
    }

    /// The monday of the week of the earliest start among the loads, loads
    /// with a malformed start are ignored.
    fn default_start_week(&self) -> Date {
        self.loads
            .loads()
            .iter()
            .filter_map(|load| load.start().parse::<Date>().ok())
            .min()
            .unwrap_or_else(Date::today)
            .week_start()
    }

    pub fn build(self) -> anyhow::Result<Config> {
        let calendar = self.settings.calendar().to_calendar()?;

        let weeks = self.weeks.unwrap_or(self.settings.forecast().weeks());
        if weeks == 0 {
            return Err(InvalidSettings::NoWeeks.into());
        }

        let under_utilization = self
            .under_utilization
            .unwrap_or(self.settings.forecast().under_utilization());
        if !(0.0..=1.0).contains(&under_utilization) {
            return Err(InvalidSettings::Threshold(under_utilization).into());
        }

        let start_week = self
            .start_week
            .map_or_else(|| self.default_start_week(), |date| date.week_start());

        debug!(
            "forecasting {} weeks from {} with {}h per day",
            weeks,
            start_week,
            calendar.effective_daily_capacity()
        );

        Ok(Config {
            calendar,
            loads: self.loads.into_loads(),
            start_week,
            weeks,
            under_utilization,
            options: self.options,
            output: self.output,
        })
    }
}

impl Config {
    pub fn try_from_toml(settings: Settings, loads: Loads) -> ConfigBuilder {
        ConfigBuilder::new(settings, loads)
    }

    pub fn try_from_toml_files(
        calendar: impl AsRef<Path>,
        loads: impl AsRef<Path>,
    ) -> anyhow::Result<ConfigBuilder> {
        trace!(
            "reading `{}` and `{}`",
            calendar.as_ref().display(),
            loads.as_ref().display()
        );

        let settings: Settings = utils::toml_from_reader(
            File::open(calendar.as_ref())
                .with_context(|| format!("failed to open `{}`", calendar.as_ref().display()))?,
        )
        .with_context(|| format!("failed to parse `{}`", calendar.as_ref().display()))?;

        let loads: Loads = utils::toml_from_reader(
            File::open(loads.as_ref())
                .with_context(|| format!("failed to open `{}`", loads.as_ref().display()))?,
        )
        .with_context(|| format!("failed to parse `{}`", loads.as_ref().display()))?;

        Ok(Self::try_from_toml(settings, loads))
    }

    pub fn calendar(&self) -> &WorkingCalendar {
        &self.calendar
    }

    pub fn loads(&self) -> &[Load] {
        &self.loads
    }

    pub fn load(&self, id: &str) -> Option<&Load> {
        self.loads.iter().find(|load| load.id() == id)
    }

    /// The monday of the first forecast week.
    pub fn start_week(&self) -> Date {
        self.start_week
    }

    pub fn weeks(&self) -> usize {
        self.weeks
    }

    pub fn under_utilization(&self) -> f64 {
        self.under_utilization
    }

    pub fn options(&self) -> &SchedulerOptions {
        &self.options
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }
}
