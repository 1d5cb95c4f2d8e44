use std::collections::BTreeMap;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::time::Date;

/// Where a load comes from in the host application.
///
/// The scheduler treats both kinds the same, the kind is only carried along
/// for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadKind {
    /// The remaining fabrication hours of an in-progress project.
    #[default]
    #[display("project")]
    Project,
    /// A manually entered workload entry.
    #[display("backlog")]
    Backlog,
}

/// A unit of work that has to be spread over the calendar.
///
/// The dates are kept exactly as the host supplies them (`YYYY-MM-DD`
/// strings), so that a malformed value only makes this load unschedulable
/// instead of failing everything that is read together with it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Load {
    #[serde(default)]
    id: String,
    name: String,
    #[serde(default)]
    kind: LoadKind,
    #[serde(alias = "hours")]
    total_hours: f64,
    start: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end: Option<String>,
    /// Hours pinned by a human for a specific date.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    overrides: BTreeMap<String, f64>,
}

impl Load {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        total_hours: f64,
        start: impl ToString,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: LoadKind::default(),
            total_hours,
            start: start.to_string(),
            end: None,
            overrides: BTreeMap::new(),
        }
    }

    /// Replaces the id, for loads read from a table keyed by their id.
    #[must_use]
    pub(crate) fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: LoadKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_end(mut self, end: impl ToString) -> Self {
        self.end = Some(end.to_string());
        self
    }

    /// Adds an override without any validation of the key or the hours.
    #[must_use]
    pub fn with_override(mut self, date: impl ToString, hours: f64) -> Self {
        self.overrides.insert(date.to_string(), hours);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> LoadKind {
        self.kind
    }

    /// How many hours have to be scheduled in total.
    pub fn total_hours(&self) -> f64 {
        self.total_hours
    }

    /// The first day work can start on, as supplied by the host.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// The last day work can happen on. A load without an end is open-ended.
    pub fn end(&self) -> Option<&str> {
        self.end.as_deref()
    }

    pub fn is_open_ended(&self) -> bool {
        self.end.is_none()
    }

    pub fn overrides(&self) -> &BTreeMap<String, f64> {
        &self.overrides
    }

    /// Pins the hours for one day. Negative (or NaN) hours are stored as zero.
    ///
    /// The next allocation of this load will honor the value.
    pub fn set_override(&mut self, date: Date, hours: f64) {
        self.overrides.insert(date.to_string(), hours.max(0.0));
    }

    /// Removes the pinned hours for one day, so the day is scheduled
    /// automatically again.
    pub fn clear_override(&mut self, date: Date) -> Option<f64> {
        self.overrides.remove(&date.to_string())
    }
}
