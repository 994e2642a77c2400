use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::error::{FlowError, Result};

// ── Status categories ──

/// Coarse workflow bucket every fine-grained tracker status maps onto.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatusCategory {
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Done")]
    Done,
}

impl StatusCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCategory::ToDo => "To Do",
            StatusCategory::InProgress => "In Progress",
            StatusCategory::Done => "Done",
        }
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusCategory {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "to do" | "todo" | "to_do" => Ok(StatusCategory::ToDo),
            "in progress" | "in_progress" | "inprogress" => Ok(StatusCategory::InProgress),
            "done" => Ok(StatusCategory::Done),
            _ => Err(FlowError::validation(format!("unknown status category {s:?}"))),
        }
    }
}

/// Structural tier of an issue.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum HierarchyLevel {
    #[default]
    Story,
    Epic,
}

impl FromStr for HierarchyLevel {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "story" => Ok(HierarchyLevel::Story),
            "epic" => Ok(HierarchyLevel::Epic),
            _ => Err(FlowError::validation(format!("unknown hierarchy level {s:?}"))),
        }
    }
}

// ── Issue snapshot ──

/// One issue as it looked at sync time. Read-only inside the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IssueSnapshot {
    pub key: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub started_at: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option", skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<OffsetDateTime>,
    pub status_category: StatusCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycle_time_days: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<String>,
    #[serde(default)]
    pub hierarchy_level: HierarchyLevel,
    /// Key of the owning epic. Resolved by lookup, never owned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_key: Option<String>,
}

impl IssueSnapshot {
    /// A freshly created issue that has not moved yet.
    pub fn new(key: impl Into<String>, created_at: OffsetDateTime) -> Self {
        Self {
            key: key.into(),
            created_at,
            started_at: None,
            completed_at: None,
            status_category: StatusCategory::ToDo,
            cycle_time_days: None,
            summary: None,
            issue_type: None,
            hierarchy_level: HierarchyLevel::Story,
            parent_key: None,
        }
    }

    pub fn started(mut self, at: OffsetDateTime) -> Self {
        self.started_at = Some(at);
        self.status_category = StatusCategory::InProgress;
        self.cycle_time_days = cycle_time_between(self.started_at, self.completed_at);
        self
    }

    pub fn completed(mut self, at: OffsetDateTime) -> Self {
        self.completed_at = Some(at);
        self.status_category = StatusCategory::Done;
        self.cycle_time_days = cycle_time_between(self.started_at, self.completed_at);
        self
    }

    pub fn with_parent(mut self, parent_key: impl Into<String>) -> Self {
        self.parent_key = Some(parent_key.into());
        self
    }

    pub fn with_level(mut self, level: HierarchyLevel) -> Self {
        self.hierarchy_level = level;
        self
    }

    /// Stored cycle time, or one derived from the timestamps when absent.
    pub fn cycle_time_days(&self) -> Option<f64> {
        self.cycle_time_days
            .or_else(|| cycle_time_between(self.started_at, self.completed_at))
    }

    /// `started_at <= completed_at` whenever both are set.
    pub fn is_consistent(&self) -> bool {
        match (self.started_at, self.completed_at) {
            (Some(s), Some(c)) => s <= c,
            _ => true,
        }
    }
}

/// Whole elapsed hours between start and completion, divided by 24.
pub fn cycle_time_between(
    started_at: Option<OffsetDateTime>,
    completed_at: Option<OffsetDateTime>,
) -> Option<f64> {
    let (s, c) = (started_at?, completed_at?);
    Some((c - s).whole_hours() as f64 / 24.0)
}

// ── Derived flow values ──

/// A single status-category change. Only lives during aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionEvent<'a> {
    pub issue_key: &'a str,
    pub at: OffsetDateTime,
    pub from: Option<StatusCategory>,
    pub to: StatusCategory,
}

/// One day of the cumulative flow diagram.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CfdRow {
    pub date: Date,
    pub total: u32,
    pub to_do: u32,
    pub in_progress: u32,
    pub done: u32,
}

impl CfdRow {
    pub fn empty(date: Date) -> Self {
        Self {
            date,
            total: 0,
            to_do: 0,
            in_progress: 0,
            done: 0,
        }
    }

    /// Same counts, another day.
    pub fn carried_to(&self, date: Date) -> Self {
        Self { date, ..*self }
    }

    pub fn count(&self, category: StatusCategory) -> u32 {
        match category {
            StatusCategory::ToDo => self.to_do,
            StatusCategory::InProgress => self.in_progress,
            StatusCategory::Done => self.done,
        }
    }
}

/// Empirical samples that drive the forecast simulator.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Measurements {
    pub cycle_times: Vec<f64>,
    pub throughputs: Vec<f64>,
}

impl Measurements {
    pub fn new(cycle_times: Vec<f64>, throughputs: Vec<f64>) -> Self {
        Self {
            cycle_times,
            throughputs,
        }
    }

    /// Both sample sets must be non-empty.
    pub fn validate(&self) -> Result<()> {
        if self.cycle_times.is_empty() {
            return Err(FlowError::insufficient("no cycle time samples"));
        }
        if self.throughputs.is_empty() {
            return Err(FlowError::insufficient("no throughput samples"));
        }
        Ok(())
    }
}

/// Half-open span of calendar days supplied by the caller.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub from: Date,
    pub to: Date,
}

impl DateRange {
    pub fn new(from: Date, to: Date) -> Result<Self> {
        if from >= to {
            return Err(FlowError::validation(format!(
                "date range start {from} must be before end {to}"
            )));
        }
        Ok(Self { from, to })
    }

    /// Build from optional bounds, rejecting missing ends.
    pub fn require(from: Option<Date>, to: Option<Date>) -> Result<Self> {
        match (from, to) {
            (Some(from), Some(to)) => Self::new(from, to),
            (None, _) => Err(FlowError::validation("missing start of date range")),
            (_, None) => Err(FlowError::validation("missing end of date range")),
        }
    }

    /// `from <= day < to`.
    pub fn contains(&self, day: Date) -> bool {
        self.from <= day && day < self.to
    }

    /// Number of calendar days covered.
    pub fn days(&self) -> i64 {
        (self.to - self.from).whole_days()
    }
}
