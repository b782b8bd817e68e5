//! Core data types for the planner.
//!
//! Field names serialize in camelCase so the types can be exchanged as-is with
//! the request handler that feeds generated tasks in and persists the results.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::InvalidTaskError;

/// Urgency level shared by tasks and projects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// Parse a priority label, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "LOW" => Some(Self::Low),
            "MEDIUM" => Some(Self::Medium),
            "HIGH" => Some(Self::High),
            "URGENT" => Some(Self::Urgent),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Urgent => "URGENT",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generated task to be scheduled.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub priority: Priority,
    pub estimated_hours: f64,
    /// Ids of tasks that must come first. Unknown ids are ignored.
    #[serde(default)]
    pub depends_on: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Task {
    pub fn new(id: impl Into<String>, priority: Priority, estimated_hours: f64) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            description: String::new(),
            priority,
            estimated_hours,
            depends_on: Vec::new(),
            category: None,
            tags: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_dependencies<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends_on = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn is_milestone(&self) -> bool {
        self.category.as_deref() == Some("milestone")
    }

    /// Convert the lenient wire form, rejecting priorities outside the enum.
    pub fn from_input(input: TaskInput) -> Result<Self, InvalidTaskError> {
        let priority =
            Priority::parse(&input.priority).ok_or_else(|| InvalidTaskError::UnknownPriority {
                id: input.id.clone(),
                value: input.priority.clone(),
            })?;
        Ok(Self {
            id: input.id,
            title: input.title,
            description: input.description,
            priority,
            estimated_hours: input.estimated_hours,
            depends_on: input.depends_on,
            category: input.category,
            tags: input.tags,
        })
    }
}

/// Task as supplied by the upstream generator, before validation.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TaskInput {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: String,
    pub estimated_hours: f64,
    pub depends_on: Vec<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
}

/// Project-level inputs for one scheduling run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectContext {
    pub reference_date: NaiveDate,
    /// No deadline means the fixed fallback cadence is used.
    pub deadline: Option<NaiveDate>,
    /// Unset means the default (MEDIUM) urgency multiplier.
    pub priority: Option<Priority>,
    pub project_name: String,
    pub workspace_id: String,
    #[serde(default)]
    pub attendees: Vec<String>,
}

impl ProjectContext {
    /// Context anchored at today's UTC date.
    pub fn new(project_name: impl Into<String>, workspace_id: impl Into<String>) -> Self {
        Self {
            reference_date: Utc::now().date_naive(),
            deadline: None,
            priority: None,
            project_name: project_name.into(),
            workspace_id: workspace_id.into(),
            attendees: Vec::new(),
        }
    }

    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = date;
        self
    }

    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_attendees(mut self, attendees: Vec<String>) -> Self {
        self.attendees = attendees;
        self
    }
}

/// Wire form of `ProjectContext`.
///
/// Dates may be plain `YYYY-MM-DD` or full RFC 3339 timestamps. An unknown
/// priority label is treated as unset rather than rejected.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectInput {
    #[serde(deserialize_with = "lenient_date")]
    pub reference_date: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient_date")]
    pub deadline: Option<NaiveDate>,
    pub priority: Option<String>,
    pub project_name: String,
    pub workspace_id: String,
    pub attendees: Vec<String>,
}

impl ProjectInput {
    pub fn into_context(self) -> ProjectContext {
        ProjectContext {
            reference_date: self
                .reference_date
                .unwrap_or_else(|| Utc::now().date_naive()),
            deadline: self.deadline,
            priority: self.priority.as_deref().and_then(Priority::parse),
            project_name: self.project_name,
            workspace_id: self.workspace_id,
            attendees: self.attendees,
        }
    }
}

/// Parse a calendar date from `YYYY-MM-DD` or an RFC 3339 / ISO timestamp.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|s| parse_date(&s).ok_or_else(|| de::Error::custom(format!("invalid date: {s:?}"))))
        .transpose()
}

/// A task with its assigned dates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTask {
    #[serde(flatten)]
    pub task: Task,
    /// Cursor position when the task was placed
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    /// Latest finish that still lets every dependent meet the deadline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_finish: Option<NaiveDate>,
    /// Days allotted to the task, always at least 1
    pub scheduled_days: i64,
    /// Calendar days shared with the previously placed task
    pub overlap_days: i64,
    /// Position in the caller's task list
    pub original_index: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventType {
    Meeting,
    Deadline,
    Review,
    Planning,
}

/// A human-facing calendar entry derived from the schedule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub description: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub duration_hours: f64,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub color: String,
    pub attendees: Vec<String>,
    pub notification_enabled: bool,
    /// Task a milestone marker was derived from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
}

/// Non-fatal conditions the caller should surface.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ScheduleWarning {
    /// Tasks whose computed due date was pulled back onto the deadline.
    #[serde(rename_all = "camelCase")]
    CompressedOntoDeadline { task_ids: Vec<String> },
    /// A dependency edge dropped to break a cycle.
    #[serde(rename_all = "camelCase")]
    CycleBroken {
        task_id: String,
        dependency_id: String,
    },
    #[serde(rename_all = "camelCase")]
    UnknownDependency {
        task_id: String,
        dependency_id: String,
    },
}

impl fmt::Display for ScheduleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CompressedOntoDeadline { task_ids } => write!(
                f,
                "{} task(s) compressed onto deadline date: {}",
                task_ids.len(),
                task_ids.join(", ")
            ),
            Self::CycleBroken {
                task_id,
                dependency_id,
            } => write!(
                f,
                "dependency cycle broken: {task_id} -> {dependency_id} treated as satisfied"
            ),
            Self::UnknownDependency {
                task_id,
                dependency_id,
            } => write!(f, "task {task_id} depends on unknown task {dependency_id}"),
        }
    }
}

/// Full output of one planning call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPlan {
    pub scheduled_tasks: Vec<ScheduledTask>,
    pub calendar_events: Vec<CalendarEvent>,
    /// Compressed working window; absent without a deadline
    pub effective_days: Option<i64>,
    pub warnings: Vec<ScheduleWarning>,
}
