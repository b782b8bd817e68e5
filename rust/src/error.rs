//! Error types for the scheduling pipeline.

use thiserror::Error;

/// A single malformed task. Fatal to the whole scheduling call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidTaskError {
    #[error("Task at index {index} has an empty id")]
    EmptyId { index: usize },
    #[error("Task {id:?} has non-positive estimated hours: {hours}")]
    NonPositiveHours { id: String, hours: f64 },
    #[error("Task {id:?} has unknown priority: {value:?}")]
    UnknownPriority { id: String, value: String },
    #[error("Duplicate task id: {0:?}")]
    DuplicateId(String),
}

/// Errors that can occur during scheduling.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchedulerError {
    #[error("Invalid task: {0}")]
    InvalidTask(#[from] InvalidTaskError),
    /// Only raised under `CyclePolicy::Reject`.
    #[error("Circular dependency detected: {}", .cycle.join(" -> "))]
    CircularDependency { cycle: Vec<String> },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Malformed schedule request: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for SchedulerError {
    fn from(err: serde_json::Error) -> Self {
        SchedulerError::Parse(err.to_string())
    }
}
