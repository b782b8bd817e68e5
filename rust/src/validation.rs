//! Input integrity checks for generated tasks.
//!
//! Dependency references are deliberately not checked here: unknown ids are
//! dropped by the resolver instead.

use rustc_hash::FxHashSet;

use crate::error::InvalidTaskError;
use crate::models::{Task, TaskInput};

/// Check a single task.
pub fn validate_task(index: usize, task: &Task) -> Result<(), InvalidTaskError> {
    if task.id.trim().is_empty() {
        return Err(InvalidTaskError::EmptyId { index });
    }
    // Also rejects NaN and infinities
    if !(task.estimated_hours.is_finite() && task.estimated_hours > 0.0) {
        return Err(InvalidTaskError::NonPositiveHours {
            id: task.id.clone(),
            hours: task.estimated_hours,
        });
    }
    Ok(())
}

/// Check every task and require ids to be unique. Stops at the first failure.
pub fn validate_tasks(tasks: &[Task]) -> Result<(), InvalidTaskError> {
    let mut seen: FxHashSet<&str> =
        FxHashSet::with_capacity_and_hasher(tasks.len(), Default::default());
    for (index, task) in tasks.iter().enumerate() {
        validate_task(index, task)?;
        if !seen.insert(task.id.as_str()) {
            return Err(InvalidTaskError::DuplicateId(task.id.clone()));
        }
    }
    Ok(())
}

/// Convert wire-form tasks and validate the result.
pub fn tasks_from_inputs(inputs: Vec<TaskInput>) -> Result<Vec<Task>, InvalidTaskError> {
    let mut tasks = Vec::with_capacity(inputs.len());
    for (index, input) in inputs.into_iter().enumerate() {
        if input.id.trim().is_empty() {
            return Err(InvalidTaskError::EmptyId { index });
        }
        tasks.push(Task::from_input(input)?);
    }
    validate_tasks(&tasks)?;
    Ok(tasks)
}
