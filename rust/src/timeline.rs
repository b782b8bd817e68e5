//! Timeline compression: how many working days a project really has.
//!
//! Higher urgency shrinks the usable window and leaves the remainder before
//! the deadline as buffer.

use chrono::NaiveDate;

use crate::models::{Priority, ProjectContext};

/// Urgency multiplier as an integer percentage, so flooring is exact.
pub fn urgency_percent(priority: Option<Priority>) -> i64 {
    match priority {
        Some(Priority::Urgent) => 60,
        Some(Priority::High) => 75,
        Some(Priority::Medium) | None => 85,
        Some(Priority::Low) => 95,
    }
}

pub fn urgency_multiplier(priority: Option<Priority>) -> f64 {
    urgency_percent(priority) as f64 / 100.0
}

/// Calendar days from `reference_date` to `deadline`, never less than 1.
pub fn total_days(reference_date: NaiveDate, deadline: NaiveDate) -> i64 {
    (deadline - reference_date).num_days().max(1)
}

/// Effective working days before the deadline, or `None` without one.
pub fn effective_days(ctx: &ProjectContext) -> Option<i64> {
    let deadline = ctx.deadline?;
    let total = total_days(ctx.reference_date, deadline);
    Some(total * urgency_percent(ctx.priority) / 100)
}
