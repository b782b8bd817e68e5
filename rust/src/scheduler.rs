//! Deadline-constrained due-date assignment.
//!
//! Walks the dependency-ordered tasks once, threading a date cursor through a
//! fold. Each task is allotted `max(priority floor, ceil(hours / hours_per_day))`
//! days from the cursor; the cursor then advances only part of that span so
//! consecutive tasks overlap. Due dates never pass the project deadline.

use chrono::{Days, NaiveDate};

use crate::backward_pass::latest_finish_dates;
use crate::config::SchedulerConfig;
use crate::models::{Priority, ProjectContext, ScheduledTask, Task};
use crate::resolver::OrderedTask;
use crate::{log_changes, log_debug};

/// Result of the scheduling pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScheduleOutcome {
    /// Scheduled tasks in dependency order
    pub scheduled: Vec<ScheduledTask>,
    /// Ids whose computed due date was pulled back onto the deadline
    pub clamped: Vec<String>,
}

/// Minimum days a task gets for its priority.
pub fn priority_floor_days(priority: Priority) -> i64 {
    match priority {
        Priority::Urgent => 1,
        Priority::High => 2,
        Priority::Medium => 3,
        Priority::Low => 4,
    }
}

/// Whole working days needed for the estimated effort.
pub fn estimated_days(estimated_hours: f64, hours_per_day: f64) -> i64 {
    // `as` saturates for absurdly large estimates
    (estimated_hours / hours_per_day).ceil() as i64
}

/// Days allotted to a task.
pub fn allotted_days(task: &Task, config: &SchedulerConfig) -> i64 {
    priority_floor_days(task.priority)
        .max(estimated_days(task.estimated_hours, config.hours_per_day))
}

/// How far the cursor moves after placing a task of `allotted` days.
pub fn cursor_advance(allotted: i64, advance_percent: u32) -> i64 {
    (allotted.saturating_mul(i64::from(advance_percent)) / 100).max(1)
}

/// Add calendar days, saturating at the end of the representable range.
pub(crate) fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_days(Days::new(days.max(0) as u64))
        .unwrap_or(NaiveDate::MAX)
}

#[derive(Clone, Copy, Debug)]
struct Cursor {
    current: NaiveDate,
    previous_due: Option<NaiveDate>,
}

/// Assign a due date to every task.
///
/// `ordered` must already be in dependency order. Deterministic: the only date
/// consulted is `ctx.reference_date`.
pub fn schedule(
    ordered: &[OrderedTask<'_>],
    ctx: &ProjectContext,
    config: &SchedulerConfig,
) -> ScheduleOutcome {
    match ctx.deadline {
        Some(deadline) => {
            schedule_before_deadline(ordered, ctx.reference_date, deadline, config)
        }
        None => schedule_fixed_cadence(ordered, ctx.reference_date, config),
    }
}

fn schedule_before_deadline(
    ordered: &[OrderedTask<'_>],
    reference_date: NaiveDate,
    deadline: NaiveDate,
    config: &SchedulerConfig,
) -> ScheduleOutcome {
    let latest = latest_finish_dates(ordered, deadline, config);
    let start = Cursor {
        current: reference_date,
        previous_due: None,
    };
    let (outcome, _) = ordered.iter().zip(latest).fold(
        (ScheduleOutcome::default(), start),
        |(mut outcome, cursor), (item, latest_finish)| {
            let task = item.task;
            let allotted = allotted_days(task, config);
            let raw_due = add_days(cursor.current, allotted);
            let due_date = if raw_due > deadline {
                log_changes!(
                    config.verbosity,
                    "task {} due {} clamped to deadline {}",
                    task.id,
                    raw_due,
                    deadline
                );
                outcome.clamped.push(task.id.clone());
                deadline
            } else {
                log_changes!(config.verbosity, "task {} due {}", task.id, raw_due);
                raw_due
            };

            let overlap_days = cursor
                .previous_due
                .map(|prev| (prev - cursor.current).num_days().max(0))
                .unwrap_or(0);
            let next = add_days(
                cursor.current,
                cursor_advance(allotted, config.cursor_advance_percent),
            );
            log_debug!(
                config.verbosity,
                "cursor {} -> {} after {} ({} days allotted)",
                cursor.current,
                next,
                task.id,
                allotted
            );

            outcome.scheduled.push(ScheduledTask {
                task: task.clone(),
                start_date: cursor.current,
                due_date,
                latest_finish: Some(latest_finish),
                scheduled_days: allotted,
                overlap_days,
                original_index: item.original_index,
            });
            (
                outcome,
                Cursor {
                    current: next,
                    previous_due: Some(due_date),
                },
            )
        },
    );
    outcome
}

fn schedule_fixed_cadence(
    ordered: &[OrderedTask<'_>],
    reference_date: NaiveDate,
    config: &SchedulerConfig,
) -> ScheduleOutcome {
    let spacing = i64::from(config.fallback_spacing_days);
    let scheduled = ordered
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let due_date = add_days(reference_date, spacing.saturating_mul(index as i64));
            log_changes!(
                config.verbosity,
                "task {} due {} (no deadline)",
                item.task.id,
                due_date
            );
            ScheduledTask {
                task: item.task.clone(),
                start_date: due_date,
                due_date,
                latest_finish: None,
                scheduled_days: allotted_days(item.task, config),
                overlap_days: 0,
                original_index: item.original_index,
            }
        })
        .collect();
    ScheduleOutcome {
        scheduled,
        clamped: Vec::new(),
    }
}
