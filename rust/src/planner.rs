//! End-to-end planning: validation, dependency resolution, scheduling and
//! calendar derivation in one call.

use serde::Deserialize;

use crate::config::SchedulerConfig;
use crate::error::SchedulerError;
use crate::events::derive_events;
use crate::log_changes;
use crate::models::{
    ProjectContext, ProjectInput, ProjectPlan, ScheduleWarning, Task, TaskInput,
};
use crate::resolver::resolve_dependencies;
use crate::scheduler::schedule;
use crate::timeline::effective_days;
use crate::validation::{tasks_from_inputs, validate_tasks};

/// JSON request as sent by the task-generation handler.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub tasks: Vec<TaskInput>,
    #[serde(default)]
    pub project: ProjectInput,
}

/// Schedule `tasks` for the project and derive its calendar events.
///
/// Fails without partial results if any task is invalid, the configuration is
/// out of range, or a cycle is found under `CyclePolicy::Reject`.
pub fn plan_project(
    tasks: &[Task],
    ctx: &ProjectContext,
    config: &SchedulerConfig,
) -> Result<ProjectPlan, SchedulerError> {
    config.validate()?;
    validate_tasks(tasks)?;

    let resolution = resolve_dependencies(tasks, config.cycle_policy, config.verbosity)?;
    let effective_days = effective_days(ctx);
    log_changes!(
        config.verbosity,
        "planning {} tasks for {} from {} (deadline {:?}, effective days {:?})",
        tasks.len(),
        ctx.project_name,
        ctx.reference_date,
        ctx.deadline,
        effective_days
    );

    let outcome = schedule(&resolution.ordered(tasks), ctx, config);
    let mut warnings = resolution.warnings;
    if !outcome.clamped.is_empty() {
        warnings.push(ScheduleWarning::CompressedOntoDeadline {
            task_ids: outcome.clamped,
        });
    }
    let calendar_events = derive_events(&outcome.scheduled, ctx, config.verbosity);

    Ok(ProjectPlan {
        scheduled_tasks: outcome.scheduled,
        calendar_events,
        effective_days,
        warnings,
    })
}

/// Plan from the wire-form request.
pub fn plan_request(
    request: ScheduleRequest,
    config: &SchedulerConfig,
) -> Result<ProjectPlan, SchedulerError> {
    let tasks = tasks_from_inputs(request.tasks)?;
    let ctx = request.project.into_context();
    plan_project(&tasks, &ctx, config)
}

/// Plan from a JSON request body, returning the JSON response body.
pub fn plan_from_json(body: &str, config: &SchedulerConfig) -> Result<String, SchedulerError> {
    let request: ScheduleRequest = serde_json::from_str(body)?;
    let plan = plan_request(request, config)?;
    Ok(serde_json::to_string(&plan)?)
}
