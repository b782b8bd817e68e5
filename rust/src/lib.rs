//! Dependency-aware, deadline-constrained task scheduling.
//!
//! Takes a flat list of generated tasks plus project metadata and produces a
//! due date for every task and a small set of calendar events consistent with
//! that schedule.
//!
//! Pipeline: `validation` → `resolver` → `timeline` → `scheduler` (with its
//! `backward_pass`) → `events`, wired together by `planner`. Every stage is a
//! pure function of its inputs.
//! Python bindings live behind the `python` feature.

pub mod backward_pass;
pub mod color;
pub mod config;
pub mod error;
pub mod events;
mod interner;
pub mod logging;
pub mod models;
pub mod planner;
pub mod resolver;
pub mod scheduler;
pub mod timeline;
pub mod validation;

#[cfg(feature = "python")]
mod python;

pub use backward_pass::latest_finish_dates;
pub use config::{CyclePolicy, SchedulerConfig};
pub use error::{InvalidTaskError, SchedulerError};
pub use events::derive_events;
pub use models::{
    CalendarEvent, EventType, Priority, ProjectContext, ProjectInput, ProjectPlan,
    ScheduleWarning, ScheduledTask, Task, TaskInput,
};
pub use planner::{plan_from_json, plan_project, plan_request, ScheduleRequest};
pub use resolver::{resolve_dependencies, OrderedTask, Resolution};
pub use scheduler::{schedule, ScheduleOutcome};
pub use timeline::effective_days;
pub use validation::validate_tasks;
