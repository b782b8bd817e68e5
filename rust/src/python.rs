//! PyO3 bindings, built with the `python` feature.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use chrono::NaiveDate;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::config::{CyclePolicy, SchedulerConfig};
use crate::error::SchedulerError;
use crate::models::{Priority, ProjectContext};

impl From<SchedulerError> for PyErr {
    fn from(err: SchedulerError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

/// Scheduler configuration (PyO3 wrapper).
#[pyclass(name = "SchedulerConfig")]
#[derive(Clone, Debug)]
pub struct PySchedulerConfig {
    /// "tolerate" or "reject"
    #[pyo3(get, set)]
    pub cycle_policy: String,
    #[pyo3(get, set)]
    pub hours_per_day: f64,
    #[pyo3(get, set)]
    pub cursor_advance_percent: u32,
    #[pyo3(get, set)]
    pub fallback_spacing_days: u32,
    #[pyo3(get, set)]
    pub verbosity: u8,
}

#[pymethods]
impl PySchedulerConfig {
    #[new]
    #[pyo3(signature = (
        cycle_policy=None,
        hours_per_day=None,
        cursor_advance_percent=None,
        fallback_spacing_days=None,
        verbosity=None
    ))]
    fn new(
        cycle_policy: Option<String>,
        hours_per_day: Option<f64>,
        cursor_advance_percent: Option<u32>,
        fallback_spacing_days: Option<u32>,
        verbosity: Option<u8>,
    ) -> Self {
        let defaults = SchedulerConfig::default();
        Self {
            cycle_policy: cycle_policy.unwrap_or_else(|| "tolerate".to_string()),
            hours_per_day: hours_per_day.unwrap_or(defaults.hours_per_day),
            cursor_advance_percent: cursor_advance_percent
                .unwrap_or(defaults.cursor_advance_percent),
            fallback_spacing_days: fallback_spacing_days.unwrap_or(defaults.fallback_spacing_days),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "SchedulerConfig(cycle_policy={:?}, hours_per_day={}, cursor_advance_percent={})",
            self.cycle_policy, self.hours_per_day, self.cursor_advance_percent
        )
    }
}

impl PySchedulerConfig {
    fn to_config(&self) -> Result<SchedulerConfig, SchedulerError> {
        let config = SchedulerConfig {
            cycle_policy: self.cycle_policy.parse::<CyclePolicy>()?,
            hours_per_day: self.hours_per_day,
            cursor_advance_percent: self.cursor_advance_percent,
            fallback_spacing_days: self.fallback_spacing_days,
            verbosity: self.verbosity,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Schedule a JSON request `{"tasks": [...], "project": {...}}`.
///
/// # Returns
/// * JSON string with `scheduledTasks`, `calendarEvents`, `effectiveDays` and `warnings`
///
/// # Raises
/// * ValueError for malformed JSON, invalid tasks, bad config, or a rejected cycle
#[pyfunction]
#[pyo3(signature = (request_json, config=None))]
fn schedule_project(request_json: &str, config: Option<PySchedulerConfig>) -> PyResult<String> {
    let config = match config {
        Some(c) => c.to_config()?,
        None => SchedulerConfig::default(),
    };
    Ok(crate::planner::plan_from_json(request_json, &config)?)
}

/// Effective working days before `deadline`, or None without a deadline.
#[pyfunction]
#[pyo3(signature = (reference_date, deadline=None, priority=None))]
fn effective_days(
    reference_date: NaiveDate,
    deadline: Option<NaiveDate>,
    priority: Option<String>,
) -> Option<i64> {
    let ctx = ProjectContext {
        reference_date,
        deadline,
        priority: priority.as_deref().and_then(Priority::parse),
        project_name: String::new(),
        workspace_id: String::new(),
        attendees: Vec::new(),
    };
    crate::timeline::effective_days(&ctx)
}

/// Deterministic hex color for a project.
#[pyfunction]
fn project_color(project_name: &str, workspace_id: &str) -> &'static str {
    crate::color::project_color(project_name, workspace_id)
}

/// The taskplan.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PySchedulerConfig>()?;

    m.add_function(wrap_pyfunction!(schedule_project, m)?)?;
    m.add_function(wrap_pyfunction!(effective_days, m)?)?;
    m.add_function(wrap_pyfunction!(project_color, m)?)?;

    Ok(())
}
