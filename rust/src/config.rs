//! Configuration types for the planner.

use serde::{Deserialize, Serialize};

use crate::error::SchedulerError;
use crate::logging::VERBOSITY_SILENT;

/// What the dependency resolver does when it meets a cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CyclePolicy {
    /// Stop descending into the back edge and treat the dependency as satisfied.
    #[default]
    Tolerate,
    /// Fail the whole call with `SchedulerError::CircularDependency`.
    Reject,
}

impl std::str::FromStr for CyclePolicy {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tolerate" => Ok(Self::Tolerate),
            "reject" => Ok(Self::Reject),
            other => Err(SchedulerError::InvalidConfig(format!(
                "unknown cycle policy: {other:?}"
            ))),
        }
    }
}

/// Configuration for the scheduling pipeline.
///
/// The defaults reproduce the stock duration and cadence policy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SchedulerConfig {
    pub cycle_policy: CyclePolicy,
    /// Working hours per day used to turn estimated hours into days
    pub hours_per_day: f64,
    /// Share of a task's allotted days the cursor advances before the next task starts
    pub cursor_advance_percent: u32,
    /// Spacing between due dates when the project has no deadline
    pub fallback_spacing_days: u32,
    pub verbosity: u8,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            cycle_policy: CyclePolicy::Tolerate,
            hours_per_day: 8.0,
            cursor_advance_percent: 70,
            fallback_spacing_days: 2,
            verbosity: VERBOSITY_SILENT,
        }
    }
}

impl SchedulerConfig {
    /// Check that every knob is inside its usable range.
    pub fn validate(&self) -> Result<(), SchedulerError> {
        if !(self.hours_per_day.is_finite() && self.hours_per_day > 0.0) {
            return Err(SchedulerError::InvalidConfig(format!(
                "hours_per_day must be positive, got {}",
                self.hours_per_day
            )));
        }
        if !(1..=100).contains(&self.cursor_advance_percent) {
            return Err(SchedulerError::InvalidConfig(format!(
                "cursor_advance_percent must be in 1..=100, got {}",
                self.cursor_advance_percent
            )));
        }
        if self.fallback_spacing_days == 0 {
            return Err(SchedulerError::InvalidConfig(
                "fallback_spacing_days must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
