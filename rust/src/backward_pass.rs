//! Backward pass: propagates the project deadline back through dependencies.
//!
//! A task with no dependents must finish by the deadline. A dependency must
//! finish early enough for each dependent to still fit its allotted days
//! before the dependent's own latest finish.

use chrono::{Days, NaiveDate};
use rustc_hash::FxHashMap;

use crate::config::SchedulerConfig;
use crate::resolver::OrderedTask;
use crate::scheduler::allotted_days;

/// Compute when a dependency must finish for its dependent to meet its latest finish.
fn compute_dependency_deadline(dependent_latest: NaiveDate, dependent_days: i64) -> NaiveDate {
    dependent_latest
        .checked_sub_days(Days::new(dependent_days.max(0) as u64))
        .unwrap_or(NaiveDate::MIN)
}

/// Latest acceptable finish date for each task, aligned with `ordered`.
///
/// Walks the dependency order in reverse so every dependent is final before
/// its dependencies are visited. Edges pointing forward in the order (those
/// dropped to break a cycle) are ignored, as are unknown ids.
pub fn latest_finish_dates(
    ordered: &[OrderedTask<'_>],
    deadline: NaiveDate,
    config: &SchedulerConfig,
) -> Vec<NaiveDate> {
    let positions: FxHashMap<&str, usize> = ordered
        .iter()
        .enumerate()
        .map(|(pos, item)| (item.task.id.as_str(), pos))
        .collect();
    let mut latest = vec![deadline; ordered.len()];

    for pos in (0..ordered.len()).rev() {
        let task = ordered[pos].task;
        let dep_deadline = compute_dependency_deadline(latest[pos], allotted_days(task, config));
        for dep_id in &task.depends_on {
            match positions.get(dep_id.as_str()) {
                Some(&dep_pos) if dep_pos < pos => {
                    latest[dep_pos] = latest[dep_pos].min(dep_deadline);
                }
                _ => {}
            }
        }
    }

    latest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CyclePolicy;
    use crate::models::{Priority, Task};
    use crate::resolver::resolve_dependencies;

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn make_task(id: &str, priority: Priority, hours: f64, deps: &[&str]) -> Task {
        Task::new(id, priority, hours).with_dependencies(deps.iter().copied())
    }

    fn latest_by_id(tasks: &[Task], deadline: NaiveDate) -> FxHashMap<String, NaiveDate> {
        let resolution = resolve_dependencies(tasks, CyclePolicy::Tolerate, 0).unwrap();
        let ordered = resolution.ordered(tasks);
        let latest = latest_finish_dates(&ordered, deadline, &SchedulerConfig::default());
        ordered
            .iter()
            .zip(latest)
            .map(|(item, date)| (item.task.id.clone(), date))
            .collect()
    }

    #[test]
    fn test_single_task_gets_deadline() {
        let tasks = vec![make_task("a", Priority::Medium, 8.0, &[])];
        let latest = latest_by_id(&tasks, d(2025, 1, 20));
        assert_eq!(latest["a"], d(2025, 1, 20));
    }

    #[test]
    fn test_dependency_chain_deadline_propagation() {
        // b depends on a; b is allotted 3 days (MEDIUM floor)
        let tasks = vec![
            make_task("a", Priority::Medium, 8.0, &[]),
            make_task("b", Priority::Medium, 8.0, &["a"]),
        ];
        let latest = latest_by_id(&tasks, d(2025, 1, 20));
        assert_eq!(latest["b"], d(2025, 1, 20));
        assert_eq!(latest["a"], d(2025, 1, 17));
    }

    #[test]
    fn test_diamond_dependency() {
        // d depends on b and c, which both depend on a
        let tasks = vec![
            make_task("a", Priority::Urgent, 8.0, &[]),
            make_task("b", Priority::High, 16.0, &["a"]),
            make_task("c", Priority::Urgent, 40.0, &["a"]),
            make_task("d", Priority::Low, 8.0, &["b", "c"]),
        ];
        let latest = latest_by_id(&tasks, d(2025, 1, 30));

        // d: Jan 30, b and c: Jan 30 - 4 = Jan 26
        // a via b: Jan 26 - 2 = Jan 24, via c: Jan 26 - 5 = Jan 21 (tighter, wins)
        assert_eq!(latest["d"], d(2025, 1, 30));
        assert_eq!(latest["b"], d(2025, 1, 26));
        assert_eq!(latest["c"], d(2025, 1, 26));
        assert_eq!(latest["a"], d(2025, 1, 21));
    }

    #[test]
    fn test_broken_cycle_edge_ignored() {
        // a depends on b, b depends on a; the b -> a edge is dropped
        let tasks = vec![
            make_task("a", Priority::Medium, 8.0, &["b"]),
            make_task("b", Priority::Medium, 8.0, &["a"]),
        ];
        let latest = latest_by_id(&tasks, d(2025, 1, 20));
        assert_eq!(latest["a"], d(2025, 1, 20));
        assert_eq!(latest["b"], d(2025, 1, 17));
    }

    #[test]
    fn test_unknown_dependency_ignored() {
        let tasks = vec![make_task("a", Priority::Low, 8.0, &["ghost"])];
        let latest = latest_by_id(&tasks, d(2025, 1, 20));
        assert_eq!(latest.len(), 1);
        assert_eq!(latest["a"], d(2025, 1, 20));
    }
}
