//! Dependency resolution: orders tasks so each one follows its dependencies.
//!
//! Depth-first topological sort with "visiting" and "done" marks. Unknown
//! dependency ids are skipped. A back edge to a task still being visited is a
//! cycle: under `CyclePolicy::Tolerate` the edge is treated as already
//! satisfied, under `CyclePolicy::Reject` the call fails with the cycle path.

use crate::config::CyclePolicy;
use crate::error::SchedulerError;
use crate::interner::{TaskIdInt, TaskIdInterner};
use crate::models::{ScheduleWarning, Task};
use crate::{log_changes, log_checks};

/// A task paired with its position in the caller's list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrderedTask<'a> {
    pub original_index: usize,
    pub task: &'a Task,
}

/// Result of dependency resolution.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Resolution {
    /// Permutation of input indices, dependencies first
    pub order: Vec<usize>,
    /// Skipped unknown references and dropped cycle edges
    pub warnings: Vec<ScheduleWarning>,
}

impl Resolution {
    /// Borrow the tasks in resolved order.
    pub fn ordered<'a>(&self, tasks: &'a [Task]) -> Vec<OrderedTask<'a>> {
        self.order
            .iter()
            .map(|&original_index| OrderedTask {
                original_index,
                task: &tasks[original_index],
            })
            .collect()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Visiting,
    Done,
}

/// Build per-task edge lists of known dependencies, sorted by input position.
fn build_edges(
    tasks: &[Task],
    interner: &TaskIdInterner<'_>,
    warnings: &mut Vec<ScheduleWarning>,
    verbosity: u8,
) -> Vec<Vec<TaskIdInt>> {
    tasks
        .iter()
        .map(|task| {
            let mut edges: Vec<TaskIdInt> = Vec::with_capacity(task.depends_on.len());
            for dep_id in &task.depends_on {
                match interner.get(dep_id) {
                    Some(dep) => edges.push(dep),
                    None => {
                        log_checks!(
                            verbosity,
                            "task {} depends on unknown task {}, skipping",
                            task.id,
                            dep_id
                        );
                        warnings.push(ScheduleWarning::UnknownDependency {
                            task_id: task.id.clone(),
                            dependency_id: dep_id.clone(),
                        });
                    }
                }
            }
            edges.sort_unstable();
            edges.dedup();
            edges
        })
        .collect()
}

/// Order `tasks` so that every task appears after all known tasks it depends on.
///
/// Independent tasks keep their input order. Ids are assumed unique (see
/// `validation::validate_tasks`).
pub fn resolve_dependencies(
    tasks: &[Task],
    policy: CyclePolicy,
    verbosity: u8,
) -> Result<Resolution, SchedulerError> {
    let interner = TaskIdInterner::from_ids(tasks.iter().map(|t| t.id.as_str()));
    let mut warnings = Vec::new();
    let edges = build_edges(tasks, &interner, &mut warnings, verbosity);

    let mut marks = vec![Mark::Unvisited; tasks.len()];
    let mut order: Vec<usize> = Vec::with_capacity(tasks.len());
    // Explicit stack of (task, next edge position) so long chains cannot overflow
    let mut stack: Vec<(TaskIdInt, usize)> = Vec::new();

    for root in 0..tasks.len() {
        if marks[root] != Mark::Unvisited {
            continue;
        }
        marks[root] = Mark::Visiting;
        stack.push((root as TaskIdInt, 0));

        while let Some(frame) = stack.last_mut() {
            let (node, pos) = *frame;
            let node_edges = &edges[node as usize];

            if pos >= node_edges.len() {
                marks[node as usize] = Mark::Done;
                order.push(node as usize);
                stack.pop();
                continue;
            }

            frame.1 += 1;
            let dep = node_edges[pos];
            match marks[dep as usize] {
                Mark::Done => {}
                Mark::Unvisited => {
                    log_checks!(
                        verbosity,
                        "visiting {} (required by {})",
                        tasks[dep as usize].id,
                        tasks[node as usize].id
                    );
                    marks[dep as usize] = Mark::Visiting;
                    stack.push((dep, 0));
                }
                Mark::Visiting => {
                    let task_id = &tasks[node as usize].id;
                    let dependency_id = &tasks[dep as usize].id;
                    if policy == CyclePolicy::Reject {
                        return Err(SchedulerError::CircularDependency {
                            cycle: cycle_path(&stack, dep, &interner),
                        });
                    }
                    log_changes!(
                        verbosity,
                        "cycle: {} -> {} treated as satisfied",
                        task_id,
                        dependency_id
                    );
                    warnings.push(ScheduleWarning::CycleBroken {
                        task_id: task_id.clone(),
                        dependency_id: dependency_id.clone(),
                    });
                }
            }
        }
    }

    Ok(Resolution { order, warnings })
}

/// Ids along the cycle closed by a back edge to `target`, starting and ending at it.
fn cycle_path(
    stack: &[(TaskIdInt, usize)],
    target: TaskIdInt,
    interner: &TaskIdInterner<'_>,
) -> Vec<String> {
    let start = stack
        .iter()
        .position(|&(node, _)| node == target)
        .unwrap_or(0);
    stack[start..]
        .iter()
        .map(|&(node, _)| node)
        .chain(std::iter::once(target))
        .filter_map(|node| interner.resolve(node))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;

    fn make_task(id: &str, deps: &[&str]) -> Task {
        Task::new(id, Priority::Medium, 8.0).with_dependencies(deps.iter().copied())
    }

    fn ids(tasks: &[Task], resolution: &Resolution) -> Vec<String> {
        resolution
            .ordered(tasks)
            .iter()
            .map(|t| t.task.id.clone())
            .collect()
    }

    fn position(order: &[String], id: &str) -> usize {
        order.iter().position(|x| x == id).unwrap()
    }

    #[test]
    fn test_independent_tasks_keep_input_order() {
        let tasks = vec![make_task("c", &[]), make_task("a", &[]), make_task("b", &[])];
        let resolution = resolve_dependencies(&tasks, CyclePolicy::Tolerate, 0).unwrap();
        assert_eq!(resolution.order, vec![0, 1, 2]);
        assert!(resolution.warnings.is_empty());
    }

    #[test]
    fn test_chain_given_in_reverse() {
        let tasks = vec![
            make_task("c", &["b"]),
            make_task("b", &["a"]),
            make_task("a", &[]),
        ];
        let resolution = resolve_dependencies(&tasks, CyclePolicy::Tolerate, 0).unwrap();
        assert_eq!(ids(&tasks, &resolution), vec!["a", "b", "c"]);
        assert_eq!(resolution.order, vec![2, 1, 0]);
    }

    #[test]
    fn test_diamond_precedence() {
        let tasks = vec![
            make_task("d", &["c", "b"]),
            make_task("b", &["a"]),
            make_task("c", &["a"]),
            make_task("a", &[]),
        ];
        let resolution = resolve_dependencies(&tasks, CyclePolicy::Tolerate, 0).unwrap();
        let order = ids(&tasks, &resolution);
        assert_eq!(order.len(), 4);
        for task in &tasks {
            for dep in &task.depends_on {
                assert!(position(&order, dep) < position(&order, &task.id));
            }
        }
        // Sibling dependencies follow input position, not listing order
        assert_eq!(order, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_unknown_dependency_skipped() {
        let tasks = vec![make_task("a", &["ghost"]), make_task("b", &["a"])];
        let resolution = resolve_dependencies(&tasks, CyclePolicy::Tolerate, 0).unwrap();
        assert_eq!(resolution.order, vec![0, 1]);
        assert_eq!(
            resolution.warnings,
            vec![ScheduleWarning::UnknownDependency {
                task_id: "a".to_string(),
                dependency_id: "ghost".to_string(),
            }]
        );
    }

    #[test]
    fn test_two_cycle_tolerated() {
        let tasks = vec![make_task("a", &["b"]), make_task("b", &["a"])];
        let resolution = resolve_dependencies(&tasks, CyclePolicy::Tolerate, 0).unwrap();
        // a visits b, b's edge back to a is dropped, so b comes first
        assert_eq!(ids(&tasks, &resolution), vec!["b", "a"]);
        assert_eq!(
            resolution.warnings,
            vec![ScheduleWarning::CycleBroken {
                task_id: "b".to_string(),
                dependency_id: "a".to_string(),
            }]
        );
    }

    #[test]
    fn test_self_cycle_tolerated() {
        let tasks = vec![make_task("solo", &["solo"])];
        let resolution = resolve_dependencies(&tasks, CyclePolicy::Tolerate, 0).unwrap();
        assert_eq!(resolution.order, vec![0]);
        assert_eq!(resolution.warnings.len(), 1);
    }

    #[test]
    fn test_cycle_rejected_with_path() {
        let tasks = vec![
            make_task("a", &["b"]),
            make_task("b", &["c"]),
            make_task("c", &["a"]),
        ];
        let result = resolve_dependencies(&tasks, CyclePolicy::Reject, 0);
        assert_eq!(
            result,
            Err(SchedulerError::CircularDependency {
                cycle: vec![
                    "a".to_string(),
                    "b".to_string(),
                    "c".to_string(),
                    "a".to_string()
                ],
            })
        );
    }

    #[test]
    fn test_self_cycle_rejected() {
        let tasks = vec![make_task("solo", &["solo"])];
        let result = resolve_dependencies(&tasks, CyclePolicy::Reject, 0);
        assert_eq!(
            result,
            Err(SchedulerError::CircularDependency {
                cycle: vec!["solo".to_string(), "solo".to_string()],
            })
        );
    }

    #[test]
    fn test_every_task_emitted_once_with_cycles() {
        let tasks = vec![
            make_task("a", &["c"]),
            make_task("b", &["a", "b"]),
            make_task("c", &["b"]),
            make_task("d", &[]),
        ];
        let resolution = resolve_dependencies(&tasks, CyclePolicy::Tolerate, 0).unwrap();
        let mut order = resolution.order.clone();
        order.sort_unstable();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_long_chain_does_not_overflow() {
        let n = 50_000;
        let ids_list: Vec<String> = (0..n).map(|i| format!("t{i}")).collect();
        let tasks: Vec<Task> = (0..n)
            .map(|i| {
                let task = Task::new(ids_list[i].clone(), Priority::Low, 1.0);
                if i + 1 < n {
                    task.with_dependencies([ids_list[i + 1].clone()])
                } else {
                    task
                }
            })
            .collect();
        let resolution = resolve_dependencies(&tasks, CyclePolicy::Tolerate, 0).unwrap();
        assert_eq!(resolution.order.first(), Some(&(n - 1)));
        assert_eq!(resolution.order.last(), Some(&0));
    }
}
