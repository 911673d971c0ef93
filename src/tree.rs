//! Tree Utilities
//!
//! Helper functions for rendering the task hierarchy.

use std::collections::HashSet;

use crate::models::{TaskHierarchy, TaskStatus};

/// Flatten the hierarchy depth-first. Children of tasks not in `expanded`
/// are skipped; `None` expands everything.
/// Returns (task, depth) pairs in display order
pub fn flatten_hierarchy(tasks: &[TaskHierarchy], expanded: Option<&HashSet<String>>) -> Vec<(TaskHierarchy, usize)> {
    fn collect(
        tasks: &[TaskHierarchy],
        depth: usize,
        expanded: Option<&HashSet<String>>,
        result: &mut Vec<(TaskHierarchy, usize)>,
    ) {
        for task in tasks {
            result.push((task.clone(), depth));
            if expanded.map_or(true, |open| open.contains(&task.id)) {
                collect(&task.children, depth + 1, expanded, result);
            }
        }
    }

    let mut result = Vec::new();
    collect(tasks, 0, expanded, &mut result);
    result
}

/// Tasks that may become a parent, minus the task being edited
pub fn parent_candidates(tasks: &[TaskHierarchy], exclude: Option<&str>) -> Vec<TaskHierarchy> {
    flatten_hierarchy(tasks, None)
        .into_iter()
        .map(|(task, _)| task)
        .filter(|task| Some(task.id.as_str()) != exclude)
        .collect()
}

/// Percentage of completed children, rounded; `None` for leaf tasks
pub fn child_progress(task: &TaskHierarchy) -> Option<u8> {
    if !task.has_children() {
        return None;
    }
    let done = task.children.iter().filter(|c| c.status == TaskStatus::Completed).count();
    let percent = (done as f64 / task.children.len() as f64 * 100.0).round();
    Some(percent as u8)
}

/// Find a task anywhere in the hierarchy
pub fn find_task<'a>(tasks: &'a [TaskHierarchy], id: &str) -> Option<&'a TaskHierarchy> {
    tasks.iter().find_map(|task| {
        if task.id == id {
            Some(task)
        } else {
            find_task(&task.children, id)
        }
    })
}
