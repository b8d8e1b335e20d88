//! Active/completed partitioning.
//!
//! # Responsibility
//! - Split fetched tasks/projects by their `completed` flag.
//!
//! # Invariants
//! - Partitions are stable: each side preserves the input (fetch)
//!   order, their union is the input, and they are disjoint.

use crate::model::project::Project;
use crate::model::task::Task;

/// Tasks split by completion state.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskPartition<'a> {
    pub active: Vec<&'a Task>,
    pub completed: Vec<&'a Task>,
}

/// Projects split by completion state.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectPartition<'a> {
    pub active: Vec<&'a Project>,
    pub completed: Vec<&'a Project>,
}

/// Splits tasks into active and completed, preserving order.
pub fn partition_tasks(tasks: &[Task]) -> TaskPartition<'_> {
    let (completed, active) = split_by(tasks, |task| task.completed);
    TaskPartition { active, completed }
}

/// Splits projects into active and completed, preserving order.
pub fn partition_projects(projects: &[Project]) -> ProjectPartition<'_> {
    let (completed, active) = split_by(projects, |project| project.completed);
    ProjectPartition { active, completed }
}

fn split_by<T>(items: &[T], matches: impl Fn(&T) -> bool) -> (Vec<&T>, Vec<&T>) {
    items.iter().partition(|item| matches(item))
}

#[cfg(test)]
mod tests {
    use super::{partition_projects, partition_tasks};
    use crate::model::project::Project;
    use crate::model::task::{Priority, Task};
    use uuid::Uuid;

    #[test]
    fn task_partition_is_stable_and_exhaustive() {
        let owner = Uuid::new_v4();
        let mut tasks = Vec::new();
        for (idx, done) in [false, true, false, true, true].iter().enumerate() {
            let mut task = Task::new(owner, format!("task {idx}"), Priority::Low);
            task.completed = *done;
            tasks.push(task);
        }

        let partition = partition_tasks(&tasks);
        assert_eq!(partition.active.len() + partition.completed.len(), tasks.len());
        assert!(partition.active.iter().all(|task| !task.completed));
        assert!(partition.completed.iter().all(|task| task.completed));

        let active_titles: Vec<_> = partition.active.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(active_titles, vec!["task 0", "task 2"]);
        let completed_titles: Vec<_> =
            partition.completed.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(completed_titles, vec!["task 1", "task 3", "task 4"]);
    }

    #[test]
    fn project_partition_splits_by_flag() {
        let owner = Uuid::new_v4();
        let mut done = Project::new(owner, "done", "#8B5CF6");
        done.completed = true;
        let open = Project::new(owner, "open", "#EC4899");

        let projects = vec![done, open];
        let partition = partition_projects(&projects);
        assert_eq!(partition.active.len(), 1);
        assert_eq!(partition.completed.len(), 1);
        assert_eq!(partition.active[0].title, "open");
        assert_eq!(partition.completed[0].title, "done");
    }
}
