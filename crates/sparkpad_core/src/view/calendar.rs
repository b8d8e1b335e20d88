//! Calendar date bucketing.
//!
//! # Responsibility
//! - Decide which tasks and projects belong to a displayed calendar day.
//!
//! # Invariants
//! - Membership compares calendar days in UTC; time-of-day is ignored.
//! - A project spans every day from its start day through its end day
//!   inclusive when both are set; otherwise only its exact endpoint
//!   days match.

use crate::model::project::Project;
use crate::model::task::Task;
use chrono::{DateTime, NaiveDate, Utc};

/// Tasks and projects that fall on one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayBucket<'a> {
    pub tasks: Vec<&'a Task>,
    pub projects: Vec<&'a Project>,
}

/// Converts an epoch-millisecond timestamp to its UTC calendar day.
/// Out-of-range timestamps yield `None` and never match a day.
pub fn epoch_ms_day(ms: i64) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp_millis(ms).map(|dt| dt.date_naive())
}

/// Whether the task is due on the given day.
pub fn task_due_on(task: &Task, day: NaiveDate) -> bool {
    task.due_date.and_then(epoch_ms_day) == Some(day)
}

/// Whether the project touches the given day: starts on it, ends on
/// it, or spans it when both dates are present. Unordered date pairs
/// (end before start) only match their exact endpoint days.
pub fn project_touches_day(project: &Project, day: NaiveDate) -> bool {
    let start = project.start_date.and_then(epoch_ms_day);
    let end = project.end_date.and_then(epoch_ms_day);

    if start == Some(day) || end == Some(day) {
        return true;
    }
    matches!((start, end), (Some(start), Some(end)) if start <= day && day <= end)
}

/// Collects the tasks and projects belonging to one day, preserving
/// the input (fetch) order.
pub fn bucket_for_date<'a>(
    day: NaiveDate,
    tasks: &'a [Task],
    projects: &'a [Project],
) -> DayBucket<'a> {
    DayBucket {
        tasks: tasks.iter().filter(|task| task_due_on(task, day)).collect(),
        projects: projects
            .iter()
            .filter(|project| project_touches_day(project, day))
            .collect(),
    }
}

/// Marker predicate for calendar rendering: whether any task or
/// project falls on the day.
pub fn day_has_items(day: NaiveDate, tasks: &[Task], projects: &[Project]) -> bool {
    tasks.iter().any(|task| task_due_on(task, day))
        || projects.iter().any(|project| project_touches_day(project, day))
}

#[cfg(test)]
mod tests {
    use super::{bucket_for_date, day_has_items, epoch_ms_day, project_touches_day, task_due_on};
    use crate::model::project::Project;
    use crate::model::task::{Priority, Task};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ms_at(y: i32, m: u32, d: u32, hour: u32) -> i64 {
        day(y, m, d)
            .and_hms_opt(hour, 30, 0)
            .unwrap()
            .and_utc()
            .timestamp_millis()
    }

    #[test]
    fn due_date_matches_its_day_regardless_of_time() {
        let mut task = Task::new(Uuid::new_v4(), "t", Priority::Low);
        task.due_date = Some(ms_at(2024, 3, 10, 23));
        assert!(task_due_on(&task, day(2024, 3, 10)));
        assert!(!task_due_on(&task, day(2024, 3, 9)));
        assert!(!task_due_on(&task, day(2024, 3, 11)));
    }

    #[test]
    fn task_without_due_date_matches_no_day() {
        let task = Task::new(Uuid::new_v4(), "t", Priority::Low);
        assert!(!task_due_on(&task, day(2024, 3, 10)));
    }

    #[test]
    fn project_spans_start_through_end_inclusive() {
        let mut project = Project::new(Uuid::new_v4(), "p", "#8B5CF6");
        project.start_date = Some(ms_at(2024, 3, 10, 9));
        project.end_date = Some(ms_at(2024, 3, 13, 9));

        assert!(project_touches_day(&project, day(2024, 3, 10)));
        assert!(project_touches_day(&project, day(2024, 3, 11)));
        assert!(project_touches_day(&project, day(2024, 3, 12)));
        assert!(project_touches_day(&project, day(2024, 3, 13)));
        assert!(!project_touches_day(&project, day(2024, 3, 9)));
        assert!(!project_touches_day(&project, day(2024, 3, 14)));
    }

    #[test]
    fn project_with_single_endpoint_matches_only_that_day() {
        let mut project = Project::new(Uuid::new_v4(), "p", "#8B5CF6");
        project.start_date = Some(ms_at(2024, 3, 10, 9));

        assert!(project_touches_day(&project, day(2024, 3, 10)));
        assert!(!project_touches_day(&project, day(2024, 3, 11)));
    }

    #[test]
    fn project_with_reversed_dates_matches_endpoints_only() {
        let mut project = Project::new(Uuid::new_v4(), "p", "#8B5CF6");
        project.start_date = Some(ms_at(2024, 3, 13, 9));
        project.end_date = Some(ms_at(2024, 3, 10, 9));

        assert!(project_touches_day(&project, day(2024, 3, 13)));
        assert!(project_touches_day(&project, day(2024, 3, 10)));
        assert!(!project_touches_day(&project, day(2024, 3, 11)));
    }

    #[test]
    fn bucket_collects_matching_records_in_input_order() {
        let owner = Uuid::new_v4();
        let mut due = Task::new(owner, "due", Priority::High);
        due.due_date = Some(ms_at(2024, 3, 10, 8));
        let other = Task::new(owner, "no date", Priority::Low);

        let mut spanning = Project::new(owner, "span", "#10B981");
        spanning.start_date = Some(ms_at(2024, 3, 9, 0));
        spanning.end_date = Some(ms_at(2024, 3, 11, 0));
        let unrelated = Project::new(owner, "dateless", "#3B82F6");

        let tasks = vec![due.clone(), other];
        let projects = vec![spanning.clone(), unrelated];

        let bucket = bucket_for_date(day(2024, 3, 10), &tasks, &projects);
        assert_eq!(bucket.tasks, vec![&due]);
        assert_eq!(bucket.projects, vec![&spanning]);

        assert!(day_has_items(day(2024, 3, 10), &tasks, &projects));
        assert!(!day_has_items(day(2024, 4, 1), &tasks, &projects));
    }

    #[test]
    fn out_of_range_timestamp_never_matches() {
        assert_eq!(epoch_ms_day(i64::MAX), None);
    }
}
