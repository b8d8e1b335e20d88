use rusqlite::params;
use sparkpad_core::db::open_db_in_memory;
use sparkpad_core::{
    partition_tasks, MutateError, MutationService, NewProject, NewTask, Priority, ProjectStore,
    SqliteStore, TaskStore,
};
use uuid::Uuid;

fn new_task(title: &str, priority: Priority) -> NewTask {
    NewTask {
        title: title.to_string(),
        description: None,
        priority,
        due_date: None,
        project_id: None,
    }
}

fn new_project(title: &str, color: &str) -> NewProject {
    NewProject {
        title: title.to_string(),
        description: None,
        color: color.to_string(),
        start_date: None,
        end_date: None,
    }
}

#[test]
fn create_task_persists_fields_and_rejects_blank_title() {
    let conn = open_db_in_memory().unwrap();
    let owner = Uuid::new_v4();
    let service = MutationService::new(SqliteStore::try_new(&conn).unwrap());

    let mut input = new_task("water the plants", Priority::Low);
    input.description = Some("balcony first".to_string());
    input.due_date = Some(1_700_000_000_000);
    let task = service.create_task(owner, input).unwrap();

    let store = SqliteStore::try_new(&conn).unwrap();
    let persisted = store.get_task(owner, task.id).unwrap().unwrap();
    assert_eq!(persisted.title, "water the plants");
    assert_eq!(persisted.description.as_deref(), Some("balcony first"));
    assert_eq!(persisted.due_date, Some(1_700_000_000_000));
    assert_eq!(persisted.priority, Priority::Low);

    let err = service.create_task(owner, new_task("   ", Priority::Low)).unwrap_err();
    assert!(matches!(err, MutateError::EmptyTitle));
}

#[test]
fn toggle_task_flips_the_flag_both_ways() {
    let conn = open_db_in_memory().unwrap();
    let owner = Uuid::new_v4();
    let service = MutationService::new(SqliteStore::try_new(&conn).unwrap());
    let task = service
        .create_task(owner, new_task("review PR", Priority::High))
        .unwrap();

    let toggled = service.toggle_task_completed(owner, task.id).unwrap();
    assert!(toggled.completed);
    let store = SqliteStore::try_new(&conn).unwrap();
    assert!(store.get_task(owner, task.id).unwrap().unwrap().completed);

    let toggled_back = service.toggle_task_completed(owner, task.id).unwrap();
    assert!(!toggled_back.completed);
    assert!(!store.get_task(owner, task.id).unwrap().unwrap().completed);
}

#[test]
fn toggle_unknown_task_reports_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = MutationService::new(SqliteStore::try_new(&conn).unwrap());

    let missing = Uuid::new_v4();
    let err = service
        .toggle_task_completed(Uuid::new_v4(), missing)
        .unwrap_err();
    assert!(matches!(err, MutateError::NotFound(id) if id == missing));
}

#[test]
fn delete_task_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let owner = Uuid::new_v4();
    let service = MutationService::new(SqliteStore::try_new(&conn).unwrap());
    let task = service
        .create_task(owner, new_task("one shot", Priority::Medium))
        .unwrap();

    assert!(service.delete_task(owner, task.id).unwrap());
    assert!(!service.delete_task(owner, task.id).unwrap());
}

#[test]
fn create_project_validates_title_and_palette() {
    let conn = open_db_in_memory().unwrap();
    let owner = Uuid::new_v4();
    let service = MutationService::new(SqliteStore::try_new(&conn).unwrap());

    let err = service
        .create_project(owner, new_project("", "#8B5CF6"))
        .unwrap_err();
    assert!(matches!(err, MutateError::EmptyTitle));

    let err = service
        .create_project(owner, new_project("redesign", "#123456"))
        .unwrap_err();
    assert!(matches!(err, MutateError::UnknownColor(color) if color == "#123456"));

    let project = service
        .create_project(owner, new_project("redesign", "#10B981"))
        .unwrap();
    let store = SqliteStore::try_new(&conn).unwrap();
    assert_eq!(
        store.get_project(owner, project.id).unwrap().unwrap().color,
        "#10B981"
    );
}

#[test]
fn project_dates_are_stored_without_ordering_checks() {
    let conn = open_db_in_memory().unwrap();
    let owner = Uuid::new_v4();
    let service = MutationService::new(SqliteStore::try_new(&conn).unwrap());

    let mut input = new_project("time travel", "#EF4444");
    input.start_date = Some(2_000);
    input.end_date = Some(1_000);
    let project = service.create_project(owner, input).unwrap();

    let store = SqliteStore::try_new(&conn).unwrap();
    let persisted = store.get_project(owner, project.id).unwrap().unwrap();
    assert_eq!(persisted.start_date, Some(2_000));
    assert_eq!(persisted.end_date, Some(1_000));
}

#[test]
fn toggle_and_delete_project_mirror_task_semantics() {
    let conn = open_db_in_memory().unwrap();
    let owner = Uuid::new_v4();
    let service = MutationService::new(SqliteStore::try_new(&conn).unwrap());
    let project = service
        .create_project(owner, new_project("spring cleaning", "#F59E0B"))
        .unwrap();

    let toggled = service.toggle_project_completed(owner, project.id).unwrap();
    assert!(toggled.completed);

    assert!(service.delete_project(owner, project.id).unwrap());
    assert!(!service.delete_project(owner, project.id).unwrap());
}

#[test]
fn task_list_is_newest_first_and_partition_preserves_that_order() {
    let conn = open_db_in_memory().unwrap();
    let owner = Uuid::new_v4();
    let service = MutationService::new(SqliteStore::try_new(&conn).unwrap());

    let first = service
        .create_task(owner, new_task("oldest", Priority::Low))
        .unwrap();
    let second = service
        .create_task(owner, new_task("middle", Priority::Low))
        .unwrap();
    let third = service
        .create_task(owner, new_task("newest", Priority::Low))
        .unwrap();

    conn.execute(
        "UPDATE tasks SET created_at = 1000 WHERE id = ?1;",
        params![first.id.to_string()],
    )
    .unwrap();
    conn.execute(
        "UPDATE tasks SET created_at = 2000 WHERE id = ?1;",
        params![second.id.to_string()],
    )
    .unwrap();
    conn.execute(
        "UPDATE tasks SET created_at = 3000 WHERE id = ?1;",
        params![third.id.to_string()],
    )
    .unwrap();

    service.toggle_task_completed(owner, second.id).unwrap();

    let store = SqliteStore::try_new(&conn).unwrap();
    let tasks = store.list_tasks(owner).unwrap();
    let titles: Vec<_> = tasks.iter().map(|task| task.title.as_str()).collect();
    assert_eq!(titles, vec!["newest", "middle", "oldest"]);

    let partition = partition_tasks(&tasks);
    let active: Vec<_> = partition.active.iter().map(|task| task.title.as_str()).collect();
    assert_eq!(active, vec!["newest", "oldest"]);
    let completed: Vec<_> = partition
        .completed
        .iter()
        .map(|task| task.title.as_str())
        .collect();
    assert_eq!(completed, vec!["middle"]);
    assert_eq!(partition.active.len() + partition.completed.len(), tasks.len());
}

#[test]
fn deleting_a_project_keeps_linked_tasks() {
    let conn = open_db_in_memory().unwrap();
    let owner = Uuid::new_v4();
    let service = MutationService::new(SqliteStore::try_new(&conn).unwrap());

    let project = service
        .create_project(owner, new_project("doomed", "#3B82F6"))
        .unwrap();
    let mut input = new_task("survives", Priority::Medium);
    input.project_id = Some(project.id);
    let task = service.create_task(owner, input).unwrap();

    assert!(service.delete_project(owner, project.id).unwrap());

    let store = SqliteStore::try_new(&conn).unwrap();
    let persisted = store.get_task(owner, task.id).unwrap().unwrap();
    assert_eq!(persisted.project_id, Some(project.id));
}
