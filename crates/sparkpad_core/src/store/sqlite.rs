//! SQLite implementation of the record store contracts.
//!
//! # Responsibility
//! - Keep SQL details for the three collections in one place.
//! - Decode persisted rows strictly; corrupt state is an error.
//!
//! # Invariants
//! - Every operation is a single statement; no transaction spans
//!   collections.
//! - All queries are scoped by `owner`.

use crate::model::note::{Note, NoteId};
use crate::model::project::{Project, ProjectId};
use crate::model::task::{Priority, Task, TaskId};
use crate::model::OwnerId;
use crate::store::{NoteStore, ProjectStore, StoreError, StoreResult, TaskStore};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

/// SQLite-backed store over a migrated connection.
pub struct SqliteStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStore<'conn> {
    /// Constructs a store after verifying the expected tables exist.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        for table in ["notes", "tasks", "projects"] {
            if !table_exists(conn, table)? {
                return Err(StoreError::InvalidData(format!(
                    "required table `{table}` is missing; run migrations first"
                )));
            }
        }
        Ok(Self { conn })
    }
}

impl NoteStore for SqliteStore<'_> {
    fn insert_note(&self, note: &Note) -> StoreResult<()> {
        let tags = encode_tags(&note.tags)?;
        self.conn.execute(
            "INSERT INTO notes (id, owner, content, tags, has_tasks, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                note.id.to_string(),
                note.owner.to_string(),
                note.content.as_str(),
                tags,
                note.has_tasks as i64,
                note.created_at,
            ],
        )?;
        Ok(())
    }

    fn get_note(&self, owner: OwnerId, id: NoteId) -> StoreResult<Option<Note>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, owner, content, tags, has_tasks, created_at
             FROM notes
             WHERE id = ?1 AND owner = ?2;",
        )?;
        let mut rows = stmt.query(params![id.to_string(), owner.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(note_from_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_notes(&self, owner: OwnerId) -> StoreResult<Vec<Note>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, owner, content, tags, has_tasks, created_at
             FROM notes
             WHERE owner = ?1
             ORDER BY created_at DESC, rowid DESC;",
        )?;
        let mut rows = stmt.query([owner.to_string()])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(note_from_row(row)?);
        }
        Ok(notes)
    }

    fn set_note_has_tasks(&self, owner: OwnerId, id: NoteId, has_tasks: bool) -> StoreResult<()> {
        let changed = self.conn.execute(
            "UPDATE notes SET has_tasks = ?3 WHERE id = ?1 AND owner = ?2;",
            params![id.to_string(), owner.to_string(), has_tasks as i64],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    fn delete_note(&self, owner: OwnerId, id: NoteId) -> StoreResult<bool> {
        let changed = self.conn.execute(
            "DELETE FROM notes WHERE id = ?1 AND owner = ?2;",
            params![id.to_string(), owner.to_string()],
        )?;
        Ok(changed > 0)
    }
}

impl TaskStore for SqliteStore<'_> {
    fn insert_task(&self, task: &Task) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO tasks (
                id, owner, title, description, priority, completed,
                due_date, project_id, note_id, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
            params![
                task.id.to_string(),
                task.owner.to_string(),
                task.title.as_str(),
                task.description.as_deref(),
                task.priority.as_str(),
                task.completed as i64,
                task.due_date,
                task.project_id.map(|id| id.to_string()),
                task.note_id.map(|id| id.to_string()),
                task.created_at,
            ],
        )?;
        Ok(())
    }

    fn get_task(&self, owner: OwnerId, id: TaskId) -> StoreResult<Option<Task>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, owner, title, description, priority, completed,
                    due_date, project_id, note_id, created_at
             FROM tasks
             WHERE id = ?1 AND owner = ?2;",
        )?;
        let mut rows = stmt.query(params![id.to_string(), owner.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(task_from_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_tasks(&self, owner: OwnerId) -> StoreResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, owner, title, description, priority, completed,
                    due_date, project_id, note_id, created_at
             FROM tasks
             WHERE owner = ?1
             ORDER BY created_at DESC, rowid DESC;",
        )?;
        let mut rows = stmt.query([owner.to_string()])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(task_from_row(row)?);
        }
        Ok(tasks)
    }

    fn set_task_completed(&self, owner: OwnerId, id: TaskId, completed: bool) -> StoreResult<()> {
        let changed = self.conn.execute(
            "UPDATE tasks SET completed = ?3 WHERE id = ?1 AND owner = ?2;",
            params![id.to_string(), owner.to_string(), completed as i64],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    fn delete_task(&self, owner: OwnerId, id: TaskId) -> StoreResult<bool> {
        let changed = self.conn.execute(
            "DELETE FROM tasks WHERE id = ?1 AND owner = ?2;",
            params![id.to_string(), owner.to_string()],
        )?;
        Ok(changed > 0)
    }
}

impl ProjectStore for SqliteStore<'_> {
    fn insert_project(&self, project: &Project) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO projects (
                id, owner, title, description, color,
                start_date, end_date, completed, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            params![
                project.id.to_string(),
                project.owner.to_string(),
                project.title.as_str(),
                project.description.as_deref(),
                project.color.as_str(),
                project.start_date,
                project.end_date,
                project.completed as i64,
                project.created_at,
            ],
        )?;
        Ok(())
    }

    fn get_project(&self, owner: OwnerId, id: ProjectId) -> StoreResult<Option<Project>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, owner, title, description, color,
                    start_date, end_date, completed, created_at
             FROM projects
             WHERE id = ?1 AND owner = ?2;",
        )?;
        let mut rows = stmt.query(params![id.to_string(), owner.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(project_from_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_projects(&self, owner: OwnerId) -> StoreResult<Vec<Project>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, owner, title, description, color,
                    start_date, end_date, completed, created_at
             FROM projects
             WHERE owner = ?1
             ORDER BY created_at DESC, rowid DESC;",
        )?;
        let mut rows = stmt.query([owner.to_string()])?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next()? {
            projects.push(project_from_row(row)?);
        }
        Ok(projects)
    }

    fn set_project_completed(
        &self,
        owner: OwnerId,
        id: ProjectId,
        completed: bool,
    ) -> StoreResult<()> {
        let changed = self.conn.execute(
            "UPDATE projects SET completed = ?3 WHERE id = ?1 AND owner = ?2;",
            params![id.to_string(), owner.to_string(), completed as i64],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    fn delete_project(&self, owner: OwnerId, id: ProjectId) -> StoreResult<bool> {
        let changed = self.conn.execute(
            "DELETE FROM projects WHERE id = ?1 AND owner = ?2;",
            params![id.to_string(), owner.to_string()],
        )?;
        Ok(changed > 0)
    }
}

fn note_from_row(row: &Row<'_>) -> StoreResult<Note> {
    let tags_json: String = row.get("tags")?;
    Ok(Note {
        id: parse_uuid(&row.get::<_, String>("id")?, "notes.id")?,
        owner: parse_uuid(&row.get::<_, String>("owner")?, "notes.owner")?,
        content: row.get("content")?,
        tags: decode_tags(&tags_json)?,
        has_tasks: row.get::<_, i64>("has_tasks")? != 0,
        created_at: row.get("created_at")?,
    })
}

fn task_from_row(row: &Row<'_>) -> StoreResult<Task> {
    let priority_text: String = row.get("priority")?;
    let priority = Priority::parse(&priority_text).ok_or_else(|| {
        StoreError::InvalidData(format!("invalid priority `{priority_text}` in tasks.priority"))
    })?;
    Ok(Task {
        id: parse_uuid(&row.get::<_, String>("id")?, "tasks.id")?,
        owner: parse_uuid(&row.get::<_, String>("owner")?, "tasks.owner")?,
        title: row.get("title")?,
        description: row.get("description")?,
        priority,
        completed: row.get::<_, i64>("completed")? != 0,
        due_date: row.get("due_date")?,
        project_id: parse_optional_uuid(row.get("project_id")?, "tasks.project_id")?,
        note_id: parse_optional_uuid(row.get("note_id")?, "tasks.note_id")?,
        created_at: row.get("created_at")?,
    })
}

fn project_from_row(row: &Row<'_>) -> StoreResult<Project> {
    Ok(Project {
        id: parse_uuid(&row.get::<_, String>("id")?, "projects.id")?,
        owner: parse_uuid(&row.get::<_, String>("owner")?, "projects.owner")?,
        title: row.get("title")?,
        description: row.get("description")?,
        color: row.get("color")?,
        start_date: row.get("start_date")?,
        end_date: row.get("end_date")?,
        completed: row.get::<_, i64>("completed")? != 0,
        created_at: row.get("created_at")?,
    })
}

fn encode_tags(tags: &[String]) -> StoreResult<String> {
    serde_json::to_string(tags)
        .map_err(|err| StoreError::InvalidData(format!("failed to encode tags: {err}")))
}

fn decode_tags(json: &str) -> StoreResult<Vec<String>> {
    serde_json::from_str(json)
        .map_err(|err| StoreError::InvalidData(format!("invalid tags payload `{json}`: {err}")))
}

fn parse_uuid(value: &str, column: &str) -> StoreResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| StoreError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

fn parse_optional_uuid(value: Option<String>, column: &str) -> StoreResult<Option<Uuid>> {
    match value {
        Some(text) => Ok(Some(parse_uuid(&text, column)?)),
        None => Ok(None),
    }
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
