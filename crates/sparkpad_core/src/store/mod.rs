//! Persisted-record collaborator contracts.
//!
//! # Responsibility
//! - Define owner-scoped access contracts for the notes/tasks/projects
//!   collections.
//! - Keep query details out of service orchestration.
//!
//! # Invariants
//! - List operations return records in descending creation time.
//! - No store operation spans two collections; multi-record flows are
//!   best-effort sequences owned by the services.
//! - Deletes are idempotent: removing a missing row is not an error.

use crate::model::note::{Note, NoteId};
use crate::model::project::{Project, ProjectId};
use crate::model::task::{Task, TaskId};
use crate::model::OwnerId;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

mod sqlite;

pub use sqlite::SqliteStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence-layer failure surfaced to the services.
#[derive(Debug)]
pub enum StoreError {
    /// Underlying SQLite transport/constraint failure.
    Sqlite(rusqlite::Error),
    /// An update targeted a row that does not exist for this owner.
    NotFound(Uuid),
    /// A persisted row failed to decode; corrupt state is rejected
    /// instead of masked.
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Notes collection contract.
pub trait NoteStore {
    /// Inserts one note row.
    fn insert_note(&self, note: &Note) -> StoreResult<()>;
    /// Gets one note by id, scoped to its owner.
    fn get_note(&self, owner: OwnerId, id: NoteId) -> StoreResult<Option<Note>>;
    /// Lists all notes for the owner, newest first.
    fn list_notes(&self, owner: OwnerId) -> StoreResult<Vec<Note>>;
    /// Updates the derived-task marker on one note.
    fn set_note_has_tasks(&self, owner: OwnerId, id: NoteId, has_tasks: bool) -> StoreResult<()>;
    /// Deletes one note. Returns whether a row existed.
    fn delete_note(&self, owner: OwnerId, id: NoteId) -> StoreResult<bool>;
}

/// Tasks collection contract.
pub trait TaskStore {
    /// Inserts one task row.
    fn insert_task(&self, task: &Task) -> StoreResult<()>;
    /// Gets one task by id, scoped to its owner.
    fn get_task(&self, owner: OwnerId, id: TaskId) -> StoreResult<Option<Task>>;
    /// Lists all tasks for the owner, newest first.
    fn list_tasks(&self, owner: OwnerId) -> StoreResult<Vec<Task>>;
    /// Updates the completion flag on one task.
    fn set_task_completed(&self, owner: OwnerId, id: TaskId, completed: bool) -> StoreResult<()>;
    /// Deletes one task. Returns whether a row existed.
    fn delete_task(&self, owner: OwnerId, id: TaskId) -> StoreResult<bool>;
}

/// Projects collection contract.
pub trait ProjectStore {
    /// Inserts one project row.
    fn insert_project(&self, project: &Project) -> StoreResult<()>;
    /// Gets one project by id, scoped to its owner.
    fn get_project(&self, owner: OwnerId, id: ProjectId) -> StoreResult<Option<Project>>;
    /// Lists all projects for the owner, newest first.
    fn list_projects(&self, owner: OwnerId) -> StoreResult<Vec<Project>>;
    /// Updates the completion flag on one project.
    fn set_project_completed(
        &self,
        owner: OwnerId,
        id: ProjectId,
        completed: bool,
    ) -> StoreResult<()>;
    /// Deletes one project. Returns whether a row existed.
    fn delete_project(&self, owner: OwnerId, id: ProjectId) -> StoreResult<bool>;
}
