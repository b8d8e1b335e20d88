//! Task/project mutation operations.
//!
//! # Responsibility
//! - Provide create/toggle/delete entry points with local validation.
//! - Reject a second mutation on a record whose first mutation is still
//!   in flight.
//!
//! # Invariants
//! - Toggles are read-compute-write, last-write-wins; no optimistic
//!   lock beyond the read used to compute the new value.
//! - Start/end ordering of project dates is NOT validated; consumers
//!   must not assume end >= start.

use crate::model::project::{is_palette_color, Project, ProjectId};
use crate::model::task::{Priority, Task, TaskId};
use crate::model::OwnerId;
use crate::store::{ProjectStore, StoreError, TaskStore};
use log::info;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Mutex, PoisonError};
use uuid::Uuid;

/// Mutation-layer error.
#[derive(Debug)]
pub enum MutateError {
    /// Title was empty or whitespace-only.
    EmptyTitle,
    /// Color is not part of the fixed project palette.
    UnknownColor(String),
    /// Another mutation of the same record is still in flight.
    MutationInFlight(Uuid),
    /// Target record does not exist for this owner.
    NotFound(Uuid),
    /// Persistence-layer failure.
    Store(StoreError),
}

impl Display for MutateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title is empty"),
            Self::UnknownColor(color) => write!(f, "color `{color}` is not in the palette"),
            Self::MutationInFlight(id) => {
                write!(f, "record {id} already has a mutation in flight")
            }
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for MutateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for MutateError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}

/// Input for creating a task directly (not derived from a note).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub due_date: Option<i64>,
    pub project_id: Option<ProjectId>,
}

/// Input for creating a project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewProject {
    pub title: String,
    pub description: Option<String>,
    pub color: String,
    pub start_date: Option<i64>,
    pub end_date: Option<i64>,
}

/// Tracks record ids with a mutation in flight. Acquiring an id that
/// is already tracked fails; the slot releases the id on drop.
struct InFlightGuard {
    ids: Mutex<HashSet<Uuid>>,
}

impl InFlightGuard {
    fn new() -> Self {
        Self {
            ids: Mutex::new(HashSet::new()),
        }
    }

    fn acquire(&self, id: Uuid) -> Option<InFlightSlot<'_>> {
        let mut ids = self.ids.lock().unwrap_or_else(PoisonError::into_inner);
        if !ids.insert(id) {
            return None;
        }
        Some(InFlightSlot { guard: self, id })
    }
}

struct InFlightSlot<'a> {
    guard: &'a InFlightGuard,
    id: Uuid,
}

impl Drop for InFlightSlot<'_> {
    fn drop(&mut self) {
        self.guard
            .ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.id);
    }
}

/// Mutation entry points over the task and project collections.
pub struct MutationService<S> {
    store: S,
    in_flight: InFlightGuard,
}

impl<S> MutationService<S>
where
    S: TaskStore + ProjectStore,
{
    /// Creates the service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self {
            store,
            in_flight: InFlightGuard::new(),
        }
    }

    /// Creates one task. Tasks created here carry no note provenance;
    /// note-derived tasks go through the capture coordinator.
    pub fn create_task(&self, owner: OwnerId, new: NewTask) -> Result<Task, MutateError> {
        if new.title.trim().is_empty() {
            return Err(MutateError::EmptyTitle);
        }

        let mut task = Task::new(owner, new.title, new.priority);
        task.description = new.description;
        task.due_date = new.due_date;
        task.project_id = new.project_id;
        self.store.insert_task(&task)?;

        info!(
            "event=task_create module=mutate status=ok task_id={} priority={}",
            task.id, task.priority
        );
        Ok(task)
    }

    /// Flips one task's completion flag and returns the updated record.
    pub fn toggle_task_completed(&self, owner: OwnerId, id: TaskId) -> Result<Task, MutateError> {
        let _slot = self
            .in_flight
            .acquire(id)
            .ok_or(MutateError::MutationInFlight(id))?;

        let mut task = self
            .store
            .get_task(owner, id)?
            .ok_or(MutateError::NotFound(id))?;
        task.completed = !task.completed;
        self.store.set_task_completed(owner, id, task.completed)?;

        info!(
            "event=task_toggle module=mutate status=ok task_id={id} completed={}",
            task.completed
        );
        Ok(task)
    }

    /// Deletes one task. Returns whether a row existed.
    pub fn delete_task(&self, owner: OwnerId, id: TaskId) -> Result<bool, MutateError> {
        let _slot = self
            .in_flight
            .acquire(id)
            .ok_or(MutateError::MutationInFlight(id))?;

        let existed = self.store.delete_task(owner, id)?;
        info!(
            "event=task_delete module=mutate status={} task_id={id}",
            if existed { "ok" } else { "noop" }
        );
        Ok(existed)
    }

    /// Creates one project after validating title and palette color.
    ///
    /// Date ordering is deliberately not checked.
    pub fn create_project(&self, owner: OwnerId, new: NewProject) -> Result<Project, MutateError> {
        if new.title.trim().is_empty() {
            return Err(MutateError::EmptyTitle);
        }
        if !is_palette_color(&new.color) {
            return Err(MutateError::UnknownColor(new.color));
        }

        let mut project = Project::new(owner, new.title, new.color);
        project.description = new.description;
        project.start_date = new.start_date;
        project.end_date = new.end_date;
        self.store.insert_project(&project)?;

        info!(
            "event=project_create module=mutate status=ok project_id={}",
            project.id
        );
        Ok(project)
    }

    /// Flips one project's completion flag and returns the updated record.
    pub fn toggle_project_completed(
        &self,
        owner: OwnerId,
        id: ProjectId,
    ) -> Result<Project, MutateError> {
        let _slot = self
            .in_flight
            .acquire(id)
            .ok_or(MutateError::MutationInFlight(id))?;

        let mut project = self
            .store
            .get_project(owner, id)?
            .ok_or(MutateError::NotFound(id))?;
        project.completed = !project.completed;
        self.store
            .set_project_completed(owner, id, project.completed)?;

        info!(
            "event=project_toggle module=mutate status=ok project_id={id} completed={}",
            project.completed
        );
        Ok(project)
    }

    /// Deletes one project. Returns whether a row existed. Tasks
    /// pointing at the project keep their advisory link.
    pub fn delete_project(&self, owner: OwnerId, id: ProjectId) -> Result<bool, MutateError> {
        let _slot = self
            .in_flight
            .acquire(id)
            .ok_or(MutateError::MutationInFlight(id))?;

        let existed = self.store.delete_project(owner, id)?;
        info!(
            "event=project_delete module=mutate status={} project_id={id}",
            if existed { "ok" } else { "noop" }
        );
        Ok(existed)
    }
}
