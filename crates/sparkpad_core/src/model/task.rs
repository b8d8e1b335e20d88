//! Task domain model.
//!
//! # Responsibility
//! - Define the actionable item record and its priority domain.
//!
//! # Invariants
//! - `priority` is always one of the three enumerated values.
//! - `note_id` records provenance when the task was derived from a note.
//! - `project_id` is an advisory link; the project does not own tasks.

use crate::model::note::NoteId;
use crate::model::project::ProjectId;
use crate::model::{now_epoch_ms, OwnerId};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a task.
pub type TaskId = Uuid;

/// Three-value task/insight priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Stable lowercase wire/storage name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parses the stable lowercase name back into the enum.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Actionable item with priority and completion state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable global ID.
    pub id: TaskId,
    /// Owning user.
    pub owner: OwnerId,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub completed: bool,
    /// Optional due timestamp in epoch milliseconds.
    pub due_date: Option<i64>,
    /// Advisory link to a project.
    pub project_id: Option<ProjectId>,
    /// Provenance link to the note this task was derived from.
    pub note_id: Option<NoteId>,
    /// Creation timestamp in epoch milliseconds.
    pub created_at: i64,
}

impl Task {
    /// Creates a task with a generated ID and the current timestamp.
    ///
    /// Optional fields start as `None`; callers set them directly.
    pub fn new(owner: OwnerId, title: impl Into<String>, priority: Priority) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner,
            title: title.into(),
            description: None,
            priority,
            completed: false,
            due_date: None,
            project_id: None,
            note_id: None,
            created_at: now_epoch_ms(),
        }
    }
}
