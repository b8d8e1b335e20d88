//! Note lifecycle coordinator.
//!
//! # Responsibility
//! - Drive note creation: analysis, note persistence, task derivation.
//! - Drive later note-to-task conversion and note deletion.
//!
//! # Invariants
//! - Empty/whitespace-only content is rejected before any network call.
//! - A note's `has_tasks` is true exactly when at least one task has
//!   been derived from it.
//! - The note-plus-tasks sequence is not transactional: a task write
//!   failure after the note write is reported, the note stays.

use crate::gateway::{AnalysisGateway, GatewayError};
use crate::model::note::{Note, NoteId};
use crate::model::task::{Priority, Task, TaskId};
use crate::model::OwnerId;
use crate::store::{NoteStore, StoreError, TaskStore};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum title length for a task derived without AI assistance.
const FALLBACK_TITLE_CHARS: usize = 100;

/// Coordinator error for note capture and conversion flows.
#[derive(Debug)]
pub enum CaptureError {
    /// Content was empty or whitespace-only; nothing was attempted.
    EmptyContent,
    /// The analysis service failed; nothing was persisted.
    Gateway(GatewayError),
    /// A store write/delete failed before anything else was persisted.
    Store(StoreError),
    /// The note row was written but not all derived task rows were.
    /// The note is kept; callers report the partial outcome.
    TasksPartiallySaved {
        note_id: NoteId,
        saved: usize,
        total: usize,
        source: StoreError,
    },
    /// The converted task was written but the source note's
    /// `has_tasks` flag could not be updated, even after one retry.
    /// The task is kept so callers can reconcile.
    NoteFlagNotUpdated { task_id: TaskId, source: StoreError },
}

impl Display for CaptureError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "note content is empty"),
            Self::Gateway(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::TasksPartiallySaved {
                note_id,
                saved,
                total,
                source,
            } => write!(
                f,
                "note {note_id} saved but only {saved} of {total} derived tasks were written: {source}"
            ),
            Self::NoteFlagNotUpdated { task_id, source } => write!(
                f,
                "task {task_id} created but the source note was not marked: {source}"
            ),
        }
    }
}

impl Error for CaptureError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EmptyContent => None,
            Self::Gateway(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::TasksPartiallySaved { source, .. } => Some(source),
            Self::NoteFlagNotUpdated { source, .. } => Some(source),
        }
    }
}

impl From<GatewayError> for CaptureError {
    fn from(value: GatewayError) -> Self {
        Self::Gateway(value)
    }
}

impl From<StoreError> for CaptureError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Outcome of a successful capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedNote {
    /// The persisted note.
    pub note: Note,
    /// How many task rows were seeded from the analysis.
    pub tasks_created: usize,
}

/// Coordinator over a record store and the analysis gateway.
pub struct CaptureService<S, G> {
    store: S,
    gateway: G,
}

impl<S, G> CaptureService<S, G>
where
    S: NoteStore + TaskStore,
    G: AnalysisGateway,
{
    /// Creates the coordinator from its two collaborators.
    pub fn new(store: S, gateway: G) -> Self {
        Self { store, gateway }
    }

    /// Captures one note: analyzes the text, persists the note with its
    /// tags, then persists one task row per extracted candidate.
    ///
    /// `has_tasks` is derived from the candidate list, keeping the
    /// record invariant even when the service's own flag disagrees.
    pub fn create_note(&self, owner: OwnerId, content: &str) -> Result<CapturedNote, CaptureError> {
        if content.trim().is_empty() {
            return Err(CaptureError::EmptyContent);
        }

        let analysis = self.gateway.analyze_note(content)?;
        let has_tasks = !analysis.tasks.is_empty();
        let note = Note::new(owner, content, analysis.tags, has_tasks);
        self.store.insert_note(&note)?;

        let total = analysis.tasks.len();
        let mut saved = 0;
        for candidate in &analysis.tasks {
            let mut task = Task::new(owner, candidate.title.clone(), candidate.priority);
            task.description = candidate.description.clone();
            if let Err(source) = self.store.insert_task(&task) {
                error!(
                    "event=note_capture module=capture status=partial note_id={} saved={saved} total={total} error={source}",
                    note.id
                );
                return Err(CaptureError::TasksPartiallySaved {
                    note_id: note.id,
                    saved,
                    total,
                    source,
                });
            }
            saved += 1;
        }

        info!(
            "event=note_capture module=capture status=ok note_id={} tags={} tasks_created={saved}",
            note.id,
            note.tags.len()
        );
        Ok(CapturedNote {
            note,
            tasks_created: saved,
        })
    }

    /// Converts an existing note into a task.
    ///
    /// The note text is re-analyzed to obtain a better-structured task;
    /// when the analysis lists no candidate, or the gateway fails, the
    /// conversion degrades to a basic task built from the text itself.
    /// The task is persisted with its provenance link, then the note is
    /// marked `has_tasks`. The two writes are not atomic; a failed flag
    /// update is retried once and then surfaced with the created task id.
    pub fn convert_note_to_task(
        &self,
        owner: OwnerId,
        note_id: NoteId,
        content: &str,
    ) -> Result<Task, CaptureError> {
        let candidate = match self.gateway.analyze_note(content) {
            Ok(analysis) => analysis.tasks.into_iter().next(),
            Err(err) => {
                warn!(
                    "event=note_convert module=capture status=fallback note_id={note_id} error={err}"
                );
                None
            }
        };

        let mut task = match candidate {
            Some(candidate) => {
                let mut task = Task::new(owner, candidate.title, candidate.priority);
                task.description = candidate.description;
                task
            }
            None => fallback_task(owner, content),
        };
        task.note_id = Some(note_id);
        self.store.insert_task(&task)?;

        let mut flagged = self.store.set_note_has_tasks(owner, note_id, true);
        if let Err(err) = &flagged {
            warn!(
                "event=note_convert module=capture status=retry note_id={note_id} error={err}"
            );
            flagged = self.store.set_note_has_tasks(owner, note_id, true);
        }
        if let Err(source) = flagged {
            error!(
                "event=note_convert module=capture status=diverged note_id={note_id} task_id={} error={source}",
                task.id
            );
            return Err(CaptureError::NoteFlagNotUpdated {
                task_id: task.id,
                source,
            });
        }

        info!(
            "event=note_convert module=capture status=ok note_id={note_id} task_id={}",
            task.id
        );
        Ok(task)
    }

    /// Deletes one note. Returns whether a row existed; deleting an
    /// already-deleted id is a no-op, not an error.
    pub fn delete_note(&self, owner: OwnerId, note_id: NoteId) -> Result<bool, CaptureError> {
        let existed = self.store.delete_note(owner, note_id)?;
        info!(
            "event=note_delete module=capture status={} note_id={note_id}",
            if existed { "ok" } else { "noop" }
        );
        Ok(existed)
    }
}

/// Builds the basic task used when no AI candidate is available:
/// title is the first 100 characters of the content, the description
/// carries the full text, priority defaults to medium.
fn fallback_task(owner: OwnerId, content: &str) -> Task {
    let title: String = content.chars().take(FALLBACK_TITLE_CHARS).collect();
    let mut task = Task::new(owner, title, Priority::Medium);
    task.description = Some(content.to_string());
    task
}
