//! Note domain model.
//!
//! # Responsibility
//! - Define the free-text capture record and its tag invariant.
//!
//! # Invariants
//! - `tags` never holds more than [`MAX_NOTE_TAGS`] entries.
//! - `has_tasks` is true exactly when at least one task has been derived
//!   from this note, either at capture time or by later conversion.

use crate::model::{now_epoch_ms, OwnerId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a note.
pub type NoteId = Uuid;

/// Upper bound on AI-assigned tags per note.
pub const MAX_NOTE_TAGS: usize = 5;

/// Free-text capture, auto-tagged and optionally mined for tasks.
///
/// Content and tags are immutable after creation; only `has_tasks` may
/// flip to `true` when the note is later converted to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Stable global ID.
    pub id: NoteId,
    /// Owning user.
    pub owner: OwnerId,
    /// Raw captured text.
    pub content: String,
    /// AI-assigned tags, at most [`MAX_NOTE_TAGS`], original order kept.
    pub tags: Vec<String>,
    /// Whether any task has been derived from this note.
    pub has_tasks: bool,
    /// Creation timestamp in epoch milliseconds.
    pub created_at: i64,
}

impl Note {
    /// Creates a note with a generated ID and the current timestamp.
    ///
    /// Tags beyond [`MAX_NOTE_TAGS`] are dropped to uphold the record
    /// invariant regardless of what the analysis service returned.
    pub fn new(
        owner: OwnerId,
        content: impl Into<String>,
        mut tags: Vec<String>,
        has_tasks: bool,
    ) -> Self {
        tags.truncate(MAX_NOTE_TAGS);
        Self {
            id: Uuid::new_v4(),
            owner,
            content: content.into(),
            tags,
            has_tasks,
            created_at: now_epoch_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Note, MAX_NOTE_TAGS};
    use uuid::Uuid;

    #[test]
    fn new_note_caps_tags_at_five() {
        let tags = (0..8).map(|n| format!("tag{n}")).collect();
        let note = Note::new(Uuid::new_v4(), "content", tags, false);
        assert_eq!(note.tags.len(), MAX_NOTE_TAGS);
        assert_eq!(note.tags[0], "tag0");
    }

    #[test]
    fn new_note_keeps_tag_order() {
        let note = Note::new(
            Uuid::new_v4(),
            "content",
            vec!["work".to_string(), "urgent".to_string()],
            true,
        );
        assert_eq!(note.tags, vec!["work".to_string(), "urgent".to_string()]);
        assert!(note.has_tasks);
    }
}
