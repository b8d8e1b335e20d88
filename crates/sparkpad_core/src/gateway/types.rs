//! Transient payload types exchanged with the analysis service.
//!
//! None of these are persisted as such: an [`AnalysisResult`] is
//! consumed once to populate a note and seed task rows, and a
//! [`BrainAnalysis`] replaces the previously displayed one wholesale.

use crate::model::note::Note;
use crate::model::task::Priority;
use serde::{Deserialize, Serialize};

/// Structured output of the per-note analysis call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Relevant tags, at most five after normalization.
    pub tags: Vec<String>,
    /// Actionable tasks found in the note, possibly empty.
    pub tasks: Vec<CandidateTask>,
    /// Whether the note contains actionable tasks.
    pub has_tasks: bool,
}

/// One task candidate extracted from a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub priority: Priority,
}

/// Per-note slice of the collection sent to the cross-note call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDigest {
    pub content: String,
    pub tags: Vec<String>,
}

impl From<&Note> for NoteDigest {
    fn from(note: &Note) -> Self {
        Self {
            content: note.content.clone(),
            tags: note.tags.clone(),
        }
    }
}

/// Structured output of the cross-note analysis call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrainAnalysis {
    pub themes: Vec<BrainTheme>,
    pub connections: Vec<BrainConnection>,
    pub insights: Vec<BrainInsight>,
    pub summary: String,
}

/// A recurring theme across several notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrainTheme {
    pub name: String,
    /// Zero-based indices into the analyzed note collection.
    #[serde(rename = "noteIndices")]
    pub note_indices: Vec<usize>,
    pub description: String,
}

/// A relationship the service found between specific notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrainConnection {
    #[serde(rename = "noteIndices")]
    pub note_indices: Vec<usize>,
    pub relationship: String,
}

/// An actionable recommendation derived from the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrainInsight {
    pub title: String,
    pub description: String,
    pub priority: Priority,
}
