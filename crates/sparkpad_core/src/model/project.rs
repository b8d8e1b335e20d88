//! Project domain model.
//!
//! # Responsibility
//! - Define the titled, dated container record and its color palette.
//!
//! # Invariants
//! - `color` is one of [`PROJECT_COLOR_PALETTE`] for records created
//!   through the mutation service.
//! - No ordering is guaranteed between `start_date` and `end_date`;
//!   consumers must not assume end >= start.

use crate::model::{now_epoch_ms, OwnerId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a project.
pub type ProjectId = Uuid;

/// Fixed set of accent colors offered for projects.
pub const PROJECT_COLOR_PALETTE: [&str; 6] = [
    "#8B5CF6", "#EC4899", "#F59E0B", "#10B981", "#3B82F6", "#EF4444",
];

/// Returns whether `color` is a member of the fixed palette.
pub fn is_palette_color(color: &str) -> bool {
    PROJECT_COLOR_PALETTE.contains(&color)
}

/// Titled, dated container. Tasks may point at a project but the
/// relation is a lookup only; deleting a project leaves tasks in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Stable global ID.
    pub id: ProjectId,
    /// Owning user.
    pub owner: OwnerId,
    pub title: String,
    pub description: Option<String>,
    /// Accent color, one of the fixed palette.
    pub color: String,
    /// Optional start timestamp in epoch milliseconds.
    pub start_date: Option<i64>,
    /// Optional end timestamp in epoch milliseconds.
    pub end_date: Option<i64>,
    pub completed: bool,
    /// Creation timestamp in epoch milliseconds.
    pub created_at: i64,
}

impl Project {
    /// Creates a project with a generated ID and the current timestamp.
    ///
    /// Optional fields start as `None`; callers set them directly.
    /// Color membership is validated by the mutation service, not here.
    pub fn new(owner: OwnerId, title: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner,
            title: title.into(),
            description: None,
            color: color.into(),
            start_date: None,
            end_date: None,
            completed: false,
            created_at: now_epoch_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{is_palette_color, Project, PROJECT_COLOR_PALETTE};
    use uuid::Uuid;

    #[test]
    fn palette_membership_checks_exact_values() {
        for color in PROJECT_COLOR_PALETTE {
            assert!(is_palette_color(color));
        }
        assert!(!is_palette_color("#FFFFFF"));
        assert!(!is_palette_color("#8b5cf6"));
    }

    #[test]
    fn new_project_starts_without_dates() {
        let project = Project::new(Uuid::new_v4(), "launch", "#8B5CF6");
        assert!(project.start_date.is_none());
        assert!(project.end_date.is_none());
        assert!(!project.completed);
    }
}
