//! Core domain logic for Sparkpad, an AI-assisted notes/tasks/projects
//! organizer. This crate is the single source of truth for business
//! invariants: the analysis-gateway contract, the note capture and
//! conversion flows, task/project mutations, and the derived calendar
//! view model.

pub mod db;
pub mod gateway;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
pub mod view;

pub use gateway::{
    AnalysisGateway, AnalysisResult, BrainAnalysis, BrainConnection, BrainInsight, BrainTheme,
    CandidateTask, GatewayConfig, GatewayError, HttpAnalysisGateway, NoteDigest,
};
pub use logging::{default_log_level, init_logging};
pub use model::note::{Note, NoteId, MAX_NOTE_TAGS};
pub use model::project::{is_palette_color, Project, ProjectId, PROJECT_COLOR_PALETTE};
pub use model::task::{Priority, Task, TaskId};
pub use model::OwnerId;
pub use service::capture::{CaptureError, CaptureService, CapturedNote};
pub use service::insight::{InsightEngine, RefreshOutcome};
pub use service::mutate::{MutateError, MutationService, NewProject, NewTask};
pub use store::{NoteStore, ProjectStore, SqliteStore, StoreError, StoreResult, TaskStore};
pub use view::calendar::{bucket_for_date, day_has_items, DayBucket};
pub use view::partition::{partition_projects, partition_tasks, ProjectPartition, TaskPartition};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
