//! Domain records for notes, tasks and projects.
//!
//! # Responsibility
//! - Define the canonical data structures used by core business logic.
//! - Keep record invariants (tag cap, priority domain, palette) local.
//!
//! # Invariants
//! - Every record is identified by a stable UUID and an owning user.
//! - `created_at` is epoch milliseconds, assigned once at construction.

use chrono::Utc;
use uuid::Uuid;

pub mod note;
pub mod project;
pub mod task;

/// Identifier of the user owning a record. Every operation in this
/// crate takes the owner explicitly; there is no ambient session state.
pub type OwnerId = Uuid;

/// Current wall-clock time in epoch milliseconds.
pub(crate) fn now_epoch_ms() -> i64 {
    Utc::now().timestamp_millis()
}
