//! Core use-case coordinators.
//!
//! # Responsibility
//! - Orchestrate gateway and store calls into use-case level APIs.
//! - Keep callers decoupled from wire and storage details.
//!
//! # Invariants
//! - Multi-record flows are best-effort sequences; partial success is
//!   surfaced to the caller, never rolled back silently.

pub mod capture;
pub mod insight;
pub mod mutate;
