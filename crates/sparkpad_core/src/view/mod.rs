//! Derived view model over the fetched collections.
//!
//! # Responsibility
//! - Date-bucket tasks and projects for calendar presentation.
//! - Partition tasks and projects by completion state.
//!
//! # Invariants
//! - Everything here is pure: re-derivable from the current
//!   collections at any time, no caching, no side effects.

pub mod calendar;
pub mod partition;
