//! Brain insight engine.
//!
//! # Responsibility
//! - Run cross-note analysis over the full collection on demand.
//! - Hold the latest [`BrainAnalysis`] and replace it wholesale.
//!
//! # Invariants
//! - An empty collection never reaches the network.
//! - At most one analysis call is in flight; a second trigger while
//!   busy is a no-op.
//! - A completion that is no longer the latest issued request is
//!   discarded instead of overwriting newer state.

use crate::gateway::{AnalysisGateway, BrainAnalysis, GatewayError, NoteDigest};
use log::{info, warn};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Result of one refresh trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The collection was empty; no call was made.
    NothingToAnalyze,
    /// Another refresh is in flight; this trigger was a no-op.
    Busy,
    /// Analysis completed and replaced the held state.
    Updated(BrainAnalysis),
    /// Analysis completed but a newer request had been issued; the
    /// stale result was discarded.
    Superseded,
}

/// On-demand cross-note analysis holder.
pub struct InsightEngine<G> {
    gateway: G,
    busy: AtomicBool,
    issued: AtomicU64,
    current: Mutex<Option<BrainAnalysis>>,
}

impl<G: AnalysisGateway> InsightEngine<G> {
    /// Creates an engine with no analysis held yet.
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            busy: AtomicBool::new(false),
            issued: AtomicU64::new(0),
            current: Mutex::new(None),
        }
    }

    /// Returns a copy of the latest analysis, if any completed yet.
    pub fn current(&self) -> Option<BrainAnalysis> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Analyzes the full note collection and replaces the held state.
    ///
    /// Each call gets a monotonically increasing token; the completion
    /// is applied only while its token is still the latest issued.
    pub fn refresh(&self, notes: &[NoteDigest]) -> Result<RefreshOutcome, GatewayError> {
        if notes.is_empty() {
            info!("event=insight_refresh module=insight status=empty");
            return Ok(RefreshOutcome::NothingToAnalyze);
        }

        if self
            .busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Acquire)
            .is_err()
        {
            info!("event=insight_refresh module=insight status=busy");
            return Ok(RefreshOutcome::Busy);
        }

        let token = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.gateway.analyze_brain(notes);
        self.busy.store(false, Ordering::Release);

        let analysis = match result {
            Ok(analysis) => analysis,
            Err(err) => {
                warn!("event=insight_refresh module=insight status=error error={err}");
                return Err(err);
            }
        };

        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if self.issued.load(Ordering::SeqCst) != token {
            info!("event=insight_refresh module=insight status=superseded token={token}");
            return Ok(RefreshOutcome::Superseded);
        }
        *current = Some(analysis.clone());

        info!(
            "event=insight_refresh module=insight status=ok notes={} themes={} insights={}",
            notes.len(),
            analysis.themes.len(),
            analysis.insights.len()
        );
        Ok(RefreshOutcome::Updated(analysis))
    }
}
