//! AI analysis gateway contracts.
//!
//! # Responsibility
//! - Define the client-side contract for the external text-analysis
//!   service (per-note extraction and cross-note insight calls).
//! - Map upstream failure modes to a stable error taxonomy.
//!
//! # Invariants
//! - Only the schema-constrained tool-call payload of a response is
//!   trusted; free-text parts are ignored.
//! - Gateway implementations persist nothing; callers own all writes.
//! - No automatic retry: throttling and quota failures surface to the
//!   caller unchanged.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod http;
pub mod types;
pub(crate) mod wire;

pub use http::{GatewayConfig, HttpAnalysisGateway};
pub use types::{
    AnalysisResult, BrainAnalysis, BrainConnection, BrainInsight, BrainTheme, CandidateTask,
    NoteDigest,
};

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Failure modes of the analysis service, mirroring its status contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Upstream signalled throttling (HTTP 429). The user may retry
    /// later; this crate never retries on its own.
    RateLimited,
    /// Upstream signalled billing/quota exhaustion (HTTP 402). Terminal.
    QuotaExceeded,
    /// The structured payload was missing or did not match the schema.
    MalformedResponse(String),
    /// Network failure, timeout, or any other non-success status.
    Transport(String),
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RateLimited => write!(f, "analysis service is rate limited; try again later"),
            Self::QuotaExceeded => write!(f, "analysis service quota is exhausted"),
            Self::MalformedResponse(details) => {
                write!(f, "analysis response is malformed: {details}")
            }
            Self::Transport(details) => write!(f, "analysis service unreachable: {details}"),
        }
    }
}

impl Error for GatewayError {}

/// Client contract for the external analysis service.
///
/// `analyze_brain` receives the full note collection; callers guard
/// against empty input before reaching the gateway.
pub trait AnalysisGateway {
    /// Extracts tags and candidate tasks from one note's text.
    fn analyze_note(&self, content: &str) -> GatewayResult<AnalysisResult>;
    /// Derives themes, connections and insights across all notes.
    fn analyze_brain(&self, notes: &[NoteDigest]) -> GatewayResult<BrainAnalysis>;
}

impl<G: AnalysisGateway + ?Sized> AnalysisGateway for &G {
    fn analyze_note(&self, content: &str) -> GatewayResult<AnalysisResult> {
        (**self).analyze_note(content)
    }

    fn analyze_brain(&self, notes: &[NoteDigest]) -> GatewayResult<BrainAnalysis> {
        (**self).analyze_brain(notes)
    }
}
