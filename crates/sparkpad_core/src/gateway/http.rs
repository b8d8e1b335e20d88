//! Blocking HTTP implementation of the analysis gateway.
//!
//! # Responsibility
//! - Carry the chat-completions call shape against the configured
//!   endpoint and map transport/status failures to [`GatewayError`].
//!
//! # Invariants
//! - One outbound call per gateway method, no retries.
//! - Logged events carry metadata only, never note content.

use crate::gateway::types::{AnalysisResult, BrainAnalysis, NoteDigest};
use crate::gateway::{wire, AnalysisGateway, GatewayError, GatewayResult};
use crate::model::note::MAX_NOTE_TAGS;
use log::{info, warn};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::{Duration, Instant};

const DEFAULT_ENDPOINT: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";
const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";
const DEFAULT_TIMEOUT_SECS: u64 = 50;

const ENDPOINT_ENV: &str = "SPARKPAD_AI_ENDPOINT";
const API_KEY_ENV: &str = "SPARKPAD_AI_KEY";
const MODEL_ENV: &str = "SPARKPAD_AI_MODEL";

/// Connection settings for the analysis endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Full chat-completions URL.
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
}

impl GatewayConfig {
    /// Creates a config with compiled defaults for everything but the key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Builds a config from environment variables.
    ///
    /// `SPARKPAD_AI_KEY` is required; `SPARKPAD_AI_ENDPOINT` and
    /// `SPARKPAD_AI_MODEL` override the compiled defaults.
    pub fn from_env() -> Result<Self, String> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| format!("{API_KEY_ENV} is not configured"))?;
        let mut config = Self::new(api_key);
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            config.endpoint = endpoint;
        }
        if let Ok(model) = std::env::var(MODEL_ENV) {
            config.model = model;
        }
        Ok(config)
    }
}

/// Gateway client speaking the schema-constrained completion contract.
pub struct HttpAnalysisGateway {
    config: GatewayConfig,
    client: Client,
}

impl HttpAnalysisGateway {
    /// Builds the client with the configured request timeout.
    pub fn try_new(config: GatewayConfig) -> GatewayResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| GatewayError::Transport(format!("failed to build HTTP client: {err}")))?;
        Ok(Self { config, client })
    }

    fn post_tool_call<T: DeserializeOwned>(&self, call: &str, request: &Value) -> GatewayResult<T> {
        let started_at = Instant::now();

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(request)
            .send()
            .map_err(|err| GatewayError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let err = wire::error_for_status(status.as_u16(), &body);
            warn!(
                "event=gateway_call module=gateway status=error call={call} http_status={} duration_ms={} error={err}",
                status.as_u16(),
                started_at.elapsed().as_millis()
            );
            return Err(err);
        }

        let body: Value = response.json().map_err(|err| {
            GatewayError::MalformedResponse(format!("response body is not JSON: {err}"))
        })?;
        let payload = wire::extract_tool_payload(&body)?;

        info!(
            "event=gateway_call module=gateway status=ok call={call} duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(payload)
    }
}

impl AnalysisGateway for HttpAnalysisGateway {
    fn analyze_note(&self, content: &str) -> GatewayResult<AnalysisResult> {
        let request = wire::analyze_note_request(&self.config.model, content);
        let mut result: AnalysisResult = self.post_tool_call("analyze_note", &request)?;
        // Wire-level guard; the note model enforces the same cap.
        result.tags.truncate(MAX_NOTE_TAGS);
        Ok(result)
    }

    fn analyze_brain(&self, notes: &[NoteDigest]) -> GatewayResult<BrainAnalysis> {
        let request = wire::analyze_brain_request(&self.config.model, notes);
        self.post_tool_call("analyze_brain", &request)
    }
}

#[cfg(test)]
mod tests {
    use super::{GatewayConfig, DEFAULT_ENDPOINT, DEFAULT_MODEL};
    use std::time::Duration;

    #[test]
    fn config_defaults_cover_everything_but_the_key() {
        let config = GatewayConfig::new("secret");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.timeout, Duration::from_secs(50));
    }
}
