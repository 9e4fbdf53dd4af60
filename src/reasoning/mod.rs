//! External text-reasoning calls.
//!
//! [`ReasoningClient`] is the seam the LLM-backed strategies call through.
//! The production implementation wraps a [`genai::Client`]; responses are
//! untrusted free text, so [`extract_json`] narrows them to the embedded
//! JSON object before parsing.

pub mod error;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::ReasoningError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockReasoningClient;

use std::time::Duration;

use async_trait::async_trait;
use genai::Client;
use genai::chat::{ChatMessage, ChatRequest};

use crate::config::EngineConfig;

/// One-shot completion against an external reasoning provider.
#[async_trait]
pub trait ReasoningClient: Send + Sync {
    /// Sends a system + user prompt and returns the raw response text.
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, ReasoningError>;
}

/// [`genai`]-backed reasoning client with a per-call timeout.
pub struct GenaiReasoningClient {
    client: Client,
    model: String,
    timeout: Duration,
}

impl GenaiReasoningClient {
    /// Creates a client for `model`, reading provider credentials the way
    /// `genai` does (environment-based per provider).
    pub fn new(model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::default(),
            model: model.into(),
            timeout,
        }
    }

    /// Creates a client from engine configuration, taking the model name
    /// and per-call timeout from it.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.reasoning_model.clone(), config.per_call_timeout)
    }

    /// Returns the configured model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the per-call timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl std::fmt::Debug for GenaiReasoningClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenaiReasoningClient")
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[async_trait]
impl ReasoningClient for GenaiReasoningClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, ReasoningError> {
        let request = ChatRequest::new(vec![
            ChatMessage::system(system),
            ChatMessage::user(prompt),
        ]);

        let response = tokio::time::timeout(
            self.timeout,
            self.client.exec_chat(&self.model, request, None),
        )
        .await
        .map_err(|_| ReasoningError::Timeout {
            seconds: self.timeout.as_secs(),
        })?
        .map_err(|e| ReasoningError::Transport {
            reason: e.to_string(),
        })?;

        let text = response
            .first_text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .ok_or_else(|| ReasoningError::Malformed {
                reason: "response contained no text".to_string(),
            })?;

        Ok(text)
    }
}

/// Narrows a raw provider response to its embedded JSON object.
///
/// Strips markdown code fences and clips to the outermost `{...}` span;
/// returns the trimmed input when no object is found (letting the caller's
/// parse fail with the real payload in hand).
pub fn extract_json(raw: &str) -> &str {
    let mut body = raw.trim();

    if let Some((_, rest)) = body.split_once("```json") {
        body = rest;
    } else if let Some((_, rest)) = body.split_once("```") {
        body = rest;
    }
    if let Some((inside, _)) = body.split_once("```") {
        body = inside;
    }

    match (body.find('{'), body.rfind('}')) {
        (Some(start), Some(end)) if end >= start => &body[start..=end],
        _ => body.trim(),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{GenaiReasoningClient, extract_json};
    use crate::config::EngineConfig;

    #[test]
    fn test_from_config_carries_model_and_timeout() {
        let config = EngineConfig {
            reasoning_model: "gemini-2.0-flash".to_string(),
            per_call_timeout: Duration::from_secs(5),
            ..EngineConfig::default()
        };

        let client = GenaiReasoningClient::from_config(&config);
        assert_eq!(client.model(), "gemini-2.0-flash");
        assert_eq!(client.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_extract_json_plain_object() {
        assert_eq!(extract_json(r#"{"a": 1}"#), r#"{"a": 1}"#);
    }

    #[test]
    fn test_extract_json_fenced() {
        let raw = "Here you go:\n```json\n{\"verdict\": \"supported\"}\n```\nDone.";
        assert_eq!(extract_json(raw), r#"{"verdict": "supported"}"#);
    }

    #[test]
    fn test_extract_json_unlabeled_fence() {
        let raw = "```\n{\"x\": true}\n```";
        assert_eq!(extract_json(raw), r#"{"x": true}"#);
    }

    #[test]
    fn test_extract_json_surrounding_prose() {
        let raw = "The answer is {\"score\": 80} as requested.";
        assert_eq!(extract_json(raw), r#"{"score": 80}"#);
    }

    #[test]
    fn test_extract_json_no_object_returns_trimmed_input() {
        assert_eq!(extract_json("  not json at all  "), "not json at all");
    }
}
