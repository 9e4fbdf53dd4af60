//! Claim embedding via an external embedding service.
//!
//! Corpus passages arrive pre-embedded in the evidence store; this module
//! only embeds claim text for querying. The production implementation
//! speaks the OpenAI-compatible `/embeddings` shape over HTTP.

pub mod error;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::EmbeddingError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockEmbedder, deterministic_embedding};

use std::time::Duration;

use serde::Deserialize;

/// Text-to-vector seam used by the evidence retriever.
pub trait Embedder: Send + Sync {
    /// Embeds `text` into the corpus vector space.
    fn embed(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<Vec<f32>, EmbeddingError>> + Send;
}

/// OpenAI-compatible HTTP embedder.
#[derive(Debug, Clone)]
pub struct HttpEmbedder {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl HttpEmbedder {
    /// Creates an embedder posting to `{base_url}/embeddings`.
    pub fn new(
        base_url: &str,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, EmbeddingError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EmbeddingError::ClientBuildFailed {
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            endpoint: format!("{}/embeddings", base_url.trim_end_matches('/')),
            model: model.into(),
            api_key,
            timeout,
        })
    }

    /// Creates an embedder whose per-call timeout comes from engine
    /// configuration.
    pub fn from_config(
        base_url: &str,
        model: impl Into<String>,
        api_key: Option<String>,
        config: &crate::config::EngineConfig,
    ) -> Result<Self, EmbeddingError> {
        Self::new(base_url, model, api_key, config.per_call_timeout)
    }

    /// Returns the endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the per-call timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingDatum>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingDatum {
    embedding: Vec<f32>,
}

impl Embedder for HttpEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut request = self.client.post(&self.endpoint).json(&serde_json::json!({
            "model": self.model,
            "input": text,
        }));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                EmbeddingError::Timeout {
                    seconds: self.timeout.as_secs(),
                }
            } else {
                EmbeddingError::RequestFailed {
                    reason: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(EmbeddingError::RequestFailed {
                reason: format!("service returned status {status}"),
            });
        }

        let body: EmbeddingsResponse =
            response
                .json()
                .await
                .map_err(|e| EmbeddingError::MalformedResponse {
                    reason: e.to_string(),
                })?;

        body.data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .filter(|v| !v.is_empty())
            .ok_or(EmbeddingError::EmptyResponse)
    }
}
