use thiserror::Error;

use crate::embedding::EmbeddingError;

/// Errors on the evidence retrieval path.
///
/// An empty corpus is not represented here: it yields an empty result set.
/// These errors degrade to a `no_evidence` verdict at the orchestrator, with
/// the failure in the rationale.
#[derive(Debug, Error)]
pub enum EvidenceError {
    /// Could not connect to the evidence store.
    #[error("failed to connect to evidence store at '{url}': {message}")]
    ConnectionFailed { url: String, message: String },

    /// Collection creation failed.
    #[error("failed to create collection '{collection}': {message}")]
    CreateCollectionFailed { collection: String, message: String },

    /// Upsert failed.
    #[error("failed to upsert passages to '{collection}': {message}")]
    UpsertFailed { collection: String, message: String },

    /// Search failed.
    #[error("evidence search failed in '{collection}': {message}")]
    SearchFailed { collection: String, message: String },

    /// Claim embedding failed before the store was queried.
    #[error("claim embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),
}
