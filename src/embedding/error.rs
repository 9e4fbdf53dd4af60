use thiserror::Error;

/// Failures of the external embedding call.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// The HTTP client could not be built.
    #[error("failed to build embedding client: {reason}")]
    ClientBuildFailed { reason: String },

    /// The service was unreachable or returned a non-success status.
    #[error("embedding request failed: {reason}")]
    RequestFailed { reason: String },

    /// The per-call timeout elapsed.
    #[error("embedding request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// The response body could not be parsed.
    #[error("malformed embedding response: {reason}")]
    MalformedResponse { reason: String },

    /// The response parsed but contained no vectors.
    #[error("embedding service returned no vectors")]
    EmptyResponse,
}
