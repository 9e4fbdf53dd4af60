use thiserror::Error;

/// Failures of the external text-reasoning call.
///
/// These never surface as claim-level failures: every caller sits on a
/// strategy chain whose tail is a local heuristic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReasoningError {
    /// The provider was unreachable or rejected the call.
    #[error("reasoning call failed: {reason}")]
    Transport { reason: String },

    /// The per-call timeout elapsed.
    #[error("reasoning call timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// The response arrived but its structure could not be used.
    #[error("malformed reasoning response: {reason}")]
    Malformed { reason: String },
}
