//! Configuration error types.

use thiserror::Error;

/// Errors raised while loading or validating [`EngineConfig`](super::EngineConfig).
///
/// All of these are fatal at construction: the engine factory refuses to
/// build with an invalid configuration, before any claim is processed.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A threshold field is outside `[0.0, 1.0]`.
    #[error("threshold '{name}' out of range: {value} (expected 0.0..=1.0)")]
    ThresholdOutOfRange { name: &'static str, value: f32 },

    /// A count/limit field is zero.
    #[error("'{name}' must be greater than zero")]
    ZeroLimit { name: &'static str },

    /// The per-call timeout is zero.
    #[error("per-call timeout must be non-zero")]
    ZeroTimeout,

    /// Risk cutpoints are not strictly descending within `(0, 100]`.
    #[error(
        "risk cutpoints must satisfy 0 < high < medium < low <= 100: \
         low={low}, medium={medium}, high={high}"
    )]
    InvalidRiskCutpoints { low: f32, medium: f32, high: f32 },

    /// An environment variable could not be parsed as a number.
    #[error("failed to parse {name}='{value}' as a number")]
    NumberParseError { name: &'static str, value: String },

    /// The risk cutpoints env var is not three comma-separated numbers.
    #[error("failed to parse {name}='{value}' as 'low,medium,high'")]
    CutpointsParseError { name: &'static str, value: String },

    /// The reasoning model name is empty.
    #[error("reasoning model name must not be empty")]
    EmptyModelName,
}
