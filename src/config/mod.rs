//! Engine configuration.
//!
//! All thresholds, limits and timeouts are explicit construction inputs; no
//! ambient state is consulted after [`EngineConfig`] is built. Settings have
//! defaults and can be overridden with `TROPECHECK_*` environment variables
//! via [`EngineConfig::from_env`].

pub mod error;


pub use error::ConfigError;

use std::env;
use std::time::Duration;

use crate::aggregate::RiskCutpoints;
use crate::constants::{
    DEFAULT_EVIDENCE_MIN_SIMILARITY, DEFAULT_EVIDENCE_RETRIEVAL_LIMIT,
    DEFAULT_MAX_CONCURRENT_CLAIMS, DEFAULT_PER_CALL_TIMEOUT, DEFAULT_REASONING_MODEL,
    DEFAULT_REGISTER_ACCEPTANCE_THRESHOLD, DEFAULT_SEMANTIC_MARKING_THRESHOLD,
    DEFAULT_SHORT_CLAIM_CHARS,
};

/// Verification engine configuration.
///
/// Use [`EngineConfig::from_env`] to read `TROPECHECK_*` overrides on top of
/// defaults, and [`EngineConfig::validate`] (called by the engine factory) to
/// fail fast on invalid values.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Minimum cosine similarity for retrieved evidence. Default: `0.3`.
    pub evidence_min_similarity: f32,

    /// Maximum evidence items per claim (`k`). Default: `5`.
    pub evidence_retrieval_limit: usize,

    /// Semantic confidence at which a claim is marked `antisemitic_trope`.
    /// Default: `0.6`.
    pub semantic_marking_threshold: f32,

    /// Register confidence at which a non-factual register is accepted.
    /// Default: `0.5`.
    pub register_acceptance_threshold: f32,

    /// Claims shorter than this (chars) are analyzed whole with their
    /// paragraph context. Default: `500`.
    pub short_claim_chars: usize,

    /// Bounded width of the per-document claim pipeline. Default: `4`.
    pub max_concurrent_claims: usize,

    /// Timeout applied to every external reasoning/embedding call.
    /// Default: `30s`.
    pub per_call_timeout: Duration,

    /// Model name passed to the reasoning provider.
    pub reasoning_model: String,

    /// Cutpoints bucketing the document score into risk levels.
    pub risk_cutpoints: RiskCutpoints,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            evidence_min_similarity: DEFAULT_EVIDENCE_MIN_SIMILARITY,
            evidence_retrieval_limit: DEFAULT_EVIDENCE_RETRIEVAL_LIMIT,
            semantic_marking_threshold: DEFAULT_SEMANTIC_MARKING_THRESHOLD,
            register_acceptance_threshold: DEFAULT_REGISTER_ACCEPTANCE_THRESHOLD,
            short_claim_chars: DEFAULT_SHORT_CLAIM_CHARS,
            max_concurrent_claims: DEFAULT_MAX_CONCURRENT_CLAIMS,
            per_call_timeout: DEFAULT_PER_CALL_TIMEOUT,
            reasoning_model: DEFAULT_REASONING_MODEL.to_string(),
            risk_cutpoints: RiskCutpoints::default(),
        }
    }
}

impl EngineConfig {
    const ENV_EVIDENCE_MIN_SIMILARITY: &'static str = "TROPECHECK_EVIDENCE_MIN_SIMILARITY";
    const ENV_EVIDENCE_RETRIEVAL_LIMIT: &'static str = "TROPECHECK_EVIDENCE_RETRIEVAL_LIMIT";
    const ENV_SEMANTIC_MARKING_THRESHOLD: &'static str = "TROPECHECK_SEMANTIC_MARKING_THRESHOLD";
    const ENV_REGISTER_ACCEPTANCE_THRESHOLD: &'static str =
        "TROPECHECK_REGISTER_ACCEPTANCE_THRESHOLD";
    const ENV_SHORT_CLAIM_CHARS: &'static str = "TROPECHECK_SHORT_CLAIM_CHARS";
    const ENV_MAX_CONCURRENT_CLAIMS: &'static str = "TROPECHECK_MAX_CONCURRENT_CLAIMS";
    const ENV_PER_CALL_TIMEOUT_SECS: &'static str = "TROPECHECK_PER_CALL_TIMEOUT_SECS";
    const ENV_REASONING_MODEL: &'static str = "TROPECHECK_REASONING_MODEL";
    const ENV_RISK_CUTPOINTS: &'static str = "TROPECHECK_RISK_CUTPOINTS";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let evidence_min_similarity = Self::parse_f32_from_env(
            Self::ENV_EVIDENCE_MIN_SIMILARITY,
            defaults.evidence_min_similarity,
        )?;
        let evidence_retrieval_limit = Self::parse_usize_from_env(
            Self::ENV_EVIDENCE_RETRIEVAL_LIMIT,
            defaults.evidence_retrieval_limit,
        )?;
        let semantic_marking_threshold = Self::parse_f32_from_env(
            Self::ENV_SEMANTIC_MARKING_THRESHOLD,
            defaults.semantic_marking_threshold,
        )?;
        let register_acceptance_threshold = Self::parse_f32_from_env(
            Self::ENV_REGISTER_ACCEPTANCE_THRESHOLD,
            defaults.register_acceptance_threshold,
        )?;
        let short_claim_chars =
            Self::parse_usize_from_env(Self::ENV_SHORT_CLAIM_CHARS, defaults.short_claim_chars)?;
        let max_concurrent_claims = Self::parse_usize_from_env(
            Self::ENV_MAX_CONCURRENT_CLAIMS,
            defaults.max_concurrent_claims,
        )?;
        let per_call_timeout = Self::parse_u64_from_env(
            Self::ENV_PER_CALL_TIMEOUT_SECS,
            defaults.per_call_timeout.as_secs(),
        )
        .map(Duration::from_secs)?;
        let reasoning_model =
            Self::parse_string_from_env(Self::ENV_REASONING_MODEL, defaults.reasoning_model);
        let risk_cutpoints =
            Self::parse_cutpoints_from_env(Self::ENV_RISK_CUTPOINTS, defaults.risk_cutpoints)?;

        Ok(Self {
            evidence_min_similarity,
            evidence_retrieval_limit,
            semantic_marking_threshold,
            register_acceptance_threshold,
            short_claim_chars,
            max_concurrent_claims,
            per_call_timeout,
            reasoning_model,
            risk_cutpoints,
        })
    }

    /// Validates thresholds and limits. Invalid configuration is fatal at
    /// construction, before any claim is processed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::check_threshold("evidence_min_similarity", self.evidence_min_similarity)?;
        Self::check_threshold("semantic_marking_threshold", self.semantic_marking_threshold)?;
        Self::check_threshold(
            "register_acceptance_threshold",
            self.register_acceptance_threshold,
        )?;

        if self.evidence_retrieval_limit == 0 {
            return Err(ConfigError::ZeroLimit {
                name: "evidence_retrieval_limit",
            });
        }
        if self.max_concurrent_claims == 0 {
            return Err(ConfigError::ZeroLimit {
                name: "max_concurrent_claims",
            });
        }
        if self.per_call_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.reasoning_model.trim().is_empty() {
            return Err(ConfigError::EmptyModelName);
        }

        self.risk_cutpoints.validate()?;

        Ok(())
    }

    fn check_threshold(name: &'static str, value: f32) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&value) || value.is_nan() {
            return Err(ConfigError::ThresholdOutOfRange { name, value });
        }
        Ok(())
    }

    fn parse_f32_from_env(var_name: &'static str, default: f32) -> Result<f32, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value.parse().map_err(|_| ConfigError::NumberParseError {
                name: var_name,
                value,
            }),
            Err(_) => Ok(default),
        }
    }

    fn parse_usize_from_env(var_name: &'static str, default: usize) -> Result<usize, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value.parse().map_err(|_| ConfigError::NumberParseError {
                name: var_name,
                value,
            }),
            Err(_) => Ok(default),
        }
    }

    fn parse_u64_from_env(var_name: &'static str, default: u64) -> Result<u64, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value.parse().map_err(|_| ConfigError::NumberParseError {
                name: var_name,
                value,
            }),
            Err(_) => Ok(default),
        }
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name)
            .map(|v| v.trim().to_string())
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
    }

    fn parse_cutpoints_from_env(
        var_name: &'static str,
        default: RiskCutpoints,
    ) -> Result<RiskCutpoints, ConfigError> {
        let Ok(value) = env::var(var_name) else {
            return Ok(default);
        };

        let parts: Vec<f32> = value
            .split(',')
            .map(|p| p.trim().parse::<f32>())
            .collect::<Result<_, _>>()
            .map_err(|_| ConfigError::CutpointsParseError {
                name: var_name,
                value: value.clone(),
            })?;

        let [low, medium, high] = parts[..] else {
            return Err(ConfigError::CutpointsParseError {
                name: var_name,
                value,
            });
        };

        Ok(RiskCutpoints { low, medium, high })
    }
}
