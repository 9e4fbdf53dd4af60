//! Cross-cutting default thresholds and score bands.
//!
//! Prefer deriving secondary values from primary ones to avoid drift. The
//! runtime-tunable settings live in [`EngineConfig`](crate::config::EngineConfig);
//! the constants here are its defaults plus the fixed calibration of the
//! lexical detectors.

use std::time::Duration;

/// Minimum cosine similarity for an evidence candidate to survive filtering.
pub const DEFAULT_EVIDENCE_MIN_SIMILARITY: f32 = 0.3;

/// Maximum number of evidence items returned per claim.
pub const DEFAULT_EVIDENCE_RETRIEVAL_LIMIT: usize = 5;

/// Factor by which the store is over-queried before keyword re-ranking.
pub const RETRIEVAL_OVERSAMPLE: usize = 4;

/// Semantic confidence at which a claim is marked as an antisemitic trope.
pub const DEFAULT_SEMANTIC_MARKING_THRESHOLD: f32 = 0.6;

/// Register confidence at which a non-factual classification is accepted.
pub const DEFAULT_REGISTER_ACCEPTANCE_THRESHOLD: f32 = 0.5;

/// Claims shorter than this (chars) are analyzed whole with their context.
pub const DEFAULT_SHORT_CLAIM_CHARS: usize = 500;

/// Minimum sentence length (chars) the segmenter keeps as a claim.
pub const DEFAULT_MIN_SENTENCE_CHARS: usize = 20;

/// Bounded width of the per-document claim pipeline.
pub const DEFAULT_MAX_CONCURRENT_CLAIMS: usize = 4;

/// Per external call timeout.
pub const DEFAULT_PER_CALL_TIMEOUT: Duration = Duration::from_secs(30);

/// Default model name passed to the reasoning provider.
pub const DEFAULT_REASONING_MODEL: &str = "gemini-2.0-flash";

// Verdict score bands. The verdict is authoritative: a strategy's numeric
// score is clamped into the band matching its own verdict.

/// Lower edge of the `supported` band.
pub const SUPPORTED_MIN_SCORE: f32 = 70.0;
/// Lower edge of the `partial` band.
pub const PARTIAL_MIN_SCORE: f32 = 30.0;
/// Upper edge of the `partial` band.
pub const PARTIAL_MAX_SCORE: f32 = SUPPORTED_MIN_SCORE - 1.0;
/// Upper edge of the `contradicted` band.
pub const CONTRADICTED_MAX_SCORE: f32 = PARTIAL_MIN_SCORE - 1.0;
/// Maximum claim score.
pub const MAX_CLAIM_SCORE: f32 = 100.0;

// Hybrid retrieval keyword boost.

/// Cap on the keyword component of the combined score.
pub const KEYWORD_BOOST_CAP: f32 = 0.2;
/// Boost per shared domain proper noun.
pub const DOMAIN_TERM_BOOST: f32 = 0.05;
/// Boost per shared generic content word.
pub const GENERIC_TERM_BOOST: f32 = 0.01;

// Pattern detector calibration (carried from observed behavior; see DESIGN.md).

/// Confidence for a money trope (identity reference + finance vocabulary).
pub const MONEY_TROPE_CONFIDENCE: f32 = 0.75;
/// Confidence for threatening language aimed at the group.
pub const THREAT_CONFIDENCE: f32 = 0.90;
/// Base confidence for control/conspiracy cues.
pub const CONSPIRACY_BASE_CONFIDENCE: f32 = 0.3;
/// Added per extra control/conspiracy cue.
pub const CONSPIRACY_CUE_STEP: f32 = 0.2;
/// Ceiling for scaled control/conspiracy confidence.
pub const CONSPIRACY_MAX_CONFIDENCE: f32 = 0.9;
/// Confidence for historical tropes (self-identifying phrases).
pub const HISTORICAL_TROPE_CONFIDENCE: f32 = 0.8;
/// Confidence for dog-whistle vocabulary.
pub const DOG_WHISTLE_CONFIDENCE: f32 = 0.7;
/// Confidence for dual-loyalty accusations.
pub const DUAL_LOYALTY_CONFIDENCE: f32 = 0.65;
/// Confidence for scapegoating language.
pub const SCAPEGOATING_CONFIDENCE: f32 = 0.55;
/// Confidence for vague-group coded language.
pub const CODED_LANGUAGE_CONFIDENCE: f32 = 0.5;

// Risk level cutpoint defaults (document aggregation).

/// Scores at or above this are low risk.
pub const DEFAULT_RISK_LOW_CUTPOINT: f32 = 80.0;
/// Scores at or above this (below low) are medium risk.
pub const DEFAULT_RISK_MEDIUM_CUTPOINT: f32 = 50.0;
/// Scores at or above this (below medium) are high risk; below is critical.
pub const DEFAULT_RISK_HIGH_CUTPOINT: f32 = 25.0;
