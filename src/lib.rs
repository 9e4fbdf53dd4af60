//! Tropecheck library crate (used by the pipeline and integration tests).
//!
//! Verification and scoring engine for antisemitism-adjacent text. A
//! document is segmented into claims; each claim runs through a staged
//! pipeline (register check, semantic check, evidence retrieval, fact
//! check) and the per-claim results fold into a document score and risk
//! level.
//!
//! # Public API Surface
//!
//! ## Pipeline
//! - [`ClaimVerifier`], [`DocumentVerification`] - The orchestrator
//! - [`VerificationResult`], [`Verdict`], [`Stage`] - Per-claim outcomes
//! - [`DocumentScore`], [`RiskLevel`], [`RiskCutpoints`] - Aggregation
//!
//! ## Claims
//! - [`Claim`], [`Segmenter`], [`claim_id`] - Segmentation and identity
//!
//! ## Analysis
//! - [`RegisterClassifier`], [`Register`] - Register (genre) classification
//! - [`SemanticAnalyzer`], [`SemanticJudgment`], [`Tone`] - Trope analysis
//! - [`detect`], [`PatternHit`], [`PatternTag`] - Lexical pattern detection
//! - [`FactChecker`], [`FactCheckFinding`] - Evidence-grounded verdicts
//!
//! ## Retrieval
//! - [`EvidenceRetriever`], [`EvidenceItem`] - Hybrid ranking
//! - [`EvidenceStore`], [`QdrantEvidenceStore`] - Corpus access
//! - [`Embedder`], [`HttpEmbedder`] - Claim embedding
//!
//! ## Reasoning
//! - [`ReasoningClient`], [`GenaiReasoningClient`] - LLM calls
//!
//! ## Configuration
//! - [`EngineConfig`], [`ConfigError`] - Environment-driven settings
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod aggregate;
pub mod claim;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod evidence;
pub mod factcheck;
pub mod patterns;
pub mod reasoning;
pub mod register;
pub mod semantic;
pub mod verify;

pub use aggregate::{DocumentScore, RiskCutpoints, RiskLevel, VerdictSummary};
pub use claim::{Claim, Segmenter, claim_id};
pub use config::{ConfigError, EngineConfig};
pub use embedding::{Embedder, EmbeddingError, HttpEmbedder};
#[cfg(any(test, feature = "mock"))]
pub use embedding::{MockEmbedder, deterministic_embedding};
pub use evidence::{
    EVIDENCE_COLLECTION_NAME, EvidenceCandidate, EvidenceError, EvidenceItem, EvidencePassage,
    EvidenceRetriever, EvidenceStore, QdrantEvidenceStore,
};
#[cfg(any(test, feature = "mock"))]
pub use evidence::{MockEvidenceStore, cosine_similarity};
pub use factcheck::{FactCheckFinding, FactChecker};
pub use patterns::{PatternHit, PatternTag, detect, max_confidence};
pub use reasoning::{GenaiReasoningClient, ReasoningClient, ReasoningError, extract_json};
#[cfg(any(test, feature = "mock"))]
pub use reasoning::MockReasoningClient;
pub use register::{Register, RegisterClassification, RegisterClassifier, classify_lexical};
pub use semantic::{
    EmotionalWeight, SemanticAnalyzer, SemanticJudgment, Tone, analyze_heuristic,
};
pub use verify::{
    ClaimVerifier, DocumentVerification, Stage, VerificationResult, Verdict,
};
