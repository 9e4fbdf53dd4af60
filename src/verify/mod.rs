//! Claim verification orchestrator.
//!
//! Runs each claim through a fixed-order pipeline: register check, semantic
//! check, evidence retrieval, fact check. The first two stages can
//! short-circuit (non-factual register, trope marking); retrieval failure
//! degrades to a `no_evidence` verdict instead of failing the claim. A
//! document fans its claims through the pipeline with bounded concurrency,
//! preserving claim order in the output.

use std::sync::Arc;

use futures_util::StreamExt;
use futures_util::stream;
use tracing::{debug, info, warn};

use crate::aggregate::DocumentScore;
use crate::claim::{Claim, Segmenter};
use crate::config::{ConfigError, EngineConfig};
use crate::constants::DEFAULT_MIN_SENTENCE_CHARS;
use crate::embedding::Embedder;
use crate::evidence::{EvidenceRetriever, EvidenceStore};
use crate::factcheck::FactChecker;
use crate::reasoning::{GenaiReasoningClient, ReasoningClient};
use crate::register::RegisterClassifier;
use crate::semantic::SemanticAnalyzer;

mod types;
#[cfg(test)]
mod tests;

pub use types::{Stage, VerificationResult, Verdict};

/// A verified document: per-claim results in claim order plus the aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentVerification {
    pub claims: Vec<VerificationResult>,
    pub document: DocumentScore,
}

/// The verification pipeline for a single evidence store and embedder.
pub struct ClaimVerifier<S, E> {
    config: EngineConfig,
    segmenter: Segmenter,
    register: RegisterClassifier,
    semantic: SemanticAnalyzer,
    retriever: EvidenceRetriever<S, E>,
    factcheck: FactChecker,
}

impl<S: EvidenceStore, E: Embedder> ClaimVerifier<S, E> {
    /// Builds the pipeline, validating the configuration up front.
    ///
    /// A `None` reasoning client puts every stage on its deterministic
    /// strategy; the pipeline stays fully functional.
    pub fn new(
        config: EngineConfig,
        store: S,
        embedder: E,
        reasoning: Option<Arc<dyn ReasoningClient>>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let segmenter = Segmenter::new(DEFAULT_MIN_SENTENCE_CHARS, config.short_claim_chars);
        let retriever = EvidenceRetriever::new(
            store,
            embedder,
            config.evidence_min_similarity,
            config.evidence_retrieval_limit,
        );

        Ok(Self {
            segmenter,
            register: RegisterClassifier::new(reasoning.clone()),
            semantic: SemanticAnalyzer::new(reasoning.clone()),
            factcheck: FactChecker::new(reasoning),
            retriever,
            config,
        })
    }

    /// Builds the pipeline with a [`GenaiReasoningClient`] constructed from
    /// the same configuration, so `reasoning_model` and `per_call_timeout`
    /// reach the provider client.
    pub fn with_configured_reasoning(
        config: EngineConfig,
        store: S,
        embedder: E,
    ) -> Result<Self, ConfigError> {
        let reasoning: Arc<dyn ReasoningClient> =
            Arc::new(GenaiReasoningClient::from_config(&config));
        Self::new(config, store, embedder, Some(reasoning))
    }

    /// Verifies one claim through the staged pipeline.
    pub async fn verify_claim(&self, claim: &Claim) -> VerificationResult {
        let context = claim.paragraph_context.as_deref();

        // Stage 1: non-factual registers are out of scope for fact checking.
        let classification = self.register.classify(&claim.text).await;
        if classification.register.is_non_factual()
            && classification.confidence >= self.config.register_acceptance_threshold
        {
            debug!(
                claim_id = %claim.id,
                register = classification.register.as_str(),
                confidence = classification.confidence,
                "claim short-circuited at register check"
            );
            let register_name = classification.register.as_str();
            let rationale = if classification.indicators.is_empty() {
                format!(
                    "text reads as {register_name} rather than a factual assertion; \
                     it remains a legitimate cultural and descriptive source, but its \
                     statements are not fact-checkable claims"
                )
            } else {
                format!(
                    "text reads as {register_name} rather than a factual assertion \
                     (indicators: {}); it remains a legitimate cultural and descriptive \
                     source, but its statements are not fact-checkable claims",
                    classification.indicators.join(", ")
                )
            };
            return VerificationResult::unscored(
                claim.id.clone(),
                Verdict::NotApplicable,
                rationale,
                Stage::RegisterCheck,
            )
            .with_register(classification.register);
        }

        // Stage 2: trope marking takes precedence over accuracy scoring.
        let judgment = self.semantic.analyze(&claim.text, context).await;
        if judgment.is_antisemitic && judgment.confidence >= self.config.semantic_marking_threshold
        {
            info!(
                claim_id = %claim.id,
                confidence = judgment.confidence,
                tone = judgment.tone.as_str(),
                "claim marked as antisemitic trope"
            );
            let rationale = marking_rationale(&judgment);
            return VerificationResult::unscored(
                claim.id.clone(),
                Verdict::AntisemiticTrope,
                rationale,
                Stage::SemanticCheck,
            )
            .with_register(classification.register)
            .with_pattern_tags(judgment.pattern_tags.into_iter().collect())
            .with_tone(judgment.tone);
        }

        // Stage 3: evidence retrieval. Failure degrades, never aborts.
        let evidence = match self.retriever.retrieve(&claim.text).await {
            Ok(items) => items,
            Err(err) => {
                warn!(claim_id = %claim.id, error = %err, "evidence retrieval failed");
                return VerificationResult::scored(
                    claim.id.clone(),
                    Verdict::NoEvidence,
                    0.0,
                    format!("evidence retrieval failed: {err}"),
                    Stage::EvidenceRetrieve,
                )
                .with_register(classification.register)
                .with_pattern_tags(judgment.pattern_tags.into_iter().collect())
                .with_tone(judgment.tone);
            }
        };
        if evidence.is_empty() {
            return VerificationResult::scored(
                claim.id.clone(),
                Verdict::NoEvidence,
                0.0,
                "no grounding evidence found".to_string(),
                Stage::EvidenceRetrieve,
            )
            .with_register(classification.register)
            .with_pattern_tags(judgment.pattern_tags.into_iter().collect())
            .with_tone(judgment.tone);
        }

        // Stage 4: fact check against the evidence.
        let finding = self.factcheck.check(&claim.text, &evidence).await;
        debug!(
            claim_id = %claim.id,
            verdict = %finding.verdict,
            score = finding.score,
            "claim fact checked"
        );
        VerificationResult::scored(
            claim.id.clone(),
            finding.verdict,
            finding.score,
            finding.rationale,
            Stage::FactCheck,
        )
        .with_register(classification.register)
        .with_pattern_tags(judgment.pattern_tags.into_iter().collect())
        .with_tone(judgment.tone)
        .with_evidence(evidence)
    }

    /// Segments a document and verifies every claim with bounded
    /// concurrency. Results come back in claim order.
    pub async fn verify_document(&self, document_id: &str, text: &str) -> DocumentVerification {
        let claims = self.segmenter.segment(document_id, text);
        info!(document_id, claim_count = claims.len(), "verifying document");

        let claim_futures: Vec<_> = claims.iter().map(|claim| self.verify_claim(claim)).collect();
        let claims_results: Vec<VerificationResult> = stream::iter(claim_futures)
            .buffered(self.config.max_concurrent_claims)
            .collect()
            .await;

        let document =
            DocumentScore::aggregate(document_id, &claims_results, &self.config.risk_cutpoints);
        info!(
            document_id,
            score = ?document.score,
            risk_level = %document.risk_level,
            "document verified"
        );

        DocumentVerification {
            claims: claims_results,
            document,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

/// Composes the rationale for a trope-marked claim from the judgment's
/// explanation, tone, emotional weight, intent, and tags.
fn marking_rationale(judgment: &crate::semantic::SemanticJudgment) -> String {
    let mut parts = Vec::new();
    if !judgment.explanation.is_empty() {
        parts.push(judgment.explanation.clone());
    }
    parts.push(format!(
        "Tone: {}, emotional weight: {}.",
        judgment.tone.as_str(),
        judgment.emotional_weight.as_str()
    ));
    if !judgment.intent.is_empty() {
        parts.push(format!("Apparent intent: {}.", judgment.intent));
    }
    if !judgment.pattern_tags.is_empty() {
        let tags: Vec<&str> = judgment.pattern_tags.iter().map(|t| t.as_str()).collect();
        parts.push(format!("Patterns: {}.", tags.join(", ")));
    }
    parts.join(" ")
}
