use super::*;

use std::sync::Arc;

use crate::claim::Claim;
use crate::embedding::MockEmbedder;
use crate::evidence::{EvidencePassage, MockEvidenceStore};
use crate::reasoning::MockReasoningClient;
use crate::register::Register;

fn verifier_without_llm(
    store: MockEvidenceStore,
) -> ClaimVerifier<MockEvidenceStore, MockEmbedder> {
    ClaimVerifier::new(EngineConfig::default(), store, MockEmbedder::default(), None).unwrap()
}

fn passage(source_id: &str, text: &str) -> EvidencePassage {
    EvidencePassage {
        source_id: source_id.to_string(),
        text: text.to_string(),
        citation: format!("https://example.org/{source_id}"),
        reliability: 0.9,
    }
}

#[test]
fn test_invalid_config_rejected_at_construction() {
    let config = EngineConfig {
        semantic_marking_threshold: 2.0,
        ..EngineConfig::default()
    };
    let result = ClaimVerifier::new(config, MockEvidenceStore::new(), MockEmbedder::default(), None);
    assert!(result.is_err());
}

#[tokio::test]
async fn test_religious_text_short_circuits_at_register_check() {
    let verifier = verifier_without_llm(MockEvidenceStore::new());
    let claim = Claim::new(
        "doc",
        "In the beginning God created the heaven and the earth. And God said, Let there be light.",
    );

    let result = verifier.verify_claim(&claim).await;
    assert_eq!(result.verdict, Verdict::NotApplicable);
    assert_eq!(result.stage, Stage::RegisterCheck);
    assert_eq!(result.score, None);
    assert_eq!(result.register, Some(Register::Religious));
    assert!(result.rationale.contains("religious"));
}

#[tokio::test]
async fn test_trope_short_circuits_at_semantic_check() {
    // The evidence store stays empty; the claim must never reach retrieval.
    let verifier = verifier_without_llm(MockEvidenceStore::new());
    let claim = Claim::new("doc", "Hanukkah is all about financial engineering.");

    let result = verifier.verify_claim(&claim).await;
    assert_eq!(result.verdict, Verdict::AntisemiticTrope);
    assert_eq!(result.stage, Stage::SemanticCheck);
    assert_eq!(result.score, None);
    assert!(!result.pattern_tags.is_empty());
}

#[tokio::test]
async fn test_factual_claim_reaches_fact_check() {
    let store = MockEvidenceStore::new();
    let embedder = MockEmbedder::default();
    let claim_text = "the hanukkah menorah holds nine branches";
    let claim_vec = embedder.embed(claim_text).await.unwrap();
    store.add(
        passage("enc", "the hanukkah menorah holds nine branches, one for each night"),
        claim_vec,
    );

    let verifier =
        ClaimVerifier::new(EngineConfig::default(), store, embedder, None).unwrap();
    let result = verifier.verify_claim(&Claim::new("doc", claim_text)).await;

    assert_eq!(result.stage, Stage::FactCheck);
    assert_eq!(result.verdict, Verdict::Supported);
    assert!(result.score.is_some());
}

#[tokio::test]
async fn test_empty_corpus_yields_no_evidence() {
    let verifier = verifier_without_llm(MockEvidenceStore::new());
    let claim = Claim::new("doc", "the moon landing took place in 1969");

    let result = verifier.verify_claim(&claim).await;
    assert_eq!(result.verdict, Verdict::NoEvidence);
    assert_eq!(result.stage, Stage::EvidenceRetrieve);
    assert_eq!(result.score, Some(0.0));
}

#[tokio::test]
async fn test_no_evidence_result_keeps_semantic_metadata() {
    // A single weak conspiracy cue: tagged but below the marking threshold,
    // so the claim proceeds past the semantic check.
    let verifier = verifier_without_llm(MockEvidenceStore::new());
    let claim = Claim::new("doc", "A secret council of Jewish leaders met in Vilna in 1905.");

    let result = verifier.verify_claim(&claim).await;
    assert_eq!(result.verdict, Verdict::NoEvidence);
    assert_eq!(result.stage, Stage::EvidenceRetrieve);
    assert!(
        result.pattern_tags.contains(&crate::patterns::PatternTag::ConspiracyTrope),
        "tags computed before retrieval must survive the early exit"
    );
    assert!(result.tone.is_some());
}

#[test]
fn test_configured_reasoning_constructor_validates_config() {
    let verifier = ClaimVerifier::with_configured_reasoning(
        EngineConfig::default(),
        MockEvidenceStore::new(),
        MockEmbedder::default(),
    );
    assert!(verifier.is_ok());

    let config = EngineConfig {
        reasoning_model: String::new(),
        ..EngineConfig::default()
    };
    let verifier = ClaimVerifier::with_configured_reasoning(
        config,
        MockEvidenceStore::new(),
        MockEmbedder::default(),
    );
    assert!(verifier.is_err());
}

#[tokio::test]
async fn test_llm_marking_respects_threshold() {
    // LLM says antisemitic but below the marking threshold; with an empty
    // corpus the claim proceeds and lands at no_evidence.
    let client = MockReasoningClient::always_ok(
        r#"{
            "register": "factual", "confidence": 0.3,
            "is_antisemitic": true,
            "tone": "neutral", "emotional_weight": "low",
            "intent": "", "detected_patterns": [], "explanation": ""
        }"#,
    );
    let verifier = ClaimVerifier::new(
        EngineConfig::default(),
        MockEvidenceStore::new(),
        MockEmbedder::default(),
        Some(Arc::new(client)),
    )
    .unwrap();

    let claim = Claim::new("doc", "a borderline statement about nothing in particular");
    let result = verifier.verify_claim(&claim).await;
    assert_ne!(result.verdict, Verdict::AntisemiticTrope);
}

#[tokio::test]
async fn test_verify_document_preserves_claim_order() {
    let verifier = verifier_without_llm(MockEvidenceStore::new());
    let text = "The first statement concerns one topic entirely. \
                The second statement concerns another topic entirely. \
                The third statement concerns a final topic entirely.\n\n\
                The fourth statement lives in its own paragraph here. \
                The fifth statement closes out the document test text. \
                The sixth statement pads the document past the cutoff. \
                The seventh statement pushes the length well over it. \
                The eighth statement guarantees sentence segmentation. \
                The ninth statement only exists to add more length. \
                The tenth statement finally crosses the threshold mark.";

    let verification = verifier.verify_document("doc", text).await;
    let claims = Segmenter::default().segment("doc", text);

    assert_eq!(verification.claims.len(), claims.len());
    for (claim, result) in claims.iter().zip(&verification.claims) {
        assert_eq!(claim.id, result.claim_id);
    }
    assert_eq!(verification.document.document_id, "doc");
    assert_eq!(verification.document.summary.total(), claims.len());
}

#[tokio::test]
async fn test_verify_document_is_idempotent() {
    let text = "Hanukkah is all about financial engineering.";
    let verifier = verifier_without_llm(MockEvidenceStore::new());

    let first = verifier.verify_document("doc", text).await;
    let second = verifier.verify_document("doc", text).await;

    assert_eq!(first.claims.len(), second.claims.len());
    for (a, b) in first.claims.iter().zip(&second.claims) {
        assert_eq!(a.claim_id, b.claim_id);
        assert_eq!(a.verdict, b.verdict);
        assert_eq!(a.score, b.score);
    }
    assert_eq!(first.document.score, second.document.score);
    assert_eq!(first.document.risk_level, second.document.risk_level);
}

#[tokio::test]
async fn test_empty_document() {
    let verifier = verifier_without_llm(MockEvidenceStore::new());

    let verification = verifier.verify_document("doc", "   ").await;
    assert!(verification.claims.is_empty());
    assert_eq!(verification.document.score, None);
}

#[test]
fn test_unscored_verdicts_carry_no_score() {
    let result = VerificationResult::unscored(
        "id".to_string(),
        Verdict::AntisemiticTrope,
        "marked".to_string(),
        Stage::SemanticCheck,
    );
    assert_eq!(result.score, None);
    assert!(result.verdict.is_unscored());

    let result = VerificationResult::scored(
        "id".to_string(),
        Verdict::Supported,
        88.0,
        "grounded".to_string(),
        Stage::FactCheck,
    );
    assert_eq!(result.score, Some(88.0));
    assert!(!result.verdict.is_unscored());
}
