use super::*;

use std::sync::Arc;

use crate::reasoning::MockReasoningClient;

fn evidence(text: &str) -> EvidenceItem {
    EvidenceItem {
        source_id: "src".to_string(),
        text_snippet: text.to_string(),
        citation: "https://example.org/src".to_string(),
        reliability_score: 0.9,
        similarity_score: 0.8,
        keyword_score: 0.05,
        combined_score: 0.85,
    }
}

#[tokio::test]
async fn test_empty_evidence_short_circuits() {
    let checker = FactChecker::new(Some(Arc::new(MockReasoningClient::always_ok("unused"))));

    let finding = checker.check("any claim", &[]).await;
    assert_eq!(finding.verdict, Verdict::NoEvidence);
    assert_eq!(finding.score, 0.0);
}

#[tokio::test]
async fn test_llm_supported_verdict() {
    let client = MockReasoningClient::always_ok(
        r#"{"verdict": "supported", "score": 92, "rationale": "Evidence [1] states it directly."}"#,
    );
    let checker = FactChecker::new(Some(Arc::new(client)));

    let finding = checker
        .check("the menorah has nine branches", &[evidence("the menorah has nine branches")])
        .await;
    assert_eq!(finding.verdict, Verdict::Supported);
    assert_eq!(finding.score, 92.0);
    assert!(finding.rationale.contains("[1]"));
}

#[tokio::test]
async fn test_score_clamped_into_verdict_band() {
    // A "supported" verdict with a contradicted-range score snaps to the band edge.
    let client = MockReasoningClient::always_ok(
        r#"{"verdict": "supported", "score": 10, "rationale": "inconsistent"}"#,
    );
    let checker = FactChecker::new(Some(Arc::new(client)));

    let finding = checker.check("claim", &[evidence("text")]).await;
    assert_eq!(finding.verdict, Verdict::Supported);
    assert_eq!(finding.score, SUPPORTED_MIN_SCORE);
}

#[tokio::test]
async fn test_missing_score_lands_at_band_midpoint() {
    let client = MockReasoningClient::always_ok(
        r#"{"verdict": "partial", "rationale": "partially covered"}"#,
    );
    let checker = FactChecker::new(Some(Arc::new(client)));

    let finding = checker.check("claim", &[evidence("text")]).await;
    assert_eq!(finding.verdict, Verdict::Partial);
    assert_eq!(finding.score, (PARTIAL_MIN_SCORE + PARTIAL_MAX_SCORE) / 2.0);
}

#[tokio::test]
async fn test_contradicted_verdict_aliases() {
    let client = MockReasoningClient::always_ok(
        r#"{"verdict": "refuted", "score": 5, "rationale": "evidence says otherwise"}"#,
    );
    let checker = FactChecker::new(Some(Arc::new(client)));

    let finding = checker.check("claim", &[evidence("text")]).await;
    assert_eq!(finding.verdict, Verdict::Contradicted);
    assert_eq!(finding.score, 5.0);
}

#[tokio::test]
async fn test_malformed_llm_falls_back_to_overlap() {
    let client = MockReasoningClient::always_ok("no json here");
    let checker = FactChecker::new(Some(Arc::new(client)));

    let finding = checker
        .check(
            "the hanukkah menorah holds nine branches",
            &[evidence("the hanukkah menorah holds nine branches and one servant candle")],
        )
        .await;
    assert_eq!(finding.verdict, Verdict::Supported);
    assert!(finding.score >= SUPPORTED_MIN_SCORE);
}

#[tokio::test]
async fn test_unrecognized_verdict_falls_back() {
    let client = MockReasoningClient::always_ok(
        r#"{"verdict": "plausible", "score": 60, "rationale": "?"}"#,
    );
    let checker = FactChecker::new(Some(Arc::new(client)));

    let finding = checker
        .check("completely unrelated claim wording", &[evidence("different topic entirely")])
        .await;
    // Fallback overlap finds nothing in common.
    assert_eq!(finding.verdict, Verdict::NoEvidence);
    assert_eq!(finding.score, 0.0);
}

#[tokio::test]
async fn test_no_client_partial_overlap() {
    let checker = FactChecker::new(None);

    let finding = checker
        .check(
            "the hanukkah festival lasts eight nights and commemorates the temple \
             rededication in jerusalem after the maccabean revolt",
            &[evidence("the hanukkah festival lasts eight nights")],
        )
        .await;
    assert_eq!(finding.verdict, Verdict::Partial);
    assert!(finding.score >= PARTIAL_MIN_SCORE && finding.score <= PARTIAL_MAX_SCORE);
}

#[tokio::test]
async fn test_lexical_fallback_never_contradicts() {
    let checker = FactChecker::new(None);

    let finding = checker
        .check("claims with zero overlap", &[evidence("entirely different words here")])
        .await;
    assert_ne!(finding.verdict, Verdict::Contradicted);
}
