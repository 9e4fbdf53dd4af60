//! Evidence-grounded fact checking.
//!
//! Judges a claim against retrieved evidence and produces a verdict with an
//! accuracy score. An LLM does the judging when a reasoning client is
//! available; a deterministic lexical-overlap check takes over when the call
//! fails or no client is configured.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::constants::{
    CONTRADICTED_MAX_SCORE, MAX_CLAIM_SCORE, PARTIAL_MAX_SCORE, PARTIAL_MIN_SCORE,
    SUPPORTED_MIN_SCORE,
};
use crate::evidence::EvidenceItem;
use crate::reasoning::{ReasoningClient, extract_json};
use crate::verify::Verdict;

#[cfg(test)]
mod tests;

/// Verdict, score, and rationale for a single fact-checked claim.
#[derive(Debug, Clone, PartialEq)]
pub struct FactCheckFinding {
    pub verdict: Verdict,
    pub score: f32,
    pub rationale: String,
}

/// Lexical overlap at or above this fraction reads as support.
const OVERLAP_SUPPORTED: f32 = 0.6;
/// Overlap at or above this fraction reads as partial support.
const OVERLAP_PARTIAL: f32 = 0.25;

pub struct FactChecker {
    client: Option<Arc<dyn ReasoningClient>>,
}

impl FactChecker {
    pub fn new(client: Option<Arc<dyn ReasoningClient>>) -> Self {
        Self { client }
    }

    /// Checks a claim against its evidence set.
    ///
    /// Empty evidence yields `no_evidence` with a zero score without any
    /// model call. Findings never carry the `not_applicable` or
    /// `antisemitic_trope` verdicts; those are decided upstream.
    pub async fn check(&self, claim_text: &str, evidence: &[EvidenceItem]) -> FactCheckFinding {
        if evidence.is_empty() {
            return FactCheckFinding {
                verdict: Verdict::NoEvidence,
                score: 0.0,
                rationale: "no grounding evidence found".to_string(),
            };
        }

        if let Some(client) = &self.client {
            match self.check_with_llm(client.as_ref(), claim_text, evidence).await {
                Ok(finding) => return finding,
                Err(reason) => {
                    warn!(%reason, "llm fact check failed, falling back to lexical overlap");
                }
            }
        }

        check_lexical(claim_text, evidence)
    }

    async fn check_with_llm(
        &self,
        client: &dyn ReasoningClient,
        claim_text: &str,
        evidence: &[EvidenceItem],
    ) -> Result<FactCheckFinding, String> {
        let prompt = build_prompt(claim_text, evidence);
        let raw = client
            .complete(FACTCHECK_SYSTEM_PROMPT, &prompt)
            .await
            .map_err(|e| e.to_string())?;

        let parsed: LlmVerdictResponse =
            serde_json::from_str(extract_json(&raw)).map_err(|e| e.to_string())?;

        let verdict = match parsed.verdict.trim().to_lowercase().as_str() {
            "supported" | "true" | "accurate" => Verdict::Supported,
            "partial" | "partially_supported" | "mixed" => Verdict::Partial,
            "contradicted" | "false" | "refuted" => Verdict::Contradicted,
            "no_evidence" | "unverifiable" | "unknown" => Verdict::NoEvidence,
            other => {
                return Err(format!("unrecognized verdict {other:?}"));
            }
        };

        let score = clamp_to_band(verdict, parsed.score);
        debug!(verdict = %verdict, score, "llm fact check verdict");

        Ok(FactCheckFinding {
            verdict,
            score,
            rationale: parsed.rationale.unwrap_or_default(),
        })
    }
}

impl std::fmt::Debug for FactChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactChecker")
            .field("has_client", &self.client.is_some())
            .finish()
    }
}

const FACTCHECK_SYSTEM_PROMPT: &str = "You are a careful fact checker. Judge claims strictly \
against the provided evidence, never against your own knowledge.";

#[derive(Debug, Deserialize)]
struct LlmVerdictResponse {
    verdict: String,
    #[serde(default)]
    rationale: Option<String>,
    #[serde(default)]
    score: Option<f32>,
}

fn build_prompt(claim_text: &str, evidence: &[EvidenceItem]) -> String {
    let mut evidence_block = String::new();
    for (i, item) in evidence.iter().enumerate() {
        evidence_block.push_str(&format!(
            "[{n}] (reliability {rel:.2}, relevance {rank:.2}) {text}\n    Source: {cite}\n",
            n = i + 1,
            rel = item.reliability_score,
            rank = item.combined_score,
            text = item.text_snippet,
            cite = item.citation,
        ));
    }

    format!(
        "CLAIM:\n{claim_text}\n\nEVIDENCE:\n{evidence_block}\n\
         Judge whether the evidence supports, partially supports, or contradicts \
         the claim. Use only the evidence above.\n\n\
         Respond with JSON only:\n\
         {{\n\
         \"verdict\": \"<supported|partial|contradicted|no_evidence>\",\n\
         \"score\": <0-100 accuracy score>,\n\
         \"rationale\": \"<one or two sentences citing evidence numbers>\"\n\
         }}"
    )
}

/// Forces a model-reported score into the band its verdict implies; a missing
/// score lands at the band midpoint.
fn clamp_to_band(verdict: Verdict, score: Option<f32>) -> f32 {
    let (lo, hi) = match verdict {
        Verdict::Supported => (SUPPORTED_MIN_SCORE, MAX_CLAIM_SCORE),
        Verdict::Partial => (PARTIAL_MIN_SCORE, PARTIAL_MAX_SCORE),
        Verdict::Contradicted => (0.0, CONTRADICTED_MAX_SCORE),
        Verdict::NoEvidence => (0.0, 0.0),
        Verdict::NotApplicable | Verdict::AntisemiticTrope => (0.0, 0.0),
    };
    match score {
        Some(s) => s.clamp(lo, hi),
        None => (lo + hi) / 2.0,
    }
}

/// Deterministic fallback: fraction of the claim's content terms that appear
/// in at least one evidence snippet. Overlap alone cannot establish that
/// evidence refutes a claim, so this path never emits `contradicted`.
fn check_lexical(claim_text: &str, evidence: &[EvidenceItem]) -> FactCheckFinding {
    let claim_terms = crate::evidence::content_terms(claim_text);
    if claim_terms.is_empty() {
        return FactCheckFinding {
            verdict: Verdict::NoEvidence,
            score: 0.0,
            rationale: "claim has no checkable content terms".to_string(),
        };
    }

    let matched = claim_terms
        .iter()
        .filter(|term| {
            evidence
                .iter()
                .any(|item| crate::patterns::contains_term(&item.text_snippet.to_lowercase(), term))
        })
        .count();
    let overlap = matched as f32 / claim_terms.len() as f32;

    debug!(matched, total = claim_terms.len(), overlap, "lexical overlap fact check");

    if overlap >= OVERLAP_SUPPORTED {
        FactCheckFinding {
            verdict: Verdict::Supported,
            score: (overlap * MAX_CLAIM_SCORE).clamp(SUPPORTED_MIN_SCORE, MAX_CLAIM_SCORE),
            rationale: format!(
                "{matched} of {} claim terms appear in the retrieved evidence",
                claim_terms.len()
            ),
        }
    } else if overlap >= OVERLAP_PARTIAL {
        FactCheckFinding {
            verdict: Verdict::Partial,
            score: (overlap * MAX_CLAIM_SCORE).clamp(PARTIAL_MIN_SCORE, PARTIAL_MAX_SCORE),
            rationale: format!(
                "only {matched} of {} claim terms appear in the retrieved evidence",
                claim_terms.len()
            ),
        }
    } else {
        FactCheckFinding {
            verdict: Verdict::NoEvidence,
            score: 0.0,
            rationale: "retrieved evidence does not cover the claim's content terms".to_string(),
        }
    }
}
