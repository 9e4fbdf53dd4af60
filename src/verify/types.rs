use serde::{Deserialize, Serialize};

use crate::evidence::EvidenceItem;
use crate::patterns::PatternTag;
use crate::register::Register;
use crate::semantic::Tone;

/// Final disposition of a single claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Supported,
    Partial,
    Contradicted,
    NoEvidence,
    NotApplicable,
    AntisemiticTrope,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Supported => "supported",
            Verdict::Partial => "partial",
            Verdict::Contradicted => "contradicted",
            Verdict::NoEvidence => "no_evidence",
            Verdict::NotApplicable => "not_applicable",
            Verdict::AntisemiticTrope => "antisemitic_trope",
        }
    }

    /// Verdicts that carry no accuracy score.
    pub fn is_unscored(&self) -> bool {
        matches!(self, Verdict::NotApplicable | Verdict::AntisemiticTrope)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pipeline stage at which a claim's verification concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    RegisterCheck,
    SemanticCheck,
    EvidenceRetrieve,
    FactCheck,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::RegisterCheck => "register_check",
            Stage::SemanticCheck => "semantic_check",
            Stage::EvidenceRetrieve => "evidence_retrieve",
            Stage::FactCheck => "fact_check",
        }
    }
}

/// Outcome of verifying one claim.
///
/// `score` is present exactly when the verdict is scored; the constructors
/// keep the pairing consistent so downstream aggregation never has to
/// second-guess it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub claim_id: String,
    pub verdict: Verdict,
    pub score: Option<f32>,
    pub rationale: String,
    pub stage: Stage,
    pub register: Option<Register>,
    pub pattern_tags: Vec<PatternTag>,
    pub tone: Option<Tone>,
    /// Evidence the fact check was grounded on; empty for claims that
    /// terminated before retrieval.
    pub evidence: Vec<EvidenceItem>,
    pub checked_at: i64,
}

impl VerificationResult {
    /// A result for a verdict that carries an accuracy score.
    pub fn scored(
        claim_id: String,
        verdict: Verdict,
        score: f32,
        rationale: String,
        stage: Stage,
    ) -> Self {
        debug_assert!(!verdict.is_unscored());
        Self {
            claim_id,
            verdict,
            score: Some(score),
            rationale,
            stage,
            register: None,
            pattern_tags: Vec::new(),
            tone: None,
            evidence: Vec::new(),
            checked_at: chrono::Utc::now().timestamp(),
        }
    }

    /// A result for `not_applicable` or `antisemitic_trope`, which never score.
    pub fn unscored(
        claim_id: String,
        verdict: Verdict,
        rationale: String,
        stage: Stage,
    ) -> Self {
        debug_assert!(verdict.is_unscored());
        Self {
            claim_id,
            verdict,
            score: None,
            rationale,
            stage,
            register: None,
            pattern_tags: Vec::new(),
            tone: None,
            evidence: Vec::new(),
            checked_at: chrono::Utc::now().timestamp(),
        }
    }

    pub fn with_register(mut self, register: Register) -> Self {
        self.register = Some(register);
        self
    }

    pub fn with_pattern_tags(mut self, tags: Vec<PatternTag>) -> Self {
        self.pattern_tags = tags;
        self
    }

    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = Some(tone);
        self
    }

    pub fn with_evidence(mut self, evidence: Vec<EvidenceItem>) -> Self {
        self.evidence = evidence;
        self
    }
}
