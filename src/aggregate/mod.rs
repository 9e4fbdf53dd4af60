//! Document-level score aggregation.
//!
//! Folds per-claim verification results into a single document accuracy
//! score and a coarse risk level. Unscored verdicts (`not_applicable`,
//! `antisemitic_trope`) are excluded from the mean but still counted in the
//! verdict summary, so a document that is pure scripture plus one marked
//! trope still reports what happened.

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::constants::{
    DEFAULT_RISK_HIGH_CUTPOINT, DEFAULT_RISK_LOW_CUTPOINT, DEFAULT_RISK_MEDIUM_CUTPOINT,
};
use crate::verify::{VerificationResult, Verdict};


/// Score thresholds bucketing a document score into risk levels.
///
/// Must be strictly decreasing: `low > medium > high`. Scores at or above
/// `low` are low risk, below `high` are critical.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskCutpoints {
    pub low: f32,
    pub medium: f32,
    pub high: f32,
}

impl Default for RiskCutpoints {
    fn default() -> Self {
        Self {
            low: DEFAULT_RISK_LOW_CUTPOINT,
            medium: DEFAULT_RISK_MEDIUM_CUTPOINT,
            high: DEFAULT_RISK_HIGH_CUTPOINT,
        }
    }
}

impl RiskCutpoints {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.high > 0.0
            && self.low > self.medium
            && self.medium > self.high
            && self.low <= crate::constants::MAX_CLAIM_SCORE)
        {
            return Err(ConfigError::InvalidRiskCutpoints {
                low: self.low,
                medium: self.medium,
                high: self.high,
            });
        }
        Ok(())
    }

    /// Buckets a document score; `None` (no scorable claims) is `Unknown`.
    pub fn level_for(&self, score: Option<f32>) -> RiskLevel {
        match score {
            None => RiskLevel::Unknown,
            Some(s) if s >= self.low => RiskLevel::Low,
            Some(s) if s >= self.medium => RiskLevel::Medium,
            Some(s) if s >= self.high => RiskLevel::High,
            Some(_) => RiskLevel::Critical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
    Unknown,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
            RiskLevel::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-verdict claim counts for a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictSummary {
    pub supported: usize,
    pub partial: usize,
    pub contradicted: usize,
    pub no_evidence: usize,
    pub not_applicable: usize,
    pub antisemitic_trope: usize,
}

impl VerdictSummary {
    pub fn total(&self) -> usize {
        self.supported
            + self.partial
            + self.contradicted
            + self.no_evidence
            + self.not_applicable
            + self.antisemitic_trope
    }

    fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Supported => self.supported += 1,
            Verdict::Partial => self.partial += 1,
            Verdict::Contradicted => self.contradicted += 1,
            Verdict::NoEvidence => self.no_evidence += 1,
            Verdict::NotApplicable => self.not_applicable += 1,
            Verdict::AntisemiticTrope => self.antisemitic_trope += 1,
        }
    }
}

/// Aggregated verdict for a whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentScore {
    pub document_id: String,
    /// Mean of the scored claims; `None` when no claim carried a score.
    pub score: Option<f32>,
    pub risk_level: RiskLevel,
    pub total_claims: usize,
    pub summary: VerdictSummary,
    /// Claims marked as antisemitic tropes, surfaced for review regardless
    /// of how the rest of the document scored.
    pub flagged_claim_ids: Vec<String>,
}

impl DocumentScore {
    pub fn aggregate(
        document_id: &str,
        results: &[VerificationResult],
        cutpoints: &RiskCutpoints,
    ) -> Self {
        let mut summary = VerdictSummary::default();
        let mut flagged_claim_ids = Vec::new();
        let mut sum = 0.0f32;
        let mut scored = 0usize;

        for result in results {
            summary.record(result.verdict);
            if result.verdict == Verdict::AntisemiticTrope {
                flagged_claim_ids.push(result.claim_id.clone());
            }
            if let Some(s) = result.score {
                sum += s;
                scored += 1;
            }
        }

        let score = (scored > 0).then(|| sum / scored as f32);

        Self {
            document_id: document_id.to_string(),
            score,
            risk_level: cutpoints.level_for(score),
            total_claims: results.len(),
            summary,
            flagged_claim_ids,
        }
    }
}
