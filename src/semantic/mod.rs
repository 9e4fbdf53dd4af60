//! Semantic analysis of claims for antisemitic content.
//!
//! Produces a [`SemanticJudgment`] per claim through a mandatory three-level
//! fallback: structured LLM response, then field salvage from the raw
//! response, then the lexical pattern heuristic. `analyze` always returns a
//! judgment; an upstream reasoning failure must never hide content the
//! pattern detector can flag on its own.

pub mod heuristic;
mod llm;


pub use heuristic::analyze_heuristic;

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::patterns::PatternTag;
use crate::reasoning::{ReasoningClient, ReasoningError};

/// Emotional tone of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Threatening,
    Hostile,
    Aggressive,
    Menacing,
    Neutral,
    Informative,
    Unknown,
}

impl Tone {
    /// Parses a provider-reported tone; unrecognized values map to unknown.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "threatening" | "intimidating" => Tone::Threatening,
            "hostile" => Tone::Hostile,
            "aggressive" => Tone::Aggressive,
            "menacing" => Tone::Menacing,
            "neutral" => Tone::Neutral,
            "informative" => Tone::Informative,
            _ => Tone::Unknown,
        }
    }

    /// Report name of the tone.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Threatening => "threatening",
            Tone::Hostile => "hostile",
            Tone::Aggressive => "aggressive",
            Tone::Menacing => "menacing",
            Tone::Neutral => "neutral",
            Tone::Informative => "informative",
            Tone::Unknown => "unknown",
        }
    }
}

/// How emotionally charged a statement is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionalWeight {
    High,
    Medium,
    Low,
    Unknown,
}

impl EmotionalWeight {
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "high" => EmotionalWeight::High,
            "medium" => EmotionalWeight::Medium,
            "low" => EmotionalWeight::Low,
            _ => EmotionalWeight::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionalWeight::High => "high",
            EmotionalWeight::Medium => "medium",
            EmotionalWeight::Low => "low",
            EmotionalWeight::Unknown => "unknown",
        }
    }
}

/// Structured antisemitism judgment for one claim. Produced fresh per claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticJudgment {
    pub is_antisemitic: bool,
    /// Confidence in `[0, 1]`.
    pub confidence: f32,
    pub pattern_tags: BTreeSet<PatternTag>,
    pub tone: Tone,
    pub emotional_weight: EmotionalWeight,
    /// What the text is trying to do.
    pub intent: String,
    pub explanation: String,
}

/// One analysis strategy in the chain.
#[async_trait]
trait SemanticStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    async fn analyze(
        &self,
        text: &str,
        context: Option<&str>,
    ) -> Result<SemanticJudgment, ReasoningError>;
}

/// Semantic analyzer: fixed-priority strategy chain ending in the
/// infallible pattern heuristic.
pub struct SemanticAnalyzer {
    strategies: Vec<Box<dyn SemanticStrategy>>,
}

impl SemanticAnalyzer {
    /// Builds the chain: LLM strategy (when a client is given) then the
    /// pattern heuristic.
    pub fn new(reasoning: Option<Arc<dyn ReasoningClient>>) -> Self {
        let mut strategies: Vec<Box<dyn SemanticStrategy>> = Vec::new();
        if let Some(client) = reasoning {
            strategies.push(Box::new(llm::LlmSemanticStrategy::new(client)));
        }
        strategies.push(Box::new(HeuristicSemanticStrategy));
        Self { strategies }
    }

    /// Analyzes `text` (with optional surrounding context), falling through
    /// the chain on strategy failure. Always returns a judgment.
    pub async fn analyze(&self, text: &str, context: Option<&str>) -> SemanticJudgment {
        for strategy in &self.strategies {
            match strategy.analyze(text, context).await {
                Ok(judgment) => {
                    debug!(
                        strategy = strategy.name(),
                        is_antisemitic = judgment.is_antisemitic,
                        confidence = judgment.confidence,
                        "semantic judgment produced"
                    );
                    return judgment;
                }
                Err(e) => {
                    warn!(
                        strategy = strategy.name(),
                        error = %e,
                        "semantic strategy failed, trying next"
                    );
                }
            }
        }
        // The heuristic tail never fails; this is only reachable with an
        // artificially empty chain.
        analyze_heuristic(text)
    }
}

struct HeuristicSemanticStrategy;

#[async_trait]
impl SemanticStrategy for HeuristicSemanticStrategy {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    async fn analyze(
        &self,
        text: &str,
        _context: Option<&str>,
    ) -> Result<SemanticJudgment, ReasoningError> {
        Ok(analyze_heuristic(text))
    }
}
