//! Content register classification.
//!
//! Religious, mythological, and fictional text must not be fact-checked:
//! a verse is not a falsifiable claim. Two interchangeable strategies share
//! one contract and are tried in fixed priority order: the LLM-backed
//! strategy first when a reasoning client is configured, then the lexical
//! strategy, which always succeeds.


use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::reasoning::{ReasoningClient, ReasoningError, extract_json};

/// Rhetorical/genre category of a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Register {
    Religious,
    Mythological,
    HistoricalFiction,
    Factual,
}

impl Register {
    /// Report name of the register.
    pub fn as_str(&self) -> &'static str {
        match self {
            Register::Religious => "religious",
            Register::Mythological => "mythological",
            Register::HistoricalFiction => "historical_fiction",
            Register::Factual => "factual",
        }
    }

    /// Parses a provider-reported register name; unknown names (including
    /// "mixed") default to factual so the claim still gets checked.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "religious" => Register::Religious,
            "mythological" | "myth" | "legend" => Register::Mythological,
            "historical_fiction" | "fiction" => Register::HistoricalFiction,
            _ => Register::Factual,
        }
    }

    /// Returns `true` for registers excluded from fact-checking.
    pub fn is_non_factual(&self) -> bool {
        !matches!(self, Register::Factual)
    }
}

/// Outcome of register classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterClassification {
    pub register: Register,
    /// Confidence in `[0, 1]`.
    pub confidence: f32,
    /// Indicator phrases that matched (empty for the factual default).
    pub indicators: Vec<String>,
}

/// One classification strategy in the chain.
#[async_trait]
trait RegisterStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    async fn classify(&self, text: &str) -> Result<RegisterClassification, ReasoningError>;
}

/// Register classifier: a fixed-priority strategy chain ending in the
/// infallible lexical strategy.
pub struct RegisterClassifier {
    strategies: Vec<Box<dyn RegisterStrategy>>,
}

impl RegisterClassifier {
    /// Builds the chain: LLM strategy (when a client is given) then lexical.
    pub fn new(reasoning: Option<Arc<dyn ReasoningClient>>) -> Self {
        let mut strategies: Vec<Box<dyn RegisterStrategy>> = Vec::new();
        if let Some(client) = reasoning {
            strategies.push(Box::new(LlmRegisterStrategy { client }));
        }
        strategies.push(Box::new(LexicalRegisterStrategy));
        Self { strategies }
    }

    /// Classifies `text`, falling through the chain on strategy failure.
    pub async fn classify(&self, text: &str) -> RegisterClassification {
        for strategy in &self.strategies {
            match strategy.classify(text).await {
                Ok(classification) => {
                    debug!(
                        strategy = strategy.name(),
                        register = classification.register.as_str(),
                        confidence = classification.confidence,
                        "register classified"
                    );
                    return classification;
                }
                Err(e) => {
                    warn!(
                        strategy = strategy.name(),
                        error = %e,
                        "register strategy failed, trying next"
                    );
                }
            }
        }
        // The lexical tail never fails; this is only reachable with an
        // artificially empty chain.
        classify_lexical(text)
    }
}

struct LexicalRegisterStrategy;

#[async_trait]
impl RegisterStrategy for LexicalRegisterStrategy {
    fn name(&self) -> &'static str {
        "lexical"
    }

    async fn classify(&self, text: &str) -> Result<RegisterClassification, ReasoningError> {
        Ok(classify_lexical(text))
    }
}

/// Density threshold at which a non-factual register wins.
const DENSITY_THRESHOLD: f32 = 0.5;
/// Indicator weight that saturates the density at 1.0.
const DENSITY_SATURATION: f32 = 4.0;

/// Strong phrases count double; they identify the register on their own.
const STRONG_RELIGIOUS_INDICATORS: &[&str] = &[
    "in the beginning",
    "god created",
    "and god said",
    "let there be",
    "thus saith the lord",
    "the lord said",
];

const RELIGIOUS_INDICATORS: &[&str] = &[
    "genesis",
    "exodus",
    "leviticus",
    "deuteronomy",
    "bible",
    "torah",
    "talmud",
    "quran",
    "scripture",
    "gospel",
    "psalm",
    "prophet",
    "verse",
    "covenant",
    "testament",
    "moses",
    "abraham",
    "noah",
    "heaven",
    "earth",
    "firmament",
    "the lord",
    "and god",
];

const STRONG_MYTHOLOGICAL_INDICATORS: &[&str] =
    &["once upon a time", "creation story", "origin story"];

const MYTHOLOGICAL_INDICATORS: &[&str] =
    &["legend", "myth", "fable", "folklore", "ancient tale", "mortals"];

const STRONG_FICTION_INDICATORS: &[&str] = &["a novel", "historical fiction", "works of fiction"];

const FICTION_INDICATORS: &[&str] = &["fictional", "novelist", "protagonist", "the tale of"];

/// Lexical register classification.
///
/// Density per category is the weighted indicator count over a fixed
/// saturation; above the threshold the category wins with confidence scaled
/// from density, otherwise the text is factual with confidence
/// `1 - max density`.
pub fn classify_lexical(text: &str) -> RegisterClassification {
    let lower = text.to_lowercase();

    let categories = [
        (
            Register::Religious,
            density(&lower, STRONG_RELIGIOUS_INDICATORS, RELIGIOUS_INDICATORS),
        ),
        (
            Register::Mythological,
            density(&lower, STRONG_MYTHOLOGICAL_INDICATORS, MYTHOLOGICAL_INDICATORS),
        ),
        (
            Register::HistoricalFiction,
            density(&lower, STRONG_FICTION_INDICATORS, FICTION_INDICATORS),
        ),
    ];

    let (register, (density_value, indicators)) = categories
        .into_iter()
        .max_by(|a, b| {
            a.1.0
                .partial_cmp(&b.1.0)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .expect("category list is non-empty");

    if density_value >= DENSITY_THRESHOLD {
        RegisterClassification {
            register,
            confidence: (0.5 + 0.45 * density_value).min(0.95),
            indicators,
        }
    } else {
        RegisterClassification {
            register: Register::Factual,
            confidence: 1.0 - density_value,
            indicators: Vec::new(),
        }
    }
}

fn density(lower: &str, strong: &'static [&'static str], plain: &'static [&'static str]) -> (f32, Vec<String>) {
    let mut weight = 0.0;
    let mut indicators = Vec::new();
    for term in strong {
        if crate::patterns::contains_term(lower, term) {
            weight += 2.0;
            indicators.push((*term).to_string());
        }
    }
    for term in plain {
        if crate::patterns::contains_term(lower, term) {
            weight += 1.0;
            indicators.push((*term).to_string());
        }
    }
    ((weight / DENSITY_SATURATION).min(1.0), indicators)
}

struct LlmRegisterStrategy {
    client: Arc<dyn ReasoningClient>,
}

#[derive(Debug, Deserialize)]
struct LlmRegisterResponse {
    register: String,
    confidence: f32,
    #[serde(default)]
    indicators: Vec<String>,
}

const REGISTER_SYSTEM_PROMPT: &str =
    "You classify the rhetorical register of text for a fact-checking pipeline.";

#[async_trait]
impl RegisterStrategy for LlmRegisterStrategy {
    fn name(&self) -> &'static str {
        "llm"
    }

    async fn classify(&self, text: &str) -> Result<RegisterClassification, ReasoningError> {
        // Long documents classify fine from a prefix.
        let sample: String = text.chars().take(2000).collect();

        let prompt = format!(
            "Classify the register of the following text. Possible registers:\n\
             - religious: scripture, liturgy, holy texts\n\
             - mythological: myths, legends, folklore\n\
             - historical_fiction: novels and invented narratives\n\
             - factual: assertions about real events\n\n\
             TEXT:\n{sample}\n\n\
             Respond with JSON only:\n\
             {{\"register\": \"religious|mythological|historical_fiction|factual\", \
             \"confidence\": <0.0-1.0>, \"indicators\": [<phrases that signal the register>]}}"
        );

        let raw = self.client.complete(REGISTER_SYSTEM_PROMPT, &prompt).await?;
        let parsed: LlmRegisterResponse = serde_json::from_str(extract_json(&raw))
            .map_err(|e| ReasoningError::Malformed {
                reason: e.to_string(),
            })?;

        Ok(RegisterClassification {
            register: Register::from_name(&parsed.register),
            confidence: parsed.confidence.clamp(0.0, 1.0),
            indicators: parsed.indicators,
        })
    }
}
