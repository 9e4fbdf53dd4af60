//! LLM-backed semantic analysis with salvage parsing.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::patterns::PatternTag;
use crate::reasoning::{ReasoningClient, ReasoningError, extract_json};

use super::{EmotionalWeight, SemanticJudgment, SemanticStrategy, Tone};

pub(super) struct LlmSemanticStrategy {
    client: Arc<dyn ReasoningClient>,
}

impl LlmSemanticStrategy {
    pub(super) fn new(client: Arc<dyn ReasoningClient>) -> Self {
        Self { client }
    }
}

const SEMANTIC_SYSTEM_PROMPT: &str = "You are an expert in identifying antisemitic content, \
analyzing tone, intent, and meaning, for a fact-checking pipeline.";

#[derive(Debug, Deserialize)]
struct LlmJudgmentResponse {
    is_antisemitic: bool,
    confidence: f32,
    #[serde(default)]
    tone: Option<String>,
    #[serde(default)]
    emotional_weight: Option<String>,
    #[serde(default)]
    intent: Option<String>,
    #[serde(default)]
    detected_patterns: Vec<String>,
    #[serde(default)]
    explanation: Option<String>,
}

#[async_trait]
impl SemanticStrategy for LlmSemanticStrategy {
    fn name(&self) -> &'static str {
        "llm"
    }

    async fn analyze(
        &self,
        text: &str,
        context: Option<&str>,
    ) -> Result<SemanticJudgment, ReasoningError> {
        let prompt = build_prompt(text, context);
        let raw = self.client.complete(SEMANTIC_SYSTEM_PROMPT, &prompt).await?;

        match serde_json::from_str::<LlmJudgmentResponse>(extract_json(&raw)) {
            Ok(parsed) => Ok(judgment_from_response(parsed)),
            Err(parse_err) => {
                debug!(error = %parse_err, "structured parse failed, salvaging fields");
                salvage_judgment(&raw).ok_or(ReasoningError::Malformed {
                    reason: format!("unparseable and unsalvageable response: {parse_err}"),
                })
            }
        }
    }
}

fn build_prompt(text: &str, context: Option<&str>) -> String {
    let context_block = context
        .map(|c| format!("\n\nContext from surrounding text:\n{c}"))
        .unwrap_or_default();

    format!(
        "Analyze the TONE, INTENT, and CONTENT of this text. Judge the full text \
         together; a threat in one clause and a group reference in another belong \
         to the same statement.\n\n\
         TEXT TO ANALYZE:\n{text}{context_block}\n\n\
         Look for:\n\
         1. Threatening language directed at Jewish people\n\
         2. Coded language and dog whistles\n\
         3. Conspiracy patterns (Jews controlling organizations or institutions)\n\
         4. Dual loyalty tropes\n\
         5. Scapegoating language\n\
         6. Historical antisemitic tropes in modern contexts\n\
         7. Money-related stereotypes, including references to finance alongside \
         Jewish people, holidays, or culture\n\n\
         Respond with JSON only:\n\
         {{\n\
         \"is_antisemitic\": <boolean>,\n\
         \"confidence\": <0.0-1.0>,\n\
         \"tone\": \"<threatening|hostile|aggressive|menacing|neutral|informative>\",\n\
         \"emotional_weight\": \"<high|medium|low>\",\n\
         \"intent\": \"<what the text is trying to do>\",\n\
         \"detected_patterns\": [<names from: money_trope, conspiracy_trope, dog_whistle, \
         dual_loyalty, scapegoating, coded_language, historical_trope, \
         threatening_language, secret_control>],\n\
         \"explanation\": \"<why, including tone and intent>\"\n\
         }}"
    )
}

fn judgment_from_response(parsed: LlmJudgmentResponse) -> SemanticJudgment {
    let pattern_tags: BTreeSet<PatternTag> = parsed
        .detected_patterns
        .iter()
        .filter_map(|name| PatternTag::from_name(name))
        .collect();

    SemanticJudgment {
        is_antisemitic: parsed.is_antisemitic,
        confidence: parsed.confidence.clamp(0.0, 1.0),
        pattern_tags,
        tone: parsed
            .tone
            .as_deref()
            .map(Tone::from_name)
            .unwrap_or(Tone::Unknown),
        emotional_weight: parsed
            .emotional_weight
            .as_deref()
            .map(EmotionalWeight::from_name)
            .unwrap_or(EmotionalWeight::Unknown),
        intent: parsed.intent.unwrap_or_default(),
        explanation: parsed.explanation.unwrap_or_default(),
    }
}

/// Confidence assigned to a salvaged positive judgment.
const SALVAGE_CONFIDENCE: f32 = 0.7;

/// Recovers a judgment from a malformed response by keyword inspection.
///
/// Only returns `Some` when the raw text carries affirmative signal (an
/// antisemitism verdict or a recognizable hostile tone); a salvage that
/// would report "nothing found" must instead fail so the pattern heuristic
/// gets to decide.
pub(super) fn salvage_judgment(raw: &str) -> Option<SemanticJudgment> {
    let lower = raw.to_lowercase();

    let negated = lower.contains("not antisemitic")
        || lower.contains("no antisemitic")
        || lower.contains("\"is_antisemitic\": false");
    let is_antisemitic = !negated && lower.contains("antisemitic");

    let tone = if lower.contains("threatening") {
        Tone::Threatening
    } else if lower.contains("hostile") {
        Tone::Hostile
    } else if lower.contains("menacing") {
        Tone::Menacing
    } else if lower.contains("aggressive") {
        Tone::Aggressive
    } else {
        Tone::Unknown
    };

    if !is_antisemitic && tone == Tone::Unknown {
        return None;
    }

    let emotional_weight = if lower.contains("high") {
        EmotionalWeight::High
    } else if lower.contains("medium") {
        EmotionalWeight::Medium
    } else if lower.contains("low") {
        EmotionalWeight::Low
    } else {
        EmotionalWeight::Unknown
    };

    let mut pattern_tags = BTreeSet::new();
    for tag in [
        PatternTag::MoneyTrope,
        PatternTag::ConspiracyTrope,
        PatternTag::DogWhistle,
        PatternTag::DualLoyalty,
        PatternTag::Scapegoating,
        PatternTag::CodedLanguage,
        PatternTag::HistoricalTrope,
        PatternTag::ThreateningLanguage,
        PatternTag::SecretControl,
    ] {
        if lower.contains(tag.as_str()) {
            pattern_tags.insert(tag);
        }
    }
    if tone == Tone::Threatening {
        pattern_tags.insert(PatternTag::ThreateningLanguage);
    }

    Some(SemanticJudgment {
        is_antisemitic,
        confidence: if is_antisemitic { SALVAGE_CONFIDENCE } else { 0.0 },
        pattern_tags,
        tone,
        emotional_weight,
        intent: String::new(),
        explanation: "Structured response could not be parsed; fields recovered from raw text."
            .to_string(),
    })
}
