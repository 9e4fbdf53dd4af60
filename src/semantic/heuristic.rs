//! Pattern-based semantic judgment, the always-available chain tail.

use std::collections::BTreeSet;

use crate::patterns::{self, PatternHit, PatternTag};

use super::{EmotionalWeight, SemanticJudgment, Tone};

/// Marking rules: a single strong tag, or several weaker tags together.
const SINGLE_TAG_THRESHOLD: f32 = 0.5;
const COMBINED_TAG_THRESHOLD: f32 = 0.6;
const COMBINED_CONFIDENCE_CEILING: f32 = 0.9;

/// Derives a judgment from the lexical pattern detector alone.
pub fn analyze_heuristic(text: &str) -> SemanticJudgment {
    let hits = patterns::detect(text);

    let max_confidence = patterns::max_confidence(&hits);
    let combined: f32 = hits.iter().map(|h| h.confidence).sum();
    let is_antisemitic = max_confidence >= SINGLE_TAG_THRESHOLD
        || (hits.len() >= 2 && combined >= COMBINED_TAG_THRESHOLD);

    let confidence = if !is_antisemitic {
        0.0
    } else if max_confidence >= SINGLE_TAG_THRESHOLD {
        max_confidence
    } else {
        combined.min(COMBINED_CONFIDENCE_CEILING)
    };

    let dominant = hits
        .iter()
        .max_by(|a, b| {
            a.confidence
                .partial_cmp(&b.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|h| h.tag);

    let (tone, emotional_weight) = dominant
        .map(tone_for_tag)
        .unwrap_or((Tone::Neutral, EmotionalWeight::Low));

    SemanticJudgment {
        is_antisemitic,
        confidence,
        pattern_tags: hits.iter().map(|h| h.tag).collect::<BTreeSet<_>>(),
        tone,
        emotional_weight,
        intent: synthesize_intent(&hits),
        explanation: synthesize_explanation(&hits),
    }
}

/// Fixed dominant-tag table for tone and emotional weight.
fn tone_for_tag(tag: PatternTag) -> (Tone, EmotionalWeight) {
    match tag {
        PatternTag::ThreateningLanguage => (Tone::Threatening, EmotionalWeight::High),
        PatternTag::SecretControl => (Tone::Hostile, EmotionalWeight::High),
        PatternTag::ConspiracyTrope
        | PatternTag::MoneyTrope
        | PatternTag::Scapegoating
        | PatternTag::DualLoyalty
        | PatternTag::HistoricalTrope
        | PatternTag::CodedLanguage
        | PatternTag::DogWhistle => (Tone::Hostile, EmotionalWeight::Medium),
    }
}

fn intent_for_tag(tag: PatternTag) -> &'static str {
    match tag {
        PatternTag::ThreateningLanguage => "to intimidate or threaten Jewish people",
        PatternTag::ConspiracyTrope => "to spread conspiracy theories about Jews",
        PatternTag::MoneyTrope => "to perpetuate antisemitic money stereotypes",
        PatternTag::SecretControl => "to suggest Jews secretly control institutions",
        PatternTag::Scapegoating => "to blame Jewish people for perceived harms",
        PatternTag::DualLoyalty => "to cast Jewish people as disloyal to their country",
        PatternTag::HistoricalTrope => "to revive a historical antisemitic trope",
        PatternTag::CodedLanguage => "to reference Jewish people through coded language",
        PatternTag::DogWhistle => "to signal antisemitic meaning to an in-group",
    }
}

fn explanation_for_tag(tag: PatternTag) -> &'static str {
    match tag {
        PatternTag::ThreateningLanguage => {
            "Contains threatening language directed at Jewish people."
        }
        PatternTag::ConspiracyTrope => "Uses antisemitic conspiracy framing.",
        PatternTag::MoneyTrope => "Uses antisemitic money-related stereotypes.",
        PatternTag::SecretControl => "Suggests Jewish people secretly control or influence things.",
        PatternTag::Scapegoating => "Assigns collective blame to Jewish people.",
        PatternTag::DualLoyalty => "Invokes the dual-loyalty accusation.",
        PatternTag::HistoricalTrope => "Echoes a historical antisemitic trope.",
        PatternTag::CodedLanguage => "Uses coded language or vague group references.",
        PatternTag::DogWhistle => "Uses dog-whistle vocabulary.",
    }
}

fn synthesize_intent(hits: &[PatternHit]) -> String {
    if hits.is_empty() {
        return "to communicate a message".to_string();
    }
    let parts: Vec<&str> = hits.iter().map(|h| intent_for_tag(h.tag)).collect();
    let mut intent = parts.join("; ");
    if let Some(first) = intent.get(0..1) {
        let capitalized = first.to_uppercase();
        intent.replace_range(0..1, &capitalized);
    }
    intent
}

fn synthesize_explanation(hits: &[PatternHit]) -> String {
    if hits.is_empty() {
        return "No antisemitic patterns matched by lexical analysis.".to_string();
    }
    hits.iter()
        .map(|h| explanation_for_tag(h.tag))
        .collect::<Vec<_>>()
        .join(" ")
}
