//! Lexical detection of antisemitic rhetorical patterns.
//!
//! Pure and deterministic: no model calls, no state. [`detect`] scans a
//! statement for cue-list co-occurrences (an identity/group reference plus
//! finance, control, or threat vocabulary) and reports matched tags with
//! per-tag confidence. This is the always-available floor under the
//! LLM-backed semantic analysis.

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

use crate::constants::{
    CODED_LANGUAGE_CONFIDENCE, CONSPIRACY_BASE_CONFIDENCE, CONSPIRACY_CUE_STEP,
    CONSPIRACY_MAX_CONFIDENCE, DOG_WHISTLE_CONFIDENCE, DUAL_LOYALTY_CONFIDENCE,
    HISTORICAL_TROPE_CONFIDENCE, MONEY_TROPE_CONFIDENCE, SCAPEGOATING_CONFIDENCE,
    THREAT_CONFIDENCE,
};

/// Recurring rhetorical pattern associated with antisemitic discourse.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PatternTag {
    MoneyTrope,
    ConspiracyTrope,
    DogWhistle,
    DualLoyalty,
    Scapegoating,
    CodedLanguage,
    HistoricalTrope,
    ThreateningLanguage,
    SecretControl,
}

impl PatternTag {
    /// Wire/report name of the tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternTag::MoneyTrope => "money_trope",
            PatternTag::ConspiracyTrope => "conspiracy_trope",
            PatternTag::DogWhistle => "dog_whistle",
            PatternTag::DualLoyalty => "dual_loyalty",
            PatternTag::Scapegoating => "scapegoating",
            PatternTag::CodedLanguage => "coded_language",
            PatternTag::HistoricalTrope => "historical_trope",
            PatternTag::ThreateningLanguage => "threatening_language",
            PatternTag::SecretControl => "secret_control",
        }
    }

    /// Parses a tag from a provider-reported name. Accepts the aliases the
    /// reasoning providers have been observed to emit.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "money_trope" | "financial_stereotype" => Some(PatternTag::MoneyTrope),
            "conspiracy_trope" | "conspiracy" => Some(PatternTag::ConspiracyTrope),
            "dog_whistle" => Some(PatternTag::DogWhistle),
            "dual_loyalty" => Some(PatternTag::DualLoyalty),
            "scapegoating" => Some(PatternTag::Scapegoating),
            "coded_language" => Some(PatternTag::CodedLanguage),
            "historical_trope" | "blood_libel" => Some(PatternTag::HistoricalTrope),
            "threatening_language" => Some(PatternTag::ThreateningLanguage),
            "secret_control" => Some(PatternTag::SecretControl),
            _ => None,
        }
    }
}

/// One matched pattern with its confidence and the cues that fired.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternHit {
    pub tag: PatternTag,
    pub confidence: f32,
    pub cues: Vec<&'static str>,
}

const GROUP_TERMS: &[&str] = &[
    "jewish", "jew", "jews", "judaism", "hebrew", "israeli", "israelis", "zionist", "zionists",
    "zionism", "synagogue", "rabbi", "kushner",
];

const HOLIDAY_TERMS: &[&str] = &[
    "hanukkah",
    "hanukah",
    "hannukah",
    "passover",
    "yom kippur",
    "rosh hashanah",
    "shabbat",
];

const FINANCE_TERMS: &[&str] = &[
    "financial engineering",
    "financial",
    "finance",
    "money",
    "banking",
    "banker",
    "bankers",
    "usury",
    "profit",
    "wealth",
    "shekels",
];

const CONTROL_VERB_TERMS: &[&str] = &[
    "control",
    "controls",
    "dominate",
    "manipulate",
    "influence",
    "run the",
    "own the",
];

const CONSPIRACY_TERMS: &[&str] = &[
    "secret",
    "cabal",
    "plot",
    "conspiracy",
    "network",
    "shadow",
    "behind the scenes",
    "pulling the strings",
    "puppet",
];

const THREAT_TERMS: &[&str] = &[
    "this is war",
    "this ain't a game",
    "war",
    "threaten",
    "threatening",
    "get you",
    "show you",
    "make an example",
    "gone get",
    "imma use",
    "use you",
    "told you",
];

const DUAL_LOYALTY_TERMS: &[&str] = &[
    "dual loyalty",
    "loyal to israel",
    "true allegiance",
    "allegiance to israel",
    "fifth column",
    "more loyal to",
];

const SCAPEGOAT_TERMS: &[&str] = &[
    "to blame",
    "blame the",
    "responsible for",
    "bear responsibility",
    "caused the",
    "behind every",
    "fault of",
];

const VAGUE_GROUP_TERMS: &[&str] =
    &["they", "them", "those people", "these people", "you know who"];

const BLAME_CONTEXT_TERMS: &[&str] = &[
    "control",
    "influence",
    "responsible",
    "blame",
    "orchestrate",
    "behind",
];

const HISTORICAL_TERMS: &[&str] = &[
    "blood libel",
    "protocols of the elders",
    "elders of zion",
    "world domination",
    "christ killer",
    "rootless cosmopolitan",
    "well poisoning",
];

const DOG_WHISTLE_TERMS: &[&str] = &[
    "globalist",
    "globalists",
    "cosmopolitan elite",
    "cultural marxism",
    "rothschild",
    "rothschilds",
    "soros",
    "new world order",
    "international bankers",
    "(((",
];

/// Scans `text` for antisemitic rhetorical patterns.
///
/// Returns one hit per matched tag; no match returns an empty vec.
pub fn detect(text: &str) -> Vec<PatternHit> {
    let lower = text.to_lowercase();

    let group_cues = matched_cues(&lower, GROUP_TERMS);
    let holiday_cues = matched_cues(&lower, HOLIDAY_TERMS);
    let group_referenced = !group_cues.is_empty() || !holiday_cues.is_empty();

    let mut hits = Vec::new();

    let finance_cues = matched_cues(&lower, FINANCE_TERMS);
    if group_referenced && !finance_cues.is_empty() {
        hits.push(PatternHit {
            tag: PatternTag::MoneyTrope,
            confidence: MONEY_TROPE_CONFIDENCE,
            cues: finance_cues,
        });
    }

    let control_cues = matched_cues(&lower, CONTROL_VERB_TERMS);
    let conspiracy_cues = matched_cues(&lower, CONSPIRACY_TERMS);
    if group_referenced && (!control_cues.is_empty() || !conspiracy_cues.is_empty()) {
        let mut cues = control_cues.clone();
        cues.extend(&conspiracy_cues);
        hits.push(PatternHit {
            tag: PatternTag::ConspiracyTrope,
            confidence: scaled_conspiracy_confidence(cues.len()),
            cues: cues.clone(),
        });
        if !control_cues.is_empty() {
            hits.push(PatternHit {
                tag: PatternTag::SecretControl,
                confidence: scaled_conspiracy_confidence(cues.len()),
                cues: control_cues,
            });
        }
    }

    let threat_cues = matched_cues(&lower, THREAT_TERMS);
    if group_referenced && !threat_cues.is_empty() {
        hits.push(PatternHit {
            tag: PatternTag::ThreateningLanguage,
            confidence: THREAT_CONFIDENCE,
            cues: threat_cues,
        });
    }

    let dual_cues = matched_cues(&lower, DUAL_LOYALTY_TERMS);
    if group_referenced && !dual_cues.is_empty() {
        hits.push(PatternHit {
            tag: PatternTag::DualLoyalty,
            confidence: DUAL_LOYALTY_CONFIDENCE,
            cues: dual_cues,
        });
    }

    let scapegoat_cues = matched_cues(&lower, SCAPEGOAT_TERMS);
    if group_referenced && !scapegoat_cues.is_empty() {
        hits.push(PatternHit {
            tag: PatternTag::Scapegoating,
            confidence: SCAPEGOATING_CONFIDENCE,
            cues: scapegoat_cues,
        });
    }

    let vague_cues = matched_cues(&lower, VAGUE_GROUP_TERMS);
    let blame_cues = matched_cues(&lower, BLAME_CONTEXT_TERMS);
    if !vague_cues.is_empty() && !blame_cues.is_empty() {
        let mut cues = vague_cues;
        cues.extend(&blame_cues);
        hits.push(PatternHit {
            tag: PatternTag::CodedLanguage,
            confidence: CODED_LANGUAGE_CONFIDENCE,
            cues,
        });
    }

    // Historical tropes and dog whistles name the group implicitly.
    let historical_cues = matched_cues(&lower, HISTORICAL_TERMS);
    if !historical_cues.is_empty() {
        hits.push(PatternHit {
            tag: PatternTag::HistoricalTrope,
            confidence: HISTORICAL_TROPE_CONFIDENCE,
            cues: historical_cues,
        });
    }

    let whistle_cues = matched_cues(&lower, DOG_WHISTLE_TERMS);
    if !whistle_cues.is_empty() {
        hits.push(PatternHit {
            tag: PatternTag::DogWhistle,
            confidence: DOG_WHISTLE_CONFIDENCE,
            cues: whistle_cues,
        });
    }

    hits
}

/// Highest confidence across hits, or `0.0` when empty.
pub fn max_confidence(hits: &[PatternHit]) -> f32 {
    hits.iter().map(|h| h.confidence).fold(0.0, f32::max)
}

fn scaled_conspiracy_confidence(cue_count: usize) -> f32 {
    let extra = cue_count.saturating_sub(1) as f32;
    (CONSPIRACY_BASE_CONFIDENCE + CONSPIRACY_CUE_STEP * extra).min(CONSPIRACY_MAX_CONFIDENCE)
}

fn matched_cues(lower: &str, terms: &'static [&'static str]) -> Vec<&'static str> {
    terms
        .iter()
        .copied()
        .filter(|term| contains_term(lower, term))
        .collect()
}

/// Substring match for phrases; word-boundary match for single words, so
/// "them" does not fire inside "theme".
pub(crate) fn contains_term(haystack: &str, term: &str) -> bool {
    let single_word = !term.contains(' ') && term.chars().all(|c| c.is_ascii_alphanumeric());
    if !single_word {
        return haystack.contains(term);
    }

    haystack.match_indices(term).any(|(idx, matched)| {
        let before_ok = haystack[..idx]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric());
        let after_ok = haystack[idx + matched.len()..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_alphanumeric());
        before_ok && after_ok
    })
}
