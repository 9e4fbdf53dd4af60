//! Claim data type and the sentence segmentation policy.
//!
//! The engine itself is segmentation-agnostic: it consumes [`Claim`]s
//! (text plus optional paragraph context) produced upstream. [`Segmenter`]
//! is the default policy for callers that start from whole-document text.

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MIN_SENTENCE_CHARS, DEFAULT_SHORT_CLAIM_CHARS};

/// A single extracted statement to classify and verify.
///
/// Immutable once constructed; the engine only reads it. `id` is a stable
/// content hash of `(document_id, text)`, so re-running verification over
/// the same input yields identically keyed results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// Stable content-derived identifier (truncated BLAKE3, hex).
    pub id: String,
    /// Identifier of the owning document.
    pub document_id: String,
    /// The claim text.
    pub text: String,
    /// Surrounding paragraph, when the claim was cut from a longer text.
    pub paragraph_context: Option<String>,
}

impl Claim {
    /// Creates a claim with no surrounding context.
    pub fn new(document_id: impl Into<String>, text: impl Into<String>) -> Self {
        let document_id = document_id.into();
        let text = text.into();
        let id = claim_id(&document_id, &text);
        Self {
            id,
            document_id,
            text,
            paragraph_context: None,
        }
    }

    /// Creates a claim carrying its surrounding paragraph.
    pub fn with_context(
        document_id: impl Into<String>,
        text: impl Into<String>,
        paragraph_context: impl Into<String>,
    ) -> Self {
        let mut claim = Self::new(document_id, text);
        claim.paragraph_context = Some(paragraph_context.into());
        claim
    }
}

/// Derives the stable claim id from document id and claim text.
pub fn claim_id(document_id: &str, text: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(document_id.as_bytes());
    hasher.update(&[0]);
    hasher.update(text.as_bytes());
    let hash = hasher.finalize();
    let bytes: [u8; 8] = hash.as_bytes()[0..8]
        .try_into()
        .expect("BLAKE3 always produces at least 8 bytes");
    format!("{:016x}", u64::from_le_bytes(bytes))
}

/// Sentence segmentation policy.
///
/// Text under `short_text_chars` stays a single whole claim so cross-clause
/// intent (a threat in one clause, a group reference in another) is judged
/// together. Longer text is split into sentence claims, each carrying its
/// paragraph as context; questions and fragments below `min_sentence_chars`
/// are skipped.
#[derive(Debug, Clone)]
pub struct Segmenter {
    /// Minimum sentence length (chars) kept as a claim.
    pub min_sentence_chars: usize,
    /// Below this length (chars) the whole text becomes one claim.
    pub short_text_chars: usize,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self {
            min_sentence_chars: DEFAULT_MIN_SENTENCE_CHARS,
            short_text_chars: DEFAULT_SHORT_CLAIM_CHARS,
        }
    }
}

impl Segmenter {
    /// Creates a segmenter with explicit limits.
    pub fn new(min_sentence_chars: usize, short_text_chars: usize) -> Self {
        Self {
            min_sentence_chars,
            short_text_chars,
        }
    }

    /// Splits document text into claims.
    pub fn segment(&self, document_id: &str, text: &str) -> Vec<Claim> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }

        if trimmed.chars().count() < self.short_text_chars {
            return vec![Claim::new(document_id, trimmed)];
        }

        let mut claims = Vec::new();
        for paragraph in trimmed.split("\n\n").map(str::trim).filter(|p| !p.is_empty()) {
            for sentence in split_sentences(paragraph) {
                if sentence.chars().count() < self.min_sentence_chars {
                    continue;
                }
                // Questions are not claims; exclamations may be threats, keep them.
                if sentence.ends_with('?') {
                    continue;
                }
                claims.push(Claim::with_context(document_id, sentence, paragraph));
            }
        }

        if claims.is_empty() {
            let head: String = trimmed.chars().take(self.short_text_chars).collect();
            claims.push(Claim::new(document_id, head));
        }

        claims
    }
}

fn split_sentences(paragraph: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for (idx, ch) in paragraph.char_indices() {
        if matches!(ch, '.' | '!' | '?') {
            let end = idx + ch.len_utf8();
            let sentence = paragraph[start..end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = end;
        }
    }
    let tail = paragraph[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }
    sentences
}
