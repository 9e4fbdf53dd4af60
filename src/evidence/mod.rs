//! Hybrid evidence retrieval.
//!
//! Grounding passages are ranked by embedding similarity plus a capped
//! keyword boost: exact overlap on domain proper nouns counts fully,
//! generic content words partially. An empty corpus or an all-below-threshold
//! candidate set yields an empty result, not an error.

pub mod error;
pub mod store;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

#[cfg(test)]
mod tests;

pub use error::EvidenceError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockEvidenceStore, cosine_similarity};
pub use store::{
    EVIDENCE_COLLECTION_NAME, EvidenceCandidate, EvidencePassage, EvidenceStore,
    QdrantEvidenceStore,
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{
    DOMAIN_TERM_BOOST, GENERIC_TERM_BOOST, KEYWORD_BOOST_CAP, RETRIEVAL_OVERSAMPLE,
};
use crate::embedding::Embedder;
use crate::patterns::contains_term;

/// A ranked grounding passage for one claim. Read-only per query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub source_id: String,
    pub text_snippet: String,
    pub citation: String,
    /// Curator-assigned source reliability in `[0, 1]`.
    pub reliability_score: f32,
    /// Embedding cosine similarity to the claim.
    pub similarity_score: f32,
    /// Keyword-overlap boost in `[0, 0.2]`.
    pub keyword_score: f32,
    /// `clamp(similarity + keyword, 0, 1)`; the ranking key.
    pub combined_score: f32,
}

/// Hybrid retriever over an [`EvidenceStore`] and an [`Embedder`].
pub struct EvidenceRetriever<S, E> {
    store: S,
    embedder: E,
    min_similarity: f32,
    limit: usize,
}

impl<S: EvidenceStore, E: Embedder> EvidenceRetriever<S, E> {
    /// Creates a retriever with the configured similarity floor and cap `k`.
    pub fn new(store: S, embedder: E, min_similarity: f32, limit: usize) -> Self {
        Self {
            store,
            embedder,
            min_similarity,
            limit,
        }
    }

    /// Retrieves grounding evidence for `claim_text`, sorted by combined
    /// score descending, capped at the configured limit.
    ///
    /// The store is over-queried so that the keyword boost can promote
    /// candidates from beyond the top-`k` similarity window.
    pub async fn retrieve(&self, claim_text: &str) -> Result<Vec<EvidenceItem>, EvidenceError> {
        let embedding = self.embedder.embed(claim_text).await?;

        let top_n = (self.limit * RETRIEVAL_OVERSAMPLE).max(self.limit) as u64;
        let candidates = self.store.query(embedding, top_n).await?;
        if candidates.is_empty() {
            debug!("evidence store returned no candidates");
            return Ok(Vec::new());
        }

        let claim_terms = content_terms(claim_text);

        let mut items: Vec<EvidenceItem> = candidates
            .into_iter()
            .filter(|c| c.similarity >= self.min_similarity)
            .map(|c| {
                let keyword_score = keyword_score(&claim_terms, &c.passage.text);
                let combined_score = (c.similarity + keyword_score).clamp(0.0, 1.0);
                EvidenceItem {
                    source_id: c.passage.source_id,
                    text_snippet: c.passage.text,
                    citation: c.passage.citation,
                    reliability_score: c.passage.reliability,
                    similarity_score: c.similarity,
                    keyword_score,
                    combined_score,
                }
            })
            .collect();

        // Stable sort: combined desc, ties by reliability desc, then
        // store insertion order.
        items.sort_by(|a, b| {
            b.combined_score
                .partial_cmp(&a.combined_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(
                    b.reliability_score
                        .partial_cmp(&a.reliability_score)
                        .unwrap_or(std::cmp::Ordering::Equal),
                )
        });
        items.truncate(self.limit);

        debug!(
            retrieved = items.len(),
            min_similarity = self.min_similarity,
            "evidence retrieval complete"
        );

        Ok(items)
    }
}

/// Proper nouns of the domain; exact overlap on these earns the full
/// per-term boost.
const DOMAIN_PROPER_NOUNS: &[&str] = &[
    "holocaust",
    "auschwitz",
    "treblinka",
    "kristallnacht",
    "nuremberg",
    "israel",
    "jerusalem",
    "zionism",
    "judaism",
    "torah",
    "talmud",
    "hanukkah",
    "passover",
    "pogrom",
    "ghetto",
    "nazi",
    "nazis",
    "jews",
    "jewish",
    "dreyfus",
    "rothschild",
];

const STOPWORDS: &[&str] = &[
    "the", "and", "that", "with", "from", "this", "have", "were", "their", "they", "them", "will",
    "would", "been", "about", "into", "which", "than", "there",
];

pub(crate) fn content_terms(text: &str) -> Vec<String> {
    let mut terms: Vec<String> = text
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() > 3 && !STOPWORDS.contains(w))
        .map(str::to_string)
        .collect();
    terms.sort();
    terms.dedup();
    terms
}

fn keyword_score(claim_terms: &[String], evidence_text: &str) -> f32 {
    let evidence_lower = evidence_text.to_lowercase();
    let mut score = 0.0;
    for term in claim_terms {
        if !contains_term(&evidence_lower, term) {
            continue;
        }
        if DOMAIN_PROPER_NOUNS.contains(&term.as_str()) {
            score += DOMAIN_TERM_BOOST;
        } else {
            score += GENERIC_TERM_BOOST;
        }
    }
    score.min(KEYWORD_BOOST_CAP)
}
