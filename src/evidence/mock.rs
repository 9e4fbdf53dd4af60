//! In-memory evidence store for tests.

use parking_lot::RwLock;

use super::error::EvidenceError;
use super::store::{EvidenceCandidate, EvidencePassage, EvidenceStore};

/// In-memory [`EvidenceStore`] over pre-embedded passages.
///
/// Candidates keep their insertion order before sorting, so score-tied
/// passages rank deterministically.
#[derive(Default)]
pub struct MockEvidenceStore {
    passages: RwLock<Vec<(EvidencePassage, Vec<f32>)>>,
}

impl MockEvidenceStore {
    /// Empty corpus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a passage with its embedding.
    pub fn add(&self, passage: EvidencePassage, embedding: Vec<f32>) {
        self.passages.write().push((passage, embedding));
    }

    /// Number of stored passages.
    pub fn len(&self) -> usize {
        self.passages.read().len()
    }

    /// Returns `true` when the corpus is empty.
    pub fn is_empty(&self) -> bool {
        self.passages.read().is_empty()
    }
}

impl EvidenceStore for MockEvidenceStore {
    async fn query(
        &self,
        embedding: Vec<f32>,
        top_n: u64,
    ) -> Result<Vec<EvidenceCandidate>, EvidenceError> {
        let passages = self.passages.read();

        let mut candidates: Vec<EvidenceCandidate> = passages
            .iter()
            .map(|(passage, vector)| EvidenceCandidate {
                passage: passage.clone(),
                similarity: cosine_similarity(&embedding, vector),
            })
            .collect();

        // Stable sort keeps insertion order among equal similarities.
        candidates.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        candidates.truncate(top_n as usize);

        Ok(candidates)
    }
}

/// Cosine similarity; zero for mismatched or zero-length vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}
