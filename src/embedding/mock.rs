//! Deterministic embedder for tests.

use std::collections::HashMap;

use parking_lot::RwLock;

use super::{Embedder, EmbeddingError};

/// Default dimension of mock embeddings.
pub const MOCK_EMBEDDING_DIM: usize = 64;

/// Deterministic [`Embedder`]: returns pinned vectors for registered texts,
/// otherwise a seeded vector derived from the text hash. Identical input
/// always embeds identically, which the idempotence tests rely on.
pub struct MockEmbedder {
    dim: usize,
    pinned: RwLock<HashMap<String, Vec<f32>>>,
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self::new(MOCK_EMBEDDING_DIM)
    }
}

impl MockEmbedder {
    /// Creates a mock embedder producing `dim`-dimensional vectors.
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            pinned: RwLock::new(HashMap::new()),
        }
    }

    /// Pins an exact vector for `text`.
    pub fn pin(&self, text: impl Into<String>, vector: Vec<f32>) {
        self.pinned.write().insert(text.into(), vector);
    }

    /// Returns the configured dimension.
    pub fn dim(&self) -> usize {
        self.dim
    }
}

impl Embedder for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if let Some(vector) = self.pinned.read().get(text) {
            return Ok(vector.clone());
        }
        let hash = blake3::hash(text.as_bytes());
        let seed = u64::from_le_bytes(
            hash.as_bytes()[0..8]
                .try_into()
                .expect("BLAKE3 always produces at least 8 bytes"),
        );
        Ok(deterministic_embedding(seed, self.dim))
    }
}

/// Seeded pseudo-random vector in `[-1, 1]`.
pub fn deterministic_embedding(seed: u64, dim: usize) -> Vec<f32> {
    (0..dim as u64)
        .map(|i| {
            let mixed = (seed.wrapping_mul(31).wrapping_add(i)) % 1000;
            (mixed as f32 / 500.0) - 1.0
        })
        .collect()
}
