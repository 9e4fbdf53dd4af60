//! Evidence store seam and the Qdrant-backed implementation.

use std::collections::HashMap;

use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointStruct, SearchPointsBuilder, UpsertPointsBuilder,
    VectorParamsBuilder,
};
use serde::{Deserialize, Serialize};

use super::error::EvidenceError;

/// A curated corpus passage with provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidencePassage {
    /// Stable identifier of the source document/collection entry.
    pub source_id: String,
    /// The passage text.
    pub text: String,
    /// Human-readable citation for reports.
    pub citation: String,
    /// Curator-assigned source reliability in `[0, 1]`.
    pub reliability: f32,
}

/// A passage returned by the store with its embedding similarity.
#[derive(Debug, Clone, PartialEq)]
pub struct EvidenceCandidate {
    pub passage: EvidencePassage,
    /// Cosine similarity between claim and passage embeddings.
    pub similarity: f32,
}

/// Read seam over the evidence corpus. Implementations must be
/// concurrent-safe: claims query the store in parallel.
pub trait EvidenceStore: Send + Sync {
    /// Returns up to `top_n` candidates by embedding similarity, best first.
    fn query(
        &self,
        embedding: Vec<f32>,
        top_n: u64,
    ) -> impl std::future::Future<Output = Result<Vec<EvidenceCandidate>, EvidenceError>> + Send;
}

/// Default collection name for the evidence corpus.
pub const EVIDENCE_COLLECTION_NAME: &str = "tropecheck_evidence";

/// Qdrant-backed evidence store.
#[derive(Clone)]
pub struct QdrantEvidenceStore {
    client: std::sync::Arc<Qdrant>,
    collection: String,
}

impl QdrantEvidenceStore {
    /// Connects to `url` and reads from `collection`.
    pub fn new(url: &str, collection: impl Into<String>) -> Result<Self, EvidenceError> {
        let client = Qdrant::from_url(url)
            .build()
            .map_err(|e| EvidenceError::ConnectionFailed {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client: std::sync::Arc::new(client),
            collection: collection.into(),
        })
    }

    /// Returns the collection name.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Performs a basic health check request.
    pub async fn health_check(&self) -> Result<(), EvidenceError> {
        self.client
            .health_check()
            .await
            .map_err(|e| EvidenceError::ConnectionFailed {
                url: self.collection.clone(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    /// Ensures the collection exists with cosine distance.
    pub async fn ensure_collection(&self, vector_size: u64) -> Result<(), EvidenceError> {
        let exists = self
            .client
            .collection_exists(&self.collection)
            .await
            .map_err(|e| EvidenceError::CreateCollectionFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        if !exists {
            let vectors_config = VectorParamsBuilder::new(vector_size, Distance::Cosine);
            self.client
                .create_collection(
                    CreateCollectionBuilder::new(&self.collection)
                        .vectors_config(vectors_config)
                        .on_disk_payload(true),
                )
                .await
                .map_err(|e| EvidenceError::CreateCollectionFailed {
                    collection: self.collection.clone(),
                    message: e.to_string(),
                })?;
        }

        Ok(())
    }

    /// Upserts pre-embedded passages (corpus maintenance is external; this
    /// exists for operational seeding and tests against a live store).
    pub async fn upsert_passages(
        &self,
        passages: Vec<(EvidencePassage, Vec<f32>)>,
    ) -> Result<(), EvidenceError> {
        if passages.is_empty() {
            return Ok(());
        }

        let points: Vec<PointStruct> = passages
            .into_iter()
            .map(|(passage, vector)| {
                let id = passage_point_id(&passage);
                let mut payload: HashMap<String, qdrant_client::qdrant::Value> = HashMap::new();
                payload.insert("source_id".to_string(), passage.source_id.into());
                payload.insert("text".to_string(), passage.text.into());
                payload.insert("citation".to_string(), passage.citation.into());
                payload.insert("reliability".to_string(), (passage.reliability as f64).into());
                PointStruct::new(id, vector, payload)
            })
            .collect();

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, points).wait(true))
            .await
            .map_err(|e| EvidenceError::UpsertFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        Ok(())
    }
}

impl EvidenceStore for QdrantEvidenceStore {
    async fn query(
        &self,
        embedding: Vec<f32>,
        top_n: u64,
    ) -> Result<Vec<EvidenceCandidate>, EvidenceError> {
        let search = SearchPointsBuilder::new(&self.collection, embedding, top_n)
            .with_payload(true);

        let response = self
            .client
            .search_points(search)
            .await
            .map_err(|e| EvidenceError::SearchFailed {
                collection: self.collection.clone(),
                message: e.to_string(),
            })?;

        let candidates = response
            .result
            .into_iter()
            .filter_map(|point| {
                let payload = point.payload;
                let text = payload.get("text")?.as_str()?.to_string();
                let source_id = payload
                    .get("source_id")
                    .and_then(|v| v.as_str())
                    .map(|s| s.to_string())
                    .unwrap_or_default();
                let citation = payload
                    .get("citation")
                    .and_then(|v| v.as_str())
                    .map(|s| s.to_string())
                    .unwrap_or_default();
                let reliability = payload
                    .get("reliability")
                    .and_then(|v| v.as_double())
                    .unwrap_or(0.5) as f32;

                Some(EvidenceCandidate {
                    passage: EvidencePassage {
                        source_id,
                        text,
                        citation,
                        reliability,
                    },
                    similarity: point.score,
                })
            })
            .collect();

        Ok(candidates)
    }
}

/// Derives a stable point id from passage identity.
fn passage_point_id(passage: &EvidencePassage) -> u64 {
    let mut hasher = blake3::Hasher::new();
    hasher.update(passage.source_id.as_bytes());
    hasher.update(&[0]);
    hasher.update(passage.text.as_bytes());
    let hash = hasher.finalize();
    u64::from_le_bytes(
        hash.as_bytes()[0..8]
            .try_into()
            .expect("BLAKE3 always produces at least 8 bytes"),
    )
}
