//! Corpus and pipeline fixtures.

use tropecheck::embedding::Embedder;
use tropecheck::evidence::EvidencePassage;
use tropecheck::{ClaimVerifier, EngineConfig, MockEmbedder, MockEvidenceStore};

/// Known facts about Hanukkah, pre-embedded with the mock embedder so that
/// matching claims retrieve with full similarity.
pub const CORPUS: &[(&str, &str, &str, f32)] = &[
    (
        "menorah-branches",
        "The Hanukkah menorah, or hanukkiah, holds nine branches: one candle for each of the \
         eight nights plus the shamash used to light the others.",
        "https://en.wikipedia.org/wiki/Menorah_(Hanukkah)",
        0.95,
    ),
    (
        "eight-nights",
        "Hanukkah is celebrated for eight nights and days, commemorating the rededication of \
         the Second Temple in Jerusalem.",
        "https://en.wikipedia.org/wiki/Hanukkah",
        0.95,
    ),
    (
        "oil-miracle",
        "According to the Talmud, a single day's supply of oil burned for eight days in the \
         rededicated temple.",
        "https://en.wikipedia.org/wiki/Hanukkah",
        0.9,
    ),
    (
        "maccabean-revolt",
        "The festival marks the Maccabean Revolt against the Seleucid Empire in the second \
         century BCE.",
        "https://en.wikipedia.org/wiki/Maccabean_Revolt",
        0.9,
    ),
];

/// Seeds a mock store with [`CORPUS`], each passage embedded by `embedder`.
pub async fn seeded_store(embedder: &MockEmbedder) -> MockEvidenceStore {
    super::init_tracing();
    let store = MockEvidenceStore::new();
    for (source_id, text, citation, reliability) in CORPUS {
        let embedding = embedder
            .embed(text)
            .await
            .expect("mock embedder never fails");
        store.add(
            EvidencePassage {
                source_id: (*source_id).to_string(),
                text: (*text).to_string(),
                citation: (*citation).to_string(),
                reliability: *reliability,
            },
            embedding,
        );
    }
    store
}

/// Pins a claim's embedding to a corpus passage's embedding so the pair
/// retrieves with similarity 1.0.
pub async fn pin_claim_to_passage(embedder: &MockEmbedder, claim_text: &str, passage_text: &str) {
    let vector = embedder
        .embed(passage_text)
        .await
        .expect("mock embedder never fails");
    embedder.pin(claim_text, vector);
}

/// Builds a verifier over the seeded corpus with no reasoning client, so
/// every stage runs its deterministic strategy.
pub async fn heuristic_pipeline() -> ClaimVerifier<MockEvidenceStore, MockEmbedder> {
    let embedder = MockEmbedder::default();
    let store = seeded_store(&embedder).await;
    ClaimVerifier::new(EngineConfig::default(), store, embedder, None)
        .expect("default config is valid")
}

