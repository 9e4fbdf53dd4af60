use super::*;

use crate::embedding::MockEmbedder;

fn passage(source_id: &str, text: &str, reliability: f32) -> EvidencePassage {
    EvidencePassage {
        source_id: source_id.to_string(),
        text: text.to_string(),
        citation: format!("https://example.org/{source_id}"),
        reliability,
    }
}

#[tokio::test]
async fn test_retrieve_empty_store_is_empty_not_error() {
    let store = MockEvidenceStore::new();
    let retriever = EvidenceRetriever::new(store, MockEmbedder::default(), 0.3, 5);

    let items = retriever.retrieve("the menorah has nine branches").await.unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_retrieve_filters_below_similarity_floor() {
    let embedder = MockEmbedder::default();
    let claim = "the menorah has nine branches";
    let claim_vec = embedder.embed(claim).await.unwrap();

    let mut far_vec: Vec<f32> = claim_vec.iter().map(|v| -v).collect();
    far_vec[0] = 0.01;

    let store = MockEvidenceStore::new();
    store.add(passage("near", "a menorah passage", 0.9), claim_vec.clone());
    store.add(passage("far", "unrelated passage", 0.9), far_vec);

    let retriever = EvidenceRetriever::new(store, embedder, 0.3, 5);
    let items = retriever.retrieve(claim).await.unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].source_id, "near");
    assert!(items[0].similarity_score > 0.99);
}

#[tokio::test]
async fn test_keyword_boost_promotes_term_overlap() {
    let embedder = MockEmbedder::default();
    let claim = "the hanukkah menorah has nine branches";
    let claim_vec = embedder.embed(claim).await.unwrap();

    // Same similarity for both passages; only keyword overlap differs.
    let store = MockEvidenceStore::new();
    store.add(
        passage("plain", "a lamp stand with several arms", 0.5),
        claim_vec.clone(),
    );
    store.add(
        passage("overlap", "the hanukkah menorah holds nine branches", 0.5),
        claim_vec.clone(),
    );

    let retriever = EvidenceRetriever::new(store, embedder, 0.3, 5);
    let items = retriever.retrieve(claim).await.unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].source_id, "overlap");
    assert!(items[0].keyword_score > 0.0);
    assert_eq!(items[1].keyword_score, 0.0);
    assert!(items[0].combined_score > items[1].combined_score);
}

#[tokio::test]
async fn test_combined_score_is_clamped() {
    let embedder = MockEmbedder::default();
    let claim = "hanukkah jewish torah passover israel jerusalem";
    let claim_vec = embedder.embed(claim).await.unwrap();

    let store = MockEvidenceStore::new();
    store.add(
        passage(
            "dense",
            "hanukkah jewish torah passover israel jerusalem history",
            1.0,
        ),
        claim_vec.clone(),
    );

    let retriever = EvidenceRetriever::new(store, embedder, 0.3, 5);
    let items = retriever.retrieve(claim).await.unwrap();

    assert_eq!(items.len(), 1);
    assert!(items[0].keyword_score <= KEYWORD_BOOST_CAP);
    assert!(items[0].combined_score <= 1.0);
}

#[tokio::test]
async fn test_reliability_breaks_combined_ties() {
    let embedder = MockEmbedder::default();
    let claim = "a claim with no overlapping vocabulary";
    let claim_vec = embedder.embed(claim).await.unwrap();

    let store = MockEvidenceStore::new();
    store.add(passage("shaky", "irrelevant text", 0.2), claim_vec.clone());
    store.add(passage("solid", "different text", 0.9), claim_vec.clone());

    let retriever = EvidenceRetriever::new(store, embedder, 0.3, 5);
    let items = retriever.retrieve(claim).await.unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].source_id, "solid");
}

#[tokio::test]
async fn test_limit_caps_results() {
    let embedder = MockEmbedder::default();
    let claim = "a repeated claim";
    let claim_vec = embedder.embed(claim).await.unwrap();

    let store = MockEvidenceStore::new();
    for i in 0..10 {
        store.add(
            passage(&format!("s{i}"), &format!("passage number {i}"), 0.5),
            claim_vec.clone(),
        );
    }

    let retriever = EvidenceRetriever::new(store, embedder, 0.3, 3);
    let items = retriever.retrieve(claim).await.unwrap();
    assert_eq!(items.len(), 3);
}

#[test]
fn test_content_terms_filters_and_dedups() {
    let terms = content_terms("The Jews and the Jews were visible, with them.");
    assert_eq!(terms, vec!["jews".to_string(), "visible".to_string()]);
}

#[test]
fn test_cosine_similarity_basics() {
    assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
    assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
    assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-6);
    assert_eq!(cosine_similarity(&[], &[]), 0.0);
}
