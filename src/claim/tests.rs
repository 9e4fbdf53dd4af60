use super::*;

#[test]
fn test_claim_id_is_stable() {
    let a = claim_id("doc-1", "The menorah has nine branches.");
    let b = claim_id("doc-1", "The menorah has nine branches.");
    assert_eq!(a, b);
    assert_eq!(a.len(), 16);
}

#[test]
fn test_claim_id_varies_by_document_and_text() {
    let base = claim_id("doc-1", "some claim");
    assert_ne!(base, claim_id("doc-2", "some claim"));
    assert_ne!(base, claim_id("doc-1", "another claim"));
}

#[test]
fn test_claim_id_separator_prevents_collisions() {
    // ("ab", "c") and ("a", "bc") must not hash identically.
    assert_ne!(claim_id("ab", "c"), claim_id("a", "bc"));
}

#[test]
fn test_empty_text_yields_no_claims() {
    let segmenter = Segmenter::default();
    assert!(segmenter.segment("doc", "").is_empty());
    assert!(segmenter.segment("doc", "   \n\n  ").is_empty());
}

#[test]
fn test_short_text_is_one_whole_claim() {
    let segmenter = Segmenter::default();
    let text = "This is war. I told you what happens. They know who they are.";
    let claims = segmenter.segment("doc", text);

    assert_eq!(claims.len(), 1);
    assert_eq!(claims[0].text, text);
    assert_eq!(claims[0].paragraph_context, None);
}

#[test]
fn test_long_text_splits_into_sentences_with_context() {
    let segmenter = Segmenter::new(20, 50);
    let text = "The first sentence carries one statement. The second sentence carries another.\n\n\
                A new paragraph holds a third statement here.";
    let claims = segmenter.segment("doc", text);

    assert_eq!(claims.len(), 3);
    assert_eq!(claims[0].text, "The first sentence carries one statement.");
    assert_eq!(
        claims[0].paragraph_context.as_deref(),
        Some("The first sentence carries one statement. The second sentence carries another.")
    );
    assert_eq!(
        claims[2].paragraph_context.as_deref(),
        Some("A new paragraph holds a third statement here.")
    );
}

#[test]
fn test_questions_and_fragments_are_skipped() {
    let segmenter = Segmenter::new(20, 10);
    let text = "Is this statement actually verifiable? Short. \
                This declarative sentence is long enough to keep.";
    let claims = segmenter.segment("doc", text);

    assert_eq!(claims.len(), 1);
    assert_eq!(claims[0].text, "This declarative sentence is long enough to keep.");
}

#[test]
fn test_all_skipped_falls_back_to_head_claim() {
    let segmenter = Segmenter::new(30, 10);
    let text = "Too short. Also short. Tiny.";
    let claims = segmenter.segment("doc", text);

    assert_eq!(claims.len(), 1);
    assert_eq!(claims[0].text, "Too short.");
}

#[test]
fn test_segmentation_is_deterministic() {
    let segmenter = Segmenter::new(20, 50);
    let text = "A first verifiable statement sits here. A second verifiable statement follows it.";
    let first = segmenter.segment("doc", text);
    let second = segmenter.segment("doc", text);
    assert_eq!(first, second);
}
