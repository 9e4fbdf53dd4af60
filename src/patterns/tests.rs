use super::*;

fn tags(hits: &[PatternHit]) -> Vec<PatternTag> {
    hits.iter().map(|h| h.tag).collect()
}

#[test]
fn test_clean_text_has_no_hits() {
    let hits = detect("The museum opens at nine and closes at five.");
    assert!(hits.is_empty());
    assert_eq!(max_confidence(&hits), 0.0);
}

#[test]
fn test_money_trope_requires_group_reference() {
    assert!(detect("The bank reported record profit this quarter.").is_empty());

    let hits = detect("Hanukkah is all about financial engineering.");
    assert!(tags(&hits).contains(&PatternTag::MoneyTrope));
    let hit = hits.iter().find(|h| h.tag == PatternTag::MoneyTrope).unwrap();
    assert_eq!(hit.confidence, MONEY_TROPE_CONFIDENCE);
    assert!(hit.cues.contains(&"financial engineering"));
}

#[test]
fn test_threatening_language_confidence() {
    let hits = detect("This is war. I told you, Soros and his Jewish backers, imma use you.");
    let threat = hits
        .iter()
        .find(|h| h.tag == PatternTag::ThreateningLanguage)
        .unwrap();
    assert_eq!(threat.confidence, THREAT_CONFIDENCE);
}

#[test]
fn test_conspiracy_confidence_scales_with_cues() {
    let one = detect("Jewish people control the banks? No.");
    let conspiracy = one
        .iter()
        .find(|h| h.tag == PatternTag::ConspiracyTrope)
        .unwrap();
    assert!((conspiracy.confidence - CONSPIRACY_BASE_CONFIDENCE).abs() < 1e-6);

    let many = detect(
        "A secret cabal of zionists is pulling the strings and controls the shadow network.",
    );
    let conspiracy = many
        .iter()
        .find(|h| h.tag == PatternTag::ConspiracyTrope)
        .unwrap();
    assert_eq!(conspiracy.confidence, CONSPIRACY_MAX_CONFIDENCE);
}

#[test]
fn test_secret_control_emitted_with_control_verbs() {
    let hits = detect("The Jews control the media.");
    assert!(tags(&hits).contains(&PatternTag::SecretControl));
    assert!(tags(&hits).contains(&PatternTag::ConspiracyTrope));
}

#[test]
fn test_coded_language_needs_vague_group_and_blame() {
    assert!(detect("They went to the store.").is_empty());

    let hits = detect("You know who is really behind the housing crisis, they control everything.");
    assert!(tags(&hits).contains(&PatternTag::CodedLanguage));
}

#[test]
fn test_historical_trope_fires_without_explicit_group() {
    let hits = detect("The protocols of the elders laid out a plan for world domination.");
    let hit = hits
        .iter()
        .find(|h| h.tag == PatternTag::HistoricalTrope)
        .unwrap();
    assert_eq!(hit.confidence, HISTORICAL_TROPE_CONFIDENCE);
}

#[test]
fn test_dog_whistle_fires_without_explicit_group() {
    let hits = detect("The globalists and the rothschilds again.");
    let hit = hits.iter().find(|h| h.tag == PatternTag::DogWhistle).unwrap();
    assert_eq!(hit.confidence, DOG_WHISTLE_CONFIDENCE);
    assert_eq!(hit.cues, vec!["globalists", "rothschilds"]);
}

#[test]
fn test_dual_loyalty_detection() {
    let hits = detect("Jewish senators are more loyal to Israel than to their own country.");
    assert!(tags(&hits).contains(&PatternTag::DualLoyalty));
}

#[test]
fn test_scapegoating_detection() {
    let hits = detect("The Jews are to blame for the recession.");
    let hit = hits.iter().find(|h| h.tag == PatternTag::Scapegoating).unwrap();
    assert_eq!(hit.confidence, SCAPEGOATING_CONFIDENCE);
}

#[test]
fn test_word_boundary_matching() {
    // "them" must not fire inside "theme", "war" not inside "warranty".
    assert!(!contains_term("the theme of the movie", "them"));
    assert!(!contains_term("the warranty expired", "war"));
    assert!(contains_term("i will get them today", "them"));
    assert!(contains_term("this is war", "war"));
}

#[test]
fn test_phrase_matching_is_substring() {
    assert!(contains_term("he is pulling the strings here", "pulling the strings"));
    assert!(contains_term("the (((echo))) marker", "((("));
}

#[test]
fn test_from_name_aliases() {
    assert_eq!(
        PatternTag::from_name("financial_stereotype"),
        Some(PatternTag::MoneyTrope)
    );
    assert_eq!(PatternTag::from_name("blood_libel"), Some(PatternTag::HistoricalTrope));
    assert_eq!(PatternTag::from_name(" Conspiracy "), Some(PatternTag::ConspiracyTrope));
    assert_eq!(PatternTag::from_name("sarcasm"), None);
}

#[test]
fn test_as_str_round_trips() {
    for tag in [
        PatternTag::MoneyTrope,
        PatternTag::ConspiracyTrope,
        PatternTag::DogWhistle,
        PatternTag::DualLoyalty,
        PatternTag::Scapegoating,
        PatternTag::CodedLanguage,
        PatternTag::HistoricalTrope,
        PatternTag::ThreateningLanguage,
        PatternTag::SecretControl,
    ] {
        assert_eq!(PatternTag::from_name(tag.as_str()), Some(tag));
    }
}
