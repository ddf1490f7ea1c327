//! Determiner adjacency rules, exercised through the public pipeline.

use kinterm::{Classification, DeterminerSets, Extractor, TermTable};

fn classify_first(text: &str) -> (Classification, String) {
    let found = Extractor::new().unwrap().extract(text);
    assert!(!found.is_empty(), "no occurrence in {text:?}");
    (found[0].specific, found[0].determiner.clone())
}

// =============================================================================
// Tier membership
// =============================================================================

#[test]
fn mixed_possessives() {
    for text in [
        "his mom is kind",
        "her dad is kind",
        "their kids are loud",
        "our sister is away",
        "ur mom lol",
    ] {
        let (class, _) = classify_first(text);
        assert_eq!(class, Classification::Mixed, "in {text:?}");
    }
}

#[test]
fn generic_articles_and_demonstratives() {
    for (text, det) in [
        ("the mom waved", "the"),
        ("those moms waved", "those"),
        ("another wife appeared", "another"),
        ("no brother showed up", "no"),
        ("some kids shouted", "some"),
        ("that sister again", "that"),
    ] {
        let (class, found_det) = classify_first(text);
        assert_eq!(class, Classification::Generic, "in {text:?}");
        assert_eq!(found_det, det, "in {text:?}");
    }
}

#[test]
fn specific_beats_generic_when_both_are_near() {
    // only the word directly before the term counts
    let (class, det) = classify_first("the my mom");
    assert_eq!(class, Classification::Specific);
    assert_eq!(det, "my");
}

// =============================================================================
// Adjacency
// =============================================================================

#[test]
fn determiner_must_touch_the_term() {
    let (class, det) = classify_first("my old mom");
    assert_eq!(class, Classification::Generic);
    assert_eq!(det, "");
}

#[test]
fn comma_breaks_adjacency() {
    // "my," is not followed by whitespace, so the determiner never matches
    let (class, det) = classify_first("my, mom");
    assert_eq!(class, Classification::Generic);
    assert_eq!(det, "");
}

#[test]
fn clitic_scans_past_earlier_apostrophes() {
    let (class, det) = classify_first("that's bob's wife");
    assert_eq!(class, Classification::Specific);
    assert_eq!(det, "'s");
}

#[test]
fn determiner_at_text_start() {
    let (class, det) = classify_first("my mom");
    assert_eq!(class, Classification::Specific);
    assert_eq!(det, "my");
}

#[test]
fn casing_is_ignored_for_matching_but_preserved_in_output() {
    let (class, det) = classify_first("YOUR mom");
    assert_eq!(class, Classification::Mixed);
    assert_eq!(det, "YOUR");
}

// =============================================================================
// Boundary consumption
// =============================================================================

#[test]
fn back_to_back_terms_yield_one_occurrence() {
    let found = Extractor::new().unwrap().extract("your mom mom");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].specific, Classification::Mixed);
}

#[test]
fn determiner_whitespace_is_consumed_once() {
    // the space after "my" also opens the term match; both readings agree
    // on the same byte, which is what adjacency requires
    let found = Extractor::new().unwrap().extract("my mom and my dad");
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].determiner, "my");
    assert_eq!(found[1].determiner, "my");
}

// =============================================================================
// Custom determiner sets
// =============================================================================

#[test]
fn custom_sets_replace_the_defaults() {
    let sets = DeterminerSets {
        specific: vec!["me".to_string()],
        mixed: vec![],
        generic: vec![],
    };
    let extractor =
        Extractor::with_determiners(TermTable::builtin().clone(), &sets).unwrap();

    let found = extractor.extract("me mom is here");
    assert_eq!(found[0].specific, Classification::Specific);
    assert_eq!(found[0].determiner, "me");

    // "my" is no longer listed anywhere
    let found = extractor.extract("my mom is here");
    assert_eq!(found[0].specific, Classification::Generic);
    assert_eq!(found[0].determiner, "");
}
