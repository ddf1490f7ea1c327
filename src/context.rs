//! Referential-context classification by determiner adjacency.
//!
//! A located wordform is classified by the word immediately before it:
//!
//! ```text
//! my mom     -> Specific   (the author's own relative)
//! your mom   -> Mixed      (someone's relative, not the author's)
//! a mom      -> Generic    (no particular person)
//! the mom    -> Generic
//! tall mom   -> Generic    (no listed determiner, the default)
//! ```
//!
//! A determiner counts only when its match ends exactly where the wordform
//! starts, so the two are separated by a single run of whitespace. Tiers
//! are tried specific, then mixed, then generic; the first adjacent hit
//! wins.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::occurrence::Classification;

/// First-person possessives, including the clitic "'s" for named owners
/// ("jill's gf").
const SPECIFIC_DETERMINERS: [&str; 2] = ["my", "'s"];

/// Second- and third-person possessives.
const MIXED_DETERMINERS: [&str; 6] = ["your", "his", "her", "their", "our", "ur"];

/// Articles and demonstratives. "any" is deliberately absent.
const GENERIC_DETERMINERS: [&str; 10] = [
    "a", "the", "another", "other", "no", "some", "that", "these", "this", "those",
];

/// Determiner inventories, one list per tier.
///
/// Within a tier the lists are tried in order, so put the more common
/// spellings first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeterminerSets {
    /// Determiners marking the author's own relative.
    pub specific: Vec<String>,
    /// Determiners marking someone else's relative.
    pub mixed: Vec<String>,
    /// Determiners marking no particular person.
    pub generic: Vec<String>,
}

impl Default for DeterminerSets {
    fn default() -> Self {
        let owned = |set: &[&str]| set.iter().map(ToString::to_string).collect();
        Self {
            specific: owned(&SPECIFIC_DETERMINERS),
            mixed: owned(&MIXED_DETERMINERS),
            generic: owned(&GENERIC_DETERMINERS),
        }
    }
}

/// A compiled determiner classifier.
///
/// One case-insensitive regex per determiner, compiled once and shared
/// across texts.
#[derive(Debug, Clone)]
pub struct DeterminerClassifier {
    specific: Vec<Regex>,
    mixed: Vec<Regex>,
    generic: Vec<Regex>,
}

impl DeterminerClassifier {
    /// Compile each determiner of each tier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when a determiner is empty.
    pub fn new(sets: &DeterminerSets) -> Result<Self> {
        Ok(Self {
            specific: compile_set(&sets.specific)?,
            mixed: compile_set(&sets.mixed)?,
            generic: compile_set(&sets.generic)?,
        })
    }

    /// Classify the wordform starting at byte offset `start` of `text`.
    ///
    /// Returns the classification together with the determiner as written
    /// in the text (original casing, surrounding whitespace trimmed), or
    /// `(Generic, "")` when no listed determiner is adjacent.
    #[must_use]
    pub fn classify(&self, text: &str, start: usize) -> (Classification, String) {
        let tiers = [
            (Classification::Specific, &self.specific),
            (Classification::Mixed, &self.mixed),
            (Classification::Generic, &self.generic),
        ];
        for (class, regexes) in tiers {
            for regex in regexes {
                for m in regex.find_iter(text) {
                    if m.end() == start {
                        return (class, m.as_str().trim().to_string());
                    }
                    // ends are strictly increasing, nothing later can land
                    // on `start`
                    if m.end() > start {
                        break;
                    }
                }
            }
        }
        (Classification::Generic, String::new())
    }
}

fn compile_set(determiners: &[String]) -> Result<Vec<Regex>> {
    determiners.iter().map(|det| determiner_regex(det)).collect()
}

/// A determiner matches as a whole word followed by whitespace; the clitic
/// "'s" instead attaches to the word before it.
fn determiner_regex(det: &str) -> Result<Regex> {
    if det.is_empty() {
        return Err(Error::invalid_input("determiner must not be empty"));
    }
    let pattern = if det == "'s" {
        String::from(r"'s\s")
    } else {
        format!(r"(?:^|\s){}\s", regex::escape(det))
    };
    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| Error::invalid_input(format!("determiner '{det}' does not compile: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> DeterminerClassifier {
        DeterminerClassifier::new(&DeterminerSets::default()).unwrap()
    }

    #[test]
    fn test_default_inventories() {
        let sets = DeterminerSets::default();
        assert_eq!(sets.specific, ["my", "'s"]);
        assert!(sets.mixed.contains(&"ur".to_string()));
        assert!(sets.generic.contains(&"those".to_string()));
        // "any children" reads as negation, not reference
        assert!(!sets.generic.contains(&"any".to_string()));
    }

    #[test]
    fn test_first_person_possessive_is_specific() {
        let (class, det) = classifier().classify("my sister loves that book", 3);
        assert_eq!(class, Classification::Specific);
        assert_eq!(det, "my");
    }

    #[test]
    fn test_clitic_possessive_is_specific() {
        let (class, det) = classifier().classify("jill's gf said so", 7);
        assert_eq!(class, Classification::Specific);
        assert_eq!(det, "'s");
    }

    #[test]
    fn test_second_person_possessive_is_mixed() {
        let text = "it's important to get along well with your siblings";
        let (class, det) = classifier().classify(text, 43);
        assert_eq!(class, Classification::Mixed);
        assert_eq!(det, "your");
    }

    #[test]
    fn test_article_is_generic() {
        let (class, det) = classifier().classify("she's a mom, you know", 8);
        assert_eq!(class, Classification::Generic);
        assert_eq!(det, "a");
    }

    #[test]
    fn test_no_adjacent_determiner_defaults_to_generic() {
        let (class, det) = classifier().classify("my old mom", 7);
        assert_eq!(class, Classification::Generic);
        assert_eq!(det, "");
    }

    #[test]
    fn test_unlisted_word_defaults_to_generic() {
        let (class, det) = classifier().classify("i don't have any children", 17);
        assert_eq!(class, Classification::Generic);
        assert_eq!(det, "");
    }

    #[test]
    fn test_determiner_keeps_original_casing() {
        let (class, det) = classifier().classify("My mom is here", 3);
        assert_eq!(class, Classification::Specific);
        assert_eq!(det, "My");
    }

    #[test]
    fn test_newline_separated_determiner_is_trimmed() {
        let (class, det) = classifier().classify("a\nmom", 2);
        assert_eq!(class, Classification::Generic);
        assert_eq!(det, "a");
    }

    #[test]
    fn test_specific_tier_wins_over_later_tiers() {
        let sets = DeterminerSets {
            specific: vec!["the".to_string()],
            mixed: vec!["the".to_string()],
            generic: vec!["the".to_string()],
        };
        let classifier = DeterminerClassifier::new(&sets).unwrap();
        let (class, det) = classifier.classify("the mom", 4);
        assert_eq!(class, Classification::Specific);
        assert_eq!(det, "the");
    }

    #[test]
    fn test_empty_determiner_is_rejected() {
        let sets = DeterminerSets {
            specific: vec![String::new()],
            ..DeterminerSets::default()
        };
        let err = DeterminerClassifier::new(&sets).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)), "got {err:?}");
    }
}
