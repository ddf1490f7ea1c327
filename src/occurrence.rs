//! Occurrence records and referential-context classification.

use serde::{Deserialize, Serialize};

/// Referential-context classification of a kinship-term occurrence.
///
/// Decided by the determiner immediately preceding the term:
/// - "my mom" / "jill's mom" designate the speaker's (or a named person's)
///   own relation,
/// - "your mom" designates someone else's relation and reads differently
///   depending on context,
/// - "a mom" or an unmodified term is generic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// First-person possessive context ("my", possessive-'s).
    Specific,
    /// Second/third-person possessive context ("your", "his", ...).
    Mixed,
    /// Indefinite, demonstrative, or bare context.
    Generic,
}

impl Classification {
    /// Convert to the lowercase label used in serialized records.
    #[must_use]
    pub fn as_label(&self) -> &'static str {
        match self {
            Classification::Specific => "specific",
            Classification::Mixed => "mixed",
            Classification::Generic => "generic",
        }
    }

    /// Parse from a label string. Unknown labels fall back to `Generic`.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "specific" => Classification::Specific,
            "mixed" => Classification::Mixed,
            _ => Classification::Generic,
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_label())
    }
}

/// One located, normalized, and classified kinship-term usage.
///
/// Created by the span matcher and enriched by the determiner classifier;
/// the engine keeps no state about an occurrence after handing it out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    /// Canonical singular lemma ("sister" for "sisters", "wife" for "wives").
    pub lemma: String,
    /// Matched wordform, lowercased ("sisters", "wives").
    pub surface_form: String,
    /// True iff the matched wordform equals the lemma exactly.
    pub singular: bool,
    /// Referential-context classification.
    pub specific: Classification,
    /// Zero-based character index of the matched span's first character.
    pub offset: usize,
    /// The determiner that triggered the classification, trimmed of
    /// surrounding whitespace and in its original casing; empty when no
    /// adjacent determiner was found.
    pub determiner: String,
}

impl Occurrence {
    /// Length of the matched wordform in characters.
    ///
    /// Together with [`Occurrence::offset`] this identifies the span a
    /// downstream scorer would mask out.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.surface_form.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_labels_roundtrip() {
        for class in [
            Classification::Specific,
            Classification::Mixed,
            Classification::Generic,
        ] {
            assert_eq!(Classification::from_label(class.as_label()), class);
        }
    }

    #[test]
    fn test_classification_label_casing() {
        assert_eq!(Classification::from_label("SPECIFIC"), Classification::Specific);
        assert_eq!(Classification::from_label("Mixed"), Classification::Mixed);
        // Unknown labels read as generic, mirroring the no-determiner default.
        assert_eq!(Classification::from_label("possessive"), Classification::Generic);
    }

    #[test]
    fn test_occurrence_serialization() {
        let occ = Occurrence {
            lemma: "sister".to_string(),
            surface_form: "sisters".to_string(),
            singular: false,
            specific: Classification::Mixed,
            offset: 5,
            determiner: "your".to_string(),
        };

        let json = serde_json::to_string(&occ).unwrap();
        assert!(json.contains("\"specific\":\"mixed\""));
        assert!(json.contains("\"surface_form\":\"sisters\""));

        let back: Occurrence = serde_json::from_str(&json).unwrap();
        assert_eq!(back, occ);
    }

    #[test]
    fn test_len_chars_counts_characters() {
        let occ = Occurrence {
            lemma: "s/o".to_string(),
            surface_form: "s/o".to_string(),
            singular: true,
            specific: Classification::Specific,
            offset: 0,
            determiner: "my".to_string(),
        };
        assert_eq!(occ.len_chars(), 3);
    }
}
