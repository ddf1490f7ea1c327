//! Kinship-term extraction and referential-context classification.
//!
//! `kinterm` locates mentions of family relations in free text, normalizes
//! each to a singular lemma, and classifies how the mention refers:
//! `Specific` ("my mom"), `Mixed` ("your mom"), or `Generic` ("a mom").
//!
//! ```text
//!   TermTable ──compile──> KinshipPattern ──scan──> RawMatch*
//!                                                      │
//!   DeterminerClassifier <──adjacent determiner────────┤
//!                                                      v
//!                                                 Occurrence*
//! ```
//!
//! The vocabulary is a small controlled table (see [`TermTable::builtin`]);
//! matching is case-insensitive, whole-word, and left-to-right without
//! overlap. Offsets on [`Occurrence`] are character offsets, so they line
//! up with how annotation tools count positions rather than with UTF-8
//! bytes.
//!
//! # Example
//!
//! ```
//! use kinterm::{Classification, Extractor};
//!
//! let extractor = Extractor::new()?;
//! let found = extractor.extract("are you close with your mom and dad?");
//!
//! assert_eq!(found.len(), 2);
//! assert_eq!(found[0].lemma, "mom");
//! assert_eq!(found[0].specific, Classification::Mixed);
//! assert_eq!(found[0].determiner, "your");
//! assert_eq!(found[0].offset, 24);
//! assert_eq!(found[1].lemma, "dad");
//! assert_eq!(found[1].specific, Classification::Generic);
//! # Ok::<(), kinterm::Error>(())
//! ```

#![warn(missing_docs)]

pub mod context;
pub mod error;
pub mod filter;
pub mod occurrence;
pub mod offset;
pub mod pattern;
pub mod terms;

pub use context::{DeterminerClassifier, DeterminerSets};
pub use error::{Error, Result};
pub use occurrence::{Classification, Occurrence};
pub use offset::OffsetMap;
pub use pattern::{KinshipPattern, RawMatch, RawMatches};
pub use terms::{TermEntry, TermTable};

/// Convenience re-exports for the common path.
pub mod prelude {
    pub use crate::{Classification, Extractor, Occurrence, TermTable};
}

/// The assembled extraction pipeline.
///
/// Owns a compiled [`KinshipPattern`] and [`DeterminerClassifier`] so the
/// per-text work is a single scan. Build one and reuse it across texts.
#[derive(Debug, Clone)]
pub struct Extractor {
    table: TermTable,
    pattern: KinshipPattern,
    determiners: DeterminerClassifier,
}

impl Extractor {
    /// An extractor over the built-in vocabulary and determiner sets.
    ///
    /// # Errors
    ///
    /// Construction errors are unreachable for the built-in inputs but the
    /// signature matches [`Extractor::from_table`].
    pub fn new() -> Result<Self> {
        Self::from_table(TermTable::builtin().clone())
    }

    /// An extractor over a custom vocabulary with the default determiners.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedTermTable`] when the table cannot be
    /// compiled into a pattern.
    pub fn from_table(table: TermTable) -> Result<Self> {
        Self::with_determiners(table, &DeterminerSets::default())
    }

    /// An extractor over a custom vocabulary and custom determiner sets.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedTermTable`] when the table cannot be
    /// compiled, or [`Error::InvalidInput`] when a determiner is empty.
    pub fn with_determiners(table: TermTable, sets: &DeterminerSets) -> Result<Self> {
        let pattern = KinshipPattern::compile(&table)?;
        let determiners = DeterminerClassifier::new(sets)?;
        Ok(Self {
            table,
            pattern,
            determiners,
        })
    }

    /// Locate and classify every kinship mention in `text`.
    ///
    /// Occurrences come back in text order with character offsets.
    #[must_use]
    pub fn extract(&self, text: &str) -> Vec<Occurrence> {
        let offsets = OffsetMap::new(text);
        self.pattern
            .raw_matches(text)
            .map(|raw| {
                let (specific, determiner) = self.determiners.classify(text, raw.start);
                Occurrence {
                    lemma: raw.lemma,
                    surface_form: raw.surface,
                    singular: raw.singular,
                    specific,
                    offset: offsets.char_offset(raw.start),
                    determiner,
                }
            })
            .collect()
    }

    /// The vocabulary this extractor was built from.
    #[must_use]
    pub fn table(&self) -> &TermTable {
        &self.table
    }

    /// The compiled pattern, mostly useful for diagnostics.
    #[must_use]
    pub fn pattern(&self) -> &KinshipPattern {
        &self.pattern
    }
}
