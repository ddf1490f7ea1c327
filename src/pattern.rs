//! Pattern synthesis over a term table.
//!
//! Each lemma family becomes one alternative of a single case-insensitive
//! regex. A family's plural row decides the shape of its alternative:
//!
//! ```text
//! sister, sisters   ->   (?:^|\s)((sister)s?)(?:$|[\s.,;:?!)])
//! child, children   ->   (?:^|\s)((child)(?:ren)?)(?:$|[\s.,;:?!)])
//! wife              ->   (?:^|\s)(wife)(?:$|[\s.,;:?!)])
//! ```
//!
//! The outer group spans the whole wordform, the inner group just the stem;
//! irregular terms carry a single group doing both jobs. Matching consumes
//! the boundary characters around a hit, so two occurrences cannot share
//! the whitespace between them ("mom mom" yields one match).

use regex::{Regex, RegexBuilder};

use crate::error::{Error, Result};
use crate::terms::TermTable;

/// Terms matched verbatim, with no suffix synthesis.
const IRREGULAR_TERMS: [&str; 3] = ["wife", "wives", "s/o"];

// ============================================================================
// Compilation
// ============================================================================

/// Recognized plural suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PluralSuffix {
    /// "sister" / "sisters"
    S,
    /// "child" / "children"
    Ren,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BranchKind {
    /// Singular row seen, plural row still pending.
    Bare,
    Plural(PluralSuffix),
    Irregular,
}

/// One family while the table is being folded into a pattern.
#[derive(Debug)]
struct BranchBuilder {
    term: String,
    kind: BranchKind,
}

/// Capture-group indices of one finished alternative.
#[derive(Debug, Clone, Copy)]
struct Branch {
    /// Group spanning the stem.
    inner: usize,
    /// Group spanning the whole wordform; absent for irregular terms.
    outer: Option<usize>,
}

/// A compiled kinship matcher.
///
/// Built once from a [`TermTable`] and reused across texts. Matching is
/// case-insensitive and scans left to right without overlap.
///
/// ```
/// use kinterm::{KinshipPattern, TermTable};
///
/// let pattern = KinshipPattern::compile(TermTable::builtin()).unwrap();
/// let hits: Vec<_> = pattern.raw_matches("my sisters and my brother").collect();
/// assert_eq!(hits[0].lemma, "sister");
/// assert!(!hits[0].singular);
/// assert_eq!(hits[1].lemma, "brother");
/// ```
#[derive(Debug, Clone)]
pub struct KinshipPattern {
    regex: Regex,
    pattern: String,
    branches: Vec<Branch>,
}

impl KinshipPattern {
    /// Fold a term table into one alternation.
    ///
    /// Rows are processed in table order. A row whose last character (or
    /// last three characters) strip back to an earlier singular row is that
    /// row's plural; anything in [`IRREGULAR_TERMS`] is matched verbatim;
    /// everything else opens a new family and must be followed by a plural
    /// row later in the table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedTermTable`] when a plural row carries an
    /// unrecognized suffix, or when a family never receives its plural row
    /// (which is also what a plural listed before its singular looks like).
    pub fn compile(table: &TermTable) -> Result<Self> {
        if table.is_empty() {
            return Err(Error::malformed_term_table("term table has no rows"));
        }

        let mut builders: Vec<BranchBuilder> = Vec::new();
        for entry in table.entries() {
            let term = entry.term.as_str();

            if let Some(idx) = drop_suffix(term, 1).and_then(|s| bare_index(&builders, s)) {
                if !term.ends_with('s') {
                    return Err(Error::malformed_term_table(format!(
                        "term '{term}' does not extend '{}' with a recognized plural suffix",
                        builders[idx].term
                    )));
                }
                builders[idx].kind = BranchKind::Plural(PluralSuffix::S);
                continue;
            }
            if let Some(idx) = drop_suffix(term, 3).and_then(|s| bare_index(&builders, s)) {
                if !term.ends_with("ren") {
                    return Err(Error::malformed_term_table(format!(
                        "term '{term}' does not extend '{}' with a recognized plural suffix",
                        builders[idx].term
                    )));
                }
                builders[idx].kind = BranchKind::Plural(PluralSuffix::Ren);
                continue;
            }
            if IRREGULAR_TERMS.contains(&term) {
                builders.push(BranchBuilder {
                    term: term.to_string(),
                    kind: BranchKind::Irregular,
                });
                continue;
            }
            builders.push(BranchBuilder {
                term: term.to_string(),
                kind: BranchKind::Bare,
            });
        }

        let mut fragments = Vec::with_capacity(builders.len());
        let mut branches = Vec::with_capacity(builders.len());
        let mut next_group = 1;
        for builder in &builders {
            match builder.kind {
                BranchKind::Bare => {
                    return Err(Error::malformed_term_table(format!(
                        "unpaired term '{}': every singular needs a following plural row",
                        builder.term
                    )));
                }
                BranchKind::Plural(suffix) => {
                    fragments.push(plural_fragment(&builder.term, suffix));
                    branches.push(Branch {
                        inner: next_group + 1,
                        outer: Some(next_group),
                    });
                    next_group += 2;
                }
                BranchKind::Irregular => {
                    fragments.push(irregular_fragment(&builder.term));
                    branches.push(Branch {
                        inner: next_group,
                        outer: None,
                    });
                    next_group += 1;
                }
            }
        }

        let pattern = fragments.join("|");
        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| Error::malformed_term_table(format!("pattern does not compile: {e}")))?;
        log::debug!("compiled {} alternatives from {} rows", branches.len(), table.len());

        Ok(Self {
            regex,
            pattern,
            branches,
        })
    }

    /// The synthesized regex source.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Lazily scan `text` for kinship wordforms.
    ///
    /// Offsets in the yielded matches are byte offsets into `text`.
    pub fn raw_matches<'p, 't>(&'p self, text: &'t str) -> RawMatches<'p, 't> {
        RawMatches {
            branches: &self.branches,
            caps: self.regex.captures_iter(text),
        }
    }
}

/// The term minus its trailing `n` characters, when it is at least that long.
fn drop_suffix(term: &str, n: usize) -> Option<&str> {
    term.char_indices().rev().nth(n - 1).map(|(i, _)| &term[..i])
}

/// Index of the first family still waiting for its plural whose term is `stem`.
fn bare_index(builders: &[BranchBuilder], stem: &str) -> Option<usize> {
    builders
        .iter()
        .position(|b| b.kind == BranchKind::Bare && b.term == stem)
}

fn plural_fragment(stem: &str, suffix: PluralSuffix) -> String {
    let stem = regex::escape(stem);
    match suffix {
        PluralSuffix::S => format!(r"(?:^|\s)(({stem})s?)(?:$|[\s.,;:?!)])"),
        PluralSuffix::Ren => format!(r"(?:^|\s)(({stem})(?:ren)?)(?:$|[\s.,;:?!)])"),
    }
}

fn irregular_fragment(term: &str) -> String {
    format!(r"(?:^|\s)({})(?:$|[\s.,;:?!)])", regex::escape(term))
}

// ============================================================================
// Matching
// ============================================================================

/// One wordform located in a text, before determiner classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch {
    /// Canonical singular lemma ("wife" for a hit on "wives").
    pub lemma: String,
    /// Matched wordform, lowercased.
    pub surface: String,
    /// Byte offset of the wordform's first character.
    pub start: usize,
    /// Byte offset one past the wordform's last character.
    pub end: usize,
    /// True when the wordform is the lemma itself.
    pub singular: bool,
}

/// Iterator over [`RawMatch`]es, returned by [`KinshipPattern::raw_matches`].
pub struct RawMatches<'p, 't> {
    branches: &'p [Branch],
    caps: regex::CaptureMatches<'p, 't>,
}

impl Iterator for RawMatches<'_, '_> {
    type Item = RawMatch;

    fn next(&mut self) -> Option<RawMatch> {
        loop {
            let caps = self.caps.next()?;
            // Every alternative carries a capture group, so exactly one
            // branch participates in any match.
            let found = self
                .branches
                .iter()
                .find_map(|b| caps.get(b.inner).map(|inner| (b, inner)));
            let (branch, inner) = match found {
                Some(found) => found,
                None => continue,
            };
            let span = branch.outer.and_then(|g| caps.get(g)).unwrap_or(inner);
            let surface = span.as_str().to_lowercase();
            let lemma = if surface == "wives" {
                "wife".to_string()
            } else {
                inner.as_str().to_lowercase()
            };
            let singular = surface == lemma;
            return Some(RawMatch {
                lemma,
                surface,
                start: span.start(),
                end: span.end(),
                singular,
            });
        }
    }
}


#[cfg(test)]
mod proptests {
    use once_cell::sync::Lazy;
    use proptest::prelude::*;

    use super::*;

    static PATTERN: Lazy<KinshipPattern> =
        Lazy::new(|| KinshipPattern::compile(TermTable::builtin()).expect("builtin pattern compiles"));

    proptest! {
        #[test]
        fn scan_never_panics(text in ".{0,120}") {
            let _ = PATTERN.raw_matches(&text).count();
        }

        #[test]
        fn spans_are_ordered_and_disjoint(text in "[ -~\\t\\r\\n]{0,160}") {
            let mut prev_end = 0;
            for hit in PATTERN.raw_matches(&text) {
                prop_assert!(hit.start < hit.end);
                prop_assert!(hit.start >= prev_end);
                prev_end = hit.end;
            }
        }

        #[test]
        fn ascii_matches_are_table_wordforms(text in "[ -~\\t\\r\\n]{0,160}") {
            let table = TermTable::builtin();
            for hit in PATTERN.raw_matches(&text) {
                prop_assert_eq!(&text[hit.start..hit.end].to_lowercase(), &hit.surface);
                let family = table.surface_forms(&hit.lemma);
                prop_assert!(family.is_some(), "unknown lemma {}", hit.lemma);
                prop_assert!(family.unwrap().contains(&hit.surface));
                prop_assert_eq!(hit.singular, hit.surface == hit.lemma);
            }
        }
    }
}
