//! Term table loading and vocabulary views.
//!
//! A term table is an ordered list of surface forms, one row per form,
//! grouping singular/plural variants under a canonical lemma:
//!
//! ```text
//! term,lemma,group,gender_neutral,masculine
//! sister,sister,sibling,False,False
//! sisters,sister,sibling,False,False
//! child,child,child,True,False
//! children,child,child,True,False
//! wife,wife,partner,False,False
//! wives,wife,partner,False,False
//! s/o,s/o,partner,True,False
//! ```
//!
//! Row order matters: pattern compilation recognizes a plural row by
//! reducing it ("sisters" → "sister") and looking the stem up among rows
//! already seen, so every singular must precede its plural.
//!
//! Beyond driving the pattern compiler, the table exposes the aggregation
//! views downstream stages key on: group membership, gender flags, and the
//! plural form of each lemma.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Expected header of a term table file.
const HEADER: [&str; 5] = ["term", "lemma", "group", "gender_neutral", "masculine"];

/// One surface form in the kinship vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermEntry {
    /// Surface form as it appears in text ("sisters").
    pub term: String,
    /// Canonical singular lemma ("sister").
    pub lemma: String,
    /// Kinship group the lemma belongs to ("sibling").
    pub group: String,
    /// True when the term does not encode a gender ("sibling", "parent").
    pub gender_neutral: bool,
    /// True for masculine terms ("brother", "dad").
    pub masculine: bool,
}

/// An ordered, validated kinship vocabulary.
///
/// Construction validates group declarations once; the pattern compiler
/// performs its own ordering checks on top. After construction the table
/// is immutable.
#[derive(Debug, Clone)]
pub struct TermTable {
    entries: Vec<TermEntry>,
    /// lemma -> surface forms of its family, in table order.
    families: BTreeMap<String, Vec<String>>,
    /// group -> lemmas declared in it.
    groups: BTreeMap<String, BTreeSet<String>>,
    /// lemma -> its declared group.
    lemma_groups: BTreeMap<String, String>,
    gender_neutral: BTreeSet<String>,
    masculine: BTreeSet<String>,
    /// lemma -> plural surface form (the lemma itself when none exists).
    plurals: BTreeMap<String, String>,
}

impl TermTable {
    /// Build a table from rows, validating group declarations.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingLemmaGroup`] when a row declares no group or
    /// when two rows of the same family declare different groups.
    pub fn new(entries: Vec<TermEntry>) -> Result<Self> {
        let mut families: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut groups: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut lemma_groups: BTreeMap<String, String> = BTreeMap::new();
        let mut gender_neutral = BTreeSet::new();
        let mut masculine = BTreeSet::new();
        let mut plurals: BTreeMap<String, String> = BTreeMap::new();

        for entry in &entries {
            if entry.group.is_empty() {
                return Err(Error::missing_lemma_group(format!(
                    "term '{}' declares no group",
                    entry.term
                )));
            }
            if let Some(existing) = lemma_groups.get(&entry.lemma) {
                if existing != &entry.group {
                    return Err(Error::missing_lemma_group(format!(
                        "term '{}' declares group '{}' but lemma '{}' already belongs to '{}'",
                        entry.term, entry.group, entry.lemma, existing
                    )));
                }
            } else {
                lemma_groups.insert(entry.lemma.clone(), entry.group.clone());
            }

            families
                .entry(entry.lemma.clone())
                .or_default()
                .push(entry.term.clone());
            groups
                .entry(entry.group.clone())
                .or_default()
                .insert(entry.lemma.clone());

            if entry.gender_neutral {
                gender_neutral.insert(entry.lemma.clone());
            }
            if entry.masculine {
                masculine.insert(entry.lemma.clone());
            }

            // First differing surface form is the plural ("wives" for "wife").
            if entry.term != entry.lemma && !plurals.contains_key(&entry.lemma) {
                plurals.insert(entry.lemma.clone(), entry.term.clone());
            }
        }

        // Lemmas with no plural row ("s/o") pluralize to themselves.
        for lemma in families.keys() {
            if !plurals.contains_key(lemma) {
                plurals.insert(lemma.clone(), lemma.clone());
            }
        }

        log::debug!(
            "term table: {} rows, {} families, {} groups",
            entries.len(),
            families.len(),
            groups.len()
        );

        Ok(Self {
            entries,
            families,
            groups,
            lemma_groups,
            gender_neutral,
            masculine,
            plurals,
        })
    }

    /// Parse a table from CSV-shaped text (see the module docs for the
    /// format).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] on a bad header, wrong column count, or an
    /// unreadable boolean cell, and the errors of [`TermTable::new`].
    pub fn parse(content: &str) -> Result<Self> {
        let mut lines = content.lines().enumerate();

        let header = loop {
            match lines.next() {
                Some((_, line)) if line.trim().is_empty() => continue,
                Some((_, line)) => break line,
                None => return Err(Error::parse("term table is empty")),
            }
        };
        let columns: Vec<&str> = header.split(',').map(str::trim).collect();
        if columns != HEADER {
            return Err(Error::parse(format!(
                "expected header '{}', got '{}'",
                HEADER.join(","),
                header.trim()
            )));
        }

        let mut entries = Vec::new();
        for (idx, line) in lines {
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            if fields.len() != HEADER.len() {
                return Err(Error::parse(format!(
                    "line {}: expected {} fields, got {}",
                    idx + 1,
                    HEADER.len(),
                    fields.len()
                )));
            }
            entries.push(TermEntry {
                term: fields[0].to_string(),
                lemma: fields[1].to_string(),
                group: fields[2].to_string(),
                gender_neutral: parse_bool(fields[3], idx + 1)?,
                masculine: parse_bool(fields[4], idx + 1)?,
            });
        }

        Self::new(entries)
    }

    /// Load a table from a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the file cannot be read, plus the errors
    /// of [`TermTable::parse`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        log::debug!("loading term table from {}", path.display());
        Self::parse(&content)
    }

    /// The built-in English kinship vocabulary used by the original study:
    /// parent, child, sibling, and partner groups, with the irregulars
    /// wife/wives and "s/o".
    #[must_use]
    pub fn builtin() -> &'static TermTable {
        static BUILTIN: Lazy<TermTable> =
            Lazy::new(|| TermTable::parse(BUILTIN_TABLE).expect("builtin term table is valid"));
        &BUILTIN
    }

    /// All rows, in table order.
    #[must_use]
    pub fn entries(&self) -> &[TermEntry] {
        &self.entries
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All lemmas, in lexicographic order.
    pub fn lemmas(&self) -> impl Iterator<Item = &str> {
        self.families.keys().map(String::as_str)
    }

    /// Surface forms of the lemma's family, in table order.
    #[must_use]
    pub fn surface_forms(&self, lemma: &str) -> Option<&[String]> {
        self.families.get(lemma).map(Vec::as_slice)
    }

    /// Group -> lemma-set view over the whole table.
    #[must_use]
    pub fn groups(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.groups
    }

    /// The group a lemma was declared in.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AmbiguousGroupMembership`] when the lemma appears in
    /// no group; aggregation over occurrence records cannot proceed without
    /// one.
    pub fn group_of(&self, lemma: &str) -> Result<&str> {
        self.lemma_groups
            .get(lemma)
            .map(String::as_str)
            .ok_or_else(|| {
                Error::ambiguous_group_membership(format!(
                    "no kinship group declared for '{lemma}'"
                ))
            })
    }

    /// Lemmas flagged gender-neutral.
    #[must_use]
    pub fn gender_neutral(&self) -> &BTreeSet<String> {
        &self.gender_neutral
    }

    /// Lemmas flagged masculine.
    #[must_use]
    pub fn masculine(&self) -> &BTreeSet<String> {
        &self.masculine
    }

    /// True when the lemma is flagged gender-neutral.
    #[must_use]
    pub fn is_gender_neutral(&self, lemma: &str) -> bool {
        self.gender_neutral.contains(lemma)
    }

    /// True when the lemma is flagged masculine.
    #[must_use]
    pub fn is_masculine(&self, lemma: &str) -> bool {
        self.masculine.contains(lemma)
    }

    /// The plural surface form of a lemma, or the lemma itself when the
    /// table lists none ("s/o").
    #[must_use]
    pub fn plural_of(&self, lemma: &str) -> Option<&str> {
        self.plurals.get(lemma).map(String::as_str)
    }
}

fn parse_bool(field: &str, line: usize) -> Result<bool> {
    if field.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if field.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(Error::parse(format!(
            "line {line}: expected True or False, got '{field}'"
        )))
    }
}

/// The study's vocabulary. Singulars precede plurals within each family.
const BUILTIN_TABLE: &str = "\
term,lemma,group,gender_neutral,masculine
mom,mom,parent,False,False
moms,mom,parent,False,False
mother,mother,parent,False,False
mothers,mother,parent,False,False
dad,dad,parent,False,True
dads,dad,parent,False,True
father,father,parent,False,True
fathers,father,parent,False,True
parent,parent,parent,True,False
parents,parent,parent,True,False
son,son,child,False,True
sons,son,child,False,True
daughter,daughter,child,False,False
daughters,daughter,child,False,False
child,child,child,True,False
children,child,child,True,False
kid,kid,child,True,False
kids,kid,child,True,False
brother,brother,sibling,False,True
brothers,brother,sibling,False,True
sister,sister,sibling,False,False
sisters,sister,sibling,False,False
sibling,sibling,sibling,True,False
siblings,sibling,sibling,True,False
husband,husband,partner,False,True
husbands,husband,partner,False,True
wife,wife,partner,False,False
wives,wife,partner,False,False
boyfriend,boyfriend,partner,False,True
boyfriends,boyfriend,partner,False,True
girlfriend,girlfriend,partner,False,False
girlfriends,girlfriend,partner,False,False
bf,bf,partner,False,True
bfs,bf,partner,False,True
gf,gf,partner,False,False
gfs,gf,partner,False,False
partner,partner,partner,True,False
partners,partner,partner,True,False
spouse,spouse,partner,True,False
spouses,spouse,partner,True,False
significant other,significant other,partner,True,False
significant others,significant other,partner,True,False
s/o,s/o,partner,True,False
";
