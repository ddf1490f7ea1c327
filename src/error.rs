//! Error types for kinterm.

use thiserror::Error;

/// Result type for kinterm operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for kinterm operations.
///
/// Every table or pattern problem is reported during construction, so a
/// caller validates its vocabulary once and then extracts from any number
/// of texts without a fallible path.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A term row's group is undefined or inconsistent with its family.
    #[error("Missing lemma group: {0}")]
    MissingLemmaGroup(String),

    /// A term was never finalized into a complete pattern branch.
    #[error("Malformed term table: {0}")]
    MalformedTermTable(String),

    /// A lemma belongs to no declared group.
    #[error("Ambiguous group membership: {0}")]
    AmbiguousGroupMembership(String),

    /// Invalid configuration provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Term table text could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a missing lemma group error.
    pub fn missing_lemma_group(msg: impl Into<String>) -> Self {
        Error::MissingLemmaGroup(msg.into())
    }

    /// Create a malformed term table error.
    pub fn malformed_term_table(msg: impl Into<String>) -> Self {
        Error::MalformedTermTable(msg.into())
    }

    /// Create an ambiguous group membership error.
    pub fn ambiguous_group_membership(msg: impl Into<String>) -> Self {
        Error::AmbiguousGroupMembership(msg.into())
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }
}
