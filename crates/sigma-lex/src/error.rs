#![forbid(unsafe_code)]

//! Error types for scanning and configuration.
//!
//! Malformed source text is never an error: unterminated literals and
//! comments are absorbed into a token. Errors are reserved for caller
//! mistakes (bad start offset) and invalid configuration.

use std::fmt;

/// A `tokenize` call was rejected before scanning started.
///
/// When this is returned the lexer's collections are empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// The start offset lies past the end of the text.
    StartOutOfRange { start: usize, len: usize },
    /// The start offset falls inside a multi-byte UTF-8 sequence.
    StartNotCharBoundary { start: usize },
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartOutOfRange { start, len } => {
                write!(f, "start offset {start} is out of range for text of length {len}")
            }
            Self::StartNotCharBoundary { start } => {
                write!(f, "start offset {start} is not on a character boundary")
            }
        }
    }
}

impl std::error::Error for LexError {}

/// Invalid keyword or vocabulary configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A word list contained an empty entry.
    EmptyWord { list: &'static str },
    /// A word list contained an entry with whitespace in it.
    InvalidWord { list: &'static str, word: String },
    /// A configuration document named a language this crate does not scan.
    UnknownLanguage(String),
    /// A configuration document could not be parsed.
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyWord { list } => write!(f, "empty word in list `{list}`"),
            Self::InvalidWord { list, word } => {
                write!(f, "word {word:?} in list `{list}` contains whitespace")
            }
            Self::UnknownLanguage(name) => write!(f, "unknown language `{name}`"),
            Self::Parse(msg) => write!(f, "invalid lexer configuration: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
