//! Error type shared by lexicon loading and sentence scoring.

use std::io;
use thiserror::Error;

/// Errors that can occur while building a lexicon or scoring a sentence
#[derive(Debug, Error)]
pub enum LexiconError {
    /// A resource line does not follow the six-field TSV layout
    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord {
        /// 1-based line number in the resource
        line: usize,
        /// What was wrong with the line
        reason: String,
    },

    /// The underlying resource could not be read
    #[error("Failed to load lexicon: {0}")]
    Load(#[from] io::Error),

    /// The `term#pos` key is absent from the lexicon
    #[error("No entry for '{term}#{pos}'")]
    NotFound { term: String, pos: String },

    /// The sentence produced no tokens
    #[error("Sentence contains no tokens")]
    EmptySentence,

    /// A configuration file could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Fetching the lexicon over the network failed
    #[error("Network error: {0}")]
    Network(String),
}

impl LexiconError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        LexiconError::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }

    /// Whether this is a lookup miss rather than a real failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, LexiconError::NotFound { .. })
    }
}

impl From<serde_json::Error> for LexiconError {
    fn from(err: serde_json::Error) -> Self {
        LexiconError::Config(format!("JSON error: {}", err))
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, LexiconError>;
