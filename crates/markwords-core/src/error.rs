//! Core error types.
//!
//! Malformed answer markers are never errors; they are stripped while
//! tokenizing. The only fatal conditions are a corrupt saved state on resume
//! and content files that cannot be read as exercise parameters.

use thiserror::Error;

/// Errors raised while restoring a previously saved learner state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// An entry of the saved state is not a valid word index.
    #[error("stored user state is invalid: entry {position} ({value}) is not a word index below {word_count}")]
    Corrupt {
        position: usize,
        value: String,
        word_count: usize,
    },
}

impl StateError {
    pub(crate) fn corrupt(position: usize, value: &serde_json::Value, word_count: usize) -> Self {
        StateError::Corrupt {
            position,
            value: value.to_string(),
            word_count,
        }
    }
}

/// Errors raised while loading exercise content.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The file extension does not name a supported content format.
    #[error("unsupported content format: {0} (expected .json or .toml)")]
    UnsupportedFormat(String),

    /// The content parsed but is not an exercise parameter object.
    #[error("invalid content parameters: {0}")]
    InvalidParams(String),
}
