//! Editor error types.

use thiserror::Error;

/// Errors raised while computing the pre-save max score.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PresaveError {
    /// The computed score is negative or not a finite number.
    #[error("cannot compute max score: got {0}")]
    InvalidScore(f64),
}

/// Errors raised while upgrading content parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpgradeError {
    /// The version string is not `major.minor`.
    #[error("invalid content version: {0}")]
    InvalidVersion(String),

    /// Upgrades only apply to parameter objects.
    #[error("content parameters must be a JSON object")]
    NotAnObject,
}
