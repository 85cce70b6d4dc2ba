//! Pre-save max-score computation.
//!
//! The authoring tool stores the maximum score next to the content without
//! rendering it. This counts `*word*` markers directly in the raw text field,
//! an approximation of the tokenizer's answer count that needs no document
//! parsing.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::PresaveError;

static ANSWER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*[^*\s]+\*").expect("Invalid answer pattern regex"));

/// What the authoring tool stores alongside the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresaveResult {
    pub max_score: u64,
}

/// Count non-overlapping `*word*` matches in a raw passage.
pub fn count_answers(text_field: &str) -> usize {
    ANSWER_PATTERN.find_iter(text_field).count()
}

/// Reject scores that are negative or not finite.
pub fn validate_score(score: f64) -> Result<u64, PresaveError> {
    if !score.is_finite() || score < 0.0 {
        return Err(PresaveError::InvalidScore(score));
    }
    Ok(score as u64)
}

/// Compute the max score of a content parameter object.
///
/// A missing or non-string `textField` yields 0.
pub fn presave(content: &serde_json::Value) -> Result<PresaveResult, PresaveError> {
    let score = match content.get("textField").and_then(|v| v.as_str()) {
        Some(text) => count_answers(text),
        None => {
            tracing::debug!("content has no textField, max score is 0");
            0
        }
    };

    let max_score = validate_score(score as f64)?;
    Ok(PresaveResult { max_score })
}
