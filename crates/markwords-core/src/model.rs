//! Exercise content parameters.
//!
//! These mirror the H5P `content.json` of a Mark the Words exercise. Every
//! field has a default so partial content deserializes.

use serde::{Deserialize, Serialize};

/// Authored parameters of one exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Params {
    /// Instruction shown above the passage (may contain HTML).
    #[serde(default)]
    pub task_description: String,
    /// The passage, answers marked as `*word*`.
    #[serde(default = "default_text_field")]
    pub text_field: String,
    #[serde(default)]
    pub behaviour: Behaviour,
    /// Label of the check button.
    #[serde(default = "default_check_label")]
    pub check_answer_button: String,
    /// Label of the retry button.
    #[serde(default = "default_retry_label")]
    pub try_again_button: String,
    /// Label of the show-solution button.
    #[serde(default = "default_solution_label")]
    pub show_solution_button: String,
    /// Feedback template, see [`crate::scoring::Evaluation::score_text`].
    #[serde(default = "default_score_template")]
    pub score: String,
}

/// Behavioural switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Behaviour {
    #[serde(default = "default_true")]
    pub enable_retry: bool,
    #[serde(default = "default_true")]
    pub enable_solutions_button: bool,
}

impl Default for Behaviour {
    fn default() -> Self {
        Self {
            enable_retry: true,
            enable_solutions_button: true,
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Self {
            task_description: String::new(),
            text_field: default_text_field(),
            behaviour: Behaviour::default(),
            check_answer_button: default_check_label(),
            try_again_button: default_retry_label(),
            show_solution_button: default_solution_label(),
            score: default_score_template(),
        }
    }
}

impl Params {
    /// Parameters with the given passage and all other fields defaulted.
    pub fn with_text(text_field: impl Into<String>) -> Self {
        Self {
            text_field: text_field.into(),
            ..Self::default()
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_text_field() -> String {
    "This is a *nice*, *flexible* content type.".to_string()
}

fn default_check_label() -> String {
    "Check".to_string()
}

fn default_retry_label() -> String {
    "Retry".to_string()
}

fn default_solution_label() -> String {
    "Show solution".to_string()
}

fn default_score_template() -> String {
    "You got @score of @total points".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let params = Params::default();
        assert_eq!(params.text_field, "This is a *nice*, *flexible* content type.");
        assert!(params.behaviour.enable_retry);
        assert!(params.behaviour.enable_solutions_button);
        assert_eq!(params.score, "You got @score of @total points");
    }

    #[test]
    fn partial_json_uses_defaults() {
        let params: Params = serde_json::from_str(
            r#"{"textField": "A *b* c", "behaviour": {"enableRetry": false}}"#,
        )
        .unwrap();
        assert_eq!(params.text_field, "A *b* c");
        assert!(!params.behaviour.enable_retry);
        assert!(params.behaviour.enable_solutions_button);
        assert_eq!(params.check_answer_button, "Check");
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(Params::with_text("x")).unwrap();
        assert_eq!(json["textField"], "x");
        assert_eq!(json["behaviour"]["enableSolutionsButton"], true);
    }
}
