//! Content file loader.
//!
//! Loads exercise parameters from JSON (H5P `content.json`) or TOML files
//! and directories, and validates them.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::error::ContentError;
use crate::marker;
use crate::model::Params;
use crate::tokenizer::{candidates, tokenize};

/// Content formats recognised by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFormat {
    Json,
    Toml,
}

impl ContentFormat {
    /// Format for a path. Files without an extension are read as JSON.
    pub fn from_path(path: &Path) -> Result<Self, ContentError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            None | Some("json") => Ok(ContentFormat::Json),
            Some("toml") => Ok(ContentFormat::Toml),
            Some(other) => Err(ContentError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Parse a single content file.
pub fn parse_content(path: &Path) -> Result<Params> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read content file: {}", path.display()))?;

    parse_content_str(&content, path)
}

/// Parse content text; `source_path` selects the format and labels errors.
pub fn parse_content_str(content: &str, source_path: &Path) -> Result<Params> {
    let params = match ContentFormat::from_path(source_path)? {
        ContentFormat::Json => {
            let value: serde_json::Value = serde_json::from_str(content)
                .with_context(|| format!("failed to parse JSON: {}", source_path.display()))?;
            if !value.is_object() {
                return Err(ContentError::InvalidParams(format!(
                    "{} is not a JSON object",
                    source_path.display()
                ))
                .into());
            }
            serde_json::from_value(value)
                .with_context(|| format!("invalid parameters: {}", source_path.display()))?
        }
        ContentFormat::Toml => toml::from_str(content)
            .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?,
    };
    Ok(params)
}

/// Recursively load every `.json` / `.toml` content file under a directory.
pub fn load_content_directory(dir: &Path) -> Result<Vec<(PathBuf, Params)>> {
    let mut found = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            found.extend(load_content_directory(&path)?);
        } else if path
            .extension()
            .is_some_and(|ext| ext == "json" || ext == "toml")
        {
            match parse_content(&path) {
                Ok(params) => found.push((path, params)),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(found)
}

/// A warning from content validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Index of the offending word (if applicable).
    pub word: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Validate parameters for common authoring mistakes.
pub fn validate_params(params: &Params) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if params.text_field.trim().is_empty() {
        warnings.push(ValidationWarning {
            word: None,
            message: "text field is empty".into(),
        });
        return warnings;
    }

    let tokens = tokenize(&params.text_field);
    let mut answers = 0;
    for (index, candidate) in candidates(&tokens).enumerate() {
        let marked = marker::parse(&candidate.body);
        if marked.is_answer {
            answers += 1;
        }
        if marked.stray_markers > 0 {
            warnings.push(ValidationWarning {
                word: Some(index),
                message: format!(
                    "unmatched answer marker in '{}' will be ignored",
                    candidate.body
                ),
            });
        }
    }

    if answers == 0 {
        warnings.push(ValidationWarning {
            word: None,
            message: "no answers marked; selecting nothing will be scored as correct".into(),
        });
    }

    if !params.score.contains("@score") {
        warnings.push(ValidationWarning {
            word: None,
            message: "score template does not contain @score".into(),
        });
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_JSON: &str = r#"{
  "taskDescription": "<p>Click the adjectives</p>",
  "textField": "The *quick* brown fox jumps over the *lazy* dog.",
  "behaviour": { "enableRetry": true, "enableSolutionsButton": false },
  "score": "@score of @total"
}"#;

    #[test]
    fn parse_valid_json() {
        let params = parse_content_str(VALID_JSON, &PathBuf::from("content.json")).unwrap();
        assert_eq!(params.task_description, "<p>Click the adjectives</p>");
        assert!(!params.behaviour.enable_solutions_button);
        assert!(validate_params(&params).is_empty());
    }

    #[test]
    fn parse_toml() {
        let toml = r#"
taskDescription = "Find the nouns"
textField = "A *cat* sat."

[behaviour]
enableRetry = false
"#;
        let params = parse_content_str(toml, &PathBuf::from("exercise.toml")).unwrap();
        assert_eq!(params.text_field, "A *cat* sat.");
        assert!(!params.behaviour.enable_retry);
        assert!(params.behaviour.enable_solutions_button);
    }

    #[test]
    fn rejects_unknown_extension() {
        let result = parse_content_str("x", &PathBuf::from("content.yaml"));
        assert!(result.unwrap_err().to_string().contains("unsupported"));
    }

    #[test]
    fn rejects_non_object_json() {
        let result = parse_content_str("[1, 2]", &PathBuf::from("content.json"));
        assert!(result.is_err());
    }

    #[test]
    fn parse_malformed_json() {
        let result = parse_content_str("{ not json", &PathBuf::from("bad.json"));
        assert!(result.is_err());
    }

    #[test]
    fn validate_flags_stray_markers_and_no_answers() {
        let params = Params::with_text("An *unclosed marker here");
        let warnings = validate_params(&params);
        assert!(warnings
            .iter()
            .any(|w| w.word == Some(1) && w.message.contains("unmatched")));
        assert!(warnings.iter().any(|w| w.message.contains("no answers")));
    }

    #[test]
    fn validate_empty_text() {
        let warnings = validate_params(&Params::with_text("  "));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("empty"));
    }

    #[test]
    fn validate_score_template() {
        let mut params = Params::with_text("*a*");
        params.score = "Well done".into();
        let warnings = validate_params(&params);
        assert!(warnings.iter().any(|w| w.message.contains("@score")));
    }

    #[test]
    fn load_directory_skips_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("good.json"), VALID_JSON).unwrap();
        std::fs::write(dir.path().join("bad.json"), "{ nope").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(nested.join("more.toml"), "textField = \"*x* y\"").unwrap();

        let found = load_content_directory(dir.path()).unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.iter().any(|(p, _)| p.ends_with("good.json")));
        assert!(found.iter().any(|(_, params)| params.text_field == "*x* y"));
    }
}
