//! xAPI statement generation.
//!
//! Builds Experience API statements describing a learner's attempt, in the
//! `long-choice` interaction form: every selectable word is a choice and
//! responses list word indices joined by `[,]`.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{json, Value};

use markwords_core::document::plain_text;
use markwords_core::{Exercise, QuestionContract};

use crate::config::ReportConfig;

const VERB_ANSWERED: &str = "http://adlnet.gov/expapi/verbs/answered";
const INTERACTION_TYPE: &str = "http://adlnet.gov/expapi/activities/cmi.interaction";
const RESPONSE_DELIMITER: &str = "[,]";

fn join_indices(indices: &[usize]) -> String {
    indices
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(RESPONSE_DELIMITER)
}

fn language_map(config: &ReportConfig, text: &str) -> Value {
    let mut map = serde_json::Map::new();
    map.insert(config.language.clone(), Value::String(text.to_string()));
    Value::Object(map)
}

fn actor(config: &ReportConfig) -> Option<Value> {
    if config.actor_name.is_none() && config.actor_mbox.is_none() {
        return None;
    }
    let mut agent = json!({ "objectType": "Agent" });
    if let Some(name) = &config.actor_name {
        agent["name"] = json!(name);
    }
    if let Some(mbox) = &config.actor_mbox {
        let mbox = if mbox.starts_with("mailto:") {
            mbox.clone()
        } else {
            format!("mailto:{mbox}")
        };
        agent["mbox"] = json!(mbox);
    }
    Some(agent)
}

fn definition(exercise: &Exercise, config: &ReportConfig) -> Value {
    let choices: Vec<Value> = exercise
        .words()
        .iter()
        .enumerate()
        .map(|(index, word)| {
            json!({
                "id": index.to_string(),
                "description": language_map(config, word.text()),
            })
        })
        .collect();

    json!({
        "description": language_map(config, &plain_text(&exercise.params().task_description)),
        "type": INTERACTION_TYPE,
        "interactionType": "long-choice",
        "correctResponsesPattern": [join_indices(&exercise.answer_indices())],
        "choices": choices,
    })
}

fn statement(verb: &str, verb_display: &str, object: Value, config: &ReportConfig) -> Value {
    let mut statement = json!({
        "id": uuid::Uuid::new_v4().to_string(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "verb": {
            "id": verb,
            "display": language_map(config, verb_display),
        },
        "object": object,
    });
    if let Some(actor) = actor(config) {
        statement["actor"] = actor;
    }
    statement
}

/// The `answered` statement for the exercise's current selections.
///
/// Without a configured actor the statement carries none; the host is
/// expected to fill it in.
pub fn answered_statement(exercise: &Exercise, config: &ReportConfig, content_id: &str) -> Value {
    let raw = exercise.score();
    let max = exercise.max_score();
    let scaled = if max == 0 {
        0.0
    } else {
        raw as f64 / max as f64
    };

    let object = json!({
        "objectType": "Activity",
        "id": config.activity_id(content_id),
        "definition": definition(exercise, config),
    });

    let mut statement = statement(VERB_ANSWERED, "answered", object, config);
    statement["result"] = json!({
        "score": { "min": 0, "raw": raw, "max": max, "scaled": scaled },
        "completion": true,
        "success": raw == max,
        "response": join_indices(&exercise.selected_indices()),
    });
    statement
}

/// Write a statement as pretty JSON.
pub fn write_xapi_statement(statement: &Value, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(statement)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write xAPI statement: {}", path.display()))?;
    Ok(())
}
