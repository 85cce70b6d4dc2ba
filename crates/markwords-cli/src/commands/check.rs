//! The `markwords check` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::Table;
use markwords_core::{Exercise, QuestionContract};

pub fn execute(
    content: PathBuf,
    select: Option<String>,
    state: Option<String>,
    format: String,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    content_id: Option<String>,
) -> Result<()> {
    let params = markwords_core::parser::parse_content(&content)?;

    let mut exercise = match state {
        Some(state) => {
            let previous: serde_json::Value =
                serde_json::from_str(&state).context("saved state is not valid JSON")?;
            Exercise::resume(params, &previous)?
        }
        None => Exercise::new(params),
    };

    for index in parse_selection(select.as_deref())? {
        anyhow::ensure!(
            index < exercise.words().len(),
            "word index {index} out of range (passage has {} selectable words)",
            exercise.words().len()
        );
        exercise.toggle(index);
    }

    let evaluation = exercise.check_answer();
    let content_id = content_id.unwrap_or_else(|| {
        content
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "content".to_string())
    });

    match format.as_str() {
        "text" => {
            let mut table = Table::new();
            table.set_header(vec!["Score", "Correct", "Wrong", "Missed"]);
            table.add_row(vec![
                format!("{}/{}", evaluation.score, evaluation.max_score),
                evaluation.correct.to_string(),
                evaluation.wrong.to_string(),
                evaluation.missed.to_string(),
            ]);
            emit(
                &format!("{}\n{table}\n", exercise.score_text(&evaluation)),
                output,
            )?;
        }
        "json" => {
            let json = serde_json::json!({
                "scoreText": exercise.score_text(&evaluation),
                "evaluation": evaluation,
                "controls": exercise.controls(),
                "state": exercise.current_state(),
            });
            emit(&serde_json::to_string_pretty(&json)?, output)?;
        }
        "xapi" => {
            let config = markwords_report::load_config_from(config.as_deref())?;
            let statement =
                markwords_report::answered_statement(&exercise, &config, &content_id);
            match output {
                Some(path) => {
                    markwords_report::write_xapi_statement(&statement, &path)?;
                    eprintln!("xAPI statement: {}", path.display());
                }
                None => println!("{}", serde_json::to_string_pretty(&statement)?),
            }
        }
        "html" => match output {
            Some(path) => {
                markwords_report::write_html_snapshot(&exercise, &path)?;
                eprintln!("HTML snapshot: {}", path.display());
            }
            None => println!("{}", markwords_report::generate_html(&exercise)),
        },
        other => anyhow::bail!("unknown format: {other} (expected text, json, xapi or html)"),
    }

    Ok(())
}

fn parse_selection(select: Option<&str>) -> Result<Vec<usize>> {
    let Some(select) = select else {
        return Ok(Vec::new());
    };
    select
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<usize>()
                .with_context(|| format!("invalid word index: {s}"))
        })
        .collect()
}

fn emit(text: &str, output: Option<PathBuf>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(&path, text)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            println!("{text}");
            Ok(())
        }
    }
}
