//! HTML snapshot generator.
//!
//! Produces a self-contained HTML file with all CSS inlined, showing the
//! passage in its current state together with the feedback and counts.

use anyhow::{Context, Result};
use std::path::Path;

use markwords_core::document::plain_text;
use markwords_core::{Exercise, QuestionContract};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML snapshot of an exercise.
pub fn generate_html(exercise: &Exercise) -> String {
    let params = exercise.params();
    let title = plain_text(&params.task_description);
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    if title.trim().is_empty() {
        html.push_str("<title>Mark the Words</title>\n");
    } else {
        html.push_str(&format!(
            "<title>Mark the Words: {}</title>\n",
            html_escape(title.trim())
        ));
    }
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Task and passage
    html.push_str("<main class=\"h5p-mark-the-words\">\n");
    if !params.task_description.trim().is_empty() {
        html.push_str(&format!(
            "<div class=\"h5p-question-introduction\">{}</div>\n",
            params.task_description
        ));
    }
    html.push_str(&exercise.render_html());
    html.push('\n');

    // Feedback
    if let Some(evaluation) = exercise.feedback() {
        let class = if evaluation.is_fully_correct() {
            "pass"
        } else {
            "fail"
        };
        html.push_str(&format!(
            "<p class=\"feedback {}\">{}</p>\n",
            class,
            html_escape(&exercise.score_text(evaluation))
        ));
    }

    // Buttons on offer
    let controls = exercise.controls();
    let buttons: Vec<&str> = [
        (controls.check_answer, params.check_answer_button.as_str()),
        (controls.try_again, params.try_again_button.as_str()),
        (controls.show_solution, params.show_solution_button.as_str()),
    ]
    .into_iter()
    .filter_map(|(shown, label)| shown.then_some(label))
    .collect();
    if !buttons.is_empty() {
        html.push_str("<div class=\"buttons\">");
        for label in buttons {
            html.push_str(&format!("<button disabled>{}</button>", html_escape(label)));
        }
        html.push_str("</div>\n");
    }
    html.push_str("</main>\n");

    // Counts
    let evaluation = exercise.evaluate();
    html.push_str("<section class=\"summary\">\n");
    html.push_str("<table>\n");
    html.push_str("<thead><tr><th>Score</th><th>Correct</th><th>Wrong</th><th>Missed</th></tr></thead>\n");
    html.push_str(&format!(
        "<tbody><tr><td>{}/{}</td><td>{}</td><td>{}</td><td>{}</td></tr></tbody>\n",
        exercise.score(),
        exercise.max_score(),
        evaluation.correct,
        evaluation.wrong,
        evaluation.missed,
    ));
    html.push_str("</table>\n");
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    let raw = serde_json::json!({
        "evaluation": evaluation,
        "controls": controls,
        "state": exercise.current_state(),
    });
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(&raw).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML snapshot to a file.
pub fn write_html_snapshot(exercise: &Exercise, path: &Path) -> Result<()> {
    let html = generate_html(exercise);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write HTML snapshot: {}", path.display()))?;
    Ok(())
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; --selected: #dbeafe; --missed: #fef3c7; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; --selected: #1e3a8a; --missed: #78350f; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
.h5p-word-selectable-words { line-height: 2; font-size: 1.1rem; }
.h5p-word-selectable-words span[role=option] { padding: 0.1rem 0.2rem; border-radius: 4px; }
.h5p-word-selectable { cursor: pointer; }
.h5p-word-selected { background: var(--selected); }
.h5p-word-correct { background: var(--pass); }
.h5p-word-wrong { background: var(--fail); text-decoration: line-through; }
.h5p-word-missed { background: var(--missed); border-bottom: 2px dashed currentColor; }
.feedback { font-weight: bold; padding: 0.5rem 1rem; border-radius: 8px; }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
.buttons button { margin-right: 0.5rem; }
table { border-collapse: collapse; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
"#;
