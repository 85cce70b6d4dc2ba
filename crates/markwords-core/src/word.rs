//! Selectable word state machine.
//!
//! A `Word` owns whether it is an answer (fixed at construction), whether it
//! is selected and selectable, and its evaluation outcome. Rendering is a
//! pure projection of this state through [`Word::appearance`].

use serde::{Deserialize, Serialize};

use crate::marker;
use crate::tokenizer::{segment, Candidate};

/// Outcome of evaluating one word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationState {
    #[default]
    None,
    Correct,
    Wrong,
    Missed,
}

impl EvaluationState {
    /// Classify a selection against the answer flag.
    pub fn classify(selected: bool, is_answer: bool) -> Self {
        match (selected, is_answer) {
            (true, true) => EvaluationState::Correct,
            (true, false) => EvaluationState::Wrong,
            (false, true) => EvaluationState::Missed,
            (false, false) => EvaluationState::None,
        }
    }
}

/// One selectable unit of the passage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    text: String,
    prefix: String,
    suffix: String,
    is_answer: bool,
    selected: bool,
    selectable: bool,
    evaluation: EvaluationState,
    solution_shown: bool,
}

impl Word {
    /// Build a word from tokenizer output.
    pub fn from_candidate(candidate: &Candidate) -> Self {
        let marked = marker::parse(&candidate.body);
        if marked.stray_markers > 0 {
            tracing::warn!(
                word = %candidate.body,
                stray = marked.stray_markers,
                "stripping unmatched answer markers"
            );
        }
        Word {
            text: marked.text,
            prefix: candidate.prefix.clone(),
            suffix: candidate.suffix.clone(),
            is_answer: marked.is_answer,
            selected: false,
            selectable: true,
            evaluation: EvaluationState::None,
            solution_shown: false,
        }
    }

    /// Build a word from a raw authored string such as `*nice*,`.
    pub fn parse(raw: &str) -> Self {
        let parts = segment(raw.trim());
        Word::from_candidate(&Candidate {
            prefix: parts.prefix.to_string(),
            body: parts.body.to_string(),
            suffix: parts.suffix.to_string(),
        })
    }

    /// Display text: markers stripped, punctuation segmented out.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn is_answer(&self) -> bool {
        self.is_answer
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_selectable(&self) -> bool {
        self.selectable
    }

    /// State fixed by the last `mark_check`.
    pub fn evaluation_state(&self) -> EvaluationState {
        self.evaluation
    }

    /// Flip the selection. Ignored while the word is not selectable.
    /// Returns whether the selection changed.
    pub fn toggle_select(&mut self) -> bool {
        if !self.selectable {
            return false;
        }
        self.selected = !self.selected;
        true
    }

    /// Force the selection on, used when restoring saved state.
    pub fn set_selected(&mut self) {
        self.selected = true;
    }

    pub fn set_selectable(&mut self, selectable: bool) {
        self.selectable = selectable;
    }

    /// Fix the evaluation state from the current selection.
    pub fn mark_check(&mut self) {
        self.solution_shown = false;
        self.evaluation = self.outcome();
    }

    /// Return to the initial unselected, unevaluated state.
    pub fn mark_clear(&mut self) {
        self.selected = false;
        self.evaluation = EvaluationState::None;
        self.solution_shown = false;
    }

    /// Display answers as correct regardless of selection. Does not touch
    /// the evaluation state used for scoring.
    pub fn show_solution(&mut self) {
        self.solution_shown = true;
    }

    /// Outcome for the current selection, whether or not it was checked.
    pub fn outcome(&self) -> EvaluationState {
        EvaluationState::classify(self.selected, self.is_answer)
    }

    pub fn is_correct(&self) -> bool {
        self.outcome() == EvaluationState::Correct
    }

    pub fn is_wrong(&self) -> bool {
        self.outcome() == EvaluationState::Wrong
    }

    pub fn is_missed(&self) -> bool {
        self.outcome() == EvaluationState::Missed
    }

    /// Visual projection of the current state.
    pub fn appearance(&self) -> Appearance {
        let state = if self.solution_shown {
            if self.is_answer {
                VisualState::Correct
            } else {
                VisualState::Plain
            }
        } else {
            match self.evaluation {
                EvaluationState::Correct => VisualState::Correct,
                EvaluationState::Wrong => VisualState::Wrong,
                EvaluationState::Missed => VisualState::Missed,
                EvaluationState::None if self.selected => VisualState::Selected,
                EvaluationState::None => VisualState::Plain,
            }
        };
        Appearance {
            state,
            selectable: self.selectable,
            aria_selected: self.selected,
        }
    }
}

/// How a word is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualState {
    Plain,
    Selected,
    Correct,
    Wrong,
    Missed,
}

/// Visual attributes derived from a word's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Appearance {
    pub state: VisualState,
    pub selectable: bool,
    pub aria_selected: bool,
}

impl Appearance {
    /// CSS classes used by the H5P stylesheet.
    pub fn css_classes(&self) -> Vec<&'static str> {
        let mut classes = vec!["h5p-word-selectable"];
        match self.state {
            VisualState::Plain => {}
            VisualState::Selected => classes.push("h5p-word-selected"),
            VisualState::Correct => classes.push("h5p-word-correct"),
            VisualState::Wrong => classes.push("h5p-word-wrong"),
            VisualState::Missed => classes.push("h5p-word-missed"),
        }
        classes
    }
}
