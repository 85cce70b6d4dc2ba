//! The exercise aggregate.
//!
//! Owns the tokenized passage, the ordered words, the scoring policy and the
//! per-instance control state. All word mutation goes through here.

use serde::Serialize;

use crate::document::escape_text;
use crate::error::StateError;
use crate::keyboard::{Key, KeyboardNav, NavEvent};
use crate::model::Params;
use crate::scoring::{evaluate, Evaluation, ScorePolicy};
use crate::tokenizer::{candidates, render_with, tokenize, Token};
use crate::traits::QuestionContract;
use crate::word::Word;

/// Which buttons are currently offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Controls {
    pub check_answer: bool,
    pub try_again: bool,
    pub show_solution: bool,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            check_answer: true,
            try_again: false,
            show_solution: false,
        }
    }
}

impl Controls {
    fn hide_all(&mut self) {
        *self = Controls {
            check_answer: false,
            try_again: false,
            show_solution: false,
        };
    }
}

/// One Mark the Words exercise instance.
#[derive(Debug, Clone)]
pub struct Exercise {
    params: Params,
    tokens: Vec<Token>,
    words: Vec<Word>,
    policy: ScorePolicy,
    answered: bool,
    controls: Controls,
    feedback: Option<Evaluation>,
    nav: KeyboardNav,
}

impl Exercise {
    /// Tokenize the passage and build its words.
    pub fn new(params: Params) -> Self {
        let tokens = tokenize(&params.text_field);
        let words: Vec<Word> = candidates(&tokens).map(Word::from_candidate).collect();
        let policy = ScorePolicy::for_words(&words);

        let mut nav = KeyboardNav::new();
        for _ in &words {
            nav.add_element();
        }

        tracing::debug!(
            words = words.len(),
            max_score = policy.max_score(),
            blank_is_correct = policy.blank_is_correct(),
            "built exercise"
        );

        Exercise {
            params,
            tokens,
            words,
            policy,
            answered: false,
            controls: Controls::default(),
            feedback: None,
            nav,
        }
    }

    /// Build the exercise and restore a previously saved state.
    ///
    /// A state that is not an array is ignored. Every entry of an array must
    /// be an integer word index, otherwise the resume fails.
    pub fn resume(params: Params, previous_state: &serde_json::Value) -> Result<Self, StateError> {
        let mut exercise = Exercise::new(params);
        exercise.restore_state(previous_state)?;
        Ok(exercise)
    }

    fn restore_state(&mut self, state: &serde_json::Value) -> Result<(), StateError> {
        let Some(entries) = state.as_array() else {
            return Ok(());
        };

        let word_count = self.words.len();
        let indices = entries
            .iter()
            .enumerate()
            .map(|(position, entry)| {
                entry
                    .as_u64()
                    .and_then(|i| usize::try_from(i).ok())
                    .filter(|&i| i < word_count)
                    .ok_or_else(|| StateError::corrupt(position, entry, word_count))
            })
            .collect::<Result<Vec<_>, _>>()?;

        for index in indices {
            self.words[index].set_selected();
        }
        Ok(())
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn word(&self, index: usize) -> Option<&Word> {
        self.words.get(index)
    }

    pub fn policy(&self) -> &ScorePolicy {
        &self.policy
    }

    pub fn controls(&self) -> Controls {
        self.controls
    }

    /// Evaluation shown after the last check, if any.
    pub fn feedback(&self) -> Option<&Evaluation> {
        self.feedback.as_ref()
    }

    pub fn keyboard(&self) -> &KeyboardNav {
        &self.nav
    }

    /// Click on a word. Returns whether the selection changed.
    pub fn toggle(&mut self, index: usize) -> bool {
        let Some(word) = self.words.get_mut(index) else {
            return false;
        };
        let changed = word.toggle_select();
        if changed {
            self.answered = true;
            self.nav.select(index);
            tracing::debug!(index, selected = word.is_selected(), "toggled word");
        }
        changed
    }

    /// Keyboard input on the word at `index`.
    pub fn handle_key(&mut self, index: usize, key: Key) -> Option<NavEvent> {
        let event = self.nav.handle_key(index, key)?;
        if let NavEvent::Select { index } = event {
            self.toggle(index);
        }
        Some(event)
    }

    /// Score the current selections without changing any state.
    pub fn evaluate(&self) -> Evaluation {
        evaluate(&self.words, &self.policy)
    }

    /// The check button: lock the words, mark the selected ones and score.
    pub fn check_answer(&mut self) -> Evaluation {
        self.answered = true;
        self.nav.remove_all_tabbable();
        for word in &mut self.words {
            word.set_selectable(false);
            if word.is_selected() {
                word.mark_check();
            }
        }

        let evaluation = self.evaluate();
        self.controls.check_answer = false;
        if !evaluation.is_fully_correct() {
            let behaviour = self.params.behaviour;
            if behaviour.enable_solutions_button && evaluation.correct < evaluation.max_score {
                self.controls.show_solution = true;
            }
            if behaviour.enable_retry {
                self.controls.try_again = true;
            }
        }
        self.feedback = Some(evaluation);

        tracing::debug!(
            score = evaluation.score,
            max_score = evaluation.max_score,
            correct = evaluation.correct,
            wrong = evaluation.wrong,
            missed = evaluation.missed,
            "checked answer"
        );
        evaluation
    }

    /// The retry button: back to a fresh attempt.
    pub fn retry(&mut self) {
        for word in &mut self.words {
            word.mark_clear();
            word.set_selectable(true);
        }
        self.feedback = None;
        self.nav.set_tabbable_at(0);
        self.controls = Controls::default();
        self.answered = false;
        tracing::debug!("reset exercise");
    }

    /// The show-solution button: display the answers.
    pub fn show_solution(&mut self) {
        self.nav.remove_all_tabbable();
        for word in &mut self.words {
            word.set_selectable(false);
            word.show_solution();
        }
        self.controls.check_answer = false;
        self.controls.show_solution = false;
        self.controls.try_again = self.params.behaviour.enable_retry;
    }

    /// Feedback text for an evaluation, from the authored template.
    pub fn score_text(&self, evaluation: &Evaluation) -> String {
        evaluation.score_text(&self.params.score)
    }

    /// Indices of the selected words, in reading order.
    pub fn selected_indices(&self) -> Vec<usize> {
        indices_where(&self.words, Word::is_selected)
    }

    /// Indices of the answer words, in reading order.
    pub fn answer_indices(&self) -> Vec<usize> {
        indices_where(&self.words, Word::is_answer)
    }

    /// HTML projection of the passage in its current state.
    pub fn render_html(&self) -> String {
        let tabbable = self.nav.tabbable();
        let body = render_with(&self.tokens, |index, _| {
            let Some(word) = self.words.get(index) else {
                return String::new();
            };
            let appearance = word.appearance();
            let mut attrs = format!(
                "role=\"option\" class=\"{}\" aria-selected=\"{}\"",
                appearance.css_classes().join(" "),
                appearance.aria_selected
            );
            if tabbable == Some(index) {
                attrs.push_str(" tabindex=\"0\"");
            }
            format!("<span {attrs}>{}</span>", escape_text(word.text()))
        });
        format!(
            "<div class=\"h5p-word-selectable-words\" role=\"listbox\" aria-multiselectable=\"true\">{body}</div>"
        )
    }
}

fn indices_where(words: &[Word], pred: impl Fn(&Word) -> bool) -> Vec<usize> {
    words
        .iter()
        .enumerate()
        .filter_map(|(i, w)| pred(w).then_some(i))
        .collect()
}

impl QuestionContract for Exercise {
    fn score(&self) -> usize {
        self.evaluate().score
    }

    fn max_score(&self) -> usize {
        self.policy.max_score()
    }

    fn answer_given(&self) -> bool {
        self.policy.blank_is_correct() || self.answered
    }

    fn show_solutions(&mut self) {
        self.feedback = Some(self.evaluate());
        for word in &mut self.words {
            word.mark_check();
            word.set_selectable(false);
        }
        self.controls.hide_all();
        self.nav.remove_all_tabbable();
    }

    fn reset_task(&mut self) {
        self.retry();
    }

    fn current_state(&self) -> Option<Vec<usize>> {
        Some(self.selected_indices())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::word::EvaluationState;
    use serde_json::json;

    fn exercise(text: &str) -> Exercise {
        Exercise::new(Params::with_text(text))
    }

    #[test]
    fn builds_words_in_reading_order() {
        let ex = exercise("The *quick* brown fox.");
        let texts: Vec<_> = ex.words().iter().map(Word::text).collect();
        assert_eq!(texts, vec!["The", "quick", "brown", "fox"]);
        assert_eq!(ex.answer_indices(), vec![1]);
        assert_eq!(ex.max_score(), 1);
    }

    #[test]
    fn one_right_one_wrong_attempt() {
        let mut ex = exercise("The *quick* brown *fox* jumps.");
        assert!(ex.toggle(1));
        assert!(ex.toggle(2));
        let eval = ex.check_answer();
        assert_eq!(eval.correct, 1);
        assert_eq!(eval.wrong, 1);
        assert_eq!(eval.missed, 1);
        assert_eq!(eval.score, 0);
        assert_eq!(eval.max_score, 2);
        assert!(!eval.is_fully_correct());
        assert_eq!(
            ex.controls(),
            Controls {
                check_answer: false,
                try_again: true,
                show_solution: true,
            }
        );
        assert_eq!(ex.score_text(&eval), "You got 0 of 2 points");
    }

    #[test]
    fn check_marks_only_selected_words() {
        let mut ex = exercise("*a* b *c*");
        ex.toggle(0);
        ex.check_answer();
        assert_eq!(ex.words()[0].evaluation_state(), EvaluationState::Correct);
        assert_eq!(ex.words()[2].evaluation_state(), EvaluationState::None);
        assert!(ex.words()[2].is_missed());
    }

    #[test]
    fn blank_is_correct_passage() {
        let mut ex = exercise("Nothing to find here.");
        assert!(ex.answer_given());
        let eval = ex.check_answer();
        assert_eq!(eval.max_score, 1);
        assert_eq!(eval.correct, 1);
        assert_eq!(eval.wrong, 0);
        assert_eq!(eval.score, 1);
        assert!(eval.is_fully_correct());
        assert!(!ex.controls().try_again);
        assert!(!ex.controls().show_solution);
    }

    #[test]
    fn words_are_locked_after_check() {
        let mut ex = exercise("*a* b");
        ex.check_answer();
        assert!(!ex.toggle(0));
        assert!(ex.selected_indices().is_empty());
    }

    #[test]
    fn retry_resets_completely() {
        let mut ex = exercise("*a* b *c*");
        ex.toggle(0);
        ex.toggle(1);
        ex.check_answer();
        ex.retry();
        ex.retry();
        for word in ex.words() {
            assert!(!word.is_selected());
            assert!(word.is_selectable());
            assert_eq!(word.evaluation_state(), EvaluationState::None);
        }
        assert_eq!(ex.controls(), Controls::default());
        assert!(ex.feedback().is_none());
        assert!(!ex.answer_given());
        assert_eq!(ex.keyboard().tabbable(), Some(0));
    }

    #[test]
    fn solutions_button_respects_behaviour() {
        let mut params = Params::with_text("*a* *b*");
        params.behaviour.enable_solutions_button = false;
        params.behaviour.enable_retry = false;
        let mut ex = Exercise::new(params);
        ex.check_answer();
        assert_eq!(
            ex.controls(),
            Controls {
                check_answer: false,
                try_again: false,
                show_solution: false,
            }
        );
    }

    #[test]
    fn show_solution_button_displays_answers() {
        let mut ex = exercise("*a* b");
        ex.toggle(1);
        ex.check_answer();
        ex.show_solution();
        let html = ex.render_html();
        assert!(html.contains("h5p-word-correct\" aria-selected=\"false\">a</span>"));
        assert!(ex.controls().try_again);
        assert!(!ex.controls().show_solution);
        assert_eq!(ex.score(), 0);
    }

    #[test]
    fn resume_selects_saved_words() {
        let ex = Exercise::resume(Params::with_text("one two three"), &json!([0, 2])).unwrap();
        assert!(ex.words()[0].is_selected());
        assert!(!ex.words()[1].is_selected());
        assert!(ex.words()[2].is_selected());
        assert_eq!(ex.current_state(), Some(vec![0, 2]));
    }

    #[test]
    fn resume_rejects_out_of_range_index() {
        let err = Exercise::resume(Params::with_text("one two three"), &json!([0, 5])).unwrap_err();
        assert_eq!(
            err,
            StateError::Corrupt {
                position: 1,
                value: "5".into(),
                word_count: 3,
            }
        );
    }

    #[test]
    fn resume_rejects_non_numeric_and_negative() {
        let params = Params::with_text("one two three");
        assert!(Exercise::resume(params.clone(), &json!(["x"])).is_err());
        assert!(Exercise::resume(params.clone(), &json!([-1])).is_err());
        assert!(Exercise::resume(params, &json!([1.5])).is_err());
    }

    #[test]
    fn resume_ignores_non_array_state() {
        let ex = Exercise::resume(Params::with_text("one two"), &json!(null)).unwrap();
        assert!(ex.selected_indices().is_empty());
    }

    #[test]
    fn contract_show_solutions_marks_everything_and_locks() {
        let mut ex = exercise("*a* b *c*");
        ex.toggle(1);
        ex.show_solutions();
        let states: Vec<_> = ex.words().iter().map(Word::evaluation_state).collect();
        assert_eq!(
            states,
            vec![
                EvaluationState::Missed,
                EvaluationState::Wrong,
                EvaluationState::Missed
            ]
        );
        assert!(ex.words().iter().all(|w| !w.is_selectable()));
        assert_eq!(ex.keyboard().tabbable(), None);
        assert!(!ex.controls().check_answer);
    }

    #[test]
    fn keyboard_selects_and_moves() {
        let mut ex = exercise("a *b* c");
        assert_eq!(
            ex.handle_key(0, Key::ArrowRight),
            Some(NavEvent::NextOption { from: 0, to: 1 })
        );
        ex.handle_key(1, Key::Enter);
        assert_eq!(ex.selected_indices(), vec![1]);
        assert!(ex.answer_given());
        assert_eq!(ex.score(), 1);
    }

    #[test]
    fn render_marks_selection_and_tabbable() {
        let mut ex = exercise("<p>a <em>*b*</em></p>");
        ex.toggle(1);
        let html = ex.render_html();
        assert!(html.starts_with("<div class=\"h5p-word-selectable-words\""));
        assert!(html.contains("<em><span role=\"option\" class=\"h5p-word-selectable h5p-word-selected\" aria-selected=\"true\" tabindex=\"0\">b</span></em>"));
    }
}
