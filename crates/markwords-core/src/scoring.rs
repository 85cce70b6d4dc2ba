//! Attempt scoring.
//!
//! Score is `max(0, correct - wrong)`. The maximum is the number of answer
//! words, except that a passage without answers is worth one point which the
//! learner earns by making no wrong selection ("blank is correct").

use serde::{Deserialize, Serialize};

use crate::word::Word;

/// Per-category counts over a word collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub correct: usize,
    pub wrong: usize,
    pub missed: usize,
}

impl Tally {
    /// Count outcomes from the current selections.
    pub fn from_words<'a>(words: impl IntoIterator<Item = &'a Word>) -> Self {
        let mut tally = Tally::default();
        for word in words {
            if word.is_correct() {
                tally.correct += 1;
            } else if word.is_wrong() {
                tally.wrong += 1;
            } else if word.is_missed() {
                tally.missed += 1;
            }
        }
        tally
    }
}

/// Scoring rules fixed when the passage is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorePolicy {
    answers: usize,
    blank_is_correct: bool,
}

impl ScorePolicy {
    /// Derive the policy from the answer count of a passage.
    pub fn from_answer_count(answers: usize) -> Self {
        if answers == 0 {
            ScorePolicy {
                answers: 1,
                blank_is_correct: true,
            }
        } else {
            ScorePolicy {
                answers,
                blank_is_correct: false,
            }
        }
    }

    pub fn for_words(words: &[Word]) -> Self {
        Self::from_answer_count(words.iter().filter(|w| w.is_answer()).count())
    }

    /// Achievable score. At least 1.
    pub fn max_score(&self) -> usize {
        self.answers
    }

    pub fn blank_is_correct(&self) -> bool {
        self.blank_is_correct
    }
}

/// Floored score.
pub fn score(correct: usize, wrong: usize) -> usize {
    correct.saturating_sub(wrong)
}

/// Summary of one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub correct: usize,
    pub wrong: usize,
    pub missed: usize,
    pub score: usize,
    pub max_score: usize,
}

impl Evaluation {
    /// Full credit gates whether retry and solution are offered.
    pub fn is_fully_correct(&self) -> bool {
        self.score == self.max_score
    }

    /// Fill a feedback template. Placeholders: `@score`, `@total`,
    /// `@correct`, `@wrong`, `@missed`.
    pub fn score_text(&self, template: &str) -> String {
        template
            .replace("@score", &self.score.to_string())
            .replace("@total", &self.max_score.to_string())
            .replace("@correct", &self.correct.to_string())
            .replace("@wrong", &self.wrong.to_string())
            .replace("@missed", &self.missed.to_string())
    }
}

/// Evaluate the current selections.
pub fn evaluate(words: &[Word], policy: &ScorePolicy) -> Evaluation {
    let mut tally = Tally::from_words(words);
    if policy.blank_is_correct() && tally.wrong == 0 {
        tally.correct += 1;
    }
    Evaluation {
        correct: tally.correct,
        wrong: tally.wrong,
        missed: tally.missed,
        score: score(tally.correct, tally.wrong),
        max_score: policy.max_score(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(raw: &[&str]) -> Vec<Word> {
        raw.iter().map(|r| Word::parse(r)).collect()
    }

    #[test]
    fn score_is_floored() {
        for correct in 0..5 {
            for wrong in 0..5 {
                let s = score(correct, wrong);
                assert_eq!(s as i64, (correct as i64 - wrong as i64).max(0));
            }
        }
    }

    #[test]
    fn max_score_counts_answers() {
        let w = words(&["*a*", "b", "*c*"]);
        let policy = ScorePolicy::for_words(&w);
        assert_eq!(policy.max_score(), 2);
        assert!(!policy.blank_is_correct());
    }

    #[test]
    fn zero_answers_fall_back_to_one_point() {
        let w = words(&["a", "b"]);
        let policy = ScorePolicy::for_words(&w);
        assert_eq!(policy.max_score(), 1);
        assert!(policy.blank_is_correct());

        let eval = evaluate(&w, &policy);
        assert_eq!(eval.correct, 1);
        assert_eq!(eval.score, 1);
        assert!(eval.is_fully_correct());
    }

    #[test]
    fn blank_fallback_needs_no_wrong_selection() {
        let mut w = words(&["a", "b"]);
        w[0].toggle_select();
        let eval = evaluate(&w, &ScorePolicy::for_words(&w));
        assert_eq!(eval.correct, 0);
        assert_eq!(eval.wrong, 1);
        assert_eq!(eval.score, 0);
        assert!(!eval.is_fully_correct());
    }

    #[test]
    fn mixed_attempt() {
        let mut w = words(&["*a*", "b", "*c*", "d"]);
        w[0].toggle_select();
        w[1].toggle_select();
        let eval = evaluate(&w, &ScorePolicy::for_words(&w));
        assert_eq!(
            eval,
            Evaluation {
                correct: 1,
                wrong: 1,
                missed: 1,
                score: 0,
                max_score: 2,
            }
        );
        assert!(!eval.is_fully_correct());
    }

    #[test]
    fn score_text_replaces_every_placeholder() {
        let eval = Evaluation {
            correct: 2,
            wrong: 1,
            missed: 0,
            score: 1,
            max_score: 2,
        };
        assert_eq!(
            eval.score_text("@score/@total (@correct ok, @wrong bad, @missed missed) @score"),
            "1/2 (2 ok, 1 bad, 0 missed) 1"
        );
    }
}
