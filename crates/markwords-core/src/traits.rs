//! Question lifecycle contract.
//!
//! Host frameworks drive every question type through the same calls: read
//! the score, show solutions, reset, and persist the learner's state.

/// The lifecycle contract a host expects from a question.
pub trait QuestionContract {
    /// Points achieved by the current attempt.
    fn score(&self) -> usize;

    /// Points achievable.
    fn max_score(&self) -> usize;

    /// Whether the learner has answered (or no answer is required).
    fn answer_given(&self) -> bool;

    /// Reveal the evaluation and lock the question.
    fn show_solutions(&mut self);

    /// Return to the initial state.
    fn reset_task(&mut self);

    /// State to persist for a later resume, `None` before the question
    /// has content.
    fn current_state(&self) -> Option<Vec<usize>>;
}
