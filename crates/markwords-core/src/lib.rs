//! markwords-core — Passage tokenizer, word state machine and scoring.
//!
//! This crate turns an authored "Mark the Words" passage into selectable
//! words, tracks the learner's selections and scores the attempt.

pub mod document;
pub mod error;
pub mod exercise;
pub mod keyboard;
pub mod marker;
pub mod model;
pub mod parser;
pub mod scoring;
pub mod tokenizer;
pub mod traits;
pub mod word;

pub use error::{ContentError, StateError};
pub use exercise::{Controls, Exercise};
pub use model::{Behaviour, Params};
pub use scoring::{Evaluation, ScorePolicy, Tally};
pub use traits::QuestionContract;
pub use word::{EvaluationState, Word};
