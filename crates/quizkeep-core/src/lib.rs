//! quizkeep-core — Answer keys, scoring, and configuration.
//!
//! This crate defines the quiz data model, the pure scoring functions, and
//! the configuration that the storage layer and the CLI build on.

pub mod config;
pub mod error;
pub mod evaluator;
pub mod model;
pub mod parser;

pub use config::{is_valid_storage_key, load_config, load_config_from, QuizConfig};
pub use error::QuizError;
pub use evaluator::{completion, evaluate, evaluate_detailed, is_passing, matches, AnswerEvaluator};
pub use model::{AnswerKey, Grade, Question, QuestionOutcome, ScoreResult, Scorecard, Submission};
