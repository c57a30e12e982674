//! Quiz error types.
//!
//! Only configuration problems are hard errors in the core. Storage and
//! decoding failures live in `quizkeep-storage` and are recovered there.

use thiserror::Error;

/// Errors raised while building or scoring against an answer key.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuizError {
    /// The answer key cannot produce a defined score (empty key, zero or
    /// non-finite points, missing accepted answers).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl QuizError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        QuizError::InvalidConfiguration(msg.into())
    }
}
