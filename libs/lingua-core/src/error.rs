//! Error types for lingua-core.

use thiserror::Error;

/// Result type alias using NormalizeError.
pub type Result<T> = std::result::Result<T, NormalizeError>;

/// Errors that can occur while normalizing raw dataset records.
///
/// Malformed records are rejected at load time instead of propagating
/// half-built flashcards into the session.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("rule at position {index} has no id")]
    MissingId { index: usize },

    #[error("rule `{rule_id}` is missing required field `{field}`")]
    MissingField {
        rule_id: String,
        field: &'static str,
    },

    #[error("rule `{rule_id}` example {example} is missing or empty on the {side} side")]
    BadExample {
        rule_id: String,
        example: usize,
        side: &'static str,
    },

    #[error("duplicate rule id `{id}`")]
    DuplicateId { id: String },
}

/// Errors from validating user-authored flashcard input.
#[derive(Debug, Error)]
pub enum CardError {
    #[error("flashcard is missing required field `{field}`")]
    MissingField { field: &'static str },
}
