//! Configuration errors raised while evaluating a rule set.
//!
//! A value that fails a rule is not an error here; it becomes a message in
//! the run's [`MessageBag`](crate::MessageBag). These variants abort the run.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Validation rule {rule} requires at least {required} parameters, {given} given.")]
    MissingParameters {
        rule: String,
        required: usize,
        given: usize,
    },

    #[error("No predicate registered for validation rule `{0}`.")]
    UnknownRule(String),

    #[error("Invalid pattern `{pattern}` for validation rule {rule}: {reason}")]
    InvalidPattern {
        rule: String,
        pattern: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, ValidationError>;
