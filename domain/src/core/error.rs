//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Invalid YouTube URL: {0}")]
    InvalidVideoUrl(String),

    #[error("Unknown comparison type: {0}")]
    UnknownComparisonType(String),

    #[error("Invalid phase transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
}
