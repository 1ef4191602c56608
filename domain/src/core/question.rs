//! Question value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A question asked about a source (Value Object)
///
/// Represents the user message that is sent to every provider in a
/// fan-out and quoted verbatim in the synthesis prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    content: String,
}

impl Question {
    /// Create a new question, trimming surrounding whitespace
    pub fn new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidQuestion(
                "question cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            content: trimmed.to_string(),
        })
    }

    /// Get the question content
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<&str> for Question {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Question::new(s)
    }
}

impl TryFrom<String> for Question {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Question::new(s)
    }
}
