//! Conversation domain entities

use serde::{Deserialize, Serialize};

/// Role of a turn in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A single turn in a conversation (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Ordered conversation history of a session.
///
/// Turns can only be appended. Providers never see the whole history,
/// only a trailing [`window`](History::window).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    turns: Vec<ConversationTurn>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    /// Record a completed user/assistant exchange
    pub fn record_exchange(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.turns.push(ConversationTurn::user(question));
        self.turns.push(ConversationTurn::assistant(answer));
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The last `size` turns, oldest first
    pub fn window(&self, size: usize) -> &[ConversationTurn] {
        trailing(&self.turns, size)
    }
}

impl From<Vec<ConversationTurn>> for History {
    fn from(turns: Vec<ConversationTurn>) -> Self {
        Self { turns }
    }
}

/// The last `size` elements of `turns`, oldest first
pub fn trailing(turns: &[ConversationTurn], size: usize) -> &[ConversationTurn] {
    let start = turns.len().saturating_sub(size);
    &turns[start..]
}
