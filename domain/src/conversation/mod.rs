//! Conversation domain.
//!
//! - [`entities::ConversationTurn`]: a single turn (user, assistant or system)
//! - [`entities::History`]: the ordered, append-only turns of a session

pub mod entities;
