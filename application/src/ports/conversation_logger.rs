//! Port for structured conversation logging.
//!
//! Defines the [`ConversationLogger`] trait for recording what happened in a
//! query (fan-out outcomes, synthesis, errors) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures a
//! machine-readable transcript (JSONL).

use serde_json::{Value, json};
use snapstudy_domain::{Answer, ProviderResult};

/// A structured conversation event for logging.
///
/// Each event has a type string and a JSON payload containing
/// event-specific fields. Timestamps are added by the adapter.
pub struct ConversationEvent {
    /// Event type identifier (e.g., "fan_out_complete", "answer").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }

    pub fn question(question: &str, context_chars: Option<usize>) -> Self {
        Self::new(
            "question",
            json!({ "question": question, "context_chars": context_chars }),
        )
    }

    /// Per-provider outcomes of a fan-out, in invocation order
    pub fn fan_out(results: &[ProviderResult]) -> Self {
        let providers: Vec<Value> = results
            .iter()
            .map(|r| {
                json!({
                    "provider": r.provider.as_str(),
                    "success": r.is_success(),
                    "chars": r.response.as_deref().map(|t| t.chars().count()),
                    "error": r.error,
                })
            })
            .collect();
        Self::new("fan_out_complete", json!({ "providers": providers }))
    }

    pub fn timeout(timeout_secs: u64) -> Self {
        Self::new("fan_out_timeout", json!({ "timeout_secs": timeout_secs }))
    }

    pub fn answer(answer: &Answer) -> Self {
        Self::new(
            "answer",
            json!({ "resolution": answer.resolution, "chars": answer.text.chars().count() }),
        )
    }

    pub fn error(message: &str) -> Self {
        Self::new("error", json!({ "message": message }))
    }
}

/// Port for logging conversation events to a structured log.
///
/// `log` is synchronous and infallible; adapters swallow write failures.
pub trait ConversationLogger: Send + Sync {
    /// Record a conversation event.
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapstudy_domain::ProviderId;

    #[test]
    fn test_fan_out_event_lists_providers_in_order() {
        let results = vec![
            ProviderResult::success(ProviderId::OpenAi, "abc"),
            ProviderResult::failure(ProviderId::Gemini, "boom"),
        ];
        let event = ConversationEvent::fan_out(&results);
        assert_eq!(event.event_type, "fan_out_complete");
        let providers = event.payload["providers"].as_array().unwrap();
        assert_eq!(providers[0]["provider"], "openai");
        assert_eq!(providers[0]["chars"], 3);
        assert_eq!(providers[1]["success"], false);
        assert_eq!(providers[1]["error"], "boom");
    }
}
