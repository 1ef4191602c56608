//! Orchestration parameters: fan-out routing and timing.
//!
//! [`OrchestrationConfig`] groups the static parameters that control how
//! [`AnswerUseCase`](crate::use_cases::answer::AnswerUseCase) routes a
//! question: when to fan out, how long to wait, and who synthesizes.

use serde::{Deserialize, Serialize};
use snapstudy_domain::{ContextBudget, ProviderId};
use std::time::Duration;

/// Routing and timing parameters for answering a question.
///
/// | Path | Timeout |
/// |------|---------|
/// | Fan-out (document/video chat) | 120 s |
/// | Single provider (plain chat, timeout fallback) | 60 s |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestrationConfig {
    /// Global timeout for the whole fan-out.
    pub fanout_timeout: Duration,
    /// Timeout for a single-provider call.
    pub chat_timeout: Duration,
    /// Context must be longer than this to trigger a fan-out.
    pub min_fanout_context_chars: usize,
    /// Provider that merges multiple responses; `None` skips straight to
    /// the longest-response fallback.
    pub synthesizer: Option<ProviderId>,
    /// Provider used on the single-provider path; the first configured
    /// provider when unset or unavailable.
    pub direct_provider: Option<ProviderId>,
    /// Character budgets for outbound context.
    pub budget: ContextBudget,
}

impl Default for OrchestrationConfig {
    fn default() -> Self {
        Self {
            fanout_timeout: Duration::from_secs(120),
            chat_timeout: Duration::from_secs(60),
            min_fanout_context_chars: 100,
            synthesizer: Some(ProviderId::Groq),
            direct_provider: Some(ProviderId::Groq),
            budget: ContextBudget::default(),
        }
    }
}

impl OrchestrationConfig {
    // ==================== Builder Methods ====================

    pub fn with_fanout_timeout(mut self, timeout: Duration) -> Self {
        self.fanout_timeout = timeout;
        self
    }

    pub fn with_chat_timeout(mut self, timeout: Duration) -> Self {
        self.chat_timeout = timeout;
        self
    }

    pub fn with_min_fanout_context_chars(mut self, chars: usize) -> Self {
        self.min_fanout_context_chars = chars;
        self
    }

    pub fn with_synthesizer(mut self, provider: Option<ProviderId>) -> Self {
        self.synthesizer = provider;
        self
    }

    pub fn with_direct_provider(mut self, provider: Option<ProviderId>) -> Self {
        self.direct_provider = provider;
        self
    }

    pub fn with_budget(mut self, budget: ContextBudget) -> Self {
        self.budget = budget;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = OrchestrationConfig::default();
        assert_eq!(config.fanout_timeout, Duration::from_secs(120));
        assert_eq!(config.chat_timeout, Duration::from_secs(60));
        assert_eq!(config.min_fanout_context_chars, 100);
        assert_eq!(config.synthesizer, Some(ProviderId::Groq));
        assert_eq!(config.budget.primary_chars, 12_000);
    }

    #[test]
    fn test_builder() {
        let config = OrchestrationConfig::default()
            .with_fanout_timeout(Duration::from_millis(50))
            .with_synthesizer(None)
            .with_direct_provider(Some(ProviderId::OpenAi));

        assert_eq!(config.fanout_timeout, Duration::from_millis(50));
        assert!(config.synthesizer.is_none());
        assert_eq!(config.direct_provider, Some(ProviderId::OpenAi));
    }
}
