//! Orchestration value objects - immutable result types for a single query.
//!
//! - [`ProviderResult`] - one provider's outcome from a fan-out
//! - [`SynthesisInput`] - everything the synthesizer consumes
//! - [`Answer`] / [`Resolution`] - the final text and how it was reached

use crate::core::provider::ProviderId;
use crate::core::string::char_len;
use serde::{Deserialize, Serialize};

/// Outcome of invoking a single provider during a fan-out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderResult {
    pub provider: ProviderId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProviderResult {
    /// Creates a successful result carrying the provider's answer text.
    pub fn success(provider: ProviderId, response: impl Into<String>) -> Self {
        Self {
            provider,
            response: Some(response.into()),
            error: None,
        }
    }

    /// Creates a failed result carrying the error message.
    pub fn failure(provider: ProviderId, error: impl Into<String>) -> Self {
        Self {
            provider,
            response: None,
            error: Some(error.into()),
        }
    }

    /// Returns `true` when the provider produced non-empty text and no error.
    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.response.as_deref().is_some_and(|r| !r.is_empty())
    }

    /// The response text of a successful result.
    pub fn text(&self) -> Option<&str> {
        if self.is_success() {
            self.response.as_deref()
        } else {
            None
        }
    }
}

/// Input consumed exactly once by the response synthesizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisInput {
    /// The original user message
    pub question: String,
    /// Length in characters of the context the providers saw
    pub context_chars: usize,
    /// Every result of the fan-out, in invocation order
    pub results: Vec<ProviderResult>,
}

impl SynthesisInput {
    pub fn new(question: impl Into<String>, context_chars: usize, results: Vec<ProviderResult>) -> Self {
        Self {
            question: question.into(),
            context_chars,
            results,
        }
    }

    /// Successful results, in invocation order
    pub fn successful(&self) -> Vec<&ProviderResult> {
        self.results.iter().filter(|r| r.is_success()).collect()
    }

    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    /// Successful results as `(provider label, text)` pairs for prompt building
    pub fn labeled_responses(&self) -> Vec<(String, String)> {
        self.results
            .iter()
            .filter_map(|r| r.text().map(|t| (r.provider.display_name().to_string(), t.to_string())))
            .collect()
    }

    /// The successful result with the most characters.
    ///
    /// Ties go to the result that appears first in invocation order.
    pub fn longest_response(&self) -> Option<&ProviderResult> {
        let mut best: Option<(&ProviderResult, usize)> = None;
        for result in self.results.iter() {
            let Some(text) = result.text() else {
                continue;
            };
            let len = char_len(text);
            match best {
                Some((_, best_len)) if len <= best_len => {}
                _ => best = Some((result, len)),
            }
        }
        best.map(|(result, _)| result)
    }
}

/// How the final answer of a query was produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution {
    /// Exactly one provider succeeded; its text was returned unchanged
    Direct { provider: ProviderId },
    /// Several responses were merged by the synthesizer provider
    Synthesized { synthesizer: ProviderId, sources: usize },
    /// The synthesis call failed; the longest response was returned
    LongestFallback { provider: ProviderId, sources: usize },
    /// The fan-out was skipped or timed out; one provider answered alone
    SingleProvider { provider: ProviderId },
}

/// Final answer of a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    pub resolution: Resolution,
}

impl Answer {
    pub fn new(text: impl Into<String>, resolution: Resolution) -> Self {
        Self {
            text: text.into(),
            resolution,
        }
    }
}
