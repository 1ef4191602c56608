//! Offline provider behavior from TOML (`[mock]` section)
//!
//! Only read when the CLI runs with `--mock`.
//!
//! ```toml
//! [mock]
//! latency_ms = 200
//!
//! [mock.groq]
//! latency_ms = 5000
//!
//! [mock.openrouter]
//! fail = true
//! ```

use serde::{Deserialize, Serialize};
use snapstudy_domain::ProviderId;
use std::time::Duration;

/// Simulated behavior of one offline provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileMockProviderConfig {
    /// Overrides the shared `latency_ms` for this provider.
    pub latency_ms: Option<u64>,
    /// Every call returns an error.
    pub fail: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileMockConfig {
    /// Delay before each response, for every provider.
    pub latency_ms: u64,
    pub openai: FileMockProviderConfig,
    pub openrouter: FileMockProviderConfig,
    pub groq: FileMockProviderConfig,
    pub gemini: FileMockProviderConfig,
}

impl FileMockConfig {
    pub fn get(&self, id: ProviderId) -> &FileMockProviderConfig {
        match id {
            ProviderId::OpenAi => &self.openai,
            ProviderId::OpenRouter => &self.openrouter,
            ProviderId::Groq => &self.groq,
            ProviderId::Gemini => &self.gemini,
        }
    }

    pub fn latency(&self, id: ProviderId) -> Duration {
        Duration::from_millis(self.get(id).latency_ms.unwrap_or(self.latency_ms))
    }

    pub fn fails(&self, id: ProviderId) -> bool {
        self.get(id).fail
    }
}
