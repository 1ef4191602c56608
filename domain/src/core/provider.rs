//! Provider value object identifying a hosted LLM API

use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Hosted LLM APIs that can take part in a fan-out (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    OpenAi,
    OpenRouter,
    Groq,
    Gemini,
}

impl ProviderId {
    /// Every supported provider, in fan-out invocation order
    pub const ALL: [ProviderId; 4] = [
        ProviderId::OpenAi,
        ProviderId::OpenRouter,
        ProviderId::Groq,
        ProviderId::Gemini,
    ];

    /// Stable identifier used in config files and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenAi => "openai",
            ProviderId::OpenRouter => "openrouter",
            ProviderId::Groq => "groq",
            ProviderId::Gemini => "gemini",
        }
    }

    /// Human-readable name, used to label responses inside prompts
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderId::OpenAi => "OpenAI",
            ProviderId::OpenRouter => "OpenRouter",
            ProviderId::Groq => "Groq",
            ProviderId::Gemini => "Google Gemini",
        }
    }

    /// Check if this provider speaks the OpenAI chat-completions dialect
    pub fn is_openai_compatible(&self) -> bool {
        matches!(
            self,
            ProviderId::OpenAi | ProviderId::OpenRouter | ProviderId::Groq
        )
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for ProviderId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(ProviderId::OpenAi),
            "openrouter" => Ok(ProviderId::OpenRouter),
            "groq" => Ok(ProviderId::Groq),
            "gemini" | "google" | "google-gemini" => Ok(ProviderId::Gemini),
            other => Err(DomainError::UnknownProvider(other.to_string())),
        }
    }
}

impl Serialize for ProviderId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProviderId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
