//! Generation parameters sent with every provider request

use serde::{Deserialize, Serialize};

/// Sampling and length parameters for one provider call (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f32>,
    /// Only honoured by providers that support it (Gemini)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
}

impl GenerationParams {
    /// Parameters for the first attempt against a provider's primary model
    pub fn primary() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 2000,
            top_p: 0.95,
            frequency_penalty: Some(0.1),
            presence_penalty: Some(0.05),
            top_k: None,
        }
    }

    /// Reduced parameters for the single fallback attempt
    pub fn fallback() -> Self {
        Self {
            temperature: 0.6,
            max_tokens: 1500,
            top_p: 0.9,
            frequency_penalty: None,
            presence_penalty: None,
            top_k: None,
        }
    }

    /// Low-temperature, long-output parameters for merging responses
    pub fn synthesis() -> Self {
        Self {
            temperature: 0.3,
            max_tokens: 3000,
            top_p: 0.9,
            frequency_penalty: None,
            presence_penalty: None,
            top_k: None,
        }
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }

    /// Reduce these parameters for a fallback attempt.
    ///
    /// Never raises a value: the result is at most as long and as hot as
    /// either `self` or the fallback preset.
    pub fn reduced(&self) -> Self {
        let preset = Self::fallback();
        Self {
            temperature: self.temperature.min(preset.temperature),
            max_tokens: self.max_tokens.min(preset.max_tokens),
            top_p: self.top_p.min(preset.top_p),
            frequency_penalty: None,
            presence_penalty: None,
            top_k: self.top_k,
        }
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self::primary()
    }
}
