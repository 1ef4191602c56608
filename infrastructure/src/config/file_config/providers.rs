//! Provider configuration from TOML (`[providers.<name>]` sections)

use serde::{Deserialize, Serialize};
use snapstudy_domain::ProviderId;

/// One hosted provider.
///
/// # Example
///
/// ```toml
/// [providers.groq]
/// api_key_envs = ["GROQ_API_KEY_1", "GROQ_API_KEY_2"]
/// model = "meta-llama/llama-4-scout-17b-16e-instruct"
/// fallback_model = "llama3-8b-8192"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileProviderConfig {
    /// Take part in fan-outs and direct calls.
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    /// Environment variable holding the API key.
    pub api_key_env: Option<String>,
    /// Additional key variables, tried in order after `api_key_env`.
    #[serde(default)]
    pub api_key_envs: Vec<String>,
    /// Direct API key (not recommended: use env var instead).
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub fallback_model: Option<String>,
}

fn enabled_by_default() -> bool {
    true
}

impl FileProviderConfig {
    fn new(api_key_env: Option<&str>, base_url: &str, model: &str, fallback_model: &str) -> Self {
        Self {
            enabled: true,
            api_key_env: api_key_env.map(str::to_string),
            api_key_envs: Vec::new(),
            api_key: None,
            base_url: base_url.to_string(),
            model: model.to_string(),
            fallback_model: Some(fallback_model.to_string()),
        }
    }

    /// Resolve API keys in rotation order: the inline key, then
    /// `api_key_env`, then each of `api_key_envs`. Blank values and
    /// duplicates are skipped.
    pub fn api_keys(&self, lookup: impl Fn(&str) -> Option<String>) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        let from_env = self
            .api_key_env
            .iter()
            .chain(self.api_key_envs.iter())
            .filter_map(|name| lookup(name));

        for key in self.api_key.clone().into_iter().chain(from_env) {
            let key = key.trim().to_string();
            if !key.is_empty() && !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }
}

/// All provider sections, one per supported API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    pub openai: FileProviderConfig,
    pub openrouter: FileProviderConfig,
    pub groq: FileProviderConfig,
    pub gemini: FileProviderConfig,
}

impl Default for FileProvidersConfig {
    fn default() -> Self {
        let mut groq = FileProviderConfig::new(
            None,
            "https://api.groq.com/openai/v1",
            "meta-llama/llama-4-scout-17b-16e-instruct",
            "llama3-8b-8192",
        );
        groq.api_key_envs = vec![
            "GROQ_API_KEY_1".to_string(),
            "GROQ_API_KEY_2".to_string(),
            "GROQ_API_KEY_3".to_string(),
        ];

        Self {
            openai: FileProviderConfig::new(
                Some("OPENAI_API_KEY"),
                "https://api.openai.com/v1",
                "gpt-4o-mini",
                "gpt-3.5-turbo",
            ),
            openrouter: FileProviderConfig::new(
                Some("OPENROUTER_API_KEY"),
                "https://openrouter.ai/api/v1",
                "openai/gpt-4o-mini",
                "openai/gpt-3.5-turbo",
            ),
            groq,
            gemini: FileProviderConfig::new(
                Some("GEMINI_API_KEY"),
                "https://generativelanguage.googleapis.com/v1beta",
                "gemini-1.5-flash",
                "gemini-1.5-pro",
            ),
        }
    }
}

impl FileProvidersConfig {
    pub fn get(&self, id: ProviderId) -> &FileProviderConfig {
        match id {
            ProviderId::OpenAi => &self.openai,
            ProviderId::OpenRouter => &self.openrouter,
            ProviderId::Groq => &self.groq,
            ProviderId::Gemini => &self.gemini,
        }
    }

    /// Enabled providers in fan-out order
    pub fn enabled(&self) -> Vec<ProviderId> {
        ProviderId::ALL
            .iter()
            .copied()
            .filter(|id| self.get(*id).enabled)
            .collect()
    }
}
