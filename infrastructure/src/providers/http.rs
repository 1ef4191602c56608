//! HTTP provider adapter shared by every hosted API.
//!
//! Owns the attempt policy (key rotation, one fallback model with reduced
//! parameters); the wire format is delegated to a [`Dialect`].

use super::{gemini, openai_compat};
use async_trait::async_trait;
use reqwest::Client;
use snapstudy_application::{ProviderAdapter, ProviderError, ProviderRequest};
use snapstudy_domain::conversation::entities::trailing;
use snapstudy_domain::{ConversationTurn, GenerationParams, PromptTemplate, ProviderId, SourceKind};
use tracing::{debug, warn};

/// Wire format spoken by a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `POST {base}/chat/completions` with bearer auth
    OpenAiCompatible,
    /// `POST {base}/models/{model}:generateContent?key=…`
    Gemini,
}

impl Dialect {
    pub fn for_provider(id: ProviderId) -> Self {
        if id.is_openai_compatible() {
            Dialect::OpenAiCompatible
        } else {
            Dialect::Gemini
        }
    }
}

/// Endpoint, models and limits for one provider
#[derive(Debug, Clone)]
pub struct HttpProviderSettings {
    pub base_url: String,
    pub model: String,
    pub fallback_model: Option<String>,
    /// Tried in order on the primary model; the fallback uses the last one
    pub api_keys: Vec<String>,
    pub history_window: usize,
    pub fallback_history_window: usize,
    /// Context budget for the fallback attempt
    pub fallback_chars: usize,
    /// Applied when a request carries no explicit top_k
    pub default_top_k: Option<u32>,
}

/// One fully rendered call to a provider
#[derive(Debug)]
pub(crate) struct ChatAttempt<'a> {
    pub model: &'a str,
    pub api_key: &'a str,
    pub system: &'a str,
    pub history: &'a [ConversationTurn],
    pub user: &'a str,
    pub params: GenerationParams,
}

pub struct HttpProvider {
    id: ProviderId,
    dialect: Dialect,
    client: Client,
    settings: HttpProviderSettings,
}

impl HttpProvider {
    pub fn new(id: ProviderId, client: Client, settings: HttpProviderSettings) -> Self {
        Self {
            id,
            dialect: Dialect::for_provider(id),
            client,
            settings,
        }
    }

    async fn send(&self, attempt: &ChatAttempt<'_>) -> Result<String, ProviderError> {
        let text = match self.dialect {
            Dialect::OpenAiCompatible => {
                openai_compat::complete(&self.client, self.id, &self.settings.base_url, attempt).await?
            }
            Dialect::Gemini => {
                gemini::complete(&self.client, self.id, &self.settings.base_url, attempt).await?
            }
        };
        let text = text.trim();
        if text.is_empty() {
            return Err(ProviderError::EmptyResponse { provider: self.id });
        }
        Ok(text.to_string())
    }

    fn system_prompt(&self, request: &ProviderRequest) -> String {
        match &request.system_prompt {
            Some(prompt) => prompt.clone(),
            None => {
                let kind = request
                    .context
                    .as_ref()
                    .map(|c| c.kind)
                    .unwrap_or(SourceKind::Document);
                PromptTemplate::system(self.id, kind)
            }
        }
    }

    fn params(&self, request: &ProviderRequest) -> GenerationParams {
        let params = request.params.unwrap_or_else(GenerationParams::primary);
        match (params.top_k, self.settings.default_top_k) {
            (None, Some(top_k)) => params.with_top_k(top_k),
            _ => params,
        }
    }
}

#[async_trait]
impl ProviderAdapter for HttpProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    async fn invoke(&self, request: &ProviderRequest) -> Result<String, ProviderError> {
        let Some(last_key) = self.settings.api_keys.last() else {
            return Err(ProviderError::NotConfigured { provider: self.id });
        };

        let system = self.system_prompt(request);
        let params = self.params(request);

        let user = match &request.context {
            Some(context) => {
                PromptTemplate::context_query(&request.message, context, request.context_total_chars)
            }
            None => request.message.clone(),
        };
        let history = trailing(&request.history, self.settings.history_window);

        let mut last_error = None;
        for (i, key) in self.settings.api_keys.iter().enumerate() {
            let attempt = ChatAttempt {
                model: &self.settings.model,
                api_key: key,
                system: &system,
                history,
                user: &user,
                params,
            };
            match self.send(&attempt).await {
                Ok(text) => return Ok(text),
                Err(e) => {
                    warn!("{} key {} failed on {}: {}", self.id, i + 1, self.settings.model, e);
                    last_error = Some(e);
                }
            }
        }

        let Some(fallback_model) = &self.settings.fallback_model else {
            return Err(last_error.unwrap_or(ProviderError::NotConfigured { provider: self.id }));
        };

        debug!("{} retrying with fallback model {}", self.id, fallback_model);
        let fallback_user = match &request.context {
            Some(context) => PromptTemplate::fallback_query(
                &request.message,
                &context.truncated(self.settings.fallback_chars),
            ),
            None => request.message.clone(),
        };
        let attempt = ChatAttempt {
            model: fallback_model,
            api_key: last_key,
            system: &system,
            history: trailing(&request.history, self.settings.fallback_history_window),
            user: &fallback_user,
            params: params.reduced(),
        };

        self.send(&attempt).await.inspect_err(|e| {
            warn!("{} fallback {} failed: {}", self.id, fallback_model, e);
        })
    }
}

/// Map a non-success response to a [`ProviderError`], keeping a short body excerpt
pub(crate) async fn status_error(provider: ProviderId, response: reqwest::Response) -> ProviderError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message: String = body.chars().take(200).collect();
    ProviderError::Status {
        provider,
        status,
        message,
    }
}

pub(crate) fn request_error(provider: ProviderId, error: reqwest::Error) -> ProviderError {
    ProviderError::Request {
        provider,
        message: error.to_string(),
    }
}
