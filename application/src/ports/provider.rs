//! Provider adapter port
//!
//! Defines the uniform contract every hosted LLM API is wrapped in.

use async_trait::async_trait;
use snapstudy_domain::{ConversationTurn, GenerationParams, ProviderId, SourceContext};
use thiserror::Error;

/// Single-provider failure.
///
/// Raised by an adapter only after its fallback attempt has also failed,
/// or immediately when the provider has no API key.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("{provider}: no API key configured")]
    NotConfigured { provider: ProviderId },

    #[error("{provider}: request failed: {message}")]
    Request { provider: ProviderId, message: String },

    #[error("{provider}: HTTP {status}: {message}")]
    Status {
        provider: ProviderId,
        status: u16,
        message: String,
    },

    #[error("{provider}: empty response")]
    EmptyResponse { provider: ProviderId },

    #[error("{provider}: {message}")]
    Unavailable { provider: ProviderId, message: String },
}

impl ProviderError {
    pub fn provider(&self) -> ProviderId {
        match self {
            ProviderError::NotConfigured { provider }
            | ProviderError::Request { provider, .. }
            | ProviderError::Status { provider, .. }
            | ProviderError::EmptyResponse { provider }
            | ProviderError::Unavailable { provider, .. } => *provider,
        }
    }
}

/// Everything an adapter needs to build one provider-specific request
#[derive(Debug, Clone, Default)]
pub struct ProviderRequest {
    /// The user message
    pub message: String,
    /// Full conversation so far; adapters send only a trailing window
    pub history: Vec<ConversationTurn>,
    /// Source text, already cut to the primary budget by the caller
    pub context: Option<SourceContext>,
    /// Length of the source before the caller truncated it
    pub context_total_chars: usize,
    /// Replaces the shared system prompt when set
    pub system_prompt: Option<String>,
    /// Replaces the primary generation preset when set
    pub params: Option<GenerationParams>,
}

impl ProviderRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_history(mut self, history: Vec<ConversationTurn>) -> Self {
        self.history = history;
        self
    }

    /// Attach source context. The total length is taken from `context` and
    /// can be overridden with [`Self::with_context_total_chars`].
    pub fn with_context(mut self, context: SourceContext) -> Self {
        self.context_total_chars = context.char_len();
        self.context = Some(context);
        self
    }

    pub fn with_context_total_chars(mut self, total: usize) -> Self {
        self.context_total_chars = total;
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = Some(params);
        self
    }
}

/// A hosted LLM API behind one uniform operation.
///
/// Implementations live in the infrastructure layer (HTTP adapters and an
/// offline mock); use cases only see this trait.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    fn id(&self) -> ProviderId;

    /// Send one request, trying the fallback model once on failure
    async fn invoke(&self, request: &ProviderRequest) -> Result<String, ProviderError>;
}
