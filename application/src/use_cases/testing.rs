//! Scripted provider doubles shared by use case tests.

use crate::ports::provider::{ProviderAdapter, ProviderError, ProviderRequest};
use async_trait::async_trait;
use snapstudy_domain::{PromptTemplate, ProviderId};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Provider that answers from a script and records every request it sees.
pub(crate) struct ScriptedProvider {
    id: ProviderId,
    reply: Result<String, String>,
    synthesis_reply: Result<String, String>,
    delay: Duration,
    panics: bool,
    pub(crate) requests: Mutex<Vec<ProviderRequest>>,
}

impl ScriptedProvider {
    pub(crate) fn ok(id: ProviderId, text: &str) -> Self {
        Self {
            id,
            reply: Ok(text.to_string()),
            synthesis_reply: Err("synthesis not scripted".to_string()),
            delay: Duration::ZERO,
            panics: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing(id: ProviderId, message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            ..Self::ok(id, "")
        }
    }

    pub(crate) fn panicking(id: ProviderId) -> Self {
        Self {
            panics: true,
            ..Self::ok(id, "")
        }
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) fn synthesizes(mut self, text: &str) -> Self {
        self.synthesis_reply = Ok(text.to_string());
        self
    }

    pub(crate) fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub(crate) fn synthesis_requests(&self) -> Vec<ProviderRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| is_synthesis(r))
            .cloned()
            .collect()
    }

    pub(crate) fn answer_requests(&self) -> Vec<ProviderRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| !is_synthesis(r))
            .cloned()
            .collect()
    }
}

fn is_synthesis(request: &ProviderRequest) -> bool {
    request.system_prompt.as_deref() == Some(PromptTemplate::synthesis_system())
}

#[async_trait]
impl ProviderAdapter for ScriptedProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    async fn invoke(&self, request: &ProviderRequest) -> Result<String, ProviderError> {
        self.requests.lock().unwrap().push(request.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.panics {
            panic!("scripted panic");
        }
        let reply = if is_synthesis(request) {
            &self.synthesis_reply
        } else {
            &self.reply
        };
        reply.clone().map_err(|message| ProviderError::Unavailable {
            provider: self.id,
            message,
        })
    }
}

/// Upcast a list of scripted providers for use case constructors.
pub(crate) fn adapters(providers: &[Arc<ScriptedProvider>]) -> Vec<Arc<dyn ProviderAdapter>> {
    providers
        .iter()
        .map(|p| Arc::clone(p) as Arc<dyn ProviderAdapter>)
        .collect()
}
