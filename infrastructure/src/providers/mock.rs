//! Offline provider returning canned answers

use async_trait::async_trait;
use snapstudy_application::{ProviderAdapter, ProviderError, ProviderRequest};
use snapstudy_domain::{PromptTemplate, ProviderId};
use std::time::Duration;

/// Deterministic stand-in for a hosted provider.
///
/// Answers depend only on the request, so fan-out and synthesis can be
/// exercised end to end without network access.
#[derive(Debug, Clone)]
pub struct MockProvider {
    id: ProviderId,
    latency: Duration,
    fail: bool,
}

impl MockProvider {
    pub fn new(id: ProviderId) -> Self {
        Self {
            id,
            latency: Duration::ZERO,
            fail: false,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    fn respond(&self, request: &ProviderRequest) -> String {
        let name = self.id.display_name();

        if request.system_prompt.as_deref() == Some(PromptTemplate::synthesis_system()) {
            return format!(
                "## Synthesized Analysis\n\nThe provider responses agree on the main points of the material. \
                 This combined answer keeps the details each response grounded in the source \
                 and drops the claims none of them supported.\n\n(merged by {name})"
            );
        }

        let question = request.message.to_lowercase();
        let Some(context) = &request.context else {
            return format!(
                "## {name} Response\n\nFor your question about \"{}\", here is a general answer \
                 drawn from broad background knowledge rather than a specific source.\n\n\
                 **Key Insights:**\n- Multiple perspectives considered\n- Practical recommendations included",
                request.message
            );
        };

        if question.contains("summary") || question.contains("overview") {
            format!(
                "## {name} Summary of \"{}\"\n\nThe {} covers its subject in a structured way, \
                 moving from core ideas to practical examples.\n\n**Key Findings:**\n\
                 - Coverage of the core topics\n- Clear progression between sections\n\
                 - Practical applications and examples",
                context.source_name,
                context.kind.as_str()
            )
        } else if question.contains("key") && question.contains("point") {
            format!(
                "## {name} Key Points\n\n1. **Core Concepts**: the principles the material builds on\n\
                 2. **Implementation**: the concrete steps it describes\n\
                 3. **Practices**: the approaches it recommends\n\
                 4. **Challenges**: the problems it identifies\n\
                 5. **Outlook**: where it expects the topic to go"
            )
        } else {
            format!(
                "## {name} Analysis\n\nRegarding \"{}\": the {} \"{}\" spans about {} characters. \
                 The relevant passages address the question directly and support it with examples.",
                request.message,
                context.kind.as_str(),
                context.source_name,
                request.context_total_chars.max(context.char_len())
            )
        }
    }
}

#[async_trait]
impl ProviderAdapter for MockProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    async fn invoke(&self, request: &ProviderRequest) -> Result<String, ProviderError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.fail {
            return Err(ProviderError::Unavailable {
                provider: self.id,
                message: "simulated outage".to_string(),
            });
        }
        Ok(self.respond(request))
    }
}
