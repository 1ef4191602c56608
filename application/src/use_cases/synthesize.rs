//! Synthesize use case
//!
//! Reduces the results of a fan-out to one answer.

use crate::ports::progress::ProgressNotifier;
use crate::ports::provider::{ProviderAdapter, ProviderRequest};
use snapstudy_domain::{
    Answer, DomainError, GenerationParams, PromptTemplate, QueryPhase, QueryRun, Resolution,
    SynthesisInput,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during synthesis
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SynthesizeError {
    #[error("All providers failed to respond")]
    NoSuccessfulResults,

    #[error(transparent)]
    State(#[from] DomainError),
}

/// Merges successful provider responses through a designated provider
pub struct SynthesizeUseCase {
    synthesizer: Option<Arc<dyn ProviderAdapter>>,
    timeout: Option<Duration>,
}

impl SynthesizeUseCase {
    pub fn new(synthesizer: Option<Arc<dyn ProviderAdapter>>) -> Self {
        Self {
            synthesizer,
            timeout: None,
        }
    }

    /// Bound the synthesis call; exceeding it counts as a failed synthesis.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Produce the final answer and advance `run` out of the fan-out.
    ///
    /// - no successful result: `AllFailed`, error
    /// - one: returned verbatim, `DirectReturn`
    /// - several: synthesized (or longest on failure), `AwaitingSynthesis -> Done`
    pub async fn execute(
        &self,
        input: SynthesisInput,
        run: &mut QueryRun,
        progress: &dyn ProgressNotifier,
    ) -> Result<Answer, SynthesizeError> {
        let successful = input.successful();

        match successful.as_slice() {
            [] => {
                run.advance(QueryPhase::AllFailed)?;
                Err(SynthesizeError::NoSuccessfulResults)
            }
            [only] => {
                debug!("Single successful response from {}, skipping synthesis", only.provider);
                run.advance(QueryPhase::DirectReturn)?;
                let text = only.response.clone().unwrap_or_default();
                Ok(Answer::new(text, Resolution::Direct { provider: only.provider }))
            }
            _ => {
                run.advance(QueryPhase::AwaitingSynthesis)?;
                let answer = self
                    .merge(&input, progress)
                    .await
                    .ok_or(SynthesizeError::NoSuccessfulResults)?;
                run.advance(QueryPhase::Done)?;
                Ok(answer)
            }
        }
    }

    async fn merge(&self, input: &SynthesisInput, progress: &dyn ProgressNotifier) -> Option<Answer> {
        let sources = input.success_count();
        info!("Synthesizing {} responses", sources);
        progress.on_phase_start(QueryPhase::AwaitingSynthesis, 1);

        if let Some(synthesizer) = &self.synthesizer {
            let provider = synthesizer.id();
            match self.call(synthesizer.as_ref(), input).await {
                Some(text) => {
                    progress.on_provider_complete(QueryPhase::AwaitingSynthesis, provider, true);
                    progress.on_phase_complete(QueryPhase::AwaitingSynthesis);
                    return Some(Answer::new(
                        text,
                        Resolution::Synthesized {
                            synthesizer: provider,
                            sources,
                        },
                    ));
                }
                None => {
                    progress.on_provider_complete(QueryPhase::AwaitingSynthesis, provider, false);
                }
            }
        } else {
            debug!("No synthesizer available");
        }

        progress.on_phase_complete(QueryPhase::AwaitingSynthesis);
        Self::longest(input, sources)
    }

    /// The trimmed synthesis text, or `None` if the call failed or was empty
    async fn call(&self, synthesizer: &dyn ProviderAdapter, input: &SynthesisInput) -> Option<String> {
        let prompt = PromptTemplate::synthesis_prompt(
            &input.question,
            &input.labeled_responses(),
            input.context_chars,
        );
        let request = ProviderRequest::new(prompt)
            .with_system_prompt(PromptTemplate::synthesis_system())
            .with_params(GenerationParams::synthesis());

        let outcome = match self.timeout {
            Some(timeout) => match tokio::time::timeout(timeout, synthesizer.invoke(&request)).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    warn!("Synthesis timed out after {:?}, using longest response", timeout);
                    return None;
                }
            },
            None => synthesizer.invoke(&request).await,
        };

        match outcome {
            Ok(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
            Ok(_) => {
                warn!("Synthesis returned empty text, using longest response");
                None
            }
            Err(e) => {
                warn!("Synthesis failed, using longest response: {}", e);
                None
            }
        }
    }

    fn longest(input: &SynthesisInput, sources: usize) -> Option<Answer> {
        let best = input.longest_response()?;
        Some(Answer::new(
            best.response.clone().unwrap_or_default(),
            Resolution::LongestFallback {
                provider: best.provider,
                sources,
            },
        ))
    }
}
