//! Fan-out use case
//!
//! Invokes every configured provider concurrently under one global timeout.

use crate::ports::progress::ProgressNotifier;
use crate::ports::provider::{ProviderAdapter, ProviderRequest};
use snapstudy_domain::{ProviderResult, QueryPhase};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Errors that end a fan-out without a result list
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FanOutError {
    #[error("No providers configured")]
    NoProviders,

    #[error("Providers did not finish within {}s", .0.as_secs_f32())]
    TimedOut(Duration),
}

/// Concurrent invocation of a fixed provider list
pub struct FanOutUseCase {
    providers: Vec<Arc<dyn ProviderAdapter>>,
}

impl FanOutUseCase {
    pub fn new(providers: Vec<Arc<dyn ProviderAdapter>>) -> Self {
        Self { providers }
    }

    pub fn providers(&self) -> &[Arc<dyn ProviderAdapter>] {
        &self.providers
    }

    /// Invoke all providers with the same request.
    ///
    /// Returns one [`ProviderResult`] per provider in invocation order. A
    /// provider error or a panicking task becomes a failed result; only the
    /// timeout fails the batch as a whole. On timeout every outstanding call
    /// is aborted and late results are dropped.
    pub async fn execute(
        &self,
        request: ProviderRequest,
        timeout: Duration,
        progress: &dyn ProgressNotifier,
    ) -> Result<Vec<ProviderResult>, FanOutError> {
        if self.providers.is_empty() {
            return Err(FanOutError::NoProviders);
        }

        info!("Fanning out to {} providers", self.providers.len());
        progress.on_phase_start(QueryPhase::FanningOut, self.providers.len());

        let request = Arc::new(request);
        let mut join_set = JoinSet::new();

        for (index, provider) in self.providers.iter().enumerate() {
            let provider = Arc::clone(provider);
            let request = Arc::clone(&request);

            join_set.spawn(async move {
                let result = provider.invoke(&request).await;
                (index, result)
            });
        }

        let mut slots: Vec<Option<ProviderResult>> = vec![None; self.providers.len()];

        let collect = async {
            while let Some(joined) = join_set.join_next().await {
                match joined {
                    Ok((index, Ok(text))) => {
                        let provider = self.providers[index].id();
                        if text.trim().is_empty() {
                            warn!("{} returned an empty response", provider);
                            progress.on_provider_complete(QueryPhase::FanningOut, provider, false);
                            slots[index] = Some(ProviderResult::failure(provider, "empty response"));
                        } else {
                            info!("{} responded successfully", provider);
                            progress.on_provider_complete(QueryPhase::FanningOut, provider, true);
                            slots[index] = Some(ProviderResult::success(provider, text));
                        }
                    }
                    Ok((index, Err(e))) => {
                        let provider = self.providers[index].id();
                        warn!("{} failed: {}", provider, e);
                        progress.on_provider_complete(QueryPhase::FanningOut, provider, false);
                        slots[index] = Some(ProviderResult::failure(provider, e.to_string()));
                    }
                    Err(e) => {
                        warn!("Task join error: {}", e);
                    }
                }
            }
        };

        if tokio::time::timeout(timeout, collect).await.is_err() {
            warn!("Fan-out timed out after {:?}", timeout);
            join_set.abort_all();
            progress.on_timeout(QueryPhase::FanningOut);
            return Err(FanOutError::TimedOut(timeout));
        }

        let results: Vec<ProviderResult> = slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.unwrap_or_else(|| {
                    let provider = self.providers[index].id();
                    progress.on_provider_complete(QueryPhase::FanningOut, provider, false);
                    ProviderResult::failure(provider, "task terminated unexpectedly")
                })
            })
            .collect();

        debug!(
            "Fan-out finished: {}/{} succeeded",
            results.iter().filter(|r| r.is_success()).count(),
            results.len()
        );
        progress.on_phase_complete(QueryPhase::FanningOut);
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::progress::NoProgress;
    use crate::use_cases::testing::{ScriptedProvider, adapters};
    use snapstudy_domain::ProviderId;

    #[tokio::test]
    async fn test_no_providers_is_configuration_error() {
        let fan_out = FanOutUseCase::new(vec![]);
        let err = fan_out
            .execute(ProviderRequest::new("q"), Duration::from_secs(1), &NoProgress)
            .await
            .unwrap_err();
        assert_eq!(err, FanOutError::NoProviders);
    }

    #[tokio::test(start_paused = true)]
    async fn test_results_keep_invocation_order() {
        let providers = vec![
            ScriptedProvider::ok(ProviderId::OpenAi, "first")
                .with_delay(Duration::from_millis(30))
                .arc(),
            ScriptedProvider::failing(ProviderId::OpenRouter, "401").arc(),
            ScriptedProvider::ok(ProviderId::Groq, "third").arc(),
        ];
        let fan_out = FanOutUseCase::new(adapters(&providers));

        let results = fan_out
            .execute(ProviderRequest::new("q"), Duration::from_secs(5), &NoProgress)
            .await
            .unwrap();

        let order: Vec<_> = results.iter().map(|r| r.provider).collect();
        assert_eq!(order, vec![ProviderId::OpenAi, ProviderId::OpenRouter, ProviderId::Groq]);
        assert_eq!(results[0].text(), Some("first"));
        assert!(!results[1].is_success());
        assert!(results[1].error.as_deref().unwrap().contains("401"));
        assert_eq!(results[2].text(), Some("third"));
    }

    #[tokio::test]
    async fn test_panic_becomes_failed_result() {
        let providers = vec![
            ScriptedProvider::panicking(ProviderId::Gemini).arc(),
            ScriptedProvider::ok(ProviderId::Groq, "fine").arc(),
        ];
        let fan_out = FanOutUseCase::new(adapters(&providers));

        let results = fan_out
            .execute(ProviderRequest::new("q"), Duration::from_secs(5), &NoProgress)
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].provider, ProviderId::Gemini);
        assert_eq!(results[0].error.as_deref(), Some("task terminated unexpectedly"));
        assert!(results[1].is_success());
    }

    #[tokio::test]
    async fn test_empty_text_is_failure() {
        let providers = vec![ScriptedProvider::ok(ProviderId::OpenAi, "  ").arc()];
        let fan_out = FanOutUseCase::new(adapters(&providers));

        let results = fan_out
            .execute(ProviderRequest::new("q"), Duration::from_secs(5), &NoProgress)
            .await
            .unwrap();

        assert!(!results[0].is_success());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_fails_whole_batch() {
        let providers = vec![
            ScriptedProvider::ok(ProviderId::OpenAi, "fast").arc(),
            ScriptedProvider::ok(ProviderId::Groq, "slow")
                .with_delay(Duration::from_secs(600))
                .arc(),
        ];
        let fan_out = FanOutUseCase::new(adapters(&providers));
        let started = tokio::time::Instant::now();

        let err = fan_out
            .execute(ProviderRequest::new("q"), Duration::from_secs(2), &NoProgress)
            .await
            .unwrap_err();

        assert_eq!(err, FanOutError::TimedOut(Duration::from_secs(2)));
        assert!(started.elapsed() < Duration::from_secs(3));
    }

    #[tokio::test]
    async fn test_every_provider_receives_same_request() {
        let providers = vec![
            ScriptedProvider::ok(ProviderId::OpenAi, "a").arc(),
            ScriptedProvider::ok(ProviderId::Gemini, "b").arc(),
        ];
        let fan_out = FanOutUseCase::new(adapters(&providers));

        fan_out
            .execute(ProviderRequest::new("what?"), Duration::from_secs(5), &NoProgress)
            .await
            .unwrap();

        for provider in &providers {
            let requests = provider.answer_requests();
            assert_eq!(requests.len(), 1);
            assert_eq!(requests[0].message, "what?");
        }
    }
}
