//! Provider adapters for hosted LLM APIs
//!
//! [`build_providers`] turns the `[providers]` config into adapters in
//! fan-out order, skipping anything disabled or without an API key.

mod gemini;
pub mod http;
pub mod mock;
mod openai_compat;

pub use http::{Dialect, HttpProvider, HttpProviderSettings};
pub use mock::MockProvider;

use crate::config::FileConfig;
use reqwest::Client;
use snapstudy_application::ProviderAdapter;
use snapstudy_domain::ProviderId;
use std::sync::Arc;
use tracing::{debug, warn};

const GEMINI_TOP_K: u32 = 40;

/// Build HTTP adapters for every enabled provider that has at least one key.
///
/// `lookup` resolves environment variable names; pass `|name| std::env::var(name).ok()`
/// in production.
pub fn build_providers(
    config: &FileConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Vec<Arc<dyn ProviderAdapter>> {
    let client = Client::new();
    let budget = config.to_orchestration_config().budget;
    let mut adapters: Vec<Arc<dyn ProviderAdapter>> = Vec::new();

    for id in config.providers.enabled() {
        let section = config.providers.get(id);
        let api_keys = section.api_keys(&lookup);
        if api_keys.is_empty() {
            warn!("{}: no API key found, provider skipped", id);
            continue;
        }

        debug!("{}: {} key(s), model {}", id, api_keys.len(), section.model);
        let settings = HttpProviderSettings {
            base_url: section.base_url.clone(),
            model: section.model.clone(),
            fallback_model: section.fallback_model.clone(),
            api_keys,
            history_window: config.orchestration.history_window,
            fallback_history_window: config.orchestration.fallback_history_window,
            fallback_chars: budget.fallback_chars,
            default_top_k: (id == ProviderId::Gemini).then_some(GEMINI_TOP_K),
        };
        adapters.push(Arc::new(HttpProvider::new(id, client.clone(), settings)));
    }

    adapters
}

/// Offline adapters for every enabled provider, keys not required.
///
/// Latency and failures come from the `[mock]` section.
pub fn build_mock_providers(config: &FileConfig) -> Vec<Arc<dyn ProviderAdapter>> {
    config
        .providers
        .enabled()
        .into_iter()
        .map(|id| {
            let mut provider = MockProvider::new(id).with_latency(config.mock.latency(id));
            if config.mock.fails(id) {
                debug!("{}: mock set to fail", id);
                provider = provider.failing();
            }
            Arc::new(provider) as Arc<dyn ProviderAdapter>
        })
        .collect()
}
