//! Builds the council's member list from the `[providers]` section

use super::{CachedProvider, OllamaProvider, OpenAiCompatProvider};
use crate::config::{FileProvidersConfig, ProviderDefaults, ResolvedProvider};
use council_application::{LlmProvider, ResponseCache};
use council_domain::ProviderClass;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Build every enabled provider, reading API keys from the process
/// environment.
///
/// Providers that cannot be built are logged and skipped; the result may
/// be empty.
pub fn build_providers(
    config: &FileProvidersConfig,
    cache: Option<Arc<dyn ResponseCache>>,
) -> Vec<Arc<dyn LlmProvider>> {
    build_providers_with(config, cache, |var| std::env::var(var).ok())
}

/// Same as [`build_providers`] with an explicit environment lookup
pub fn build_providers_with(
    config: &FileProvidersConfig,
    cache: Option<Arc<dyn ResponseCache>>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Vec<Arc<dyn LlmProvider>> {
    let mut providers: Vec<Arc<dyn LlmProvider>> = Vec::new();

    for defaults in ProviderDefaults::all() {
        if !config.is_enabled(&defaults) {
            debug!(provider = defaults.name, "Provider disabled");
            continue;
        }

        let section = config.section(&defaults);
        let resolved = section.resolve(defaults, &lookup);

        let provider: Arc<dyn LlmProvider> = match build_one(&resolved) {
            Some(provider) => provider,
            None => {
                let var = section
                    .api_key_env
                    .as_deref()
                    .or(defaults.api_key_env)
                    .unwrap_or("api_key");
                warn!(
                    provider = resolved.name,
                    "No API key found ({} is not set), skipping provider", var
                );
                continue;
            }
        };

        info!(
            provider = resolved.name,
            model = %resolved.model,
            class = %resolved.class,
            "Provider registered"
        );

        providers.push(match &cache {
            Some(cache) => Arc::new(CachedProvider::new(provider, cache.clone())),
            None => provider,
        });
    }

    providers
}

fn build_one(resolved: &ResolvedProvider) -> Option<Arc<dyn LlmProvider>> {
    match resolved.class {
        ProviderClass::Local => Some(Arc::new(
            OllamaProvider::new(resolved.name, &resolved.base_url, resolved.model.clone())
                .with_temperature(resolved.temperature),
        )),
        ProviderClass::Remote => {
            let api_key = resolved.api_key.clone()?;
            Some(Arc::new(
                OpenAiCompatProvider::new(
                    resolved.name,
                    &resolved.base_url,
                    api_key,
                    resolved.model.clone(),
                )
                .with_temperature(resolved.temperature),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::FifoResponseCache;

    fn names(providers: &[Arc<dyn LlmProvider>]) -> Vec<&str> {
        providers.iter().map(|p| p.name()).collect()
    }

    fn keys(name: &str) -> Option<String> {
        match name {
            "GROQ_API_KEY" => Some("g".to_string()),
            "MISTRAL_API_KEY" => Some("m".to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_hosted_providers_by_default() {
        let providers = build_providers_with(&FileProvidersConfig::default(), None, keys);
        assert_eq!(names(&providers), vec!["Groq", "Mistral"]);
        assert!(providers.iter().all(|p| p.class() == ProviderClass::Remote));
    }

    #[test]
    fn test_use_ollama_replaces_mistral() {
        let config = FileProvidersConfig {
            use_ollama: true,
            ..Default::default()
        };
        let providers = build_providers_with(&config, None, keys);
        assert_eq!(names(&providers), vec!["Groq", "Ollama"]);
        assert_eq!(providers[1].class(), ProviderClass::Local);
    }

    #[test]
    fn test_missing_key_skips_provider() {
        let config = FileProvidersConfig {
            use_ollama: true,
            ..Default::default()
        };
        let providers = build_providers_with(&config, None, |_| None);
        assert_eq!(names(&providers), vec!["Ollama"]);
    }

    #[test]
    fn test_nothing_available() {
        let providers = build_providers_with(&FileProvidersConfig::default(), None, |_| None);
        assert!(providers.is_empty());
    }

    #[test]
    fn test_cache_wrapping_keeps_identity() {
        let cache: Arc<dyn ResponseCache> = Arc::new(FifoResponseCache::default());
        let providers =
            build_providers_with(&FileProvidersConfig::default(), Some(cache), keys);
        assert_eq!(names(&providers), vec!["Groq", "Mistral"]);
    }
}
