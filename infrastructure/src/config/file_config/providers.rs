//! Provider configuration from TOML (`[providers]` section)
//!
//! ```toml
//! [providers]
//! use_ollama = true
//!
//! [providers.groq]
//! model = "llama-3.1-8b-instant"
//!
//! [providers.ollama]
//! base_url = "http://gpu-box:11434"
//! ```
//!
//! Every field is optional; unset fields take the per-provider defaults in
//! [`ProviderDefaults`].

use council_domain::ProviderClass;
use serde::{Deserialize, Deserializer, Serialize};

/// Built-in settings of one known provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProviderDefaults {
    /// Display name, also the provider's key in every result map
    pub name: &'static str,
    pub class: ProviderClass,
    /// Environment variable holding the API key; `None` for keyless backends
    pub api_key_env: Option<&'static str>,
    pub base_url: &'static str,
    pub model: &'static str,
    pub temperature: f32,
}

impl ProviderDefaults {
    pub const GROQ: ProviderDefaults = ProviderDefaults {
        name: "Groq",
        class: ProviderClass::Remote,
        api_key_env: Some("GROQ_API_KEY"),
        base_url: "https://api.groq.com/openai/v1",
        model: "llama-3.1-70b-versatile",
        temperature: 0.7,
    };

    pub const MISTRAL: ProviderDefaults = ProviderDefaults {
        name: "Mistral",
        class: ProviderClass::Remote,
        api_key_env: Some("MISTRAL_API_KEY"),
        base_url: "https://api.mistral.ai/v1",
        model: "mistral-large-latest",
        temperature: 0.7,
    };

    pub const OLLAMA: ProviderDefaults = ProviderDefaults {
        name: "Ollama",
        class: ProviderClass::Local,
        api_key_env: None,
        base_url: "http://localhost:11434",
        model: "llama3.1",
        temperature: 0.7,
    };

    /// Known providers in registration order
    pub fn all() -> [ProviderDefaults; 3] {
        [Self::GROQ, Self::OLLAMA, Self::MISTRAL]
    }
}

/// Raw settings of one provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Force the provider on or off; unset means "decide from context"
    pub enabled: Option<bool>,
    /// Environment variable name for the API key
    pub api_key_env: Option<String>,
    /// Direct API key (prefer `api_key_env`)
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
}

/// Provider settings with every default applied
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProvider {
    pub name: &'static str,
    pub class: ProviderClass,
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
}

impl FileProviderConfig {
    /// Apply `defaults`, looking the API key up through `lookup`
    pub fn resolve(
        &self,
        defaults: ProviderDefaults,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> ResolvedProvider {
        let api_key = non_empty(self.api_key.clone()).or_else(|| {
            self.api_key_env
                .as_deref()
                .or(defaults.api_key_env)
                .and_then(|var| non_empty(lookup(var)))
        });

        ResolvedProvider {
            name: defaults.name,
            class: defaults.class,
            api_key,
            base_url: non_empty(self.base_url.clone())
                .unwrap_or_else(|| defaults.base_url.to_string()),
            model: non_empty(self.model.clone()).unwrap_or_else(|| defaults.model.to_string()),
            temperature: self.temperature.unwrap_or(defaults.temperature),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Raw `[providers]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// Use the local Ollama runtime; Mistral is then left out unless
    /// explicitly enabled
    #[serde(deserialize_with = "lenient_bool")]
    pub use_ollama: bool,
    pub groq: FileProviderConfig,
    pub mistral: FileProviderConfig,
    pub ollama: FileProviderConfig,
}

impl FileProvidersConfig {
    /// Raw section of a known provider
    pub fn section(&self, defaults: &ProviderDefaults) -> &FileProviderConfig {
        match defaults.name {
            "Mistral" => &self.mistral,
            "Ollama" => &self.ollama,
            _ => &self.groq,
        }
    }

    /// Whether a provider should be built at all
    pub fn is_enabled(&self, defaults: &ProviderDefaults) -> bool {
        let implied = match defaults.name {
            "Ollama" => self.use_ollama,
            "Mistral" => !self.use_ollama,
            _ => true,
        };
        self.section(defaults).enabled.unwrap_or(implied)
    }
}

/// Accept `true`/`false` as well as the strings environment variables
/// produce ("true", "1", "yes", "on", case-insensitive)
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(i) => i != 0,
        Flag::Text(s) => matches!(
            s.trim().to_lowercase().as_str(),
            "true" | "1" | "yes" | "on"
        ),
    })
}
