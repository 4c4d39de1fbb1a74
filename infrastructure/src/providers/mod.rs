//! LLM provider adapters
//!
//! Each adapter implements [`LlmProvider`](council_application::LlmProvider)
//! for one backend family. [`build_providers`] turns the `[providers]`
//! config section into the council's member list.

mod cached;
mod factory;
mod http;
mod ollama;
mod openai_compat;

#[cfg(test)]
pub(crate) mod test_server;

pub use cached::CachedProvider;
pub use factory::{build_providers, build_providers_with};
pub use ollama::OllamaProvider;
pub use openai_compat::OpenAiCompatProvider;
