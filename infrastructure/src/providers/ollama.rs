//! Ollama adapter using the native `/api/chat` endpoint (local runtime)

use super::http::{check_status, client, transport_error};
use async_trait::async_trait;
use council_application::{LlmProvider, ProviderError};
use council_domain::ProviderClass;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(600);

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
    options: ChatOptions,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatOptions {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: Option<ResponseMessage>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Normalize Ollama base URL by stripping trailing slashes and /v1 suffix
fn normalize_base_url(url: &str) -> String {
    let mut url = url.trim_end_matches('/').to_string();
    if url.ends_with("/v1") {
        url.truncate(url.len() - 3);
    }
    url
}

/// Self-hosted Ollama runtime, no auth required
pub struct OllamaProvider {
    name: String,
    client: Client,
    base_url: String,
    model: String,
    temperature: f32,
}

impl OllamaProvider {
    pub fn new(name: impl Into<String>, base_url: &str, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            client: client(REQUEST_TIMEOUT),
            base_url: normalize_base_url(base_url),
            model: model.into(),
            temperature: 0.7,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn class(&self) -> ProviderClass {
        ProviderClass::Local
    }

    async fn query(&self, prompt: &str, model: Option<&str>) -> Result<String, ProviderError> {
        let model = model.unwrap_or(&self.model);
        let request = ChatRequest {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
            options: ChatOptions {
                temperature: self.temperature,
            },
        };

        debug!(provider = %self.name, model, base_url = %self.base_url, "Sending Ollama chat request");

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let response = check_status(response).await?;
        let body: ChatResponse = response.json().await.map_err(transport_error)?;

        if let Some(error) = body.error {
            return Err(ProviderError::Other(error));
        }

        body.message
            .map(|m| m.content)
            .ok_or_else(|| ProviderError::InvalidResponse("missing message in response".to_string()))
    }
}
