//! OpenAI-compatible chat completions adapter (Groq, Mistral)

use super::http::{check_status, client, transport_error, trim_base_url};
use async_trait::async_trait;
use council_application::{LlmProvider, ProviderError};
use council_domain::ProviderClass;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Option<Vec<ChatChoice>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Hosted provider speaking the `/chat/completions` protocol
pub struct OpenAiCompatProvider {
    name: String,
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl OpenAiCompatProvider {
    pub fn new(
        name: impl Into<String>,
        base_url: &str,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            client: client(REQUEST_TIMEOUT),
            base_url: trim_base_url(base_url),
            api_key: api_key.into(),
            model: model.into(),
            temperature: 0.7,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl LlmProvider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn class(&self) -> ProviderClass {
        ProviderClass::Remote
    }

    async fn query(&self, prompt: &str, model: Option<&str>) -> Result<String, ProviderError> {
        let model = model.unwrap_or(&self.model);
        let request = ChatRequest {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
        };

        debug!(provider = %self.name, model, "Sending chat completion request");

        let response = self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let response = check_status(response).await?;
        let body: ChatResponse = response.json().await.map_err(transport_error)?;

        if let Some(error) = body.error {
            return Err(ProviderError::Other(error.message));
        }

        body.choices
            .and_then(|choices| choices.into_iter().next())
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::InvalidResponse("no choices in response".to_string()))
    }
}
