//! OpenAI chat completion provider.
//!
//! Calls `POST {base_url}/chat/completions` with a bearer credential.
//! No retries: every failure is returned to the caller as-is.

use super::{
    ChatMessage, Completion, CompletionChoice, CompletionError, CompletionProvider,
    CompletionRequest, TokenUsage,
};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenAI provider configuration.
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub api_key: Secret<String>,
    pub base_url: String,
    pub timeout: Duration,
}

pub struct OpenAiProvider {
    settings: OpenAiSettings,
    client: Client,
}

impl OpenAiProvider {
    pub fn new(settings: OpenAiSettings) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(settings.timeout).build()?;

        Ok(Self { settings, client })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.settings.base_url)
    }

    fn models_url(&self) -> String {
        format!("{}/models", self.settings.base_url)
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, CompletionError> {
        let body = ChatCompletionRequest {
            model: &request.model,
            messages: &request.messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        tracing::debug!(
            model = %request.model,
            message_count = request.messages.len(),
            max_tokens = request.max_tokens,
            "Sending request to OpenAI chat completions"
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.settings.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api {
                status: status.as_u16(),
                message: api_error_message(status, &error_text),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let api_response: ChatCompletionResponse = serde_json::from_slice(&bytes)
            .map_err(|e| CompletionError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        Ok(api_response.into())
    }

    async fn health_check(&self) -> Result<(), CompletionError> {
        // Listing models verifies both reachability and the API key.
        let response = self
            .client
            .get(self.models_url())
            .bearer_auth(self.settings.api_key.expose_secret())
            .send()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(CompletionError::Api {
                status: status.as_u16(),
                message: api_error_message(status, &error_text),
            })
        }
    }
}

/// Pull the human-readable message out of an OpenAI error body, falling back
/// to the status line and raw text.
fn api_error_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        if !envelope.error.message.is_empty() {
            return envelope.error.message;
        }
    }

    let body = body.trim();
    if body.is_empty() {
        format!("HTTP {}", status)
    } else {
        format!("HTTP {}: {}", status, body)
    }
}

// ============================================================================
// OpenAI API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

impl From<ChatCompletionResponse> for Completion {
    fn from(response: ChatCompletionResponse) -> Self {
        Completion {
            choices: response
                .choices
                .into_iter()
                .map(|c| CompletionChoice {
                    content: c.message.content,
                    finish_reason: c.finish_reason,
                })
                .collect(),
            usage: response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
            }),
        }
    }
}
