//! Chat completion provider abstractions and implementations.
//!
//! The feedback handler talks to a `CompletionProvider` trait object so the
//! OpenAI backend can be swapped for the stub provider in tests.

pub mod mock;
pub mod openai;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for provider operations.
///
/// `Api` and `Transport` are failures of the remote service itself;
/// `InvalidResponse` means the service answered but not in the expected shape.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompletionError {
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    InvalidResponse(String),
}

/// Author of a chat message. Feedback prompts are only ever sent as the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// A single chat completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// One generated alternative.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionChoice {
    pub content: Option<String>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// Result of a completion call, choices in the order the service returned them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Completion {
    pub choices: Vec<CompletionChoice>,
    pub usage: Option<TokenUsage>,
}

impl Completion {
    /// A completion with one choice holding `content`.
    pub fn from_text(content: impl Into<String>) -> Self {
        Self {
            choices: vec![CompletionChoice {
                content: Some(content.into()),
                finish_reason: Some("stop".to_string()),
            }],
            usage: None,
        }
    }
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Short provider name for logs and metrics.
    fn name(&self) -> &'static str;

    /// Run one chat completion.
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, CompletionError>;

    /// Whether the provider is able to serve requests.
    async fn health_check(&self) -> Result<(), CompletionError>;
}
