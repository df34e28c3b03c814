//! Diagnosis feedback: prompt the completion provider and map its outcome.

use crate::models::DiagnosisComparison;
use crate::services::metrics::{self, FeedbackOutcome};
use crate::services::prompt::build_feedback_prompt;
use crate::services::providers::{
    ChatMessage, CompletionError, CompletionProvider, CompletionRequest,
};
use service_core::error::AppError;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

/// Output budget for one feedback reply.
pub const MAX_TOKENS: u32 = 300;
pub const TEMPERATURE: f32 = 0.7;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeedbackError {
    /// The completion service reported a failure.
    #[error("OpenAI API Error: {0}")]
    Upstream(String),

    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl From<FeedbackError> for AppError {
    fn from(err: FeedbackError) -> Self {
        AppError::ServerError(err.to_string())
    }
}

pub struct FeedbackHandler {
    provider: Arc<dyn CompletionProvider>,
    model: String,
}

impl FeedbackHandler {
    pub fn new(provider: Arc<dyn CompletionProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Generate feedback text for one comparison. Makes exactly one provider call.
    pub async fn handle(&self, comparison: &DiagnosisComparison) -> Result<String, FeedbackError> {
        let prompt = build_feedback_prompt(comparison);
        let request = CompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user(prompt)],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let started = Instant::now();
        let result = self.provider.complete(&request).await;
        metrics::record_completion_latency(self.provider.name(), &self.model, started.elapsed());

        let outcome = match result {
            Ok(completion) => {
                if let Some(usage) = completion.usage {
                    tracing::debug!(
                        prompt_tokens = usage.prompt_tokens,
                        completion_tokens = usage.completion_tokens,
                        "Completion token usage"
                    );
                }

                match completion.choices.into_iter().next() {
                    None => Err(FeedbackError::Unexpected(
                        "completion response contained no choices".to_string(),
                    )),
                    Some(choice) => {
                        if choice.finish_reason.as_deref() == Some("length") {
                            tracing::warn!(
                                model = %self.model,
                                max_tokens = MAX_TOKENS,
                                "Feedback truncated at the token limit"
                            );
                        }

                        match choice.content {
                            Some(text) if !text.is_empty() => Ok(text),
                            _ => Err(FeedbackError::Unexpected(
                                "completion response contained no message content".to_string(),
                            )),
                        }
                    }
                }
            }
            Err(err @ (CompletionError::Api { .. } | CompletionError::Transport(_))) => {
                Err(FeedbackError::Upstream(err.to_string()))
            }
            Err(CompletionError::InvalidResponse(msg)) => Err(FeedbackError::Unexpected(msg)),
        };

        match &outcome {
            Ok(text) => {
                metrics::record_feedback(FeedbackOutcome::Success);
                tracing::info!(
                    model = %self.model,
                    feedback_len = text.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Generated diagnosis feedback"
                );
            }
            Err(FeedbackError::Upstream(msg)) => {
                metrics::record_feedback(FeedbackOutcome::UpstreamError);
                tracing::error!(model = %self.model, error = %msg, "Completion service failed");
            }
            Err(FeedbackError::Unexpected(msg)) => {
                metrics::record_feedback(FeedbackOutcome::UnexpectedError);
                tracing::error!(model = %self.model, error = %msg, "Unexpected feedback failure");
            }
        }

        outcome
    }

    /// Readiness of the underlying provider.
    pub async fn is_ready(&self) -> bool {
        self.provider.health_check().await.is_ok()
    }
}
