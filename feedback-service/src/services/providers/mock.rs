//! Stub provider for testing.

use super::{Completion, CompletionError, CompletionProvider, CompletionRequest};
use async_trait::async_trait;
use std::sync::Mutex;

/// Returns a canned result and records every request it receives.
pub struct StubCompletionProvider {
    outcome: Result<Completion, CompletionError>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl StubCompletionProvider {
    pub fn new(outcome: Result<Completion, CompletionError>) -> Self {
        Self {
            outcome,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer every call with a single choice containing `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self::new(Ok(Completion::from_text(text)))
    }

    pub fn failing(error: CompletionError) -> Self {
        Self::new(Err(error))
    }

    /// Requests seen so far, oldest first.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CompletionProvider for StubCompletionProvider {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, CompletionError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        self.outcome.clone()
    }

    async fn health_check(&self) -> Result<(), CompletionError> {
        Ok(())
    }
}
