//! Mock AI Provider for testing.
//!
//! Returns queued responses in order, then falls back to a generator
//! function (by default a fixed string). Every request is recorded.
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_response("Intro\nResults")
//!     .with_fallback(|req| format!("Draft for: {}", req.user_prompt().unwrap_or("")));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, TokenUsage,
};

type Fallback = Arc<dyn Fn(&CompletionRequest) -> String + Send + Sync>;

/// Mock AI provider for testing.
#[derive(Clone)]
pub struct MockAIProvider {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    fallback: Fallback,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(String),
    Error(MockError),
}

/// Mock error types for testing error handling.
#[derive(Debug, Clone)]
pub enum MockError {
    RateLimited { retry_after_secs: u32 },
    Unavailable { message: String },
    AuthenticationFailed,
    Network { message: String },
    Timeout { timeout_secs: u32 },
}

impl From<MockError> for AIError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => AIError::rate_limited(retry_after_secs),
            MockError::Unavailable { message } => AIError::unavailable(message),
            MockError::AuthenticationFailed => AIError::AuthenticationFailed,
            MockError::Network { message } => AIError::network(message),
            MockError::Timeout { timeout_secs } => AIError::Timeout { timeout_secs },
        }
    }
}

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAIProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            fallback: Arc::new(|_| "Mock response".to_string()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a successful response.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.push(MockResponse::Success(content.into()));
        self
    }

    /// Queues an error response.
    pub fn with_error(self, error: MockError) -> Self {
        self.push(MockResponse::Error(error));
        self
    }

    /// Sets the generator used once the queue is empty.
    pub fn with_fallback<F>(mut self, fallback: F) -> Self
    where
        F: Fn(&CompletionRequest) -> String + Send + Sync + 'static,
    {
        self.fallback = Arc::new(fallback);
        self
    }

    /// Returns the number of calls made to this provider.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn push(&self, response: MockResponse) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
    }

    fn next_response(&self) -> Option<MockResponse> {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let response = self.next_response();
        let content = match response {
            Some(MockResponse::Success(content)) => content,
            Some(MockResponse::Error(err)) => {
                self.calls
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(request);
                return Err(err.into());
            }
            None => (self.fallback)(&request),
        };

        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        Ok(CompletionResponse {
            content,
            usage: TokenUsage::new(5, 10),
            model: "mock-model-1".to_string(),
            finish_reason: FinishReason::Stop,
        })
    }
}
