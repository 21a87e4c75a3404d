//! Mock provider implementation for testing.
//!
//! Returns queued responses without making network calls and records every
//! request it receives, so tests can assert on what would have been sent.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::chat::{ChatProvider, ChatRequest, ChatResponse};
use crate::error::Result;

/// A mock provider that cycles through predefined responses.
///
/// # Example
///
/// ```rust,ignore
/// use kotoba::prelude::*;
///
/// let provider = MockProvider::new()
///     .with_response(ChatResponse::from_text("Hello!"));
/// let response = provider.chat(&ChatRequest::new("mock-model").user("Hi")).await?;
/// ```
#[derive(Debug)]
pub struct MockProvider {
    model: String,
    responses: Vec<ChatResponse>,
    response_index: AtomicUsize,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockProvider {
    /// Create a new mock provider with no queued responses.
    #[must_use]
    pub fn new() -> Self {
        Self {
            model: "mock-model".to_owned(),
            responses: Vec::new(),
            response_index: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a response. Responses are returned in order and cycle.
    #[must_use]
    pub fn with_response(mut self, response: ChatResponse) -> Self {
        self.responses.push(response);
        self
    }

    /// Set the model identifier reported by [`ChatProvider::default_model`].
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Get copies of all requests received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .map(|reqs| reqs.clone())
            .unwrap_or_default()
    }

    /// Get a copy of the most recent request, if any.
    #[must_use]
    pub fn last_request(&self) -> Option<ChatRequest> {
        self.requests
            .lock()
            .ok()
            .and_then(|reqs| reqs.last().cloned())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatProvider for MockProvider {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        if let Ok(mut reqs) = self.requests.lock() {
            reqs.push(request.clone());
        }

        if self.responses.is_empty() {
            return Ok(ChatResponse::from_text(""));
        }

        let index = self.response_index.fetch_add(1, Ordering::SeqCst);
        Ok(self.responses[index % self.responses.len()].clone())
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn default_model(&self) -> &str {
        &self.model
    }

    fn supports_json_mode(&self) -> bool {
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::chat::{StopReason, ToolChoice};
    use crate::message::{Message, ToolCall};

    #[tokio::test]
    async fn cycles_through_responses() {
        let provider = MockProvider::new()
            .with_response(ChatResponse::from_text("first"))
            .with_response(ChatResponse::from_text("second"));

        let request = ChatRequest::new("mock-model").user("Hi");

        assert_eq!(provider.chat(&request).await.unwrap().text(), Some("first"));
        assert_eq!(
            provider.chat(&request).await.unwrap().text(),
            Some("second")
        );
        assert_eq!(provider.chat(&request).await.unwrap().text(), Some("first"));
    }

    #[tokio::test]
    async fn empty_queue_returns_empty_text() {
        let provider = MockProvider::new();
        let response = provider
            .chat(&ChatRequest::new("mock-model").user("Hi"))
            .await
            .unwrap();
        assert_eq!(response.text(), Some(""));
    }

    #[tokio::test]
    async fn records_requests() {
        let provider = MockProvider::new().with_response(ChatResponse::from_text("ok"));

        let request = ChatRequest::new("mock-model")
            .user("Hello")
            .tool_choice(ToolChoice::Required);
        provider.chat(&request).await.unwrap();

        let recorded = provider.last_request().unwrap();
        assert_eq!(recorded.messages.len(), 1);
        assert_eq!(
            recorded.tool_choice.unwrap(),
            serde_json::Value::String("required".into())
        );
    }

    #[tokio::test]
    async fn forced_tool_call_scenario() {
        let response = ChatResponse::new(Message::assistant_tool_calls(vec![
            ToolCall::function("call_1", "get_weather", r#"{"city":"San Francisco"}"#),
        ]))
        .with_stop_reason(StopReason::ToolCalls);

        let provider = MockProvider::new().with_response(response);

        let request = ChatRequest::new("mock-model")
            .user("What is the weather?")
            .tool_choice("get_weather");
        let got = provider.chat(&request).await.unwrap();

        assert!(got.has_tool_calls());
        assert_eq!(got.tool_calls().unwrap()[0].name(), "get_weather");
        assert!(got.stop_reason.is_tool_call());
    }

    #[test]
    fn with_model_overrides_default() {
        let provider = MockProvider::new().with_model("custom-mock");
        assert_eq!(provider.default_model(), "custom-mock");
    }
}
