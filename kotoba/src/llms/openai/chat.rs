//! OpenAI ChatProvider implementation.

use async_trait::async_trait;
use tracing::Instrument;

use crate::chat::{ChatProvider, ChatRequest, ChatResponse, StopReason};
use crate::error::{LlmError, Result};
use crate::message::{Message, Role, ToolCall};

use super::client::OpenAI;
use super::types::OpenAIChatResponse;

impl OpenAI {
    /// Parse the response into a [`ChatResponse`].
    pub(crate) fn parse_response(response: OpenAIChatResponse) -> Result<ChatResponse> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::response_format("at least one choice", "empty choices"))?;

        let stop_reason = choice
            .finish_reason
            .as_deref()
            .map_or(StopReason::Stop, StopReason::parse);

        let tool_calls = choice.message.tool_calls.map(|calls| {
            calls
                .into_iter()
                .map(|tc| ToolCall::function(tc.id, tc.function.name, tc.function.arguments))
                .collect()
        });

        let message = Message {
            role: Role::Assistant,
            content: choice.message.content,
            tool_calls,
            tool_call_id: None,
            name: None,
        };

        let mut chat_response = ChatResponse::new(message)
            .with_stop_reason(stop_reason)
            .with_model(response.model)
            .with_id(response.id);
        chat_response.usage = response.usage;

        Ok(chat_response)
    }
}

#[async_trait]
impl ChatProvider for OpenAI {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let span = tracing::info_span!(
            "chat_completion",
            gen_ai.provider.name = "openai",
            gen_ai.request.model = tracing::field::Empty,
            gen_ai.response.id = tracing::field::Empty,
            gen_ai.usage.input_tokens = tracing::field::Empty,
            gen_ai.usage.output_tokens = tracing::field::Empty,
        );

        async {
            let url = self.chat_url();
            let body = self.build_body(request);
            tracing::Span::current().record("gen_ai.request.model", body.model.as_str());

            let response = self.build_request(&url).json(&body).send().await?;

            let status = response.status();
            if !status.is_success() {
                let error_text = response.text().await.unwrap_or_default();
                return Err(Self::parse_error(status.as_u16(), &error_text).into());
            }

            let response_text = response.text().await?;
            let parsed: OpenAIChatResponse = serde_json::from_str(&response_text).map_err(|e| {
                LlmError::response_format(
                    "valid OpenAI response",
                    format!("parse error: {e}, response: {response_text}"),
                )
            })?;

            let span = tracing::Span::current();
            span.record("gen_ai.response.id", parsed.id.as_str());
            if let Some(usage) = &parsed.usage {
                span.record("gen_ai.usage.input_tokens", u64::from(usage.input_tokens));
                span.record("gen_ai.usage.output_tokens", u64::from(usage.output_tokens));
            }

            Self::parse_response(parsed)
        }
        .instrument(span)
        .await
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn default_model(&self) -> &str {
        self.model()
    }

    fn supports_tools(&self) -> bool {
        true
    }

    fn supports_json_mode(&self) -> bool {
        true
    }
}
