//! Chat types, traits, and utilities for LLM completions.
//!
//! This module provides:
//! - [`ChatRequest`]: Request parameters for chat completions
//! - [`ChatResponse`]: Response from chat completions
//! - [`ToolChoice`]: Controls how the model uses tools, including forcing
//!   a specific named tool
//! - [`ChatProvider`]: Core trait for LLM providers
//!
//! # Example
//!
//! ```rust,ignore
//! use kotoba::prelude::*;
//!
//! let request = ChatRequest::new("gpt-4o-mini")
//!     .user("What is the weather in San Francisco?")
//!     .max_tokens(512)
//!     .tools(vec![weather_tool.definition()])
//!     .tool_choice(ToolChoice::Function("get_weather".into()));
//!
//! let response = provider.chat(&request).await?;
//! println!("{}", serde_json::to_string_pretty(&response)?);
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::message::Message;
use crate::tool::ToolDefinition;
use crate::usage::Usage;

/// A chat completion request to an LLM.
///
/// Aligns with OpenAI's Chat Completions API parameters. Provider-specific
/// fields may be ignored by other backends.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Model identifier (e.g., "gpt-4o-mini").
    #[serde(default)]
    pub model: String,

    /// Conversation messages.
    #[serde(default)]
    pub messages: Vec<Message>,

    /// Maximum tokens to generate (deprecated, use max_completion_tokens).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Maximum completion tokens (preferred over max_tokens for newer models).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_completion_tokens: Option<u32>,

    /// Sampling temperature (0.0 to 2.0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,

    /// Stop sequences.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,

    /// Tools available for the model to call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDefinition>>,

    /// Controls how the model uses tools, pre-encoded to the wire format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<Value>,

    /// Whether to enable parallel tool calls.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallel_tool_calls: Option<bool>,

    /// Response format specification (for JSON mode / structured outputs).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,

    /// User identifier for tracking and abuse detection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl ChatRequest {
    /// Creates a new request with the specified model.
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Creates a request with messages.
    #[must_use]
    pub fn with_messages(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            ..Default::default()
        }
    }

    /// Adds a system message.
    #[must_use]
    pub fn system(mut self, content: impl Into<String>) -> Self {
        self.messages.push(Message::system(content));
        self
    }

    /// Adds a user message.
    #[must_use]
    pub fn user(mut self, content: impl Into<String>) -> Self {
        self.messages.push(Message::user(content));
        self
    }

    /// Adds an assistant message.
    #[must_use]
    pub fn assistant(mut self, content: impl Into<String>) -> Self {
        self.messages.push(Message::assistant(content));
        self
    }

    /// Adds a message.
    #[must_use]
    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Sets all messages.
    #[must_use]
    pub fn messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    /// Sets max tokens (legacy, prefer max_completion_tokens).
    #[must_use]
    pub const fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Sets max completion tokens (preferred for newer models).
    #[must_use]
    pub const fn max_completion_tokens(mut self, tokens: u32) -> Self {
        self.max_completion_tokens = Some(tokens);
        self
    }

    /// Sets temperature.
    #[must_use]
    pub const fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets top_p.
    #[must_use]
    pub const fn top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Sets stop sequences.
    #[must_use]
    pub fn stop(mut self, stop: Vec<String>) -> Self {
        self.stop = Some(stop);
        self
    }

    /// Sets tools.
    #[must_use]
    pub fn tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Adds a single tool.
    #[must_use]
    pub fn tool(mut self, tool: ToolDefinition) -> Self {
        self.tools.get_or_insert_with(Vec::new).push(tool);
        self
    }

    /// Sets tool choice.
    ///
    /// Accepts a [`ToolChoice`] or a string: `"auto"`, `"required"`,
    /// `"none"`, or a function name to force that tool.
    #[must_use]
    pub fn tool_choice(mut self, choice: impl Into<ToolChoice>) -> Self {
        self.tool_choice = Some(choice.into().to_value());
        self
    }

    /// Enables or disables parallel tool calls.
    #[must_use]
    pub const fn parallel_tool_calls(mut self, enabled: bool) -> Self {
        self.parallel_tool_calls = Some(enabled);
        self
    }

    /// Sets response format.
    #[must_use]
    pub fn response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = Some(format);
        self
    }

    /// Sets structured output by inferring the JSON Schema from a Rust type.
    ///
    /// The type must derive [`schemars::JsonSchema`]. The response can be
    /// deserialized with [`ChatResponse::parse`].
    #[must_use]
    pub fn output_type<T: schemars::JsonSchema>(self) -> Self {
        self.response_format(ResponseFormat::from_type::<T>())
    }

    /// Sets user identifier.
    #[must_use]
    pub fn user_id(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }
}

/// Controls how the model uses tools.
///
/// [`ToolChoice::Function`] forces the model to invoke the named tool
/// rather than choosing freely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ToolChoice {
    /// Model decides whether to use tools.
    #[default]
    Auto,
    /// Model must use at least one tool.
    Required,
    /// Model cannot use any tools.
    None,
    /// Model must call the specified function.
    Function(String),
}

impl ToolChoice {
    /// Converts to the OpenAI wire encoding.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Auto => Value::String("auto".to_owned()),
            Self::Required => Value::String("required".to_owned()),
            Self::None => Value::String("none".to_owned()),
            Self::Function(name) => serde_json::json!({
                "type": "function",
                "function": {"name": name}
            }),
        }
    }
}

impl From<&str> for ToolChoice {
    fn from(s: &str) -> Self {
        match s {
            "auto" => Self::Auto,
            "required" => Self::Required,
            "none" => Self::None,
            name => Self::Function(name.to_owned()),
        }
    }
}

/// Response format specification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Plain text response.
    Text,
    /// JSON object response.
    JsonObject,
    /// JSON response with schema (structured outputs).
    JsonSchema {
        /// Schema definition.
        json_schema: JsonSchemaSpec,
    },
}

impl ResponseFormat {
    /// Creates a JSON object format.
    #[must_use]
    pub const fn json() -> Self {
        Self::JsonObject
    }

    /// Creates a JSON schema format.
    #[must_use]
    pub fn json_schema(name: impl Into<String>, schema: Value) -> Self {
        Self::JsonSchema {
            json_schema: JsonSchemaSpec {
                name: name.into(),
                schema,
                strict: Some(true),
            },
        }
    }

    /// Creates a JSON schema format by auto-generating the schema from a
    /// Rust type deriving [`schemars::JsonSchema`].
    #[must_use]
    pub fn from_type<T: schemars::JsonSchema>() -> Self {
        let (name, schema_value) = generate_json_schema::<T>();
        Self::json_schema(name, schema_value)
    }
}

/// Generate a JSON Schema from a Rust type that implements
/// [`schemars::JsonSchema`].
///
/// Returns `(name, schema)` where `name` is derived from the type name and
/// `schema` is the JSON Schema definition with the `$schema` meta field
/// removed (LLM APIs don't need it).
///
/// This is the single source of truth for schema generation, used by both
/// [`ResponseFormat::from_type`] and [`args_schema`](crate::tool::args_schema).
#[must_use]
pub fn generate_json_schema<T: schemars::JsonSchema>() -> (String, Value) {
    let root = schemars::schema_for!(T);
    let mut schema_value = serde_json::to_value(&root).unwrap_or_default();

    if let Value::Object(ref mut map) = schema_value {
        map.remove("$schema");
    }

    let name = <T as schemars::JsonSchema>::schema_name();
    (name.into_owned(), schema_value)
}

/// JSON schema specification for structured outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSchemaSpec {
    /// Schema name.
    pub name: String,
    /// JSON Schema definition.
    pub schema: Value,
    /// Whether to enforce strict validation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
}

/// Reason why the model stopped generating.
///
/// Maps to `finish_reason` in the Chat Completions API response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum StopReason {
    /// Natural stop (end of response).
    #[default]
    Stop,
    /// Maximum token limit reached.
    Length,
    /// Model decided to call tools.
    ToolCalls,
    /// Content was filtered by safety systems.
    ContentFilter,
}

impl StopReason {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Stop => "stop",
            Self::Length => "length",
            Self::ToolCalls => "tool_calls",
            Self::ContentFilter => "content_filter",
        }
    }

    /// Parse from a provider finish-reason string (case-insensitive).
    ///
    /// Handles provider-specific spellings: "length"/"max_tokens",
    /// "tool_calls"/"tool_use", "content_filter". Anything else, including
    /// "stop" and "end_turn", maps to [`StopReason::Stop`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "length" | "max_tokens" => Self::Length,
            "tool_calls" | "tool_use" => Self::ToolCalls,
            "content_filter" => Self::ContentFilter,
            _ => Self::Stop,
        }
    }

    /// Returns `true` if the model completed normally.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Stop | Self::ToolCalls)
    }

    /// Returns `true` if the model was cut off due to length.
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        matches!(self, Self::Length)
    }

    /// Returns `true` if the model called tools.
    #[must_use]
    pub const fn is_tool_call(&self) -> bool {
        matches!(self, Self::ToolCalls)
    }
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A chat completion response from an LLM.
///
/// Serializes cleanly to JSON, so the whole result can be inspected with
/// `serde_json::to_string_pretty`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The generated message.
    pub message: Message,

    /// Why the model stopped generating.
    pub stop_reason: StopReason,

    /// Token usage statistics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,

    /// Model identifier used for this response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Unique completion ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl ChatResponse {
    /// Creates a new response with a message.
    #[must_use]
    pub const fn new(message: Message) -> Self {
        Self {
            message,
            stop_reason: StopReason::Stop,
            usage: None,
            model: None,
            id: None,
        }
    }

    /// Creates a response from text content.
    #[must_use]
    pub fn from_text(content: impl Into<String>) -> Self {
        Self::new(Message::assistant(content))
    }

    /// Sets the stop reason.
    #[must_use]
    pub const fn with_stop_reason(mut self, reason: StopReason) -> Self {
        self.stop_reason = reason;
        self
    }

    /// Sets usage statistics.
    #[must_use]
    pub const fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = Some(usage);
        self
    }

    /// Sets the model identifier.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the completion ID.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Returns the text content of the response.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.message.text()
    }

    /// Deserialize the response text into a concrete Rust type.
    ///
    /// This is the companion to [`ChatRequest::output_type`]. When the LLM
    /// produces structured JSON output, this method parses the text content
    /// directly into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] if the response has no text content or
    /// if the text cannot be deserialized into `T`.
    pub fn parse<T: for<'de> Deserialize<'de>>(&self) -> serde_json::Result<T> {
        serde_json::from_str(self.text().unwrap_or_default())
    }

    /// Returns `true` if the response contains tool calls.
    #[must_use]
    pub fn has_tool_calls(&self) -> bool {
        self.message.has_tool_calls()
    }

    /// Returns the tool calls if present.
    #[must_use]
    pub fn tool_calls(&self) -> Option<&[crate::message::ToolCall]> {
        self.message.tool_calls.as_deref()
    }

    /// Returns `true` if the model completed normally.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.stop_reason.is_complete()
    }

    /// Returns `true` if the response was truncated due to length.
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        self.stop_reason.is_truncated()
    }
}

/// Trait for providers that support chat completions.
///
/// This is the seam all LLM backends implement. A provider performs exactly
/// one completion per call; feeding tool results back into the model is the
/// caller's business.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a chat completion request and receive a complete response.
    ///
    /// # Errors
    ///
    /// Returns an [`crate::error::Error`] if the request fails (network,
    /// authentication, provider rejection, or malformed response).
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse>;

    /// Get the name of this provider, used in errors and logging.
    fn provider_name(&self) -> &'static str;

    /// Get the default model for this provider.
    fn default_model(&self) -> &str;

    /// Check if this provider supports tool/function calling.
    fn supports_tools(&self) -> bool {
        true
    }

    /// Check if this provider supports JSON mode / structured outputs.
    fn supports_json_mode(&self) -> bool {
        false
    }
}

/// Extension trait for [`ChatProvider`] with convenience methods.
#[async_trait]
pub trait ChatProviderExt: ChatProvider {
    /// Send a simple text message and get a text response.
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest::new(self.default_model()).user(prompt);
        let response = self.chat(&request).await?;
        Ok(response.text().unwrap_or_default().to_owned())
    }

    /// Send a message with a system prompt.
    async fn complete_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        let request = ChatRequest::new(self.default_model())
            .system(system)
            .user(prompt);
        let response = self.chat(&request).await?;
        Ok(response.text().unwrap_or_default().to_owned())
    }
}

impl<T: ChatProvider> ChatProviderExt for T {}

/// Type alias for an Arc-wrapped ChatProvider.
pub type SharedChatProvider = std::sync::Arc<dyn ChatProvider>;

/// Type alias for a boxed ChatProvider.
pub type BoxedChatProvider = Box<dyn ChatProvider>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    mod chat_request {
        use super::*;

        #[test]
        fn new_creates_with_model() {
            let req = ChatRequest::new("gpt-4o-mini");
            assert_eq!(req.model, "gpt-4o-mini");
            assert!(req.messages.is_empty());
        }

        #[test]
        fn with_messages_sets_both() {
            let msgs = vec![Message::user("Hello")];
            let req = ChatRequest::with_messages("gpt-4o-mini", msgs);

            assert_eq!(req.model, "gpt-4o-mini");
            assert_eq!(req.messages.len(), 1);
        }

        #[test]
        fn message_shorthands_add_in_order() {
            let req = ChatRequest::new("gpt-4o-mini")
                .system("Be helpful")
                .user("Hello")
                .assistant("Hi");

            assert_eq!(req.messages.len(), 3);
            assert_eq!(req.messages[0].role.as_str(), "system");
            assert_eq!(req.messages[1].role.as_str(), "user");
            assert_eq!(req.messages[2].role.as_str(), "assistant");
        }

        #[test]
        fn messages_replaces_all() {
            let req = ChatRequest::new("gpt-4o-mini")
                .user("First")
                .messages(vec![Message::user("Second")]);

            assert_eq!(req.messages.len(), 1);
            assert_eq!(req.messages[0].text().unwrap(), "Second");
        }

        #[test]
        fn token_limit_setters() {
            let req = ChatRequest::new("gpt-4o-mini").max_tokens(512);
            assert_eq!(req.max_tokens, Some(512));

            let req = ChatRequest::new("gpt-4o-mini").max_completion_tokens(200);
            assert_eq!(req.max_completion_tokens, Some(200));
        }

        #[test]
        fn sampling_setters() {
            let req = ChatRequest::new("gpt-4o-mini").temperature(0.7).top_p(0.9);
            assert_eq!(req.temperature, Some(0.7));
            assert_eq!(req.top_p, Some(0.9));
        }

        #[test]
        fn stop_sets_sequences() {
            let req = ChatRequest::new("gpt-4o-mini").stop(vec!["END".into()]);
            assert_eq!(req.stop.as_ref().unwrap().len(), 1);
        }

        #[test]
        fn tool_appends_to_existing_tools() {
            let schema = serde_json::json!({"type": "object"});
            let req = ChatRequest::new("gpt-4o-mini")
                .tool(ToolDefinition::new("a", "first", schema.clone()))
                .tool(ToolDefinition::new("b", "second", schema));

            assert_eq!(req.tools.as_ref().unwrap().len(), 2);
        }

        #[test]
        fn parallel_tool_calls_sets_value() {
            let req = ChatRequest::new("gpt-4o-mini").parallel_tool_calls(false);
            assert_eq!(req.parallel_tool_calls, Some(false));
        }

        #[test]
        fn user_id_sets_value() {
            let req = ChatRequest::new("gpt-4o-mini").user_id("user-123");
            assert_eq!(req.user.as_deref(), Some("user-123"));
        }

        #[test]
        fn serde_skips_none_values() {
            let req = ChatRequest::new("gpt-4o-mini").user("Hello");
            let json = serde_json::to_string(&req).unwrap();

            assert!(json.contains("model"));
            assert!(json.contains("messages"));
            assert!(!json.contains("max_tokens"));
            assert!(!json.contains("tool_choice"));
        }

        #[test]
        fn serde_roundtrip() {
            let req = ChatRequest::new("gpt-4o-mini")
                .user("Hello")
                .max_tokens(512)
                .temperature(0.7);

            let json = serde_json::to_string(&req).unwrap();
            let parsed: ChatRequest = serde_json::from_str(&json).unwrap();

            assert_eq!(parsed.model, req.model);
            assert_eq!(parsed.max_tokens, req.max_tokens);
            assert_eq!(parsed.temperature, req.temperature);
        }
    }

    mod tool_choice {
        use super::*;

        #[test]
        fn default_is_auto() {
            assert_eq!(ToolChoice::default(), ToolChoice::Auto);
        }

        #[test]
        fn string_modes_to_value() {
            assert_eq!(ToolChoice::Auto.to_value(), Value::String("auto".into()));
            assert_eq!(
                ToolChoice::Required.to_value(),
                Value::String("required".into())
            );
            assert_eq!(ToolChoice::None.to_value(), Value::String("none".into()));
        }

        #[test]
        fn function_to_value() {
            let val = ToolChoice::Function("get_weather".to_owned()).to_value();
            assert_eq!(val["type"], "function");
            assert_eq!(val["function"]["name"], "get_weather");
        }

        #[test]
        fn from_str_known_modes() {
            assert_eq!(ToolChoice::from("auto"), ToolChoice::Auto);
            assert_eq!(ToolChoice::from("required"), ToolChoice::Required);
            assert_eq!(ToolChoice::from("none"), ToolChoice::None);
        }

        #[test]
        fn from_str_unknown_is_function_name() {
            match ToolChoice::from("get_weather") {
                ToolChoice::Function(name) => assert_eq!(name, "get_weather"),
                other => panic!("expected Function, got {other:?}"),
            }
        }

        #[test]
        fn request_stores_encoded_value() {
            let req = ChatRequest::new("gpt-4o-mini").tool_choice("get_weather");

            let choice = req.tool_choice.unwrap();
            assert_eq!(choice["type"], "function");
            assert_eq!(choice["function"]["name"], "get_weather");
        }

        #[test]
        fn request_required_mode() {
            let req = ChatRequest::new("gpt-4o-mini").tool_choice(ToolChoice::Required);
            assert_eq!(req.tool_choice.unwrap(), Value::String("required".into()));
        }
    }

    mod response_format {
        use super::*;

        #[test]
        fn json_creates_json_object() {
            assert!(matches!(ResponseFormat::json(), ResponseFormat::JsonObject));
        }

        #[test]
        fn json_schema_creates_with_spec() {
            let schema = serde_json::json!({"type": "object"});
            let fmt = ResponseFormat::json_schema("Person", schema.clone());

            match fmt {
                ResponseFormat::JsonSchema { json_schema } => {
                    assert_eq!(json_schema.name, "Person");
                    assert_eq!(json_schema.schema, schema);
                    assert_eq!(json_schema.strict, Some(true));
                }
                other => panic!("expected JsonSchema, got {other:?}"),
            }
        }

        #[test]
        fn from_type_generates_schema() {
            #[derive(schemars::JsonSchema)]
            #[allow(dead_code)]
            struct Country {
                name: String,
                capital: String,
            }

            let fmt = ResponseFormat::from_type::<Country>();
            match fmt {
                ResponseFormat::JsonSchema { json_schema } => {
                    assert_eq!(json_schema.name, "Country");
                    assert!(json_schema.schema.get("properties").is_some());
                    assert!(json_schema.schema.get("$schema").is_none());
                }
                other => panic!("expected JsonSchema, got {other:?}"),
            }
        }

        #[test]
        fn serde_tags_with_snake_case_type() {
            let json = serde_json::to_string(&ResponseFormat::JsonObject).unwrap();
            assert!(json.contains(r#""type":"json_object""#));
        }
    }

    mod stop_reason {
        use super::*;

        #[test]
        fn parse_openai_values() {
            assert_eq!(StopReason::parse("stop"), StopReason::Stop);
            assert_eq!(StopReason::parse("length"), StopReason::Length);
            assert_eq!(StopReason::parse("tool_calls"), StopReason::ToolCalls);
            assert_eq!(
                StopReason::parse("content_filter"),
                StopReason::ContentFilter
            );
        }

        #[test]
        fn parse_alternate_spellings() {
            assert_eq!(StopReason::parse("max_tokens"), StopReason::Length);
            assert_eq!(StopReason::parse("tool_use"), StopReason::ToolCalls);
            assert_eq!(StopReason::parse("end_turn"), StopReason::Stop);
        }

        #[test]
        fn parse_is_case_insensitive() {
            assert_eq!(StopReason::parse("TOOL_CALLS"), StopReason::ToolCalls);
        }

        #[test]
        fn parse_unknown_defaults_to_stop() {
            assert_eq!(StopReason::parse("whatever"), StopReason::Stop);
        }

        #[test]
        fn predicates() {
            assert!(StopReason::Stop.is_complete());
            assert!(StopReason::ToolCalls.is_complete());
            assert!(StopReason::ToolCalls.is_tool_call());
            assert!(StopReason::Length.is_truncated());
            assert!(!StopReason::Length.is_complete());
        }

        #[test]
        fn serde_snake_case() {
            let json = serde_json::to_string(&StopReason::ToolCalls).unwrap();
            assert_eq!(json, r#""tool_calls""#);
        }

        #[test]
        fn display_matches_as_str() {
            assert_eq!(StopReason::ContentFilter.to_string(), "content_filter");
        }
    }

    mod chat_response {
        use super::*;
        use crate::message::ToolCall;

        #[test]
        fn from_text_creates_assistant_message() {
            let resp = ChatResponse::from_text("Hello world");

            assert_eq!(resp.message.role.as_str(), "assistant");
            assert_eq!(resp.text(), Some("Hello world"));
            assert_eq!(resp.stop_reason, StopReason::Stop);
        }

        #[test]
        fn builder_chain() {
            let resp = ChatResponse::from_text("Hello")
                .with_stop_reason(StopReason::Stop)
                .with_model("gpt-4o-mini")
                .with_id("chatcmpl-123")
                .with_usage(Usage::new(5, 10));

            assert_eq!(resp.model.as_deref(), Some("gpt-4o-mini"));
            assert_eq!(resp.id.as_deref(), Some("chatcmpl-123"));
            assert!(resp.usage.is_some());
        }

        #[test]
        fn tool_calls_accessor() {
            let msg = Message::assistant_tool_calls(vec![ToolCall::function(
                "call_1",
                "get_weather",
                r#"{"city":"SF"}"#,
            )]);
            let resp = ChatResponse::new(msg).with_stop_reason(StopReason::ToolCalls);

            assert!(resp.has_tool_calls());
            let calls = resp.tool_calls().unwrap();
            assert_eq!(calls.len(), 1);
            assert_eq!(calls[0].name(), "get_weather");
        }

        #[test]
        fn parse_deserializes_text() {
            #[derive(Deserialize)]
            struct Out {
                answer: u32,
            }

            let resp = ChatResponse::from_text(r#"{"answer": 42}"#);
            let out: Out = resp.parse().unwrap();
            assert_eq!(out.answer, 42);
        }

        #[test]
        fn parse_fails_on_missing_text() {
            let resp = ChatResponse::new(Message::assistant_tool_calls(Vec::new()));
            assert!(resp.parse::<Value>().is_err());
        }

        #[test]
        fn completion_predicates() {
            let complete = ChatResponse::from_text("ok");
            assert!(complete.is_complete());
            assert!(!complete.is_truncated());

            let truncated = ChatResponse::from_text("cut").with_stop_reason(StopReason::Length);
            assert!(truncated.is_truncated());
        }

        #[test]
        fn serializes_for_pretty_printing() {
            let resp = ChatResponse::new(Message::assistant_tool_calls(vec![
                ToolCall::function("call_1", "get_weather", r#"{"city":"SF"}"#),
            ]))
            .with_stop_reason(StopReason::ToolCalls)
            .with_usage(Usage::new(50, 12))
            .with_model("gpt-4o-mini");

            let json: Value = serde_json::to_value(&resp).unwrap();
            assert_eq!(json["stop_reason"], "tool_calls");
            assert_eq!(json["message"]["tool_calls"][0]["function"]["name"], "get_weather");
            assert_eq!(json["usage"]["total_tokens"], 62);
        }
    }

    mod provider_ext {
        use super::*;
        use crate::llms::MockProvider;

        #[tokio::test]
        async fn complete_returns_text() {
            let provider = MockProvider::new().with_response(ChatResponse::from_text("Paris"));
            let answer = provider.complete("Capital of France?").await.unwrap();
            assert_eq!(answer, "Paris");
        }

        #[tokio::test]
        async fn complete_with_system_sends_both_messages() {
            let provider = MockProvider::new().with_response(ChatResponse::from_text("ok"));
            provider
                .complete_with_system("Be terse.", "Hello")
                .await
                .unwrap();

            let requests = provider.requests();
            assert_eq!(requests[0].messages.len(), 2);
            assert_eq!(requests[0].messages[0].role.as_str(), "system");
        }
    }
}
