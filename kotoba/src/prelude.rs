//! Prelude module for convenient imports.
//!
//! This module re-exports commonly used types and traits for easy access.
//!
//! # Usage
//!
//! ```rust,ignore
//! use kotoba::prelude::*;
//! ```

#[cfg(feature = "openai")]
pub use crate::llms::{OpenAI, OpenAIConfig};

pub use crate::llms::MockProvider;

pub use crate::chat::{
    BoxedChatProvider, ChatProvider, ChatProviderExt, ChatRequest, ChatResponse, JsonSchemaSpec,
    ResponseFormat, SharedChatProvider, StopReason, ToolChoice,
};
pub use crate::error::{Error, LlmError, LlmErrorKind, Result, ToolError};
pub use crate::message::{FunctionCall, Message, Role, ToolCall};
pub use crate::tool::{
    BoxedTool, DynTool, Tool, ToolBox, ToolDefinition, ToolResult, ToolType, args_schema,
};
pub use crate::usage::{CompletionTokensDetails, PromptTokensDetails, Usage};
