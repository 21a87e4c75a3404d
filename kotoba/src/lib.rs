//! Kotoba - a tool-calling chat completion client for LLM providers
//!
//! This crate provides a small, ergonomic client for chat completions with
//! tool/function calling, including forcing the model to invoke a specific
//! named tool via [`chat::ToolChoice`].

pub mod chat;
pub mod error;
pub mod llms;
pub mod message;
pub mod prelude;
pub mod tool;
pub mod usage;

pub use error::{Error, LlmError, Result, ToolError};
