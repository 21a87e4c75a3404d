//! OpenAI API client implementation.
//!
//! This module provides a client for the Chat Completions API, supporting
//! tool/function calling (including forced tool choice) and structured
//! outputs. The same client works against OpenAI-compatible endpoints by
//! overriding the base URL.

mod chat;
mod client;
mod config;
mod types;

pub use client::OpenAI;
pub use config::OpenAIConfig;
