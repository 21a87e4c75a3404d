//! LLM backend implementations.
//!
//! Each backend implements [`crate::chat::ChatProvider`] and is organized
//! into its own submodule.
//!
//! # Available Backends
//!
//! - [`openai`] - OpenAI API and OpenAI-compatible endpoints
//! - [`mock`] - Canned responses for tests and offline runs

pub mod mock;

#[cfg(feature = "openai")]
pub mod openai;

pub use mock::MockProvider;

#[cfg(feature = "openai")]
pub use openai::{OpenAI, OpenAIConfig};
