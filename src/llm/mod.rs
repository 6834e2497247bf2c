//! LLM provider abstraction layer.
//!
//! The description generator talks to a language model through the
//! [`LlmProvider`] trait, so tests can script responses and the server can
//! point at any OpenAI-compatible chat completions endpoint.

mod openrouter;
mod provider;
mod types;

pub use openrouter::{OpenRouterProvider, DEFAULT_OPENROUTER_BASE_URL, DEFAULT_OPENROUTER_MODEL};
pub use provider::{CompletionOptions, LlmError, LlmProvider};
pub use types::{CompletionResponse, FinishReason, Message, MessageRole, TokenUsage};
