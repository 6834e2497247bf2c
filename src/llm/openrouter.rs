//! OpenRouter LLM provider.
//!
//! OpenRouter speaks the OpenAI chat completions API and additionally
//! accepts attribution headers identifying the calling application.

use super::provider::{CompletionOptions, LlmError, LlmProvider};
use super::types::{CompletionResponse, FinishReason, Message, MessageRole, TokenUsage};
use crate::config::{ConfigError, Credentials};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_OPENROUTER_MODEL: &str = "deepseek/deepseek-r1-0528:free";

const APP_REFERER: &str = "https://soundfeed-tools.vercel.app/";
const APP_TITLE: &str = "Soundfeed Tools";

pub struct OpenRouterProvider {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl OpenRouterProvider {
    /// Create a provider. Fails immediately when no API key is configured.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the API (e.g., "https://openrouter.ai/api/v1").
    /// * `model` - Model to use (e.g., "deepseek/deepseek-r1-0528:free").
    /// * `credentials` - Must carry an OpenRouter API key.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        credentials: &Credentials,
    ) -> Result<Self, ConfigError> {
        let api_key = credentials.openrouter_api_key()?.to_string();
        let base_url: String = base_url.into();
        Ok(Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.into(),
            api_key,
        })
    }

    fn to_openrouter_messages(messages: &[Message]) -> Vec<ChatMessage> {
        messages.iter().map(|m| m.into()).collect()
    }
}

#[async_trait]
impl LlmProvider for OpenRouterProvider {
    fn name(&self) -> &str {
        "openrouter"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);

        let request = ChatRequest {
            model: self.model.clone(),
            messages: Self::to_openrouter_messages(messages),
            temperature: Some(options.temperature),
            max_tokens: options.max_tokens,
        };

        debug!(
            model = %self.model,
            message_count = messages.len(),
            "Sending completion request to OpenRouter"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", APP_REFERER)
            .header("X-Title", APP_TITLE)
            .json(&request)
            .timeout(options.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout
                } else {
                    LlmError::Connection(e.to_string())
                }
            })?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(LlmError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| LlmError::Connection(e.to_string()))?;
        let chat_response: ChatResponse = serde_json::from_str(&body).map_err(|e| {
            LlmError::InvalidResponse(format!("Failed to parse OpenRouter response: {}", e))
        })?;

        let choice = chat_response.choices.into_iter().next().ok_or_else(|| {
            LlmError::InvalidResponse("No choices in OpenRouter response".to_string())
        })?;

        let content = choice.message.content.unwrap_or_default();
        if content.trim().is_empty() {
            return Err(LlmError::InvalidResponse(
                "Empty completion content".to_string(),
            ));
        }

        let finish_reason = match choice.finish_reason.as_deref() {
            Some("length") => FinishReason::MaxTokens,
            _ => FinishReason::Stop,
        };

        let usage = chat_response.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        debug!(
            finish_reason = ?finish_reason,
            chars = content.chars().count(),
            "Received completion response from OpenRouter"
        );

        Ok(CompletionResponse {
            message: Message::assistant(content),
            finish_reason,
            usage,
        })
    }
}

// OpenRouter API types

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

impl From<&Message> for ChatMessage {
    fn from(msg: &Message) -> Self {
        let role = match msg.role {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        };
        ChatMessage {
            role,
            content: msg.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}
