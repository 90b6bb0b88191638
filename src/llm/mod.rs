//! LLM client abstraction.
//!
//! The request path only depends on [`LlmClient`]; [`OpenAiClient`] talks to
//! any OpenAI-compatible `/chat/completions` endpoint (OpenAI, OpenRouter, ...).

mod openai;

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;
use serde::Serialize;
use thiserror::Error;

pub use openai::OpenAiClient;

/// Errors from the completion client.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Missing API key: set OPENAI_API_KEY")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode stream chunk: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Stream error: {0}")]
    Stream(String),
}

impl LlmError {
    /// Whether the failure comes from local configuration rather than the provider.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingApiKey)
    }
}

/// Ordered, finite sequence of generated text fragments.
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String, LlmError>> + Send>>;

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A single chat message sent to the provider.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Provider-neutral completion input.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub prompt: String,
    pub temperature: f32,
}

impl CompletionRequest {
    /// System message followed by the user prompt.
    pub fn messages(&self) -> Vec<ChatMessage> {
        vec![
            ChatMessage {
                role: Role::System,
                content: self.system.clone(),
            },
            ChatMessage {
                role: Role::User,
                content: self.prompt.clone(),
            },
        ]
    }
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Start a streaming completion.
    ///
    /// Errors raised before the first fragment (missing credentials, network
    /// failure, non-2xx status) are returned directly; later failures are
    /// yielded as `Err` items of the stream.
    async fn stream_completion(&self, request: CompletionRequest) -> Result<TextStream, LlmError>;
}
