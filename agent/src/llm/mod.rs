//! Completion Gateway
//!
//! Sends a system/user prompt pair to the text-generation backend and
//! returns the generated text. Implementations are stateless and safe to
//! call concurrently.

mod ollama;
mod types;

pub use ollama::{list_models, ModelInfo, OllamaClient};
pub use types::{ChatMessage, ChatOptions, ChatRequest, ChatResponse};

use async_trait::async_trait;

/// Default sampling temperature when the caller does not choose one
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Completion gateway failures
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// The backend answered with a non-success status
    #[error("Ollama API error {status}: {body}")]
    Backend { status: u16, body: String },

    #[error("request to Ollama failed: {0}")]
    Transport(String),

    #[error("Ollama did not answer within {0:?}")]
    Timeout(std::time::Duration),

    #[error("failed to parse Ollama response: {0}")]
    Decode(String),
}

/// One completion call
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub user_content: String,
    pub system_prompt: Option<String>,
    /// Overrides the client's default model
    pub model: Option<String>,
    /// `None` leaves the temperature to the backend
    pub temperature: Option<f32>,
    /// Transport-level tag that identifies the call site
    pub routing_hint: Option<String>,
}

impl CompletionRequest {
    pub fn new(user_content: impl Into<String>) -> Self {
        Self {
            user_content: user_content.into(),
            system_prompt: None,
            model: None,
            temperature: Some(DEFAULT_TEMPERATURE),
            routing_hint: None,
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn without_temperature(mut self) -> Self {
        self.temperature = None;
        self
    }

    pub fn with_routing_hint(mut self, hint: impl Into<String>) -> Self {
        self.routing_hint = Some(hint.into());
        self
    }

    /// Optional system message followed by the user message
    pub fn messages(&self) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &self.system_prompt {
            messages.push(ChatMessage::new("system", system.clone()));
        }
        messages.push(ChatMessage::new("user", self.user_content.clone()));
        messages
    }
}

/// Trait for completion backends
#[async_trait]
pub trait Llm: Send + Sync {
    /// Generate one reply, trimmed of surrounding whitespace
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError>;
}
