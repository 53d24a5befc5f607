//! Wire types for the Ollama chat endpoint

use serde::{Deserialize, Serialize};

/// Non-streaming chat request
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<ChatOptions>,
}

/// A message in the conversation
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Sampling options
#[derive(Debug, Serialize, Clone, Copy)]
pub struct ChatOptions {
    pub temperature: f32,
}

/// Response from the chat endpoint
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub message: ChatMessage,
}
