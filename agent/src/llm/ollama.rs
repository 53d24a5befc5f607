//! Ollama completion backend

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use ollama_rs::Ollama;
use serde::{Deserialize, Serialize};

use super::types::{ChatOptions, ChatRequest, ChatResponse};
use super::{CompletionRequest, Llm, LlmError};

/// Information about an available model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub size: u64,
    pub modified_at: String,
}

/// List available models from Ollama
pub async fn list_models(ollama_url: &str) -> Result<Vec<ModelInfo>> {
    let url = url::Url::parse(ollama_url)?;
    let host = format!(
        "{}://{}",
        url.scheme(),
        url.host_str().unwrap_or("localhost")
    );
    let port = url.port().unwrap_or(11434);

    let models = Ollama::new(host, port).list_local_models().await?;

    Ok(models
        .into_iter()
        .map(|m| ModelInfo {
            name: m.name,
            size: m.size,
            modified_at: m.modified_at,
        })
        .collect())
}

/// Direct HTTP client for the Ollama chat endpoint
pub struct OllamaClient {
    http_client: reqwest::Client,
    ollama_url: String,
    model: String,
    timeout: Duration,
}

impl OllamaClient {
    /// Create a new Ollama client
    pub fn new(url: &str, model: &str, timeout: Duration) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            ollama_url: url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            timeout,
        }
    }

    fn map_send_error(&self, e: reqwest::Error) -> LlmError {
        if e.is_timeout() {
            LlmError::Timeout(self.timeout)
        } else {
            LlmError::Transport(e.to_string())
        }
    }
}

#[async_trait]
impl Llm for OllamaClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        let body = ChatRequest {
            model: request.model.clone().unwrap_or_else(|| self.model.clone()),
            messages: request.messages(),
            stream: false,
            options: request.temperature.map(|temperature| ChatOptions { temperature }),
        };

        let url = format!("{}/api/chat", self.ollama_url);
        tracing::debug!(
            model = %body.model,
            hint = request.routing_hint.as_deref().unwrap_or("-"),
            "Sending completion request"
        );

        let mut builder = self.http_client.post(&url).timeout(self.timeout).json(&body);
        if let Some(hint) = &request.routing_hint {
            builder = builder.header(reqwest::header::HOST, hint.as_str());
        }

        let response = builder.send().await.map_err(|e| self.map_send_error(e))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Backend { status, body });
        }

        let raw_body = response.text().await.map_err(|e| self.map_send_error(e))?;
        let parsed: ChatResponse =
            serde_json::from_str(&raw_body).map_err(|e| LlmError::Decode(e.to_string()))?;

        let content = parsed.message.content.trim().to_string();
        tracing::debug!("Completion returned {} chars", content.len());
        Ok(content)
    }
}
