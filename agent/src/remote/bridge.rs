//! Agent Bridge
//!
//! Sends one message to a remote agent's streaming endpoint and collects
//! every text fragment it emits until the stream closes.

use std::time::Duration;

use a2a_common::{
    endpoint, resolve_url, Message, MessageStream, SendMessageRequest, StreamError, STREAM_PATH,
};
use async_trait::async_trait;

/// Agent bridge failures
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// Session could not be established or the transport failed mid-stream
    #[error("agent unavailable: {0}")]
    AgentUnavailable(String),

    #[error("agent did not finish within {0:?}")]
    Timeout(Duration),

    /// The agent answered with something other than an event stream
    #[error("unexpected response from agent: {0}")]
    Protocol(String),
}

impl From<StreamError> for BridgeError {
    fn from(e: StreamError) -> Self {
        BridgeError::AgentUnavailable(e.to_string())
    }
}

/// Invokes a remote agent with one message
#[async_trait]
pub trait AgentBridge: Send + Sync {
    /// Aggregated text of every message the agent emitted
    async fn invoke(&self, address: &str, text: &str) -> Result<String, BridgeError>;
}

// ============================================================================
// Aggregation
// ============================================================================

/// Accumulates streamed text fragments in arrival order
#[derive(Debug, Default)]
pub struct ResponseAggregator {
    fragments: Vec<String>,
}

impl ResponseAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fragment; empty fragments are dropped
    pub fn push(&mut self, text: impl Into<String>) {
        let text = text.into();
        if !text.is_empty() {
            self.fragments.push(text);
        }
    }

    /// Fragments joined by newlines, trimmed
    pub fn finish(self) -> String {
        self.fragments.join("\n").trim().to_string()
    }
}

// ============================================================================
// Session
// ============================================================================

/// One open streaming exchange with a remote agent
///
/// The underlying connection is released when the session is dropped,
/// whichever way the caller leaves.
pub struct AgentSession {
    url: String,
    messages: MessageStream,
    received: usize,
}

impl AgentSession {
    /// POST `request` to the agent's streaming endpoint
    pub async fn open(
        http_client: &reqwest::Client,
        address: &str,
        request: &SendMessageRequest,
    ) -> Result<Self, BridgeError> {
        let url = endpoint(address, STREAM_PATH);

        let response = http_client
            .post(&url)
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .json(request)
            .send()
            .await
            .map_err(|e| BridgeError::AgentUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BridgeError::AgentUnavailable(format!("{}: {}", status, body)));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !content_type.starts_with("text/event-stream") {
            return Err(BridgeError::Protocol(format!(
                "expected text/event-stream, got '{}'",
                content_type
            )));
        }

        tracing::debug!(url = %url, "Agent session opened");
        Ok(Self {
            url,
            messages: MessageStream::new(response.bytes_stream()),
            received: 0,
        })
    }

    /// Next message from the agent, `None` once the stream has closed
    pub async fn next_message(&mut self) -> Option<Result<Message, BridgeError>> {
        let item = self.messages.next_message().await?;
        if item.is_ok() {
            self.received += 1;
        }
        Some(item.map_err(BridgeError::from))
    }
}

impl Drop for AgentSession {
    fn drop(&mut self) {
        tracing::debug!(url = %self.url, messages = self.received, "Agent session closed");
    }
}

// ============================================================================
// HTTP bridge
// ============================================================================

/// Bridge over the HTTP+JSON streaming binding
pub struct A2aBridge {
    http_client: reqwest::Client,
    timeout: Duration,
    verbose_payloads: bool,
}

impl A2aBridge {
    pub fn new(timeout: Duration, verbose_payloads: bool) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            timeout,
            verbose_payloads,
        }
    }

    async fn exchange(&self, address: &str, text: &str) -> Result<String, BridgeError> {
        let request = SendMessageRequest {
            message: Message::user_text(text),
        };
        if self.verbose_payloads {
            match serde_json::to_string(&request) {
                Ok(payload) => tracing::info!(payload = %payload, "Outbound agent request"),
                Err(e) => tracing::debug!("Could not encode payload for logging: {}", e),
            }
        }

        let mut session = AgentSession::open(&self.http_client, address, &request).await?;
        let mut aggregator = ResponseAggregator::new();

        while let Some(message) = session.next_message().await {
            aggregator.push(message?.text());
        }

        Ok(aggregator.finish())
    }
}

#[async_trait]
impl AgentBridge for A2aBridge {
    async fn invoke(&self, address: &str, text: &str) -> Result<String, BridgeError> {
        let call = async {
            let target = resolve_url(address).await;
            tracing::info!(
                url = %address,
                host = ?target.host,
                port = ?target.port,
                ips = ?target.ips,
                "Delegating to remote agent"
            );
            self.exchange(address, text).await
        };

        let result = tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| BridgeError::Timeout(self.timeout))?;

        if let Ok(reply) = &result {
            tracing::info!("Remote agent returned {} chars", reply.len());
        }
        result
    }
}
