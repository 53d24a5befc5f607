//! Test doubles for the completion backend and the remote agent

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm::{CompletionRequest, Llm, LlmError};
use crate::remote::{AgentBridge, BridgeError, CapabilityDescriptor, CardFetcher};

/// Completion backend that replays queued replies and records requests
#[derive(Default)]
pub struct MockLlm {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockLlm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, text: &str) -> Self {
        self.replies.lock().unwrap().push_back(Ok(text.to_string()));
        self
    }

    pub fn fail(self, status: u16, body: &str) -> Self {
        self.replies.lock().unwrap().push_back(Err(LlmError::Backend {
            status,
            body: body.to_string(),
        }));
        self
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Llm for MockLlm {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::Transport("no reply queued".to_string())))
    }
}

/// Remote agent that answers every call with the same outcome
pub struct MockBridge {
    reply: Result<String, String>,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockBridge {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            reply: Err(reason.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// `(address, text)` of every invocation
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AgentBridge for MockBridge {
    async fn invoke(&self, address: &str, text: &str) -> Result<String, BridgeError> {
        self.calls
            .lock()
            .unwrap()
            .push((address.to_string(), text.to_string()));
        self.reply
            .clone()
            .map_err(BridgeError::AgentUnavailable)
    }
}

/// Remote agent that never answers
pub struct HangingBridge;

#[async_trait]
impl AgentBridge for HangingBridge {
    async fn invoke(&self, _address: &str, _text: &str) -> Result<String, BridgeError> {
        std::future::pending().await
    }
}

/// Card fetcher returning a fixed descriptor and counting fetches
#[derive(Default)]
pub struct StaticCards {
    descriptor: CapabilityDescriptor,
    fetches: Mutex<usize>,
}

impl StaticCards {
    pub fn track_scout() -> Self {
        Self {
            descriptor: CapabilityDescriptor {
                name: "Track Scout".to_string(),
                description: "Suggests tracks that match a playlist request.".to_string(),
                url: Some("http://scout.test/".to_string()),
                skills: Vec::new(),
            },
            fetches: Mutex::new(0),
        }
    }

    pub fn fetches(&self) -> usize {
        *self.fetches.lock().unwrap()
    }
}

#[async_trait]
impl CardFetcher for StaticCards {
    async fn fetch(&self, _address: &str) -> CapabilityDescriptor {
        *self.fetches.lock().unwrap() += 1;
        self.descriptor.clone()
    }
}
