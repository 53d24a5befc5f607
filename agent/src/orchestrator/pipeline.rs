//! Orchestration Pipeline
//!
//! Turns one inbound request into one [`FinalResult`]:
//!
//! ```text
//! Empty -> Routing -> (Delegating) -> Synthesizing -> Done
//!                          |               |
//!                  DelegationFailed  SynthesisFailed
//! ```
//!
//! At most one delegation and two completion calls happen per request,
//! strictly in that order, with no retries.

use std::future::Future;
use std::sync::Arc;

use super::prompts::{synthesis_prompt, PLAYLIST_PROMPT, SYNTHESIS_HINT};
use super::router::RoutingEngine;
use crate::config::{RouterMode, Settings};
use crate::llm::{CompletionRequest, Llm, LlmError, OllamaClient};
use crate::remote::{A2aBridge, AgentBridge, BridgeError, CardFetcher, HttpCardFetcher};

/// Reply for empty or whitespace-only requests
pub const GUIDANCE_MESSAGE: &str = "Tell me the vibe or occasion and I will build a playlist.";

/// Sampling temperature for playlist synthesis
pub const SYNTHESIS_TEMPERATURE: f32 = 0.6;

/// The single outcome of one request
#[derive(Debug)]
pub enum FinalResult {
    /// Empty input; no remote calls were made
    Guidance,
    Playlist(String),
    DelegationFailed(BridgeError),
    SynthesisFailed(LlmError),
}

impl FinalResult {
    /// Text shown to the caller
    pub fn text(&self) -> String {
        match self {
            FinalResult::Guidance => GUIDANCE_MESSAGE.to_string(),
            FinalResult::Playlist(text) => text.clone(),
            FinalResult::DelegationFailed(e) => format!("Track Scout error: {}", e),
            FinalResult::SynthesisFailed(e) => format!("Ollama error: {}", e),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            FinalResult::DelegationFailed(_) | FinalResult::SynthesisFailed(_)
        )
    }
}

pub struct Pipeline {
    llm: Arc<dyn Llm>,
    bridge: Arc<dyn AgentBridge>,
    router: RoutingEngine,
    mode: RouterMode,
    scout_url: String,
}

impl Pipeline {
    pub fn new(
        llm: Arc<dyn Llm>,
        bridge: Arc<dyn AgentBridge>,
        cards: Arc<dyn CardFetcher>,
        mode: RouterMode,
        scout_url: impl Into<String>,
    ) -> Self {
        let scout_url = scout_url.into();
        Self {
            router: RoutingEngine::new(llm.clone(), cards, scout_url.clone()),
            llm,
            bridge,
            mode,
            scout_url,
        }
    }

    /// Wire the pipeline to Ollama and Track Scout over HTTP
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            Arc::new(OllamaClient::new(
                &settings.ollama_url,
                &settings.model,
                settings.llm_timeout,
            )),
            Arc::new(A2aBridge::new(
                settings.agent_timeout,
                settings.verbose_payloads,
            )),
            Arc::new(HttpCardFetcher::new(settings.card_timeout)),
            settings.router_mode,
            settings.scout_url.clone(),
        )
    }

    pub fn mode(&self) -> RouterMode {
        self.mode
    }

    pub fn router(&self) -> &RoutingEngine {
        &self.router
    }

    /// Run one request to completion
    pub async fn run(&self, request: &str) -> FinalResult {
        let request = request.trim();
        if request.is_empty() {
            return FinalResult::Guidance;
        }

        tracing::info!(mode = %self.mode, "Handling playlist request: {}", request);

        let use_scout = match self.mode {
            RouterMode::Always => true,
            RouterMode::Never => false,
            RouterMode::Auto => self.router.decide(request).await.use_secondary,
        };

        let suggestions = if use_scout {
            match self.bridge.invoke(&self.scout_url, request).await {
                Ok(text) => Some(text),
                Err(e) => {
                    tracing::warn!("Track Scout call failed: {}", e);
                    return FinalResult::DelegationFailed(e);
                }
            }
        } else {
            tracing::info!("Skipping Track Scout");
            None
        };

        let completion = CompletionRequest::new(synthesis_prompt(request, suggestions.as_deref()))
            .with_system_prompt(PLAYLIST_PROMPT)
            .with_temperature(SYNTHESIS_TEMPERATURE)
            .with_routing_hint(SYNTHESIS_HINT);

        match self.llm.complete(completion).await {
            Ok(playlist) => {
                tracing::info!("Playlist synthesized ({} chars)", playlist.len());
                FinalResult::Playlist(playlist)
            }
            Err(e) => {
                tracing::warn!("Synthesis failed: {}", e);
                FinalResult::SynthesisFailed(e)
            }
        }
    }

    /// Run one request, abandoning it once `cancelled` completes
    ///
    /// Returns `None` when cancelled; the in-flight call's result is dropped.
    pub async fn run_until<F>(&self, request: &str, cancelled: F) -> Option<FinalResult>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            result = self.run(request) => Some(result),
            _ = cancelled => {
                tracing::info!("Request cancelled, discarding in-flight result");
                None
            }
        }
    }
}
