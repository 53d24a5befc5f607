//! Track Scout, the secondary agent
//!
//! Suggests tracks for a playlist request with a single completion call.

use std::sync::Arc;

use a2a_common::{
    async_trait, AgentCard, AgentExecutor, AgentSkill, EventQueue, ExecutorError, RequestContext,
};

use crate::llm::{CompletionRequest, Llm};
use crate::orchestrator::prompts::TRACK_SCOUT_PROMPT;

/// Reply for empty or whitespace-only requests
pub const SCOUT_GUIDANCE_MESSAGE: &str =
    "Tell me a mood, genre, or activity and I will suggest tracks.";

/// Agent card for Track Scout
pub fn scout_card(public_url: &str) -> AgentCard {
    AgentCard::new(
        "Track Scout",
        "Suggests tracks that match a playlist request.",
        public_url,
    )
    .with_skill(
        AgentSkill::new(
            "suggest_tracks",
            "Suggest tracks",
            "Provide track suggestions for a playlist request.",
        )
        .with_tags(&["music", "playlist"])
        .with_example("Upbeat indie pop for a road trip"),
    )
}

pub struct TrackScout {
    llm: Arc<dyn Llm>,
}

impl TrackScout {
    pub fn new(llm: Arc<dyn Llm>) -> Self {
        Self { llm }
    }

    /// Suggestions for `request`, or the text to show instead
    pub async fn suggest(&self, request: &str) -> String {
        let request = request.trim();
        if request.is_empty() {
            return SCOUT_GUIDANCE_MESSAGE.to_string();
        }

        let completion = CompletionRequest::new(request).with_system_prompt(TRACK_SCOUT_PROMPT);
        match self.llm.complete(completion).await {
            Ok(tracks) => {
                tracing::info!("Track Scout suggested {} lines", tracks.lines().count());
                tracks
            }
            Err(e) => {
                tracing::warn!("Track Scout completion failed: {}", e);
                format!("Ollama error: {}", e)
            }
        }
    }
}

#[async_trait]
impl AgentExecutor for TrackScout {
    async fn execute(&self, context: RequestContext, queue: EventQueue) -> Result<(), ExecutorError> {
        let request = context.user_input();
        tracing::info!("Track Scout request: {}", request);

        let reply = tokio::select! {
            reply = self.suggest(&request) => reply,
            _ = queue.closed() => return Ok(()),
        };
        queue.enqueue_text(reply)
    }

    async fn cancel(&self, _task_id: &str) -> Result<(), ExecutorError> {
        Err(ExecutorError::CancellationUnsupported)
    }
}
