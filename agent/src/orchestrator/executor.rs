//! Orchestrator as a hosted agent

use a2a_common::{
    async_trait, AgentCard, AgentExecutor, AgentSkill, EventQueue, ExecutorError, RequestContext,
};

use super::pipeline::Pipeline;

/// Agent card for the orchestrator
pub fn orchestrator_card(public_url: &str) -> AgentCard {
    AgentCard::new(
        "Playlist Orchestrator",
        "Coordinates with another agent to build a music playlist.",
        public_url,
    )
    .with_skill(
        AgentSkill::new(
            "build_playlist",
            "Build a playlist",
            "Creates a playlist using another agent's suggestions.",
        )
        .with_tags(&["music", "playlist", "a2a"])
        .with_example("Late-night synthwave for coding"),
    )
}

/// Runs the pipeline for each inbound message and emits its result
pub struct PlaylistOrchestrator {
    pipeline: Pipeline,
}

impl PlaylistOrchestrator {
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }
}

#[async_trait]
impl AgentExecutor for PlaylistOrchestrator {
    async fn execute(&self, context: RequestContext, queue: EventQueue) -> Result<(), ExecutorError> {
        let request = context.user_input();
        tracing::info!(message_id = %context.message().message_id, "Orchestrator request received");

        match self.pipeline.run_until(&request, queue.closed()).await {
            Some(result) => {
                tracing::info!(failed = result.is_failure(), "Orchestrator request finished");
                queue.enqueue_text(result.text())
            }
            None => Ok(()),
        }
    }

    /// Requests are short-lived and not tracked, so there is nothing to cancel
    async fn cancel(&self, _task_id: &str) -> Result<(), ExecutorError> {
        Err(ExecutorError::CancellationUnsupported)
    }
}
