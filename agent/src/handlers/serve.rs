//! Serve command handlers
//!
//! Host the orchestrator or Track Scout over HTTP.

use std::sync::Arc;

use anyhow::Result;

use super::CommandContext;
use crate::llm::OllamaClient;
use crate::orchestrator::{orchestrator_card, Pipeline, PlaylistOrchestrator};
use crate::scout::{scout_card, TrackScout};

/// Handle the `serve` command - host the orchestrator
pub async fn run_serve(ctx: &CommandContext) -> Result<()> {
    let settings = &ctx.settings;
    tracing::info!(
        router_mode = %settings.router_mode,
        scout_url = %settings.scout_url,
        model = %settings.model,
        "Starting Playlist Orchestrator"
    );

    let executor = PlaylistOrchestrator::new(Pipeline::from_settings(settings));
    let app = a2a_common::server::router(orchestrator_card(&settings.public_url), Arc::new(executor));

    a2a_common::server::serve(&settings.host, settings.port, app).await
}

/// Handle the `scout` command - host Track Scout
pub async fn run_scout(ctx: &CommandContext) -> Result<()> {
    let settings = &ctx.settings;
    tracing::info!(model = %settings.model, "Starting Track Scout");

    let llm = OllamaClient::new(&settings.ollama_url, &settings.model, settings.llm_timeout);
    let executor = TrackScout::new(Arc::new(llm));
    let app = a2a_common::server::router(scout_card(&settings.scout_public_url), Arc::new(executor));

    a2a_common::server::serve(&settings.host, settings.scout_port, app).await
}
