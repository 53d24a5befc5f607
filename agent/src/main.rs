//! Playlist agent CLI
//!
//! Usage:
//!   agent scout                      # host Track Scout on :9101
//!   agent serve                      # host the orchestrator on :9100
//!   agent ask "Late-night synthwave for coding"
//!   agent route "Upbeat indie pop for a road trip"
//!   agent health

use anyhow::Result;
use clap::Parser;

use playlist_agent::cli::{Cli, Commands};
use playlist_agent::config::AgentFileConfig;
use playlist_agent::handlers::{self, CommandContext};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    a2a_common::init_tracing(cli.verbose)?;

    let file_config = AgentFileConfig::discover()?;
    let ctx = CommandContext::new(cli.overrides(), file_config)?;

    match &cli.command {
        Commands::Serve => handlers::run_serve(&ctx).await,
        Commands::Scout => handlers::run_scout(&ctx).await,
        Commands::Ask { prompt } => handlers::run_ask(&ctx, prompt).await,
        Commands::Route { prompt } => handlers::run_route(&ctx, prompt).await,
        Commands::Health => handlers::run_health(&ctx).await,
    }
}
