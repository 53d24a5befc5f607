//! Route command handler
//!
//! Prints the routing decision for a request without delegating or
//! synthesizing.

use anyhow::Result;

use super::{join_prompt, CommandContext};
use crate::config::RouterMode;
use crate::orchestrator::Pipeline;

/// Handle the `route` command
pub async fn run_route(ctx: &CommandContext, prompt: &[String]) -> Result<()> {
    let request = join_prompt(prompt);
    if request.is_empty() {
        anyhow::bail!("Please provide a request.");
    }

    let pipeline = Pipeline::from_settings(&ctx.settings);
    match pipeline.mode() {
        RouterMode::Always => println!("use_scout: true (router mode: always)"),
        RouterMode::Never => println!("use_scout: false (router mode: never)"),
        RouterMode::Auto => {
            let decision = pipeline.router().decide(&request).await;
            println!("use_scout: {}", decision.use_secondary);
            if let Some(reason) = decision.reason {
                println!("reason: {}", reason);
            }
        }
    }
    Ok(())
}
