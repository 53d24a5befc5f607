//! Health check command handler
//!
//! Checks the settings, Ollama connectivity and Track Scout's card.

use anyhow::Result;

use super::CommandContext;
use crate::llm::list_models;
use crate::remote::{CardFetcher, HttpCardFetcher};

/// Handle the `health` command
pub async fn run_health(ctx: &CommandContext) -> Result<()> {
    println!("=== Playlist Agent Health Check ===\n");

    let mut checks_run = 0;
    let mut checks_passed = 0;

    check_settings(ctx);
    checks_run += 1;
    checks_passed += 1;

    checks_run += 1;
    if check_llm_connectivity(ctx).await {
        checks_passed += 1;
    }

    checks_run += 1;
    if check_scout_card(ctx).await {
        checks_passed += 1;
    }

    // Summary
    println!("\n=== Summary ===");
    println!("Checks: {}/{} passed", checks_passed, checks_run);

    if checks_passed == checks_run {
        println!("\nAll health checks passed!");
        Ok(())
    } else {
        anyhow::bail!("{} of {} health checks failed", checks_run - checks_passed, checks_run)
    }
}

fn status(passed: bool) -> &'static str {
    if passed {
        "✓"
    } else {
        "✗"
    }
}

fn check_settings(ctx: &CommandContext) {
    let settings = &ctx.settings;
    if ctx.config_loaded {
        println!("Config (.agent.toml): {} Found", status(true));
    } else {
        println!("Config (.agent.toml): {} Not found (using defaults)", status(true));
    }
    println!("  - Ollama URL: {}", settings.ollama_url);
    println!("  - Model: {}", settings.model);
    println!("  - Router mode: {}", settings.router_mode);
    println!("  - Track Scout URL: {}", settings.scout_url);
}

async fn check_llm_connectivity(ctx: &CommandContext) -> bool {
    let settings = &ctx.settings;
    print!("LLM Connectivity: ");

    match list_models(&settings.ollama_url).await {
        Ok(models) => {
            let available = models.iter().any(|m| m.name == settings.model);
            if available {
                println!("{} Connected ({} models)", status(true), models.len());
            } else {
                println!(
                    "{} Connected, but model '{}' is not pulled",
                    status(false),
                    settings.model
                );
                for model in models.iter().take(5) {
                    println!("  - {}", model.name);
                }
            }
            available
        }
        Err(e) => {
            println!("{} Failed: {}", status(false), e);
            false
        }
    }
}

async fn check_scout_card(ctx: &CommandContext) -> bool {
    let settings = &ctx.settings;
    print!("Track Scout card: ");

    let descriptor = HttpCardFetcher::new(settings.card_timeout)
        .fetch(&settings.scout_url)
        .await;

    if descriptor.is_empty() {
        println!("{} Unreachable at {}", status(false), settings.scout_url);
        false
    } else {
        println!(
            "{} {} ({} skills)",
            status(true),
            descriptor.name,
            descriptor.skills.len()
        );
        true
    }
}
