//! Command handlers module
//!
//! One handler per CLI command. [`CommandContext`] carries the resolved
//! settings shared across handlers.

use anyhow::Result;

use crate::config::{AgentFileConfig, Settings, SettingsOverrides};

pub mod ask;
pub mod health;
pub mod route;
pub mod serve;

pub use ask::run_ask;
pub use health::run_health;
pub use route::run_route;
pub use serve::{run_scout, run_serve};

/// Shared context for command handlers
pub struct CommandContext {
    pub settings: Settings,
    /// Whether a `.agent.toml` was found
    pub config_loaded: bool,
}

impl CommandContext {
    /// Resolve with priority: CLI/env > config file > defaults
    pub fn new(
        overrides: SettingsOverrides,
        file_config: Option<AgentFileConfig>,
    ) -> Result<Self> {
        let config_loaded = file_config.is_some();
        let file_config = file_config.unwrap_or_default();
        let settings = Settings::resolve(overrides, &file_config)?;

        tracing::debug!(?settings, "Settings resolved");
        Ok(Self {
            settings,
            config_loaded,
        })
    }
}

/// Join CLI words into one request
pub(crate) fn join_prompt(words: &[String]) -> String {
    words.join(" ").trim().to_string()
}
