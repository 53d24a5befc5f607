//! Configuration loading
//!
//! A single immutable [`Settings`] value is resolved once at startup and
//! passed into every component constructor. Resolution order, highest
//! first: CLI flag / environment variable, `.agent.toml`, built-in default.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Find a config file by walking up the directory tree, then checking global config.
///
/// Search order:
/// 1. Current directory and parent directories (walking up to root)
/// 2. Global config at ~/.config/playlist-agent/
fn find_config_file(filename: &str) -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let candidate = current.join(filename);
        if candidate.exists() {
            return Some(candidate);
        }

        // Also check agent/ subdirectory (for workspace root detection)
        let agent_candidate = current.join("agent").join(filename);
        if agent_candidate.exists() {
            return Some(agent_candidate);
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => break,
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let global_path = config_dir.join("playlist-agent").join(filename);
        if global_path.exists() {
            return Some(global_path);
        }
    }

    None
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid {field} URL '{value}': {reason}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },
}

// ============================================================================
// Routing mode
// ============================================================================

/// How the orchestrator decides whether to consult Track Scout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RouterMode {
    /// Always delegate, skip the routing decision
    Always,
    /// Never delegate, skip the routing decision
    Never,
    /// Ask the LLM router for every request
    #[default]
    #[value(alias = "llm")]
    #[serde(alias = "llm")]
    Auto,
}

impl fmt::Display for RouterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RouterMode::Always => "always",
            RouterMode::Never => "never",
            RouterMode::Auto => "auto",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Agent Configuration (.agent.toml)
// ============================================================================

/// Top-level file configuration (from .agent.toml)
#[derive(Debug, Default, Deserialize)]
pub struct AgentFileConfig {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub server: ServerSectionConfig,
    #[serde(default)]
    pub scout: ScoutSectionConfig,
    #[serde(default)]
    pub router: RouterSectionConfig,
}

/// LLM configuration section
#[derive(Debug, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_ollama_url")]
    pub url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_call_timeout_secs")]
    pub timeout_secs: u64,
}

/// Orchestrator server section
#[derive(Debug, Deserialize)]
pub struct ServerSectionConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_orchestrator_port")]
    pub port: u16,
    pub public_url: Option<String>,
}

/// Track Scout section
#[derive(Debug, Deserialize)]
pub struct ScoutSectionConfig {
    #[serde(default = "default_scout_port")]
    pub port: u16,
    /// Address the orchestrator calls
    pub url: Option<String>,
    /// Address Track Scout advertises on its own card
    pub public_url: Option<String>,
    #[serde(default = "default_call_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_card_timeout_secs")]
    pub card_timeout_secs: u64,
}

/// Router section
#[derive(Debug, Default, Deserialize)]
pub struct RouterSectionConfig {
    #[serde(default)]
    pub mode: RouterMode,
}

// Default value functions
fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "qwen3:8b".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_orchestrator_port() -> u16 {
    9100
}

fn default_scout_port() -> u16 {
    9101
}

fn default_call_timeout_secs() -> u64 {
    60
}

fn default_card_timeout_secs() -> u64 {
    10
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            url: default_ollama_url(),
            model: default_model(),
            timeout_secs: default_call_timeout_secs(),
        }
    }
}

impl Default for ServerSectionConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_orchestrator_port(),
            public_url: None,
        }
    }
}

impl Default for ScoutSectionConfig {
    fn default() -> Self {
        Self {
            port: default_scout_port(),
            url: None,
            public_url: None,
            timeout_secs: default_call_timeout_secs(),
            card_timeout_secs: default_card_timeout_secs(),
        }
    }
}

impl AgentFileConfig {
    /// Load config from .agent.toml, `None` when there is none
    ///
    /// Search order:
    /// 1. Walk up directory tree from cwd looking for .agent.toml
    /// 2. Check ~/.config/playlist-agent/.agent.toml (global fallback)
    pub fn discover() -> Result<Option<Self>, ConfigError> {
        match find_config_file(".agent.toml") {
            Some(config_path) => {
                tracing::debug!("Loading config from: {}", config_path.display());
                Self::load_from_path(&config_path).map(Some)
            }
            None => {
                tracing::debug!("No .agent.toml found, using defaults");
                Ok(None)
            }
        }
    }

    /// Load from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

// ============================================================================
// Resolved settings
// ============================================================================

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub public_url: Option<String>,
    pub scout_port: Option<u16>,
    pub scout_url: Option<String>,
    pub scout_public_url: Option<String>,
    pub ollama_url: Option<String>,
    pub model: Option<String>,
    pub router_mode: Option<RouterMode>,
    pub orchestrator_url: Option<String>,
    pub verbose_payloads: bool,
}

/// Process-wide settings, resolved once and never mutated
#[derive(Debug, Clone)]
pub struct Settings {
    /// Address to bind servers on
    pub host: String,
    /// Orchestrator port
    pub port: u16,
    /// Address the orchestrator advertises on its card
    pub public_url: String,
    pub scout_port: u16,
    /// Address the orchestrator uses to reach Track Scout
    pub scout_url: String,
    /// Address Track Scout advertises on its card
    pub scout_public_url: String,
    /// Completion backend base address
    pub ollama_url: String,
    /// Default completion model
    pub model: String,
    pub router_mode: RouterMode,
    /// Orchestrator address used by the `ask` client
    pub orchestrator_url: String,
    pub card_timeout: Duration,
    pub agent_timeout: Duration,
    pub llm_timeout: Duration,
    /// Log request payloads sent to remote agents
    pub verbose_payloads: bool,
}

impl Settings {
    /// Merge overrides over file config over defaults, then validate URLs
    pub fn resolve(
        overrides: SettingsOverrides,
        file: &AgentFileConfig,
    ) -> Result<Self, ConfigError> {
        let port = overrides.port.unwrap_or(file.server.port);
        let scout_port = overrides.scout_port.unwrap_or(file.scout.port);

        let local_url = |p: u16| format!("http://localhost:{}/", p);

        let settings = Self {
            host: overrides.host.unwrap_or_else(|| file.server.host.clone()),
            port,
            public_url: overrides
                .public_url
                .or_else(|| file.server.public_url.clone())
                .unwrap_or_else(|| local_url(port)),
            scout_port,
            scout_url: overrides
                .scout_url
                .or_else(|| file.scout.url.clone())
                .unwrap_or_else(|| local_url(scout_port)),
            scout_public_url: overrides
                .scout_public_url
                .or_else(|| file.scout.public_url.clone())
                .unwrap_or_else(|| local_url(scout_port)),
            ollama_url: overrides.ollama_url.unwrap_or_else(|| file.llm.url.clone()),
            model: overrides.model.unwrap_or_else(|| file.llm.model.clone()),
            router_mode: overrides.router_mode.unwrap_or(file.router.mode),
            orchestrator_url: overrides
                .orchestrator_url
                .unwrap_or_else(|| local_url(port)),
            card_timeout: Duration::from_secs(file.scout.card_timeout_secs),
            agent_timeout: Duration::from_secs(file.scout.timeout_secs),
            llm_timeout: Duration::from_secs(file.llm.timeout_secs),
            verbose_payloads: overrides.verbose_payloads,
        };

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let urls = [
            ("public", &self.public_url),
            ("scout", &self.scout_url),
            ("scout public", &self.scout_public_url),
            ("Ollama", &self.ollama_url),
            ("orchestrator", &self.orchestrator_url),
        ];

        for (field, value) in urls {
            if let Err(e) = url::Url::parse(value) {
                return Err(ConfigError::InvalidUrl {
                    field,
                    value: value.clone(),
                    reason: e.to_string(),
                });
            }
        }
        Ok(())
    }
}
