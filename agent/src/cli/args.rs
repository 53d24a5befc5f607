//! CLI argument definitions
//!
//! Contains the main CLI struct and Commands enum for clap parsing.

use clap::{ArgAction, Parser, Subcommand};

use crate::config::{RouterMode, SettingsOverrides};

#[derive(Parser)]
#[command(name = "agent")]
#[command(about = "Playlist orchestrator and Track Scout agents backed by Ollama")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Address to bind servers on (default: 0.0.0.0)
    #[arg(long, env = "HOST", global = true)]
    pub host: Option<String>,

    /// Orchestrator port (default: 9100)
    #[arg(long, env = "ORCH_PORT", global = true)]
    pub port: Option<u16>,

    /// URL the orchestrator advertises on its card
    #[arg(long, env = "ORCH_PUBLIC_URL", global = true)]
    pub public_url: Option<String>,

    /// Track Scout port (default: 9101)
    #[arg(long, env = "SCOUT_PORT", global = true)]
    pub scout_port: Option<u16>,

    /// URL the orchestrator uses to reach Track Scout
    #[arg(long, env = "SCOUT_URL", global = true)]
    pub scout_url: Option<String>,

    /// URL Track Scout advertises on its card
    #[arg(long, env = "SCOUT_PUBLIC_URL", global = true)]
    pub scout_public_url: Option<String>,

    /// Ollama server URL (default: from .agent.toml or http://localhost:11434)
    #[arg(long, env = "OLLAMA_URL", global = true)]
    pub ollama_url: Option<String>,

    /// Model to use (default: from .agent.toml or qwen3:8b)
    #[arg(short = 'm', long, env = "OLLAMA_MODEL", global = true)]
    pub model: Option<String>,

    /// When to consult Track Scout (`llm` is accepted for `auto`)
    #[arg(long, env = "ROUTER_MODE", value_enum, ignore_case = true, global = true)]
    pub router_mode: Option<RouterMode>,

    /// Orchestrator URL used by `ask`
    #[arg(long, env = "ORCH_URL", global = true)]
    pub orch_url: Option<String>,

    /// Log payloads sent to remote agents
    #[arg(long, env = "A2A_VERBOSE", global = true)]
    pub verbose_payloads: bool,

    /// Increase verbosity (-v debug, -vv trace). Default is info.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

impl Cli {
    /// Values given on the command line or through the environment
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            host: self.host.clone(),
            port: self.port,
            public_url: self.public_url.clone(),
            scout_port: self.scout_port,
            scout_url: self.scout_url.clone(),
            scout_public_url: self.scout_public_url.clone(),
            ollama_url: self.ollama_url.clone(),
            model: self.model.clone(),
            router_mode: self.router_mode,
            orchestrator_url: self.orch_url.clone(),
            verbose_payloads: self.verbose_payloads,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Host the playlist orchestrator
    Serve,
    /// Host the Track Scout agent
    Scout,
    /// Send a playlist request to a running orchestrator
    Ask {
        /// Request text (read from stdin when omitted)
        prompt: Vec<String>,
    },
    /// Show the routing decision for a request without running it
    Route {
        /// Request text
        #[arg(required = true)]
        prompt: Vec<String>,
    },
    /// Check Ollama and Track Scout reachability
    Health,
}
