//! CLI module
//!
//! Argument definitions for the `agent` binary. Global flags double as
//! environment variables and feed [`crate::config::SettingsOverrides`].

pub mod args;

pub use args::{Cli, Commands};
