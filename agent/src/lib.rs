//! Playlist agent
//!
//! A playlist orchestrator that decides per request whether to consult a
//! Track Scout agent, delegates over A2A when it does, and synthesizes the
//! final playlist with Ollama. Track Scout itself is hosted from the same
//! crate.

pub mod cli;
pub mod config;
pub mod handlers;
pub mod llm;
pub mod orchestrator;
pub mod remote;
pub mod scout;

#[cfg(test)]
mod testing;
