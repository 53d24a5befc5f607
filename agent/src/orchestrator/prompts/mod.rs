//! System prompts and routing hints
//!
//! Each completion call site has a fixed system prompt and a hint that
//! tags the call at the transport level so backend logs can tell the
//! call sites apart.

mod playlist;
mod router;
mod scout;

pub use playlist::{synthesis_prompt, PLAYLIST_PROMPT};
pub use router::{routing_prompt, ROUTER_PROMPT};
pub use scout::TRACK_SCOUT_PROMPT;

/// Host hint for routing decisions
pub const ROUTER_HINT: &str = "router.lab";

/// Host hint for playlist synthesis
pub const SYNTHESIS_HINT: &str = "agent2.lab";
