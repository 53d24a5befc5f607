//! Playlist orchestration
//!
//! - [`router`]: Routing Decision Engine
//! - [`pipeline`]: Orchestration Pipeline
//! - [`executor`]: the pipeline hosted as an agent
//!
//! # Example
//!
//! ```rust,ignore
//! use playlist_agent::orchestrator::Pipeline;
//!
//! let pipeline = Pipeline::from_settings(&settings);
//! let result = pipeline.run("Late-night synthwave for coding").await;
//! println!("{}", result.text());
//! ```

pub mod executor;
pub mod pipeline;
pub mod prompts;
pub mod router;

pub use executor::{orchestrator_card, PlaylistOrchestrator};
pub use pipeline::{FinalResult, Pipeline, GUIDANCE_MESSAGE};
pub use router::{extract_json, interpret, RoutingDecision, RoutingEngine};
