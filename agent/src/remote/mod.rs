//! Clients for the secondary agent
//!
//! - [`card`]: Capability Descriptor Fetcher
//! - [`bridge`]: Agent Bridge

pub mod bridge;
pub mod card;

pub use bridge::{A2aBridge, AgentBridge, AgentSession, BridgeError, ResponseAggregator};
pub use card::{CapabilityDescriptor, CardFetcher, HttpCardFetcher, SkillSummary};
