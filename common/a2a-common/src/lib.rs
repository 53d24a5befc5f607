//! A2A Common - shared plumbing for agent-to-agent services
//!
//! - **Types**: agent cards, messages and request envelopes
//! - **Executor**: the [`AgentExecutor`] contract each agent implements
//! - **Server**: axum router hosting an executor over HTTP+JSON and SSE
//! - **Stream**: client-side decoding of streamed responses
//! - **Init**: tracing setup
//!
//! # Example
//!
//! ```rust,ignore
//! use a2a_common::{server, AgentCard};
//!
//! let card = AgentCard::new("Echo", "Repeats what you say", "http://localhost:9000/");
//! let app = server::router(card, Arc::new(EchoExecutor));
//! server::serve("0.0.0.0", 9000, app).await?;
//! ```

pub mod error;
pub mod executor;
pub mod init;
pub mod net;
pub mod server;
pub mod stream;
pub mod types;

pub use error::{ErrorResponse, ExecutorError};
pub use executor::{event_queue, AgentExecutor, EventQueue, EventReceiver, RequestContext};
pub use init::init_tracing;
pub use net::{resolve_url, ResolvedTarget};
pub use stream::{MessageStream, SseDecoder, StreamError};
pub use types::{
    endpoint, AgentCapabilities, AgentCard, AgentSkill, Message, Part, Role, SendMessageRequest,
    SendMessageResponse, StreamResponse, AGENT_CARD_PATH, SEND_PATH, STREAM_PATH,
};

// Re-export async_trait for implementing AgentExecutor
pub use async_trait::async_trait;
