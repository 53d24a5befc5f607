//! Executor contract for agents hosted by [`crate::server`]
//!
//! An agent provides one [`AgentExecutor`] implementation. The server hands
//! each inbound request to [`AgentExecutor::execute`] together with an
//! [`EventQueue`] that carries outbound messages back to the caller.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::ExecutorError;
use crate::types::Message;

/// Request-scoped input for an executor
#[derive(Debug, Clone)]
pub struct RequestContext {
    message: Message,
}

impl RequestContext {
    pub fn new(message: Message) -> Self {
        Self { message }
    }

    /// The inbound message
    pub fn message(&self) -> &Message {
        &self.message
    }

    /// Text of the inbound message, trimmed
    pub fn user_input(&self) -> String {
        self.message.text().trim().to_string()
    }
}

/// Receiving side of an [`EventQueue`]
pub type EventReceiver = mpsc::UnboundedReceiver<Message>;

/// Outbound message queue for one request
///
/// Dropping the receiver (the caller disconnected) closes the queue;
/// executors observe this through [`EventQueue::closed`].
#[derive(Debug, Clone)]
pub struct EventQueue {
    tx: mpsc::UnboundedSender<Message>,
}

/// Create a connected queue/receiver pair
pub fn event_queue() -> (EventQueue, EventReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventQueue { tx }, rx)
}

impl EventQueue {
    /// Enqueue a message
    pub fn enqueue(&self, message: Message) -> Result<(), ExecutorError> {
        self.tx.send(message).map_err(|_| ExecutorError::QueueClosed)
    }

    /// Enqueue an agent text message
    pub fn enqueue_text(&self, text: impl Into<String>) -> Result<(), ExecutorError> {
        self.enqueue(Message::agent_text(text))
    }

    /// Whether the caller has gone away
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    /// Completes once the caller has gone away
    pub async fn closed(&self) {
        self.tx.closed().await
    }
}

/// Request handling contract for one agent role
#[async_trait]
pub trait AgentExecutor: Send + Sync {
    /// Handle one inbound request, emitting zero or more messages
    async fn execute(&self, context: RequestContext, queue: EventQueue)
        -> Result<(), ExecutorError>;

    /// Cancel a running request
    async fn cancel(&self, task_id: &str) -> Result<(), ExecutorError>;
}
