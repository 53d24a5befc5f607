//! Error types shared by agent executors and the hosting server

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

/// Errors an executor can return to the hosting server
#[derive(Debug, thiserror::Error)]
pub enum ExecutorError {
    /// Cancelling a running request is not supported by this agent.
    /// This is a permanent limitation, not a transient failure.
    #[error("cancel not supported")]
    CancellationUnsupported,

    /// The inbound request went away before the executor could emit
    #[error("event queue closed")]
    QueueClosed,
}

impl ExecutorError {
    /// HTTP status the server reports this error with
    pub fn status_code(&self) -> StatusCode {
        match self {
            ExecutorError::CancellationUnsupported => StatusCode::NOT_IMPLEMENTED,
            ExecutorError::QueueClosed => StatusCode::GONE,
        }
    }
}

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}

impl IntoResponse for ExecutorError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}
