//! HTTP+JSON server hosting one agent executor
//!
//! Routes:
//! - `GET  /.well-known/agent-card.json` - the agent card
//! - `POST /v1/message/send` - run the executor, respond with its last message
//! - `POST /v1/message/stream` - run the executor, stream each message as SSE
//! - `POST /v1/tasks/:id/cancel` - forwarded to [`AgentExecutor::cancel`]
//! - `GET  /health`

use std::convert::Infallible;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Path, State},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
    routing::{get, post},
    Json, Router,
};
use futures_util::stream::{self, Stream};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::error::ExecutorError;
use crate::executor::{event_queue, AgentExecutor, EventReceiver, RequestContext};
use crate::types::{AgentCard, Message, SendMessageRequest, SendMessageResponse, StreamResponse};

/// Shared state for one hosted agent
#[derive(Clone)]
struct ServerState {
    card: Arc<AgentCard>,
    executor: Arc<dyn AgentExecutor>,
}

/// Build the router for an agent
pub fn router(card: AgentCard, executor: Arc<dyn AgentExecutor>) -> Router {
    let state = ServerState {
        card: Arc::new(card),
        executor,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/.well-known/agent-card.json", get(agent_card))
        .route("/v1/message/send", post(send_message))
        .route("/v1/message/stream", post(stream_message))
        .route("/v1/tasks/:id/cancel", post(cancel_task))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind `host:port` and serve until Ctrl+C
pub async fn serve(host: &str, port: u16, app: Router) -> Result<()> {
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Run the executor on its own task; the receiver yields its messages
fn spawn_execution(executor: Arc<dyn AgentExecutor>, message: Message) -> EventReceiver {
    let (queue, rx) = event_queue();

    tokio::spawn(async move {
        let context = RequestContext::new(message);
        match executor.execute(context, queue).await {
            Ok(()) => {}
            Err(ExecutorError::QueueClosed) => {
                tracing::debug!("Caller went away before the executor finished");
            }
            Err(e) => tracing::warn!("Executor failed: {}", e),
        }
    });

    rx
}

async fn agent_card(State(state): State<ServerState>) -> Json<AgentCard> {
    Json(state.card.as_ref().clone())
}

async fn health(State(state): State<ServerState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "agent": state.card.name,
    }))
}

async fn send_message(
    State(state): State<ServerState>,
    Json(req): Json<SendMessageRequest>,
) -> Json<SendMessageResponse> {
    let mut rx = spawn_execution(state.executor.clone(), req.message);

    let mut last = None;
    while let Some(message) = rx.recv().await {
        last = Some(message);
    }

    Json(SendMessageResponse { message: last })
}

async fn stream_message(
    State(state): State<ServerState>,
    Json(req): Json<SendMessageRequest>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = spawn_execution(state.executor.clone(), req.message);

    // Dropping this stream (client disconnect) drops the receiver and closes the queue
    let events = stream::unfold(rx, |mut rx| async move {
        let message = rx.recv().await?;
        Some((Ok(to_event(message)), rx))
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

fn to_event(message: Message) -> Event {
    let payload = StreamResponse {
        message: Some(message),
    };
    match serde_json::to_string(&payload) {
        Ok(json) => Event::default().data(json),
        Err(e) => {
            tracing::error!("Failed to encode stream event: {}", e);
            Event::default().comment("encode error")
        }
    }
}

async fn cancel_task(
    State(state): State<ServerState>,
    Path(task_id): Path<String>,
) -> axum::response::Response {
    match state.executor.cancel(&task_id).await {
        Ok(()) => Json(serde_json::json!({ "status": "cancelled", "id": task_id })).into_response(),
        Err(e) => {
            tracing::info!(task_id = %task_id, "Cancel rejected: {}", e);
            e.into_response()
        }
    }
}
