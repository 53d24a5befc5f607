//! Shared fixtures: a scripted Ollama and agent server helpers

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{extract::State, http::HeaderMap, http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};

use playlist_agent::llm::OllamaClient;
use playlist_agent::scout::{scout_card, TrackScout};

pub const SCOUT_TRACKS: &str = "Artist - Title\nOther Artist - Other Title";
pub const PLAYLIST: &str = "Neon Drive\nA late-night mix.\n1. Artist - Title \u{2014} moody";

/// One request the fake Ollama received
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub host: Option<String>,
    pub body: Value,
}

impl RecordedCall {
    pub fn system_prompt(&self) -> &str {
        self.body["messages"][0]["content"].as_str().unwrap_or_default()
    }

    pub fn user_content(&self) -> &str {
        let messages = self.body["messages"].as_array().unwrap();
        messages.last().unwrap()["content"].as_str().unwrap()
    }

    pub fn temperature(&self) -> Option<f64> {
        self.body["options"]["temperature"].as_f64()
    }
}

/// How the fake Ollama answers
#[derive(Clone)]
pub enum Behaviour {
    /// Answer by call site, routing with the given raw router output
    Scripted { router_reply: String },
    /// Fail every call with this status
    Status(u16),
    /// Never answer within the test
    Stall,
}

#[derive(Clone)]
struct FakeOllama {
    behaviour: Behaviour,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

pub struct OllamaHandle {
    pub url: String,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl OllamaHandle {
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn client(&self, timeout: Duration) -> OllamaClient {
        OllamaClient::new(&self.url, "qwen3:8b", timeout)
    }
}

async fn chat(
    State(fake): State<FakeOllama>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let call = RecordedCall {
        host: headers
            .get("host")
            .and_then(|h| h.to_str().ok())
            .map(str::to_string),
        body,
    };
    let system = call.system_prompt().to_string();
    fake.calls.lock().unwrap().push(call);

    let content = match &fake.behaviour {
        Behaviour::Status(status) => {
            let status = StatusCode::from_u16(*status).unwrap();
            return (status, Json(json!({ "error": "model not found" })));
        }
        Behaviour::Stall => {
            tokio::time::sleep(Duration::from_secs(30)).await;
            String::new()
        }
        Behaviour::Scripted { router_reply } => {
            if system.contains("routing assistant") {
                router_reply.clone()
            } else if system.starts_with("You are Track Scout") {
                format!("  {}\n", SCOUT_TRACKS)
            } else {
                PLAYLIST.to_string()
            }
        }
    };

    (
        StatusCode::OK,
        Json(json!({
            "model": "qwen3:8b",
            "message": { "role": "assistant", "content": content },
            "done": true
        })),
    )
}

/// Bind `app` on an ephemeral port, returning its base URL
pub async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/", addr)
}

pub async fn spawn_ollama(behaviour: Behaviour) -> OllamaHandle {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new().route("/api/chat", post(chat)).with_state(FakeOllama {
        behaviour,
        calls: calls.clone(),
    });

    let url = spawn(app).await;
    OllamaHandle {
        url: url.trim_end_matches('/').to_string(),
        calls,
    }
}

pub fn routed(router_reply: &str) -> Behaviour {
    Behaviour::Scripted {
        router_reply: router_reply.to_string(),
    }
}

/// Host Track Scout backed by `ollama`
pub async fn spawn_scout(ollama: &OllamaHandle, timeout: Duration) -> String {
    let scout = TrackScout::new(Arc::new(ollama.client(timeout)));
    let app = a2a_common::server::router(scout_card("http://scout.test/"), Arc::new(scout));
    spawn(app).await
}

/// A base URL nothing listens on
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/", addr)
}
