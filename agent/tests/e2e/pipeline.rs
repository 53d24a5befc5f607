//! E2E tests: orchestrator requests over HTTP
//!
//! fake Ollama <- Track Scout server <- orchestrator server <- client

use std::sync::Arc;
use std::time::Duration;

use a2a_common::{Message, SendMessageRequest};
use playlist_agent::config::RouterMode;
use playlist_agent::orchestrator::{orchestrator_card, Pipeline, PlaylistOrchestrator, GUIDANCE_MESSAGE};
use playlist_agent::remote::{A2aBridge, AgentBridge, AgentSession, HttpCardFetcher};

use crate::support::{
    dead_url, routed, spawn, spawn_ollama, spawn_scout, OllamaHandle, PLAYLIST, SCOUT_TRACKS,
};

const TIMEOUT: Duration = Duration::from_secs(5);

fn pipeline(ollama: &OllamaHandle, scout_url: &str, mode: RouterMode) -> Pipeline {
    Pipeline::new(
        Arc::new(ollama.client(TIMEOUT)),
        Arc::new(A2aBridge::new(TIMEOUT, false)),
        Arc::new(HttpCardFetcher::new(TIMEOUT)),
        mode,
        scout_url,
    )
}

async fn spawn_orchestrator(pipeline: Pipeline) -> String {
    let app = a2a_common::server::router(
        orchestrator_card("http://orchestrator.test/"),
        Arc::new(PlaylistOrchestrator::new(pipeline)),
    );
    spawn(app).await
}

#[tokio::test]
async fn test_auto_mode_delegates_and_synthesizes() {
    let ollama = spawn_ollama(routed(
        "Sure. {\"use_scout\": true, \"reason\": \"needs specific tracks\"}",
    ))
    .await;
    let scout_url = spawn_scout(&ollama, TIMEOUT).await;
    let orchestrator_url = spawn_orchestrator(pipeline(&ollama, &scout_url, RouterMode::Auto)).await;

    let reply = A2aBridge::new(TIMEOUT, false)
        .invoke(&orchestrator_url, "late-night synthwave")
        .await
        .unwrap();

    assert_eq!(reply, PLAYLIST);

    let calls = ollama.calls();
    assert_eq!(calls.len(), 3, "router, scout, synthesis");

    let router = &calls[0];
    assert_eq!(router.host.as_deref(), Some("router.lab"));
    assert_eq!(router.temperature(), Some(0.0));
    assert!(router.user_content().contains("\"name\": \"Track Scout\""));

    assert!(calls[1].system_prompt().starts_with("You are Track Scout"));

    let synthesis = &calls[2];
    assert_eq!(synthesis.host.as_deref(), Some("agent2.lab"));
    assert!((synthesis.temperature().unwrap() - 0.6).abs() < 1e-6);
    assert!(synthesis.user_content().contains(SCOUT_TRACKS));
}

#[tokio::test]
async fn test_auto_mode_router_declines() {
    let ollama = spawn_ollama(routed(r#"{"use_scout": false, "reason": "generic"}"#)).await;
    let scout_url = spawn_scout(&ollama, TIMEOUT).await;

    let result = pipeline(&ollama, &scout_url, RouterMode::Auto)
        .run("late-night synthwave")
        .await;

    assert_eq!(result.text(), PLAYLIST);
    let calls = ollama.calls();
    assert_eq!(calls.len(), 2, "router and synthesis only");
    assert!(calls[1]
        .user_content()
        .contains("Track Scout was not used for this request."));
}

#[tokio::test]
async fn test_router_garbage_with_dead_scout_fails_open() {
    let ollama = spawn_ollama(routed("no idea")).await;
    let scout_url = dead_url().await;

    let result = pipeline(&ollama, &scout_url, RouterMode::Auto)
        .run("road trip pop")
        .await;

    // Card fetch failed, router output unparseable: still delegates, and the
    // dead scout turns into a delegation failure with no synthesis call
    assert!(result.text().starts_with("Track Scout error: agent unavailable"));
    assert_eq!(ollama.calls().len(), 1);
}

#[tokio::test]
async fn test_never_mode_skips_scout_over_http() {
    let ollama = spawn_ollama(routed("{}")).await;

    let result = pipeline(&ollama, &dead_url().await, RouterMode::Never)
        .run("focus music")
        .await;

    assert_eq!(result.text(), PLAYLIST);
    assert_eq!(ollama.calls().len(), 1);
}

#[tokio::test]
async fn test_empty_request_gets_guidance_over_http() {
    let ollama = spawn_ollama(routed("{}")).await;
    let orchestrator_url =
        spawn_orchestrator(pipeline(&ollama, &dead_url().await, RouterMode::Always)).await;

    let reply = A2aBridge::new(TIMEOUT, false)
        .invoke(&orchestrator_url, "   ")
        .await
        .unwrap();

    assert_eq!(reply, GUIDANCE_MESSAGE);
    assert!(ollama.calls().is_empty());
}

#[tokio::test]
async fn test_send_endpoint_returns_final_message() {
    let ollama = spawn_ollama(routed("{}")).await;
    let scout_url = spawn_scout(&ollama, TIMEOUT).await;
    let orchestrator_url =
        spawn_orchestrator(pipeline(&ollama, &scout_url, RouterMode::Always)).await;

    let response: serde_json::Value = reqwest::Client::new()
        .post(a2a_common::endpoint(&orchestrator_url, a2a_common::SEND_PATH))
        .json(&SendMessageRequest {
            message: Message::user_text("road trip pop"),
        })
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(response["message"]["role"], "agent");
    assert_eq!(response["message"]["parts"][0]["text"], PLAYLIST);
}

#[tokio::test]
async fn test_session_streams_single_result() {
    let ollama = spawn_ollama(routed("{}")).await;
    let orchestrator_url =
        spawn_orchestrator(pipeline(&ollama, &dead_url().await, RouterMode::Never)).await;

    let client = reqwest::Client::new();
    let request = SendMessageRequest {
        message: Message::user_text("jazz brunch"),
    };
    let mut session = AgentSession::open(&client, &orchestrator_url, &request)
        .await
        .unwrap();

    let first = session.next_message().await.unwrap().unwrap();
    assert_eq!(first.text(), PLAYLIST);
    assert!(session.next_message().await.is_none());
}
