//! E2E tests: card fetching and delegation against a live Track Scout

use std::time::Duration;

use a2a_common::{AGENT_CARD_PATH, STREAM_PATH};
use axum::{
    routing::{get, post},
    Json, Router,
};
use playlist_agent::remote::{A2aBridge, AgentBridge, BridgeError, CardFetcher, HttpCardFetcher};
use serde_json::json;

use crate::support::{
    dead_url, routed, spawn, spawn_ollama, spawn_scout, Behaviour, SCOUT_TRACKS,
};

#[tokio::test]
async fn test_card_fetch_from_live_scout() {
    let ollama = spawn_ollama(routed("{}")).await;
    let scout_url = spawn_scout(&ollama, Duration::from_secs(5)).await;

    let descriptor = HttpCardFetcher::new(Duration::from_secs(5))
        .fetch(&scout_url)
        .await;

    assert_eq!(descriptor.name, "Track Scout");
    assert_eq!(descriptor.url.as_deref(), Some("http://scout.test/"));
    assert_eq!(descriptor.skills[0].name, "Suggest tracks");
    assert!(ollama.calls().is_empty());
}

#[tokio::test]
async fn test_card_fetch_from_dead_address_is_empty() {
    let descriptor = HttpCardFetcher::new(Duration::from_secs(2))
        .fetch(&dead_url().await)
        .await;
    assert!(descriptor.is_empty());
}

#[tokio::test]
async fn test_card_fetch_from_stalled_agent_is_bounded() {
    let app = Router::new().route(
        &format!("/{}", AGENT_CARD_PATH),
        get(|| async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Json(json!({ "name": "Too Late" }))
        }),
    );
    let url = spawn(app).await;

    let started = std::time::Instant::now();
    let descriptor = HttpCardFetcher::new(Duration::from_millis(200))
        .fetch(&url)
        .await;

    assert!(descriptor.is_empty());
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_bridge_aggregates_scout_reply() {
    let ollama = spawn_ollama(routed("{}")).await;
    let scout_url = spawn_scout(&ollama, Duration::from_secs(5)).await;
    let bridge = A2aBridge::new(Duration::from_secs(5), true);

    let reply = bridge.invoke(&scout_url, "road trip pop").await.unwrap();

    assert_eq!(reply, SCOUT_TRACKS);
    let calls = ollama.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].user_content(), "road trip pop");
}

#[tokio::test]
async fn test_bridge_dead_agent_is_unavailable() {
    let bridge = A2aBridge::new(Duration::from_secs(2), false);
    let err = bridge.invoke(&dead_url().await, "x").await.unwrap_err();
    assert!(matches!(err, BridgeError::AgentUnavailable(_)));
}

#[tokio::test]
async fn test_bridge_times_out_on_stalled_agent() {
    let ollama = spawn_ollama(Behaviour::Stall).await;
    let scout_url = spawn_scout(&ollama, Duration::from_secs(30)).await;
    let bridge = A2aBridge::new(Duration::from_millis(300), false);

    let err = bridge.invoke(&scout_url, "x").await.unwrap_err();
    assert!(matches!(err, BridgeError::Timeout(_)));
}

#[tokio::test]
async fn test_bridge_error_status_is_unavailable() {
    let ollama = spawn_ollama(routed("{}")).await;
    // The fake Ollama answers every path but /api/chat with 404
    let err = A2aBridge::new(Duration::from_secs(2), false)
        .invoke(&ollama.url, "x")
        .await
        .unwrap_err();
    assert!(matches!(err, BridgeError::AgentUnavailable(ref m) if m.contains("404")));
}

#[tokio::test]
async fn test_bridge_rejects_non_stream_response() {
    let app = Router::new().route(
        &format!("/{}", STREAM_PATH),
        post(|| async { Json(json!({ "message": null })) }),
    );
    let url = spawn(app).await;

    let err = A2aBridge::new(Duration::from_secs(2), false)
        .invoke(&url, "x")
        .await
        .unwrap_err();
    assert!(
        matches!(err, BridgeError::Protocol(ref m) if m.contains("application/json")),
        "got {:?}",
        err
    );
}
