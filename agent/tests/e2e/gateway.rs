//! E2E tests: Ollama completion client

use std::time::Duration;

use playlist_agent::llm::{CompletionRequest, Llm, LlmError};

use crate::support::{routed, spawn_ollama, Behaviour};

#[tokio::test]
async fn test_completion_sends_messages_and_trims_reply() {
    let ollama = spawn_ollama(routed("{}")).await;
    let client = ollama.client(Duration::from_secs(5));

    let reply = client
        .complete(
            CompletionRequest::new("Upbeat indie pop")
                .with_system_prompt("You are Track Scout.")
                .with_routing_hint("agent1.lab"),
        )
        .await
        .unwrap();

    assert_eq!(reply, crate::support::SCOUT_TRACKS);

    let calls = ollama.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].host.as_deref(), Some("agent1.lab"));
    assert_eq!(calls[0].body["model"], "qwen3:8b");
    assert_eq!(calls[0].body["stream"], false);
    assert_eq!(calls[0].body["messages"][0]["role"], "system");
    assert_eq!(calls[0].user_content(), "Upbeat indie pop");
    assert!((calls[0].temperature().unwrap() - 0.7).abs() < 1e-6);
}

#[tokio::test]
async fn test_completion_model_override_and_no_temperature() {
    let ollama = spawn_ollama(routed("{}")).await;
    let client = ollama.client(Duration::from_secs(5));

    client
        .complete(
            CompletionRequest::new("hi")
                .with_model("llama3.1:8b")
                .without_temperature(),
        )
        .await
        .unwrap();

    let calls = ollama.calls();
    assert_eq!(calls[0].body["model"], "llama3.1:8b");
    assert!(calls[0].body.get("options").is_none());
    assert_eq!(calls[0].body["messages"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_backend_status_is_reported_with_body() {
    let ollama = spawn_ollama(Behaviour::Status(404)).await;
    let client = ollama.client(Duration::from_secs(5));

    let err = client.complete(CompletionRequest::new("hi")).await.unwrap_err();

    match err {
        LlmError::Backend { status, body } => {
            assert_eq!(status, 404);
            assert!(body.contains("model not found"));
        }
        other => panic!("expected backend error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_slow_backend_times_out() {
    let ollama = spawn_ollama(Behaviour::Stall).await;
    let client = ollama.client(Duration::from_millis(200));

    let err = client.complete(CompletionRequest::new("hi")).await.unwrap_err();
    assert!(matches!(err, LlmError::Timeout(_)));
}
