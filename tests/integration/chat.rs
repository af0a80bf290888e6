//! Chat endpoint integration tests
//!
//! - POST /api/chat - request translation and canonical responses
//! - Request validation before any provider call

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{constants, TestHarness};

#[tokio::test]
async fn test_chat_returns_canonical_response() {
    let harness = TestHarness::azure().await;
    harness
        .upstream
        .mock_chat_success("Hello! How can I help?", "gpt-4-0613", 10, 8)
        .await;

    let response = harness
        .server
        .post("/api/chat")
        .json(&json!({
            "messages": [{"role": "user", "content": "Hello"}]
        }))
        .await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(
        json,
        json!({
            "response": "Hello! How can I help?",
            "model": "gpt-4-0613",
            "usage": {"prompt_tokens": 10, "completion_tokens": 8, "total_tokens": 18}
        })
    );
}

#[tokio::test]
async fn test_chat_prepends_default_system_prompt() {
    let harness = TestHarness::azure().await;
    harness
        .upstream
        .mock_chat_success("Sure", constants::TEST_AZURE_MODEL, 5, 1)
        .await;

    harness
        .server
        .post("/api/chat")
        .json(&json!({
            "messages": [
                {"role": "user", "content": "Hi"},
                {"role": "assistant", "content": "Hello!"},
                {"role": "user", "content": "Tell me a joke"}
            ],
            "temperature": 0.3
        }))
        .await
        .assert_status_ok();

    let bodies = harness.upstream.received_bodies().await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(
        bodies[0],
        json!({
            "model": constants::TEST_AZURE_MODEL,
            "messages": [
                {"role": "system", "content": constants::TEST_SYSTEM_PROMPT},
                {"role": "user", "content": "Hi"},
                {"role": "assistant", "content": "Hello!"},
                {"role": "user", "content": "Tell me a joke"}
            ],
            "temperature": 0.3
        })
    );
}

#[tokio::test]
async fn test_chat_system_prompt_override() {
    let harness = TestHarness::digitalocean().await;
    harness
        .upstream
        .mock_chat_success("Arr", constants::TEST_DIGITALOCEAN_MODEL, 5, 1)
        .await;

    harness
        .server
        .post("/api/chat")
        .json(&json!({
            "messages": [{"role": "user", "content": "Hi"}],
            "system_prompt": "Talk like a pirate."
        }))
        .await
        .assert_status_ok();

    let bodies = harness.upstream.received_bodies().await;
    assert_eq!(
        bodies[0]["messages"][0],
        json!({"role": "system", "content": "Talk like a pirate."})
    );
    assert_eq!(bodies[0]["messages"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_chat_sampling_passed_through() {
    let harness = TestHarness::digitalocean().await;
    harness
        .upstream
        .mock_chat_success("ok", constants::TEST_DIGITALOCEAN_MODEL, 1, 1)
        .await;

    harness
        .server
        .post("/api/chat")
        .json(&json!({
            "messages": [{"role": "user", "content": "Hi"}],
            "temperature": 1.5,
            "max_tokens": 256,
            "top_p": 0.8
        }))
        .await
        .assert_status_ok();

    let body = &harness.upstream.received_bodies().await[0];
    assert_eq!(body["temperature"], 1.5);
    assert_eq!(body["max_tokens"], 256);
    assert_eq!(body["top_p"], 0.8);
}

#[tokio::test]
async fn test_chat_rejects_out_of_range_temperature() {
    let harness = TestHarness::azure().await;
    harness
        .upstream
        .mock_chat_success("unused", constants::TEST_AZURE_MODEL, 1, 1)
        .await;

    let response = harness
        .server
        .post("/api/chat")
        .json(&json!({
            "messages": [{"role": "user", "content": "Hi"}],
            "temperature": 3.0
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert!(harness.upstream.received_requests().await.is_empty());
}

#[tokio::test]
async fn test_chat_rejects_out_of_range_max_tokens_and_top_p() {
    let harness = TestHarness::azure().await;

    for body in [
        json!({"messages": [{"role": "user", "content": "Hi"}], "max_tokens": 0}),
        json!({"messages": [{"role": "user", "content": "Hi"}], "max_tokens": 4001}),
        json!({"messages": [{"role": "user", "content": "Hi"}], "top_p": 1.2}),
    ] {
        harness
            .server
            .post("/api/chat")
            .json(&body)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    assert!(harness.upstream.received_requests().await.is_empty());
}

#[tokio::test]
async fn test_chat_rejects_unknown_role() {
    let harness = TestHarness::azure().await;

    let response = harness
        .server
        .post("/api/chat")
        .json(&json!({
            "messages": [{"role": "robot", "content": "beep"}]
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"]["code"], "VALIDATION_ERROR");
    assert!(harness.upstream.received_requests().await.is_empty());
}

#[tokio::test]
async fn test_chat_rejects_missing_and_empty_messages() {
    let harness = TestHarness::azure().await;

    harness
        .server
        .post("/api/chat")
        .json(&json!({"temperature": 0.5}))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    harness
        .server
        .post("/api/chat")
        .json(&json!({"messages": []}))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    assert!(harness.upstream.received_requests().await.is_empty());
}

#[tokio::test]
async fn test_chat_rejects_non_json_body() {
    let harness = TestHarness::azure().await;

    let response = harness.server.post("/api/chat").text("hello").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"]["code"], "VALIDATION_ERROR");
}
