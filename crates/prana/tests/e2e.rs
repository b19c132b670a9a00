// SPDX-FileCopyrightText: 2026 Prana Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the complete Prana pipeline.
//!
//! Each test loads configuration from TOML, builds the Gemini-backed client
//! against a local mock endpoint, and drives a chat session through it.

use prana_agent::{ChatSession, ConversationClient};
use prana_core::{Author, ErrorKind, PranaError};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> prana_config::PranaConfig {
    let toml = format!(
        r#"
[assistant]
system_prompt = "You are a calm Ayurvedic guide."
greeting = "Namaste! Ask me anything."

[gemini]
api_key = "e2e-key"
base_url = "{}"
temperature = 0.5

[chat]
max_input_chars = 40
"#,
        server.uri()
    );
    prana_config::load_config_from_str(&toml).unwrap()
}

fn reply(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    }))
}

// ---- Test 1: Two-turn conversation ----

#[tokio::test]
async fn two_turn_conversation_carries_history() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .and(body_partial_json(serde_json::json!({
            "contents": [
                {"role": "model", "parts": [{"text": "Namaste! Ask me anything."}]},
                {"role": "user", "parts": [{"text": "Best foods for digestion?"}]},
                {"role": "model", "parts": [{"text": "Cooked, warm meals."}]},
                {"role": "user", "parts": [{"text": "And spices?"}]}
            ]
        })))
        .respond_with(reply("Cumin and fennel."))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .and(body_partial_json(serde_json::json!({
            "contents": [
                {"role": "model", "parts": [{"text": "Namaste! Ask me anything."}]},
                {"role": "user", "parts": [{"text": "Best foods for digestion?"}]}
            ],
            "systemInstruction": {"parts": [{"text": "You are a calm Ayurvedic guide."}]}
        })))
        .respond_with(reply("Cooked, warm meals."))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = ConversationClient::connect(&config).await.unwrap();
    let mut session = ChatSession::from_config(&client, &config);

    let first = session.send("Best foods for digestion?").await.unwrap();
    assert_eq!(first.text, "Cooked, warm meals.");

    let second = session.send("And spices?").await.unwrap();
    assert_eq!(second.text, "Cumin and fennel.");

    let authors: Vec<Author> = session.history().iter().map(|m| m.author).collect();
    assert_eq!(
        authors,
        vec![
            Author::Assistant,
            Author::User,
            Author::Assistant,
            Author::User,
            Author::Assistant
        ]
    );
}

// ---- Test 2: Input limits come from config ----

#[tokio::test]
async fn configured_input_limit_is_enforced() {
    let server = MockServer::start().await;
    let config = config_for(&server);
    let client = ConversationClient::connect(&config).await.unwrap();
    let mut session = ChatSession::from_config(&client, &config);

    let long = "x".repeat(41);
    let err = session.send(&long).await.unwrap_err();
    assert!(matches!(err, PranaError::InvalidInput(_)));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

// ---- Test 3: Fault texts land in the transcript ----

#[tokio::test]
async fn backend_fault_is_rendered_as_assistant_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "error": {
                "code": 429,
                "message": "Quota exceeded for quota metric 'Generate Content API requests per minute'",
                "status": "RESOURCE_EXHAUSTED"
            }
        })))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = ConversationClient::connect(&config).await.unwrap();
    let mut session = ChatSession::from_config(&client, &config);

    let reply = session
        .send_streaming("What herbs help with stress?", |_| {})
        .await
        .unwrap();
    assert_eq!(reply.error, Some(ErrorKind::QuotaExceeded));
    assert!(reply.error.is_some_and(ErrorKind::requires_alert));
    assert_eq!(
        session.history().last().unwrap().text,
        ErrorKind::QuotaExceeded.fallback_text()
    );
}

// ---- Test 4: Connection probe ----

#[tokio::test]
async fn ping_probe_reports_reachability() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(reply("Hello!"))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = ConversationClient::connect(&config).await.unwrap();
    assert!(client.test_connection().await);

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body.get("systemInstruction").is_none());
    assert_eq!(body["contents"][0]["parts"][0]["text"], "Hello");
}

// ---- Test 5: Fail-fast construction ----

#[tokio::test]
async fn plain_http_remote_endpoint_is_rejected_at_startup() {
    let config = prana_config::load_config_from_str(
        r#"
[gemini]
api_key = "k"
base_url = "http://generativelanguage.googleapis.com/v1beta"
"#,
    )
    .unwrap();

    let err = ConversationClient::connect(&config).await.unwrap_err();
    assert!(matches!(err, PranaError::Config(_)));
}
