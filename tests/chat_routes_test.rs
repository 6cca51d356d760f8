// ABOUTME: HTTP tests for the status and chat routes using tower oneshot
// ABOUTME: Covers reply envelope, validation errors, degraded replies, and transcripts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use fitcoach_core::constants::fallbacks;
use fitcoach_core::errors::{AppError, AppResult};
use fitcoach_core::models::{ChatRecord, ChatRole, UserProfile};
use fitcoach_server::config::{GeminiConfig, ServerConfig};
use fitcoach_server::llm::prompts::NO_RECENT_WORKOUTS;
use fitcoach_server::resources::ServerResources;
use fitcoach_server::routes::{self, health::STATUS_MESSAGE};
use fitcoach_server::store::InMemoryFitnessStore;
use fitcoach_server::transcript::{InMemoryTranscriptStore, TranscriptSink};
use helpers::axum_test::AxumTestRequest;
use helpers::stub_provider::ScriptedProvider;
use serde_json::{json, Value};

struct TestServer {
    app: axum::Router,
    provider: Arc<ScriptedProvider>,
    store: Arc<InMemoryFitnessStore>,
    transcripts: Arc<InMemoryTranscriptStore>,
}

fn config_with_keys(keys: &[&str]) -> ServerConfig {
    ServerConfig {
        gemini: GeminiConfig {
            api_keys: keys.iter().map(|k| (*k).to_owned()).collect(),
            ..GeminiConfig::default()
        },
        ..ServerConfig::default()
    }
}

fn server(provider: ScriptedProvider, keys: &[&str]) -> TestServer {
    let config = config_with_keys(keys);
    let provider = Arc::new(provider);
    let store = Arc::new(InMemoryFitnessStore::new());
    let transcripts = Arc::new(InMemoryTranscriptStore::new());
    let resources = ServerResources::new(
        Arc::new(config),
        provider.clone(),
        store.clone(),
        transcripts.clone(),
    )
    .unwrap();

    TestServer {
        app: routes::router(Arc::new(resources)),
        provider,
        store,
        transcripts,
    }
}

async fn wait_for_records(store: &InMemoryTranscriptStore, expected: usize) {
    for _ in 0..100 {
        if store.len().await >= expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("transcripts not written");
}

#[tokio::test]
async fn test_status_reports_credential_count() {
    let server = server(ScriptedProvider::replying("ok"), &["k0", "k1"]);

    let response = AxumTestRequest::get("/").send(server.app).await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body, json!({"status": STATUS_MESSAGE, "credentials": 2}));
}

#[tokio::test]
async fn test_chat_returns_text_reply_and_records_transcript() {
    let server = server(ScriptedProvider::replying("Aim for 1.6g/kg."), &["k0"]);

    let response = AxumTestRequest::post("/api/chat")
        .json(&json!({
            "message": "How much protein?",
            "userContext": {"personality": "A", "usageDays": 10}
        }))
        .send(server.app)
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body, json!({"response": "Aim for 1.6g/kg.", "type": "text"}));

    wait_for_records(&server.transcripts, 2).await;
    let records = server.transcripts.records().await;
    let user = records.iter().find(|r| r.role == ChatRole::User).unwrap();
    let ai = records.iter().find(|r| r.role == ChatRole::Ai).unwrap();
    assert_eq!(user.content, "How much protein?");
    assert_eq!(user.user_context["personality"], "A");
    assert_eq!(ai.content, "Aim for 1.6g/kg.");
}

#[tokio::test]
async fn test_blank_message_is_rejected() {
    let server = server(ScriptedProvider::replying("unused"), &["k0"]);

    let response = AxumTestRequest::post("/api/chat")
        .json(&json!({"message": "   "}))
        .send(server.app)
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
    assert_eq!(server.provider.call_count(), 0);
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let server = server(ScriptedProvider::replying("unused"), &["k0"]);

    let response = AxumTestRequest::post("/api/chat")
        .raw_json("{\"message\": ")
        .send(server.app)
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_missing_keys_still_answers() {
    let server = server(ScriptedProvider::replying("unused"), &[]);

    let response = AxumTestRequest::post("/api/chat")
        .json(&json!({"message": "hi"}))
        .send(server.app)
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["response"], fallbacks::NOT_INITIALIZED);
    assert_eq!(server.provider.call_count(), 0);
}

#[tokio::test]
async fn test_exhausted_keys_still_answer() {
    let server = server(ScriptedProvider::rate_limited(), &["k0", "k1"]);

    let response = AxumTestRequest::post("/api/chat")
        .json(&json!({"message": "hi", "userContext": null}))
        .send(server.app)
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json();
    assert_eq!(body["response"], fallbacks::KEYS_EXHAUSTED);
    assert_eq!(server.provider.call_count(), 3);
}

#[tokio::test]
async fn test_user_id_enriches_prompt() {
    let server = server(ScriptedProvider::replying("ok"), &["k0"]);
    let mut profile = UserProfile::new("u1", "Ana", Utc::now());
    profile.fitness_level = Some("Advanced".to_owned());
    server.store.upsert_profile(profile);

    let response = AxumTestRequest::post("/api/chat")
        .json(&json!({"message": "Plan my week", "userId": "u1"}))
        .send(server.app)
        .await;

    assert_eq!(response.status(), 200);
    let prompt = server.provider.prompts_seen().pop().unwrap();
    assert!(prompt.contains("- Name: Ana"));
    assert!(prompt.contains("- Level: Advanced"));
    assert!(prompt.contains("Be empathetic and grounded (New User)."));
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let server = server(ScriptedProvider::replying("ok"), &["k0"]);

    let response = AxumTestRequest::get("/")
        .header("origin", "http://localhost:8081")
        .send(server.app)
        .await;

    assert_eq!(response.header("access-control-allow-origin"), Some("*"));
}

#[tokio::test]
async fn test_loose_user_context_still_answers() {
    let contexts = [
        json!({"personality": null}),
        json!({"personality": 7}),
        json!({"profile": null}),
        json!({"usageDays": -1}),
        json!({"recentWorkouts": null, "todaysMeals": null}),
        json!({"recentWorkouts": {"activityType": "Running"}, "profile": {"age": "thirty"}}),
    ];

    for context in contexts {
        let server = server(ScriptedProvider::replying("Keep moving."), &["k0"]);

        let response = AxumTestRequest::post("/api/chat")
            .json(&json!({"message": "Any tips?", "userContext": context.clone()}))
            .send(server.app)
            .await;

        assert_eq!(response.status(), 200, "context {context}");
        let body: Value = response.json();
        assert_eq!(body["response"], "Keep moving.", "context {context}");

        let prompt = server.provider.prompts_seen().pop().unwrap();
        assert!(prompt.contains(NO_RECENT_WORKOUTS), "context {context}");
    }
}

#[tokio::test]
async fn test_mistyped_personality_uses_general_coach_and_neutral_tone() {
    let server = server(ScriptedProvider::replying("ok"), &["k0"]);

    AxumTestRequest::post("/api/chat")
        .json(&json!({"message": "hi", "userContext": {"personality": ["A"], "usageDays": "soon"}}))
        .send(server.app)
        .await;

    let prompt = server.provider.prompts_seen().pop().unwrap();
    assert!(prompt.contains("You are a helpful fitness coach."));
    assert!(prompt.contains("Be helpful."));
}

/// Sink whose writes never complete
struct StalledSink;

#[async_trait]
impl TranscriptSink for StalledSink {
    async fn record(&self, _record: ChatRecord) -> AppResult<()> {
        std::future::pending::<AppResult<()>>().await
    }
}

/// Sink whose writes always fail
struct RejectingSink;

#[async_trait]
impl TranscriptSink for RejectingSink {
    async fn record(&self, _record: ChatRecord) -> AppResult<()> {
        Err(AppError::storage("transcript database offline"))
    }
}

async fn chat_with_sink(sink: Arc<dyn TranscriptSink>) -> Value {
    let resources = ServerResources::new(
        Arc::new(config_with_keys(&["k0"])),
        Arc::new(ScriptedProvider::replying("Rest day today.")),
        Arc::new(InMemoryFitnessStore::new()),
        sink,
    )
    .unwrap();
    let app = routes::router(Arc::new(resources));

    let response = tokio::time::timeout(
        Duration::from_secs(2),
        AxumTestRequest::post("/api/chat")
            .json(&json!({"message": "Feeling tired", "userContext": {"personality": "A"}}))
            .send(app),
    )
    .await
    .expect("reply must not wait on transcript persistence");

    assert_eq!(response.status(), 200);
    response.json()
}

#[tokio::test]
async fn test_stalled_transcript_sink_does_not_delay_reply() {
    let body = chat_with_sink(Arc::new(StalledSink)).await;
    assert_eq!(body, json!({"response": "Rest day today.", "type": "text"}));
}

#[tokio::test]
async fn test_failing_transcript_sink_does_not_change_reply() {
    let body = chat_with_sink(Arc::new(RejectingSink)).await;
    assert_eq!(body, json!({"response": "Rest day today.", "type": "text"}));
}
