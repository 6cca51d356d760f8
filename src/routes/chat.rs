// ABOUTME: Coach chat endpoint: enrich context, dispatch to the model, record transcripts
// ABOUTME: Degraded model service still answers 200 with the fallback reply text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Chat routes
//!
//! `POST /api/chat` accepts a message with optional client context and user
//! id. Only a malformed body or a blank message is an error; provider trouble
//! is reported through the reply text.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use fitcoach_core::errors::AppError;
use fitcoach_core::models::ChatRecord;
use serde::{Deserialize, Serialize};

use crate::context::UserContext;
use crate::logging::ChatLogger;
use crate::resources::ServerResources;
use crate::transcript::spawn_record;

/// Chat request body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// The user's question
    #[serde(default)]
    pub message: String,
    /// Context the client already has
    #[serde(default)]
    pub user_context: Option<UserContext>,
    /// Stored user to enrich context from
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Chat reply body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Coach reply or fallback text
    pub response: String,
    /// Reply kind; always `text`
    #[serde(rename = "type")]
    pub kind: String,
}

impl ChatResponse {
    /// Plain text reply
    #[must_use]
    pub fn text(response: String) -> Self {
        Self {
            response,
            kind: "text".to_owned(),
        }
    }
}

/// Chat routes handler
pub struct ChatRoutes;

impl ChatRoutes {
    /// Create all chat routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/chat", post(Self::chat))
            .with_state(resources)
    }

    /// Answer one chat message
    async fn chat(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<ChatRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let Json(request) =
            payload.map_err(|rejection| AppError::invalid_input(rejection.body_text()))?;
        if request.message.trim().is_empty() {
            return Err(AppError::invalid_input("message is required"));
        }

        let started = Instant::now();
        let user_id = request.user_id.as_deref();
        let user_context = request.user_context.unwrap_or_default();
        ChatLogger::log_chat_request(
            user_id,
            request.message.chars().count(),
            user_context.personality.as_tag(),
        );

        let client_context = serde_json::to_value(&user_context).unwrap_or_default();
        spawn_record(
            resources.transcripts.clone(),
            ChatRecord::user(request.message.clone(), client_context.clone()),
        );

        let context = resources
            .enricher
            .enrich(user_id, user_context)
            .await;
        let report = resources.dispatcher.dispatch(&request.message, &context).await;

        spawn_record(
            resources.transcripts.clone(),
            ChatRecord::ai(report.response.clone(), client_context),
        );
        ChatLogger::log_chat_response(
            user_id,
            &format!("{:?}", report.outcome),
            report.attempts.len(),
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );

        Ok((StatusCode::OK, Json(ChatResponse::text(report.response))).into_response())
    }
}
