// ABOUTME: Root status route reporting that the server and model manager are up
// ABOUTME: Exposes the configured key count, never the keys themselves
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health check routes for service monitoring

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::resources::ServerResources;

/// Status text served at `/`
pub const STATUS_MESSAGE: &str = "Server is running (Gemini AI Manager Active)";

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        async fn status_handler(State(resources): State<Arc<ServerResources>>) -> Json<Value> {
            Json(json!({
                "status": STATUS_MESSAGE,
                "credentials": resources.credential_count()
            }))
        }

        Router::new()
            .route("/", get(status_handler))
            .with_state(resources)
    }
}
