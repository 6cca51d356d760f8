// ABOUTME: Route module organization for the FitCoach HTTP surface
// ABOUTME: Merges status, chat, and fitness data routes with CORS and request tracing layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the FitCoach server
//!
//! Each domain module holds route definitions and thin handlers that delegate
//! to [`ServerResources`].

use std::sync::Arc;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::resources::ServerResources;

/// Coach chat routes
pub mod chat;
/// Profile, workout, and meal ingestion routes
pub mod fitness;
/// Status routes
pub mod health;

/// Chat route handlers
pub use chat::{ChatRequest, ChatResponse, ChatRoutes};
/// Fitness data route handlers
pub use fitness::{FitnessRoutes, MealRequest, ProfileRequest, WorkoutRequest};
/// Status route handlers
pub use health::HealthRoutes;

/// Build the full application router
pub fn router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(ChatRoutes::routes(Arc::clone(&resources)))
        .merge(FitnessRoutes::routes(resources))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
