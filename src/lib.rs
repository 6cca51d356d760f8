// ABOUTME: Main library entry point for the FitCoach chat backend
// ABOUTME: Personalized fitness coaching over the Gemini API with API-key failover
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # FitCoach Server
//!
//! A thin REST backend that answers fitness questions with a generative model.
//! Each chat message is wrapped in a prompt built from the user's persona,
//! tenure, profile, recent workouts, today's meals, and a bundled knowledge
//! base, then sent to Gemini through a bounded key-failover loop.
//!
//! ## Architecture
//!
//! - **`llm`**: provider boundary, key pool, failure classification, prompt
//!   assembly, and the dispatcher
//! - **`context`**: user context and server-side enrichment
//! - **`store`**: in-memory profiles, workouts, and meals
//! - **`transcript`**: fire-and-forget chat transcript persistence
//! - **`routes`**: `GET /` status, `POST /api/chat`, and the fitness data routes under `/api/users`
//! - **`config`** / **`logging`**: environment configuration and tracing setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use fitcoach_server::config::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("FitCoach configured with {} Gemini keys", config.gemini.api_keys.len());
//!     Ok(())
//! }
//! ```

/// Environment configuration
pub mod config;

/// User context and enrichment from stored fitness data
pub mod context;

/// Generative model layer: providers, key failover, and prompts
pub mod llm;

/// Logging configuration and structured logging helpers
pub mod logging;

/// Shared resources for HTTP handlers
pub mod resources;

/// HTTP routes
pub mod routes;

/// In-memory fitness data store
pub mod store;

/// Chat transcript persistence
pub mod transcript;
