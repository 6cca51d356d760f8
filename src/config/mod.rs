// ABOUTME: Configuration module for server settings loaded from the environment
// ABOUTME: Re-exports the server, provider, and deployment configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration for the FitCoach server
//!
//! All settings come from environment variables, with a `.env` file loaded
//! first when present. See [`environment::ServerConfig::from_env`].

/// Environment and server configuration
pub mod environment;

pub use environment::{collect_api_keys, Environment, GeminiConfig, ServerConfig};
