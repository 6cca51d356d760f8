// ABOUTME: Core types and constants for the FitCoach chat backend
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # FitCoach Core
//!
//! Foundation crate providing shared types for the FitCoach backend. It changes
//! rarely, so the server crate gets incremental compilation benefits.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Fallback wording, limits, and environment variable names
//! - **models**: User profiles, workouts, meals, and chat transcript records

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (profiles, workouts, meals, chat records)
pub mod models;
