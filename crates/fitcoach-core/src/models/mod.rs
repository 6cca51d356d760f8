// ABOUTME: Core data models for the FitCoach backend
// ABOUTME: Re-exports user, activity, personality, and chat record types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Plain serializable records shared between the data source used for
//! context enrichment, the transcript store, and the HTTP layer.

mod activity;
mod chat;
mod personality;
mod user;

pub use activity::{MealEntry, MealType, WorkoutEntry};
pub use chat::{ChatRecord, ChatRole};
pub use personality::Personality;
pub use user::UserProfile;
