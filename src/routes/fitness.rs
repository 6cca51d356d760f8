// ABOUTME: Fitness data routes that feed chat context enrichment
// ABOUTME: Upsert a user profile and log workouts and meals into the in-memory store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Fitness data routes
//!
//! The user is named in the path. Workouts and meals can only be logged for a
//! user whose profile exists; anything else is `RESOURCE_NOT_FOUND`.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use fitcoach_core::errors::AppError;
use fitcoach_core::models::{MealEntry, MealType, UserProfile, WorkoutEntry};
use serde::Deserialize;
use tracing::info;

use crate::resources::ServerResources;

/// Profile upsert body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Age in years
    #[serde(default)]
    pub age: Option<u32>,
    /// Gender
    #[serde(default)]
    pub gender: Option<String>,
    /// Fitness goal
    #[serde(default)]
    pub fitness_goal: Option<String>,
    /// Training level
    #[serde(default)]
    pub fitness_level: Option<String>,
    /// Registration time; kept from the stored profile when omitted
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Workout log body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRequest {
    /// Activity name
    #[serde(default)]
    pub activity_type: String,
    /// Duration in minutes
    #[serde(default)]
    pub duration: Option<u32>,
    /// Estimated calories burned
    #[serde(default)]
    pub calories_burned: Option<u32>,
    /// Free-form notes
    #[serde(default)]
    pub notes: Option<String>,
    /// When it happened; defaults to now
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

/// Meal log body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealRequest {
    /// Meal description
    #[serde(default)]
    pub name: String,
    /// Energy in kcal
    #[serde(default)]
    pub calories: u32,
    /// Meal slot; unknown values are a snack
    #[serde(default, rename = "type")]
    pub meal_type: Option<String>,
    /// Protein in grams
    #[serde(default)]
    pub protein: f64,
    /// Carbohydrates in grams
    #[serde(default)]
    pub carbs: f64,
    /// Fat in grams
    #[serde(default)]
    pub fats: f64,
    /// When it was eaten; defaults to now
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

/// Fitness data routes handler
pub struct FitnessRoutes;

impl FitnessRoutes {
    /// Create all fitness data routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/users/:user_id/profile", put(Self::upsert_profile))
            .route("/api/users/:user_id/workouts", post(Self::log_workout))
            .route("/api/users/:user_id/meals", post(Self::log_meal))
            .with_state(resources)
    }

    async fn upsert_profile(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
        payload: Result<Json<ProfileRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let Json(request) =
            payload.map_err(|rejection| AppError::invalid_input(rejection.body_text()))?;
        require_text(&request.name, "name")?;

        let created_at = request
            .created_at
            .or_else(|| resources.store.profile(&user_id).map(|p| p.created_at))
            .unwrap_or_else(Utc::now);
        let mut profile = UserProfile::new(user_id, request.name, created_at);
        profile.age = request.age;
        profile.gender = request.gender;
        profile.fitness_goal = request.fitness_goal;
        profile.fitness_level = request.fitness_level;

        info!(user.id = %profile.id, "Profile saved");
        resources.store.upsert_profile(profile.clone());
        Ok((StatusCode::OK, Json(profile)).into_response())
    }

    async fn log_workout(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
        payload: Result<Json<WorkoutRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let Json(request) =
            payload.map_err(|rejection| AppError::invalid_input(rejection.body_text()))?;
        require_text(&request.activity_type, "activityType")?;

        let mut workout = WorkoutEntry::new(
            user_id,
            request.activity_type,
            request.duration,
            request.date.unwrap_or_else(Utc::now),
        );
        workout.calories_burned = request.calories_burned;
        workout.notes = request.notes;

        resources.store.log_workout(workout.clone())?;
        info!(user.id = %workout.user_id, activity = %workout.activity_type, "Workout logged");
        Ok((StatusCode::CREATED, Json(workout)).into_response())
    }

    async fn log_meal(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
        payload: Result<Json<MealRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let Json(request) =
            payload.map_err(|rejection| AppError::invalid_input(rejection.body_text()))?;
        require_text(&request.name, "name")?;

        let meal_type = request
            .meal_type
            .as_deref()
            .map(MealType::from_str_lossy)
            .unwrap_or_default();
        let mut meal = MealEntry::new(
            user_id,
            request.name,
            request.calories,
            meal_type,
            request.date.unwrap_or_else(Utc::now),
        );
        meal.protein = request.protein;
        meal.carbs = request.carbs;
        meal.fats = request.fats;

        resources.store.log_meal(meal.clone())?;
        info!(user.id = %meal.user_id, calories = meal.calories, "Meal logged");
        Ok((StatusCode::CREATED, Json(meal)).into_response())
    }
}

fn require_text(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        Err(AppError::invalid_input(format!("{field} is required")))
    } else {
        Ok(())
    }
}
