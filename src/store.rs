// ABOUTME: In-memory fitness data store backing context enrichment
// ABOUTME: Holds profiles, workouts, and meals per user in concurrent DashMap shards
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! In-memory fitness store
//!
//! Uses `DashMap` so concurrent chat requests can read while other users'
//! entries are written, without a global lock.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use fitcoach_core::errors::{AppError, AppResult};
use fitcoach_core::models::{MealEntry, UserProfile, WorkoutEntry};
use tracing::debug;

use crate::context::FitnessDataSource;

/// Profiles, workouts, and meals keyed by user id
#[derive(Debug, Default)]
pub struct InMemoryFitnessStore {
    profiles: DashMap<String, UserProfile>,
    workouts: DashMap<String, Vec<WorkoutEntry>>,
    meals: DashMap<String, Vec<MealEntry>>,
}

impl InMemoryFitnessStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a profile
    pub fn upsert_profile(&self, profile: UserProfile) {
        debug!(user.id = %profile.id, "Storing user profile");
        self.profiles.insert(profile.id.clone(), profile);
    }

    /// Stored profile for `user_id`
    #[must_use]
    pub fn profile(&self, user_id: &str) -> Option<UserProfile> {
        self.profiles.get(user_id).map(|entry| entry.value().clone())
    }

    /// Record a workout for an existing user
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user has no profile
    pub fn log_workout(&self, workout: WorkoutEntry) -> AppResult<()> {
        self.require_user(&workout.user_id)?;
        self.workouts
            .entry(workout.user_id.clone())
            .or_default()
            .push(workout);
        Ok(())
    }

    /// Record a meal for an existing user
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user has no profile
    pub fn log_meal(&self, meal: MealEntry) -> AppResult<()> {
        self.require_user(&meal.user_id)?;
        self.meals.entry(meal.user_id.clone()).or_default().push(meal);
        Ok(())
    }

    /// Number of stored profiles
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.profiles.len()
    }

    fn require_user(&self, user_id: &str) -> AppResult<()> {
        if self.profiles.contains_key(user_id) {
            Ok(())
        } else {
            Err(AppError::not_found(format!("User {user_id}")))
        }
    }
}

#[async_trait]
impl FitnessDataSource for InMemoryFitnessStore {
    async fn user_profile(&self, user_id: &str) -> AppResult<Option<UserProfile>> {
        Ok(self.profile(user_id))
    }

    async fn recent_workouts(&self, user_id: &str, limit: usize) -> AppResult<Vec<WorkoutEntry>> {
        let Some(entries) = self.workouts.get(user_id) else {
            return Ok(Vec::new());
        };
        let mut workouts = entries.value().clone();
        drop(entries);
        workouts.sort_by(|a, b| b.date.cmp(&a.date));
        workouts.truncate(limit);
        Ok(workouts)
    }

    async fn meals_between(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<MealEntry>> {
        let mut meals: Vec<MealEntry> = self
            .meals
            .get(user_id)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|meal| meal.date >= start && meal.date <= end)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        meals.sort_by_key(|meal| meal.date);
        Ok(meals)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use fitcoach_core::errors::ErrorCode;
    use fitcoach_core::models::MealType;

    use super::*;

    fn store_with_user() -> InMemoryFitnessStore {
        let store = InMemoryFitnessStore::new();
        let created = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        store.upsert_profile(UserProfile::new("u1", "Ana", created));
        store
    }

    #[test]
    fn test_logging_for_unknown_user_fails() {
        let store = InMemoryFitnessStore::new();
        let workout = WorkoutEntry::new("ghost", "Running", Some(30), Utc::now());
        let err = store.log_workout(workout).unwrap_err();
        assert_eq!(err.code, ErrorCode::ResourceNotFound);
    }

    #[tokio::test]
    async fn test_recent_workouts_newest_first() {
        let store = store_with_user();
        let base = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
        for (offset, activity) in [(0, "Yoga"), (3, "Cycling"), (1, "Running"), (2, "Swim")] {
            store
                .log_workout(WorkoutEntry::new(
                    "u1",
                    activity,
                    Some(30),
                    base + Duration::days(offset),
                ))
                .unwrap();
        }

        let recent = store.recent_workouts("u1", 3).await.unwrap();
        let names: Vec<&str> = recent.iter().map(|w| w.activity_type.as_str()).collect();
        assert_eq!(names, vec!["Cycling", "Swim", "Running"]);
    }

    #[tokio::test]
    async fn test_meals_between_is_inclusive() {
        let store = store_with_user();
        let start = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let end = start + Duration::days(1) - Duration::milliseconds(1);
        for (name, at) in [
            ("Late snack", start - Duration::minutes(1)),
            ("Oats", start),
            ("Dinner", end),
            ("Tomorrow", end + Duration::milliseconds(1)),
        ] {
            store
                .log_meal(MealEntry::new("u1", name, 400, MealType::Snack, at))
                .unwrap();
        }

        let meals = store.meals_between("u1", start, end).await.unwrap();
        let names: Vec<&str> = meals.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Oats", "Dinner"]);
    }

    #[tokio::test]
    async fn test_unknown_user_has_no_profile() {
        let store = InMemoryFitnessStore::new();
        assert!(store.user_profile("nobody").await.unwrap().is_none());
        assert!(store.recent_workouts("nobody", 3).await.unwrap().is_empty());
    }
}
