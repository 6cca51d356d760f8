// ABOUTME: Workout and meal log models for activity and nutrition tracking
// ABOUTME: WorkoutEntry, MealEntry, and MealType definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Type of meal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum MealType {
    /// Breakfast meal
    Breakfast,
    /// Lunch meal
    Lunch,
    /// Dinner meal
    Dinner,
    /// Snack between meals
    #[default]
    Snack,
}

impl MealType {
    /// Parse meal type from string, treating unknown values as a snack
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "breakfast" => Self::Breakfast,
            "lunch" => Self::Lunch,
            "dinner" => Self::Dinner,
            _ => Self::Snack,
        }
    }
}

/// A logged workout session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutEntry {
    /// Unique entry ID
    pub id: Uuid,
    /// Owning user
    pub user_id: String,
    /// Activity name, e.g. "Running", "Gym", "Yoga"
    pub activity_type: String,
    /// Duration in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    /// Estimated calories burned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories_burned: Option<u32>,
    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// When the workout happened
    pub date: DateTime<Utc>,
}

impl WorkoutEntry {
    /// Create a workout entry with a fresh ID
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        activity_type: impl Into<String>,
        duration: Option<u32>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            activity_type: activity_type.into(),
            duration,
            calories_burned: None,
            notes: None,
            date,
        }
    }
}

/// A logged meal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MealEntry {
    /// Unique entry ID
    pub id: Uuid,
    /// Owning user
    pub user_id: String,
    /// Meal description
    pub name: String,
    /// Energy in kcal
    pub calories: u32,
    /// Meal slot
    #[serde(rename = "type")]
    pub meal_type: MealType,
    /// Protein in grams
    #[serde(default)]
    pub protein: f64,
    /// Carbohydrates in grams
    #[serde(default)]
    pub carbs: f64,
    /// Fat in grams
    #[serde(default)]
    pub fats: f64,
    /// When the meal was logged
    pub date: DateTime<Utc>,
}

impl MealEntry {
    /// Create a meal entry with a fresh ID and zeroed macros
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        name: impl Into<String>,
        calories: u32,
        meal_type: MealType,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            name: name.into(),
            calories,
            meal_type,
            protein: 0.0,
            carbs: 0.0,
            fats: 0.0,
            date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_type_lossy_parsing() {
        assert_eq!(MealType::from_str_lossy("BREAKFAST"), MealType::Breakfast);
        assert_eq!(MealType::from_str_lossy("dinner"), MealType::Dinner);
        assert_eq!(MealType::from_str_lossy("brunch"), MealType::Snack);
    }
}
