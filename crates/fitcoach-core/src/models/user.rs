// ABOUTME: Registered user profile model
// ABOUTME: Holds demographic and goal fields used to personalize coaching prompts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored profile of a registered user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// User identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Age in years
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Self-described gender
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Fitness goal (Weight Loss, Muscle Gain, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitness_goal: Option<String>,
    /// Training level (Beginner, Intermediate, Advanced)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitness_level: Option<String>,
    /// Registration timestamp
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    /// Create a profile with only the required fields set
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            age: None,
            gender: None,
            fitness_goal: None,
            fitness_level: None,
            created_at,
        }
    }

    /// Whole days elapsed between registration and `now`, clamped at zero
    #[must_use]
    pub fn days_since_registration(&self, now: DateTime<Utc>) -> u32 {
        let days = (now - self.created_at).num_days().max(0);
        u32::try_from(days).unwrap_or(u32::MAX)
    }
}
