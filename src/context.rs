// ABOUTME: User context used to personalize coaching prompts, plus server-side enrichment
// ABOUTME: Merges stored profile, recent workouts, and today's meals into client-supplied context
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # User Context
//!
//! The mobile client sends a partial context (personality tag plus whatever it
//! has cached). When the request identifies a known user, [`ContextEnricher`]
//! replaces the data-bearing fields with fresh values from the
//! [`FitnessDataSource`]. Enrichment never fails a chat: lookup errors are
//! logged and the client context is used as-is.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveTime, TimeZone, Utc};
use fitcoach_core::constants::limits::RECENT_WORKOUT_LIMIT;
use fitcoach_core::errors::AppResult;
use fitcoach_core::models::{MealEntry, Personality, UserProfile, WorkoutEntry};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Profile fields rendered into prompts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileContext {
    /// Display name
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Age in years
    #[serde(default, deserialize_with = "lenient_count", skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Gender
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Fitness goal
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub fitness_goal: Option<String>,
    /// Training level
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub fitness_level: Option<String>,
}

impl From<&UserProfile> for ProfileContext {
    fn from(profile: &UserProfile) -> Self {
        Self {
            name: Some(profile.name.clone()),
            age: profile.age,
            gender: profile.gender.clone(),
            fitness_goal: profile.fitness_goal.clone(),
            fitness_level: profile.fitness_level.clone(),
        }
    }
}

/// Workout line rendered into prompts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSummary {
    /// Activity name
    pub activity_type: String,
    /// Duration in minutes
    #[serde(default, deserialize_with = "lenient_amount", skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl From<&WorkoutEntry> for WorkoutSummary {
    fn from(entry: &WorkoutEntry) -> Self {
        Self {
            activity_type: entry.activity_type.clone(),
            duration: entry.duration.map(f64::from),
        }
    }
}

/// Meal line rendered into prompts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealSummary {
    /// Meal name
    pub name: String,
    /// Energy in kcal
    #[serde(default, deserialize_with = "lenient_amount", skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
}

impl From<&MealEntry> for MealSummary {
    fn from(entry: &MealEntry) -> Self {
        Self {
            name: entry.name.clone(),
            calories: Some(f64::from(entry.calories)),
        }
    }
}

/// Everything the prompt builder knows about the user
///
/// All fields are optional on the wire and a malformed field never rejects the
/// request: `null` or a value of the wrong type reads as absent, list entries
/// that do not parse are skipped, and a negative `usageDays` is ignored.
/// Unrecognized client fields are kept in `extra` so transcripts store the
/// context exactly as it arrived.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContext {
    /// Coaching persona
    #[serde(default)]
    pub personality: Personality,
    /// Days since the user registered
    #[serde(default, deserialize_with = "lenient_count", skip_serializing_if = "Option::is_none")]
    pub usage_days: Option<u32>,
    /// Profile fields
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub profile: ProfileContext,
    /// Most recent workouts, newest first
    #[serde(default, deserialize_with = "lenient_list")]
    pub recent_workouts: Vec<WorkoutSummary>,
    /// Meals logged today
    #[serde(default, deserialize_with = "lenient_list")]
    pub todays_meals: Vec<MealSummary>,
    /// Client fields this server does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============================================================================
// Lenient field parsing
// ============================================================================

/// Parse the whole value, or fall back to the default on `null` or a mismatch
fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or_default())
}

/// Keep the array entries that parse; anything but an array is empty
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Some(Value::Array(items)) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

/// Non-empty string, or a number rendered as text
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) if !text.trim().is_empty() => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}

/// Non-negative number, accepting numeric strings
fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(amount.filter(|a| a.is_finite() && *a >= 0.0))
}

/// Non-negative whole count; fractions truncate and huge values saturate
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_amount(deserializer)?.map(|count| {
        if count >= f64::from(u32::MAX) {
            u32::MAX
        } else {
            count as u32
        }
    }))
}

/// Read access to stored fitness data used for enrichment
#[async_trait]
pub trait FitnessDataSource: Send + Sync {
    /// Stored profile for `user_id`, if the user exists
    async fn user_profile(&self, user_id: &str) -> AppResult<Option<UserProfile>>;

    /// Up to `limit` workouts, newest first
    async fn recent_workouts(&self, user_id: &str, limit: usize) -> AppResult<Vec<WorkoutEntry>>;

    /// Meals logged within `[start, end]`
    async fn meals_between(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<MealEntry>>;
}

/// Start and end of the calendar day containing `now`, in `now`'s time zone
///
/// The end bound is the last millisecond of the day. Returns `None` when
/// local midnight does not exist (DST gap).
#[must_use]
pub fn day_bounds<Tz: TimeZone>(now: &DateTime<Tz>) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let day = now.date_naive();
    let tz = now.timezone();
    let start = tz
        .from_local_datetime(&day.and_time(NaiveTime::from_hms_opt(0, 0, 0)?))
        .earliest()?;
    let end = tz
        .from_local_datetime(&day.and_hms_milli_opt(23, 59, 59, 999)?)
        .latest()?;
    Some((start.with_timezone(&Utc), end.with_timezone(&Utc)))
}

/// Fills a [`UserContext`] from stored data
#[derive(Clone)]
pub struct ContextEnricher {
    source: Arc<dyn FitnessDataSource>,
}

impl ContextEnricher {
    /// Create an enricher over a data source
    #[must_use]
    pub fn new(source: Arc<dyn FitnessDataSource>) -> Self {
        Self { source }
    }

    /// Enrich using the server's local clock
    pub async fn enrich(&self, user_id: Option<&str>, context: UserContext) -> UserContext {
        self.enrich_at(user_id, context, Local::now()).await
    }

    /// Enrich as of `now`; meals are scoped to `now`'s calendar day in its zone
    pub async fn enrich_at<Tz: TimeZone>(
        &self,
        user_id: Option<&str>,
        mut context: UserContext,
        now: DateTime<Tz>,
    ) -> UserContext
    where
        Tz::Offset: Send + Sync,
    {
        let Some(user_id) = user_id.filter(|id| !id.trim().is_empty()) else {
            return context;
        };

        match self.source.user_profile(user_id).await {
            Ok(Some(profile)) => {
                context.usage_days = Some(profile.days_since_registration(now.with_timezone(&Utc)));
                context.profile = ProfileContext::from(&profile);
            }
            Ok(None) => {
                debug!(user.id = %user_id, "Unknown user; using client-supplied context");
                return context;
            }
            Err(e) => {
                warn!(user.id = %user_id, error = %e, "Profile lookup failed; using client-supplied context");
                return context;
            }
        }

        match self
            .source
            .recent_workouts(user_id, RECENT_WORKOUT_LIMIT)
            .await
        {
            Ok(workouts) => {
                context.recent_workouts = workouts
                    .iter()
                    .take(RECENT_WORKOUT_LIMIT)
                    .map(WorkoutSummary::from)
                    .collect();
            }
            Err(e) => warn!(user.id = %user_id, error = %e, "Workout lookup failed"),
        }

        match day_bounds(&now) {
            Some((start, end)) => match self.source.meals_between(user_id, start, end).await {
                Ok(meals) => {
                    context.todays_meals = meals.iter().map(MealSummary::from).collect();
                }
                Err(e) => warn!(user.id = %user_id, error = %e, "Meal lookup failed"),
            },
            None => warn!(user.id = %user_id, "Could not resolve local day bounds"),
        }

        context
    }
}
