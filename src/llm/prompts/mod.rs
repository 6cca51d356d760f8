// ABOUTME: Deterministic coaching prompt assembly from user context and the knowledge base
// ABOUTME: Selects persona and tone, renders profile, workouts, meals, and safety rules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Coaching Prompts
//!
//! [`PromptBuilder`] is pure: the same message and context always render the
//! same text. Sections appear in a fixed order:
//!
//! 1. persona instruction (from [`Personality`])
//! 2. tone instruction (from [`UsageTier`])
//! 3. knowledge base as compact JSON
//! 4. user profile with literal fallbacks
//! 5. up to three recent workouts
//! 6. today's meals
//! 7. behavior and safety rules
//! 8. the user's question

use fitcoach_core::constants::limits::{
    NEW_USER_MAX_DAYS, RECENT_WORKOUT_LIMIT, WEEK_ONE_MAX_DAYS,
};
use fitcoach_core::errors::AppResult;
use fitcoach_core::models::Personality;

use super::knowledge::KnowledgeBase;
use crate::context::{MealSummary, ProfileContext, UserContext, WorkoutSummary};

/// Reply the model must give for medical or injury questions
pub const MEDICAL_REFUSAL: &str = "I cannot give medical advice. Please see a doctor.";

/// Rendered when the workout list is empty
pub const NO_RECENT_WORKOUTS: &str = "No recent workouts.";

/// Rendered when the meal list is empty
pub const NO_MEALS_TODAY: &str = "No meals logged today.";

/// Tone bucket derived from how long the user has used the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UsageTier {
    /// Usage days unknown
    Unknown,
    /// Up to three days
    NewUser,
    /// Four to eight days
    WeekOne,
    /// More than eight days
    Regular,
}

impl UsageTier {
    /// Bucket a usage day count
    #[must_use]
    pub const fn from_usage_days(usage_days: Option<u32>) -> Self {
        match usage_days {
            None => Self::Unknown,
            Some(days) if days <= NEW_USER_MAX_DAYS => Self::NewUser,
            Some(days) if days <= WEEK_ONE_MAX_DAYS => Self::WeekOne,
            Some(_) => Self::Regular,
        }
    }

    /// Tone instruction for this bucket
    #[must_use]
    pub const fn instruction(self) -> &'static str {
        match self {
            Self::Unknown => "Be helpful.",
            Self::NewUser => "Be empathetic and grounded (New User).",
            Self::WeekOne => "Be a friendly listener (Week 1).",
            Self::Regular => "Act like a seasoned coach (Regular User).",
        }
    }
}

/// Persona instruction for a personality
#[must_use]
pub const fn persona_instruction(personality: Personality) -> &'static str {
    match personality {
        Personality::EncouragementSeeker => {
            "You are an 'Encouragement Seeker' coach. Be supportive and positive."
        }
        Personality::CreativeExplorer => {
            "You are a 'Creative Explorer' coach. Be fun and unconventional."
        }
        Personality::GoalFinisher => "You are a 'Goal Finisher' coach. Be direct and efficient.",
        Personality::General => "You are a helpful fitness coach.",
    }
}

/// Builds prompts against one knowledge base
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    knowledge_json: String,
}

impl PromptBuilder {
    /// Create a builder, serializing the knowledge base once
    ///
    /// # Errors
    ///
    /// Returns an error if the knowledge base cannot be serialized.
    pub fn new(knowledge: &KnowledgeBase) -> AppResult<Self> {
        Ok(Self {
            knowledge_json: knowledge.to_json()?,
        })
    }

    /// System portion of the prompt (everything except the question)
    #[must_use]
    pub fn system_prompt(&self, context: &UserContext) -> String {
        let profile = render_profile(&context.profile);
        format!(
            "You are an adaptive fitness coach.\n\
             \n\
             {persona}\n\
             {tone}\n\
             \n\
             YOUR TRUSTED KNOWLEDGE BASE (Prioritize this over general training):\n\
             {knowledge}\n\
             \n\
             USER PROFILE:\n\
             {profile}\n\
             \n\
             RECENT ACTIVITY:\n\
             {workouts}\n\
             \n\
             NUTRITION TODAY:\n\
             {meals}\n\
             \n\
             INSTRUCTIONS:\n\
             1. Use the Knowledge Base to answer specific questions (e.g. protein, creatine).\n\
             2. Be short and encouraging.\n\
             3. If they ask about medical/injury, Say: \"{refusal}\"\n\
             4. Do NOT provide medical diagnosis.\n",
            persona = persona_instruction(context.personality),
            tone = UsageTier::from_usage_days(context.usage_days).instruction(),
            knowledge = self.knowledge_json,
            workouts = render_workouts(&context.recent_workouts),
            meals = render_meals(&context.todays_meals),
            refusal = MEDICAL_REFUSAL,
        )
    }

    /// Full prompt: system portion followed by the user's question
    #[must_use]
    pub fn compose(&self, message: &str, context: &UserContext) -> String {
        format!(
            "{} \n\nUser Question: {message} ",
            self.system_prompt(context)
        )
    }
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.trim().is_empty())
}

fn render_profile(profile: &ProfileContext) -> String {
    let age = profile
        .age
        .filter(|age| *age > 0)
        .map_or_else(|| "N/A".to_owned(), |age| age.to_string());
    format!(
        "- Name: {}\n- Age: {age}\n- Gender: {}\n- Goal: {}\n- Level: {}",
        non_blank(profile.name.as_ref()).unwrap_or("User"),
        non_blank(profile.gender.as_ref()).unwrap_or("N/A"),
        non_blank(profile.fitness_goal.as_ref()).unwrap_or("General Health"),
        non_blank(profile.fitness_level.as_ref()).unwrap_or("Beginner"),
    )
}

fn render_amount(amount: Option<f64>) -> String {
    amount.map_or_else(|| "N/A".to_owned(), |value| value.to_string())
}

fn render_workouts(workouts: &[WorkoutSummary]) -> String {
    if workouts.is_empty() {
        return NO_RECENT_WORKOUTS.to_owned();
    }
    workouts
        .iter()
        .take(RECENT_WORKOUT_LIMIT)
        .map(|w| format!("- {} ({} min)", w.activity_type, render_amount(w.duration)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_meals(meals: &[MealSummary]) -> String {
    if meals.is_empty() {
        return NO_MEALS_TODAY.to_owned();
    }
    meals
        .iter()
        .map(|m| format!("- {} ({} cal)", m.name, render_amount(m.calories)))
        .collect::<Vec<_>>()
        .join("\n")
}
