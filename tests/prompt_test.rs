// ABOUTME: Tests for coaching prompt assembly from user context
// ABOUTME: Covers determinism, persona and tone selection, and activity rendering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use fitcoach_core::models::Personality;
use fitcoach_server::context::{MealSummary, ProfileContext, UserContext, WorkoutSummary};
use fitcoach_server::llm::prompts::{
    persona_instruction, MEDICAL_REFUSAL, NO_MEALS_TODAY, NO_RECENT_WORKOUTS,
};
use fitcoach_server::llm::{PromptBuilder, UsageTier, KNOWLEDGE_BASE};

fn builder() -> PromptBuilder {
    PromptBuilder::new(&KNOWLEDGE_BASE).unwrap()
}

fn context_with_days(days: u32) -> UserContext {
    UserContext {
        usage_days: Some(days),
        ..UserContext::default()
    }
}

const TONES: [&str; 3] = [
    "Be empathetic and grounded (New User).",
    "Be a friendly listener (Week 1).",
    "Act like a seasoned coach (Regular User).",
];

fn tones_in(prompt: &str) -> Vec<&'static str> {
    TONES.iter().copied().filter(|t| prompt.contains(t)).collect()
}

#[test]
fn test_compose_is_deterministic() {
    let context = UserContext {
        personality: Personality::CreativeExplorer,
        usage_days: Some(5),
        profile: ProfileContext {
            name: Some("Ana".to_owned()),
            age: Some(31),
            ..ProfileContext::default()
        },
        ..UserContext::default()
    };
    let builder = builder();
    assert_eq!(
        builder.compose("Any tips?", &context),
        builder.compose("Any tips?", &context)
    );
}

#[test]
fn test_tone_follows_usage_days() {
    let builder = builder();
    for (days, tone) in [
        (2, TONES[0]),
        (3, TONES[0]),
        (5, TONES[1]),
        (8, TONES[1]),
        (12, TONES[2]),
    ] {
        let prompt = builder.system_prompt(&context_with_days(days));
        assert_eq!(tones_in(&prompt), vec![tone], "usage days {days}");
    }
}

#[test]
fn test_unknown_usage_days_is_helpful() {
    let prompt = builder().system_prompt(&UserContext::default());
    assert!(tones_in(&prompt).is_empty());
    assert!(prompt.contains("Be helpful."));
    assert_eq!(
        UsageTier::from_usage_days(None).instruction(),
        "Be helpful."
    );
}

#[test]
fn test_persona_selection() {
    let builder = builder();
    for personality in [
        Personality::EncouragementSeeker,
        Personality::CreativeExplorer,
        Personality::GoalFinisher,
        Personality::General,
    ] {
        let context = UserContext {
            personality,
            ..UserContext::default()
        };
        let prompt = builder.system_prompt(&context);
        assert!(prompt.contains(persona_instruction(personality)));
    }
}

#[test]
fn test_unrecognized_personality_uses_default_persona() {
    let context: UserContext = serde_json::from_str(r#"{"personality": "Z"}"#).unwrap();
    let prompt = builder().system_prompt(&context);
    assert!(prompt.contains("You are a helpful fitness coach."));
}

#[test]
fn test_empty_lists_render_placeholders() {
    let prompt = builder().system_prompt(&UserContext::default());
    assert!(prompt.contains(NO_RECENT_WORKOUTS));
    assert!(prompt.contains(NO_MEALS_TODAY));
}

#[test]
fn test_lists_render_one_line_per_entry_in_order() {
    let context = UserContext {
        recent_workouts: vec![
            WorkoutSummary {
                activity_type: "Running".to_owned(),
                duration: Some(30.0),
            },
            WorkoutSummary {
                activity_type: "Yoga".to_owned(),
                duration: None,
            },
        ],
        todays_meals: vec![
            MealSummary {
                name: "Oats".to_owned(),
                calories: Some(350.0),
            },
            MealSummary {
                name: "Salad".to_owned(),
                calories: Some(420.5),
            },
        ],
        ..UserContext::default()
    };
    let prompt = builder().system_prompt(&context);

    assert!(prompt.contains("RECENT ACTIVITY:\n- Running (30 min)\n- Yoga (N/A min)\n"));
    assert!(prompt.contains("NUTRITION TODAY:\n- Oats (350 cal)\n- Salad (420.5 cal)\n"));
    assert!(!prompt.contains(NO_RECENT_WORKOUTS));
    assert!(!prompt.contains(NO_MEALS_TODAY));
}

#[test]
fn test_only_three_workouts_are_rendered() {
    let context = UserContext {
        recent_workouts: ["A", "B", "C", "D"]
            .iter()
            .map(|name| WorkoutSummary {
                activity_type: (*name).to_owned(),
                duration: Some(10.0),
            })
            .collect(),
        ..UserContext::default()
    };
    let prompt = builder().system_prompt(&context);
    assert!(prompt.contains("- C (10 min)"));
    assert!(!prompt.contains("- D (10 min)"));
}

#[test]
fn test_section_order_and_fixed_rules() {
    let prompt = builder().compose("Is creatine safe?", &UserContext::default());
    let positions: Vec<usize> = [
        "You are an adaptive fitness coach.",
        "YOUR TRUSTED KNOWLEDGE BASE",
        "\"nutrition\"",
        "USER PROFILE:",
        "RECENT ACTIVITY:",
        "NUTRITION TODAY:",
        "INSTRUCTIONS:",
        MEDICAL_REFUSAL,
        "User Question: Is creatine safe?",
    ]
    .iter()
    .map(|needle| prompt.find(needle).unwrap())
    .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_profile_renders_values_and_fallbacks() {
    let context = UserContext {
        profile: ProfileContext {
            name: Some("Ana".to_owned()),
            age: Some(31),
            gender: None,
            fitness_goal: Some("Endurance".to_owned()),
            fitness_level: None,
        },
        ..UserContext::default()
    };
    let prompt = builder().system_prompt(&context);
    assert!(prompt.contains(
        "USER PROFILE:\n- Name: Ana\n- Age: 31\n- Gender: N/A\n- Goal: Endurance\n- Level: Beginner\n"
    ));
}
