// ABOUTME: Application-wide constants organized by domain
// ABOUTME: Fallback replies, context limits, defaults, and environment variable names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Groups pure data constants by domain. The fallback replies are part of the
//! chat contract: clients display them verbatim.

/// Replies returned when the model provider cannot produce an answer
pub mod fallbacks {
    /// Every configured key was rate limited or lacks access to the model
    pub const KEYS_EXHAUSTED: &str = "Sorry, all my API keys are currently busy or not enabled. Please check the Google Cloud Console.";
    /// Non-recoverable provider or network failure
    pub const CONNECTION_TROUBLE: &str =
        "Sorry, I am having trouble connecting to Google Gemini right now.";
    /// No reply text was produced on any path
    pub const SHORT_BREAK: &str =
        "Sorry, I'm taking a short break. Please check your API credits/permissions.";
    /// No keys are configured at all
    pub const NOT_INITIALIZED: &str =
        "Sorry, the AI coach is not initialized right now. Please try again later.";
}

/// Bounds applied when assembling user context
pub mod limits {
    /// Number of most recent workouts included in a prompt
    pub const RECENT_WORKOUT_LIMIT: usize = 3;
    /// Highest usage day count treated as a brand new user
    pub const NEW_USER_MAX_DAYS: u32 = 3;
    /// Highest usage day count treated as a first-week user
    pub const WEEK_ONE_MAX_DAYS: u32 = 8;
}

/// Default configuration values
pub mod defaults {
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 8000;
    /// Default Gemini model
    pub const GEMINI_MODEL: &str = "gemini-2.5-flash";
    /// Generative Language API base URL
    pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
    /// Per-attempt timeout for a provider call, in seconds
    pub const ATTEMPT_TIMEOUT_SECS: u64 = 30;
    /// Transcript records kept in memory before the oldest are dropped
    pub const TRANSCRIPT_CAPACITY: usize = 1000;
}

/// Environment variable names
pub mod env_vars {
    /// Primary Gemini key
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
    /// Backup Gemini key
    pub const GEMINI_API_KEY_2: &str = "GEMINI_API_KEY_2";
    /// Additional comma-separated keys
    pub const GEMINI_API_KEYS: &str = "GEMINI_API_KEYS";
    /// Model identifier override
    pub const GEMINI_MODEL: &str = "GEMINI_MODEL";
    /// API base URL override
    pub const GEMINI_BASE_URL: &str = "GEMINI_BASE_URL";
    /// Per-attempt timeout in seconds
    pub const LLM_ATTEMPT_TIMEOUT_SECS: &str = "LLM_ATTEMPT_TIMEOUT_SECS";
    /// Maximum in-memory transcript records
    pub const TRANSCRIPT_CAPACITY: &str = "TRANSCRIPT_CAPACITY";
    /// HTTP listen port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Legacy listen port variable
    pub const PORT: &str = "PORT";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}

/// Service identity used in logs
pub mod service_names {
    /// Server service name
    pub const FITCOACH_SERVER: &str = "fitcoach-server";
}
