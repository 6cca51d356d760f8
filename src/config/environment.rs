// ABOUTME: Environment configuration for the chat server and the Gemini provider
// ABOUTME: Parses ports, deployment mode, key slots, model, and per-attempt timeout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration

use std::env;
use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use fitcoach_core::constants::{defaults, env_vars};
use serde::{Deserialize, Serialize};

use crate::llm::key_suffix;

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Gemini provider settings
#[derive(Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    /// Keys in failover order
    pub api_keys: Vec<String>,
    /// Model identifier
    pub model: String,
    /// API root URL
    pub base_url: String,
    /// Upper bound on one provider call
    pub attempt_timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_keys: Vec::new(),
            model: defaults::GEMINI_MODEL.to_owned(),
            base_url: defaults::GEMINI_BASE_URL.to_owned(),
            attempt_timeout: Duration::from_secs(defaults::ATTEMPT_TIMEOUT_SECS),
        }
    }
}

impl Debug for GeminiConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let redacted: Vec<String> = self
            .api_keys
            .iter()
            .map(|key| format!("...{}", key_suffix(key)))
            .collect();
        f.debug_struct("GeminiConfig")
            .field("api_keys", &redacted)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("attempt_timeout", &self.attempt_timeout)
            .finish()
    }
}

/// Complete server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Provider settings
    pub gemini: GeminiConfig,
    /// Chat transcript records kept in memory
    pub transcript_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: defaults::HTTP_PORT,
            environment: Environment::default(),
            gemini: GeminiConfig::default(),
            transcript_capacity: defaults::TRANSCRIPT_CAPACITY,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, reading `.env` first
    ///
    /// Runs before logging is initialized, so nothing here logs; callers
    /// report [`ServerConfig::warnings`] once a subscriber is installed.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable does not parse or a value is out of range
    pub fn from_env() -> Result<Self> {
        // A missing .env file is the normal production case
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable does not parse or a value is out of range
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port_var = if lookup(env_vars::HTTP_PORT).is_some() {
            env_vars::HTTP_PORT
        } else {
            env_vars::PORT
        };
        let timeout_secs: u64 = parse_or(
            &lookup,
            env_vars::LLM_ATTEMPT_TIMEOUT_SECS,
            defaults::ATTEMPT_TIMEOUT_SECS,
        )?;

        let config = Self {
            http_port: parse_or(&lookup, port_var, defaults::HTTP_PORT)?,
            environment: lookup(env_vars::ENVIRONMENT)
                .map(|value| Environment::from_str_or_default(&value))
                .unwrap_or_default(),
            gemini: GeminiConfig {
                api_keys: collect_api_keys(
                    lookup(env_vars::GEMINI_API_KEY).as_deref(),
                    lookup(env_vars::GEMINI_API_KEY_2).as_deref(),
                    lookup(env_vars::GEMINI_API_KEYS).as_deref(),
                ),
                model: non_empty(lookup(env_vars::GEMINI_MODEL))
                    .unwrap_or_else(|| defaults::GEMINI_MODEL.to_owned()),
                base_url: non_empty(lookup(env_vars::GEMINI_BASE_URL))
                    .unwrap_or_else(|| defaults::GEMINI_BASE_URL.to_owned()),
                attempt_timeout: Duration::from_secs(timeout_secs),
            },
            transcript_capacity: parse_or(
                &lookup,
                env_vars::TRANSCRIPT_CAPACITY,
                defaults::TRANSCRIPT_CAPACITY,
            )?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if the per-attempt timeout is zero
    pub fn validate(&self) -> Result<()> {
        if self.gemini.attempt_timeout.is_zero() {
            return Err(anyhow::anyhow!(
                "{} must be greater than zero",
                env_vars::LLM_ATTEMPT_TIMEOUT_SECS
            ));
        }
        Ok(())
    }

    /// Non-fatal problems worth logging at startup
    #[must_use]
    pub fn warnings(&self) -> Vec<&'static str> {
        let mut warnings = Vec::new();
        if self.gemini.api_keys.is_empty() {
            warnings.push("No Gemini API keys configured; chat replies will use the fallback text");
        }
        if self.transcript_capacity == 0 {
            warnings.push("Transcript capacity is zero; chat transcripts will not be kept");
        }
        warnings
    }

    /// Summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "FitCoach Server Configuration:\n\
             - HTTP Port: {}\n\
             - Environment: {}\n\
             - Gemini Model: {}\n\
             - Gemini Keys: {}\n\
             - Attempt Timeout: {}s\n\
             - Transcript Capacity: {}",
            self.http_port,
            self.environment,
            self.gemini.model,
            self.gemini.api_keys.len(),
            self.gemini.attempt_timeout.as_secs(),
            self.transcript_capacity,
        )
    }
}

/// Merge the key slots into one ordered, duplicate-free list
///
/// Order is primary, secondary, then the comma-separated list. Blank entries
/// are skipped and a repeated key keeps its first position.
#[must_use]
pub fn collect_api_keys(
    primary: Option<&str>,
    secondary: Option<&str>,
    list: Option<&str>,
) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    let candidates = primary
        .into_iter()
        .chain(secondary)
        .chain(list.into_iter().flat_map(|l| l.split(',')));
    for candidate in candidates.map(str::trim).filter(|k| !k.is_empty()) {
        if !keys.iter().any(|existing| existing == candidate) {
            keys.push(candidate.to_owned());
        }
    }
    keys
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match non_empty(lookup(key)) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {key} value: {raw}")),
        None => Ok(default),
    }
}
