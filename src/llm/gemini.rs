// ABOUTME: Google Gemini client for single-shot text generation with a caller-supplied key
// ABOUTME: Maps HTTP and API errors into ProviderFailure values for key-failover classification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Gemini Provider
//!
//! Implementation of [`GenerativeProvider`] for Google's Generative Language
//! API. The key is passed per call so the dispatcher can rotate keys without
//! rebuilding the client.
//!
//! ## Configuration
//!
//! - `GEMINI_MODEL`: model identifier (default `gemini-2.5-flash`)
//! - `GEMINI_BASE_URL`: API root (default the public v1beta endpoint)

use std::env;
use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use fitcoach_core::constants::{defaults, env_vars};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::{GenerativeProvider, ProviderFailure};

// ============================================================================
// API Request/Response Types
// ============================================================================

/// Gemini `generateContent` request
#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

/// One conversation turn
#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<TextPart<'a>>,
}

/// Text part of a turn
#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

/// Gemini `generateContent` response
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

/// Response candidate
#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

/// Content of a response candidate
#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

/// Part of a response candidate; non-text parts have no `text`
#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Error envelope returned by the API
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

/// API error body
#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Google Gemini text generation client
pub struct GeminiProvider {
    client: Client,
    base_url: String,
    model: String,
}

impl GeminiProvider {
    /// Create a client for `model` at `base_url`
    #[must_use]
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            model: model.into(),
        }
    }

    /// Create a client from `GEMINI_BASE_URL` and `GEMINI_MODEL`, with defaults
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(
            env::var(env_vars::GEMINI_BASE_URL)
                .unwrap_or_else(|_| defaults::GEMINI_BASE_URL.to_owned()),
            env::var(env_vars::GEMINI_MODEL).unwrap_or_else(|_| defaults::GEMINI_MODEL.to_owned()),
        )
    }

    /// Model used by [`GenerativeProvider::generate`]
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate text with an explicit model
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderFailure`] with the HTTP status when the API rejects
    /// the call, or without one on network faults and malformed responses.
    #[instrument(skip(self, credential, prompt))]
    pub async fn generate_with_model(
        &self,
        credential: &str,
        model: &str,
        prompt: &str,
    ) -> Result<String, ProviderFailure> {
        let url = format!("{}/models/{model}:generateContent", self.base_url);
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![TextPart { text: prompt }],
            }],
        };

        debug!(prompt_chars = prompt.len(), "Sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .query(&[("key", credential)])
            .json(&request)
            .send()
            .await
            // Strip the URL so the key never lands in error text or logs
            .map_err(|e| ProviderFailure::other(format!("HTTP request failed: {}", e.without_url())))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            ProviderFailure::other(format!("Failed to read response: {}", e.without_url()))
        })?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(Self::map_api_error(status, &body));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, "Failed to parse Gemini response");
            ProviderFailure::other(format!("Failed to parse Gemini response: {e}"))
        })?;

        if let Some(api_error) = parsed.error {
            return Err(ProviderFailure::other(format!(
                "Gemini API error: {}",
                api_error.message
            )));
        }

        let text = Self::extract_text(parsed)
            .ok_or_else(|| ProviderFailure::other("No content in Gemini response"))?;

        debug!(response_chars = text.len(), "Received Gemini response");
        Ok(text)
    }

    /// Concatenate the text parts of the first candidate
    fn extract_text(response: GenerateContentResponse) -> Option<String> {
        let parts = response
            .candidates?
            .into_iter()
            .next()?
            .content?
            .parts;
        let texts: Vec<String> = parts.into_iter().filter_map(|part| part.text).collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }

    /// Map a non-success status to a failure whose detail also carries the code
    fn map_api_error(status: StatusCode, body: &str) -> ProviderFailure {
        let message = serde_json::from_str::<ErrorEnvelope>(body)
            .map_or_else(|_| body.trim().to_owned(), |envelope| envelope.error.message);
        let reason = status.canonical_reason().unwrap_or("Error");
        ProviderFailure::http(
            status.as_u16(),
            format!("[{} {reason}] {message}", status.as_u16()),
        )
    }
}

#[async_trait]
impl GenerativeProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn generate(&self, credential: &str, prompt: &str) -> Result<String, ProviderFailure> {
        self.generate_with_model(credential, &self.model, prompt)
            .await
    }
}

impl Debug for GeminiProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiProvider")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            // Omit `client` field as HTTP clients are not useful to debug
            .finish_non_exhaustive()
    }
}
