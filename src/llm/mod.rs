// ABOUTME: Coach model layer: provider boundary, key pool, prompt assembly, and dispatch
// ABOUTME: Defines the GenerativeProvider contract that the Gemini client implements
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Coach Model Layer
//!
//! A chat message flows through this module as follows:
//!
//! 1. [`PromptBuilder`] renders persona, tone, knowledge base, and user data
//!    into one prompt.
//! 2. [`Dispatcher`] sends that prompt through a [`GenerativeProvider`] using
//!    the active key from a [`CredentialPool`], rotating keys on rate-limit and
//!    not-enabled failures.
//! 3. The caller always receives text: the model's reply or a fallback.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use fitcoach_server::context::UserContext;
//! use fitcoach_server::llm::{
//!     CredentialPool, Dispatcher, GeminiProvider, PromptBuilder, KNOWLEDGE_BASE,
//! };
//!
//! async fn example() -> Result<(), fitcoach_core::errors::AppError> {
//!     let dispatcher = Dispatcher::new(
//!         Arc::new(GeminiProvider::from_env()),
//!         Arc::new(CredentialPool::new(["my-key"])),
//!         PromptBuilder::new(&KNOWLEDGE_BASE)?,
//!     );
//!     let reply = dispatcher
//!         .generate_response("How much protein?", &UserContext::default())
//!         .await;
//!     println!("{reply}");
//!     Ok(())
//! }
//! ```

mod classifier;
mod credentials;
mod dispatcher;
mod gemini;
pub mod knowledge;
pub mod prompts;

pub use classifier::{classify, FailureClass, NOT_ENABLED_MARKERS, RATE_LIMIT_MARKER, RATE_LIMIT_STATUS};
pub use credentials::{key_suffix, ActiveCredential, CredentialPool, DisabledError};
pub use dispatcher::{
    AttemptOutcome, DispatchAttempt, DispatchOutcome, DispatchReport, Dispatcher,
};
pub use gemini::GeminiProvider;
pub use knowledge::{KnowledgeBase, KnowledgeCategory, KnowledgeFact, KNOWLEDGE_BASE};
pub use prompts::{PromptBuilder, UsageTier};

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Failure reported by a provider call
///
/// `status` carries the HTTP status when the provider answered; `detail` is
/// the provider's message and may embed the status number as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderFailure {
    /// HTTP-like status code, when one was returned
    pub status: Option<u16>,
    /// Provider error text
    pub detail: String,
}

impl ProviderFailure {
    /// Failure with a status code
    #[must_use]
    pub fn http(status: u16, detail: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            detail: detail.into(),
        }
    }

    /// Failure without a status code (network fault, malformed payload)
    #[must_use]
    pub fn other(detail: impl Into<String>) -> Self {
        Self {
            status: None,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "provider error ({status}): {}", self.detail),
            None => write!(f, "provider error: {}", self.detail),
        }
    }
}

impl std::error::Error for ProviderFailure {}

/// External text-generation service
///
/// Implementations perform exactly one request per call and never retry;
/// key selection and retries belong to [`Dispatcher`].
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    /// Provider identifier used in logs
    fn name(&self) -> &'static str;

    /// Generate text for `prompt` authenticating with `credential`
    async fn generate(&self, credential: &str, prompt: &str) -> Result<String, ProviderFailure>;
}
