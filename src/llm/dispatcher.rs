// ABOUTME: Bounded key-failover loop around the generative provider call
// ABOUTME: Always resolves to model text or one of the fixed fallback replies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Dispatcher
//!
//! Each call runs its own attempt loop:
//!
//! - the active key is read from the shared [`CredentialPool`] before every send
//! - rate-limit and not-enabled failures rotate the pool and retry
//! - any other failure, including a per-attempt timeout, ends the loop
//! - at most `pool length + 1` sends are made
//!
//! Callers never see an error. The result is the provider's text or a
//! fallback from [`fitcoach_core::constants::fallbacks`].

use std::sync::Arc;
use std::time::Duration;

use fitcoach_core::constants::{defaults, fallbacks};
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use super::classifier::{classify, FailureClass};
use super::credentials::{key_suffix, CredentialPool};
use super::prompts::PromptBuilder;
use super::GenerativeProvider;
use crate::context::UserContext;

/// How a dispatch call ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchOutcome {
    /// Provider returned text
    Success,
    /// Recoverable failures used up every attempt or alternate key
    Exhausted,
    /// Unrecoverable provider failure or timeout
    TerminalFailure,
    /// No keys configured; nothing was sent
    Disabled,
    /// Provider answered with empty text
    EmptyResponse,
}

impl DispatchOutcome {
    /// Reply text used when the outcome carries no provider text
    #[must_use]
    pub const fn fallback(self) -> &'static str {
        match self {
            Self::Exhausted => fallbacks::KEYS_EXHAUSTED,
            Self::TerminalFailure => fallbacks::CONNECTION_TROUBLE,
            Self::Disabled => fallbacks::NOT_INITIALIZED,
            Self::Success | Self::EmptyResponse => fallbacks::SHORT_BREAK,
        }
    }
}

/// Result of a single send
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttemptOutcome {
    /// Provider returned text
    Success,
    /// Failure that rotation may fix
    Recoverable(FailureClass),
    /// Failure that ends the loop
    Terminal,
    /// Send exceeded the per-attempt timeout
    TimedOut,
}

/// One send within a dispatch call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchAttempt {
    /// 1-based attempt number
    pub attempt: usize,
    /// Pool index of the key used
    pub credential_index: usize,
    /// What happened
    pub outcome: AttemptOutcome,
}

/// Full account of a dispatch call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    /// Text returned to the caller
    pub response: String,
    /// Final state of the loop
    pub outcome: DispatchOutcome,
    /// Sends in order
    pub attempts: Vec<DispatchAttempt>,
    /// Successful rotations performed by this call
    pub rotations: usize,
}

impl DispatchReport {
    fn resolved(outcome: DispatchOutcome, attempts: Vec<DispatchAttempt>, rotations: usize) -> Self {
        Self {
            response: outcome.fallback().to_owned(),
            outcome,
            attempts,
            rotations,
        }
    }
}

/// Sends coaching prompts with key failover
#[derive(Clone)]
pub struct Dispatcher {
    provider: Arc<dyn GenerativeProvider>,
    credentials: Arc<CredentialPool>,
    prompts: PromptBuilder,
    attempt_timeout: Duration,
}

impl Dispatcher {
    /// Create a dispatcher with the default per-attempt timeout
    #[must_use]
    pub fn new(
        provider: Arc<dyn GenerativeProvider>,
        credentials: Arc<CredentialPool>,
        prompts: PromptBuilder,
    ) -> Self {
        Self {
            provider,
            credentials,
            prompts,
            attempt_timeout: Duration::from_secs(defaults::ATTEMPT_TIMEOUT_SECS),
        }
    }

    /// Override the per-attempt timeout
    #[must_use]
    pub fn with_attempt_timeout(mut self, attempt_timeout: Duration) -> Self {
        self.attempt_timeout = attempt_timeout;
        self
    }

    /// Shared key pool
    #[must_use]
    pub const fn credentials(&self) -> &Arc<CredentialPool> {
        &self.credentials
    }

    /// Reply to `message`; never fails
    pub async fn generate_response(&self, message: &str, context: &UserContext) -> String {
        self.dispatch(message, context).await.response
    }

    /// Reply to `message` with a record of every attempt
    pub async fn dispatch(&self, message: &str, context: &UserContext) -> DispatchReport {
        if self.credentials.is_empty() {
            warn!("Dispatch requested with no credentials configured");
            return DispatchReport::resolved(DispatchOutcome::Disabled, Vec::new(), 0);
        }
        let prompt = self.prompts.compose(message, context);
        self.dispatch_prompt(&prompt).await
    }

    /// Run the failover loop for an already composed prompt
    pub async fn dispatch_prompt(&self, prompt: &str) -> DispatchReport {
        let max_attempts = self.credentials.len() + 1;
        let mut attempts = Vec::with_capacity(max_attempts);
        let mut rotations = 0;

        loop {
            let Ok(credential) = self.credentials.active_credential() else {
                warn!("Dispatch requested with no credentials configured");
                return DispatchReport::resolved(DispatchOutcome::Disabled, attempts, rotations);
            };
            let attempt = attempts.len() + 1;
            debug!(
                provider = self.provider.name(),
                attempt,
                key_index = credential.index,
                "Sending prompt"
            );

            let result = timeout(
                self.attempt_timeout,
                self.provider.generate(credential.key, prompt),
            )
            .await;

            let failure = match result {
                Ok(Ok(text)) => {
                    attempts.push(DispatchAttempt {
                        attempt,
                        credential_index: credential.index,
                        outcome: AttemptOutcome::Success,
                    });
                    if text.is_empty() {
                        warn!(attempt, "Provider returned empty text");
                        return DispatchReport::resolved(
                            DispatchOutcome::EmptyResponse,
                            attempts,
                            rotations,
                        );
                    }
                    info!(attempt, rotations, "Provider reply received");
                    return DispatchReport {
                        response: text,
                        outcome: DispatchOutcome::Success,
                        attempts,
                        rotations,
                    };
                }
                Ok(Err(failure)) => failure,
                Err(_) => {
                    error!(
                        attempt,
                        key_index = credential.index,
                        timeout_ms = u64::try_from(self.attempt_timeout.as_millis()).unwrap_or(u64::MAX),
                        "Provider call timed out"
                    );
                    attempts.push(DispatchAttempt {
                        attempt,
                        credential_index: credential.index,
                        outcome: AttemptOutcome::TimedOut,
                    });
                    return DispatchReport::resolved(
                        DispatchOutcome::TerminalFailure,
                        attempts,
                        rotations,
                    );
                }
            };

            let class = classify(&failure);
            if !class.is_recoverable() {
                error!(
                    attempt,
                    key_index = credential.index,
                    error = %failure,
                    "Provider call failed"
                );
                attempts.push(DispatchAttempt {
                    attempt,
                    credential_index: credential.index,
                    outcome: AttemptOutcome::Terminal,
                });
                return DispatchReport::resolved(
                    DispatchOutcome::TerminalFailure,
                    attempts,
                    rotations,
                );
            }

            warn!(
                attempt,
                key_index = credential.index,
                key_suffix = %key_suffix(credential.key),
                failure = class.as_str(),
                "Key hit a recoverable failure"
            );
            attempts.push(DispatchAttempt {
                attempt,
                credential_index: credential.index,
                outcome: AttemptOutcome::Recoverable(class),
            });

            if attempts.len() >= max_attempts || !self.credentials.rotate() {
                error!(
                    attempts = attempts.len(),
                    rotations, "All keys exhausted"
                );
                return DispatchReport::resolved(DispatchOutcome::Exhausted, attempts, rotations);
            }
            rotations += 1;
        }
    }
}
