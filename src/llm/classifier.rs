// ABOUTME: Classifies provider failures into recoverable (rotate key) and terminal
// ABOUTME: Literal status-code and substring rules for rate-limit and not-enabled errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Failure Classification
//!
//! Matching rules, applied in order:
//!
//! 1. **Rate limited**: `status == 429`, or the detail contains `"429"`.
//! 2. **Not enabled**: the detail contains `"404"` or `"not enabled"`.
//! 3. Anything else is terminal.
//!
//! The substring checks depend on the provider's message wording.

use super::ProviderFailure;

/// Status code the provider uses for quota exhaustion
pub const RATE_LIMIT_STATUS: u16 = 429;

/// Detail substring signalling quota exhaustion
pub const RATE_LIMIT_MARKER: &str = "429";

/// Detail substrings signalling the key cannot use the model
pub const NOT_ENABLED_MARKERS: [&str; 2] = ["404", "not enabled"];

/// Category of a provider failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureClass {
    /// Quota exhausted for the key
    RateLimited,
    /// API or model not enabled for the key
    NotEnabled,
    /// Network fault, malformed response, or unclassified provider error
    Other,
}

impl FailureClass {
    /// Whether switching keys may fix the failure
    #[must_use]
    pub const fn is_recoverable(self) -> bool {
        matches!(self, Self::RateLimited | Self::NotEnabled)
    }

    /// Short label for logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RateLimited => "rate_limit",
            Self::NotEnabled => "not_enabled",
            Self::Other => "other",
        }
    }
}

/// Classify a provider failure
#[must_use]
pub fn classify(failure: &ProviderFailure) -> FailureClass {
    if failure.status == Some(RATE_LIMIT_STATUS) || failure.detail.contains(RATE_LIMIT_MARKER) {
        FailureClass::RateLimited
    } else if NOT_ENABLED_MARKERS
        .iter()
        .any(|marker| failure.detail.contains(marker))
    {
        FailureClass::NotEnabled
    } else {
        FailureClass::Other
    }
}
