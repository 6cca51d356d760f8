// ABOUTME: Ordered pool of provider API keys with a shared, rotating active index
// ABOUTME: Rotation is lock-free and observable by every concurrent dispatch
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::atomic::{AtomicUsize, Ordering};

use thiserror::Error;
use tracing::{info, warn};

/// Returned when the pool holds no credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no provider credentials configured")]
pub struct DisabledError;

/// Credential currently selected by the pool
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ActiveCredential<'a> {
    /// Position of the credential in the pool
    pub index: usize,
    /// The credential itself
    pub key: &'a str,
}

impl Debug for ActiveCredential<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ActiveCredential")
            .field("index", &self.index)
            .field("key", &format_args!("...{}", key_suffix(self.key)))
            .finish()
    }
}

/// Thread-safe ordered credential list
///
/// The list is fixed at construction; only the active index moves. All
/// dispatches share one pool, so a rotation triggered by one request is seen
/// by every other in-flight request. Re-sending with whichever key is active
/// is always safe because generation requests are read-only.
pub struct CredentialPool {
    credentials: Vec<String>,
    active: AtomicUsize,
}

impl CredentialPool {
    /// Build a pool, dropping blank entries while keeping order
    #[must_use]
    pub fn new<I, S>(credentials: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let credentials: Vec<String> = credentials
            .into_iter()
            .map(Into::into)
            .filter(|key| !key.trim().is_empty())
            .collect();

        if credentials.is_empty() {
            warn!("Credential pool is empty; model dispatch is disabled");
        } else {
            info!(
                credentials = credentials.len(),
                key_index = 0,
                key_suffix = %key_suffix(&credentials[0]),
                "Credential pool initialized"
            );
        }

        Self {
            credentials,
            active: AtomicUsize::new(0),
        }
    }

    /// Number of credentials in the pool
    #[must_use]
    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    /// Whether the pool is empty (dispatch permanently disabled)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }

    /// Index of the active credential
    #[must_use]
    pub fn active_index(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    /// Credential at the active index
    ///
    /// # Errors
    ///
    /// Returns [`DisabledError`] when the pool is empty.
    pub fn active_credential(&self) -> Result<ActiveCredential<'_>, DisabledError> {
        let index = self.active_index();
        self.credentials
            .get(index)
            .map(|key| ActiveCredential { index, key })
            .ok_or(DisabledError)
    }

    /// Advance to the next credential, wrapping at the end
    ///
    /// Returns `false` without touching the index when there is no alternate
    /// credential. The new credential is not verified here; the next send does that.
    pub fn rotate(&self) -> bool {
        let len = self.credentials.len();
        if len <= 1 {
            warn!("No backup credentials available for rotation");
            return false;
        }

        let previous = self
            .active
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |index| {
                Some((index + 1) % len)
            })
            .unwrap_or_else(|index| index);
        let next = (previous + 1) % len;

        warn!(
            from_index = previous,
            key_index = next,
            key_suffix = %key_suffix(&self.credentials[next]),
            "Switched to backup credential"
        );
        true
    }

    /// Point back at the first credential
    pub fn reset(&self) {
        self.active.store(0, Ordering::SeqCst);
    }
}

impl Debug for CredentialPool {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CredentialPool")
            .field("len", &self.credentials.len())
            .field("active", &self.active_index())
            .finish_non_exhaustive()
    }
}

/// Last four characters of a key, safe to log
#[must_use]
pub fn key_suffix(key: &str) -> &str {
    key.char_indices()
        .rev()
        .nth(3)
        .map_or(key, |(position, _)| &key[position..])
}
