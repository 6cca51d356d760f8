// ABOUTME: Chat transcript persistence decoupled from the reply path
// ABOUTME: Records are written on detached tasks; failures are logged and dropped
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Chat Transcripts
//!
//! Handlers call [`spawn_record`] and move on. A slow or failing sink never
//! delays a reply or changes its content.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use fitcoach_core::constants::defaults;
use fitcoach_core::errors::AppResult;
use fitcoach_core::models::ChatRecord;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Destination for chat transcript records
#[async_trait]
pub trait TranscriptSink: Send + Sync {
    /// Persist one record
    async fn record(&self, record: ChatRecord) -> AppResult<()>;
}

/// Write `record` on a detached task
///
/// The returned handle is only useful to tests; callers normally drop it.
pub fn spawn_record(sink: Arc<dyn TranscriptSink>, record: ChatRecord) -> JoinHandle<()> {
    tokio::spawn(async move {
        let id = record.id;
        let role = record.role.as_str();
        match sink.record(record).await {
            Ok(()) => debug!(record.id = %id, role, "Chat transcript saved"),
            Err(e) => warn!(record.id = %id, role, error = %e, "Failed to save chat transcript"),
        }
    })
}

/// Transcript sink that keeps the most recent records in memory
///
/// Bounded: once `capacity` records are held, each new record evicts the
/// oldest. A capacity of zero keeps nothing.
#[derive(Debug)]
pub struct InMemoryTranscriptStore {
    capacity: usize,
    records: RwLock<VecDeque<ChatRecord>>,
}

impl InMemoryTranscriptStore {
    /// Create an empty store with the default capacity
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(defaults::TRANSCRIPT_CAPACITY)
    }

    /// Create an empty store holding at most `capacity` records
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            records: RwLock::new(VecDeque::with_capacity(capacity.min(defaults::TRANSCRIPT_CAPACITY))),
        }
    }

    /// Maximum number of records kept
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot of stored records, oldest first
    pub async fn records(&self) -> Vec<ChatRecord> {
        self.records.read().await.iter().cloned().collect()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether nothing has been recorded
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl Default for InMemoryTranscriptStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranscriptSink for InMemoryTranscriptStore {
    async fn record(&self, record: ChatRecord) -> AppResult<()> {
        if self.capacity == 0 {
            return Ok(());
        }
        let mut records = self.records.write().await;
        while records.len() >= self.capacity {
            records.pop_front();
        }
        records.push_back(record);
        Ok(())
    }
}
