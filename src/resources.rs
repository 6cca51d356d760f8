// ABOUTME: Centralized resource container shared by every HTTP handler
// ABOUTME: Owns the dispatcher, context enricher, fitness store, and transcript sink
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server Resources
//!
//! Built once at startup and cloned into handlers; every field is an `Arc`
//! (or wraps one), so clones share the same key pool and stores.

use std::sync::Arc;

use fitcoach_core::errors::AppResult;

use crate::config::ServerConfig;
use crate::context::ContextEnricher;
use crate::llm::{
    CredentialPool, Dispatcher, GeminiProvider, GenerativeProvider, PromptBuilder, KNOWLEDGE_BASE,
};
use crate::store::InMemoryFitnessStore;
use crate::transcript::{InMemoryTranscriptStore, TranscriptSink};

/// Shared server state
#[derive(Clone)]
pub struct ServerResources {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
    /// Model dispatch with key failover
    pub dispatcher: Arc<Dispatcher>,
    /// Server-side context enrichment
    pub enricher: ContextEnricher,
    /// Profiles, workouts, and meals written by the fitness routes
    pub store: Arc<InMemoryFitnessStore>,
    /// Chat transcript destination
    pub transcripts: Arc<dyn TranscriptSink>,
}

impl ServerResources {
    /// Wire resources from explicit collaborators
    ///
    /// # Errors
    ///
    /// Returns an error if the knowledge base cannot be serialized
    pub fn new(
        config: Arc<ServerConfig>,
        provider: Arc<dyn GenerativeProvider>,
        store: Arc<InMemoryFitnessStore>,
        transcripts: Arc<dyn TranscriptSink>,
    ) -> AppResult<Self> {
        let credentials = Arc::new(CredentialPool::new(config.gemini.api_keys.iter().cloned()));
        let dispatcher = Dispatcher::new(provider, credentials, PromptBuilder::new(&KNOWLEDGE_BASE)?)
            .with_attempt_timeout(config.gemini.attempt_timeout);

        Ok(Self {
            config,
            dispatcher: Arc::new(dispatcher),
            enricher: ContextEnricher::new(store.clone()),
            store,
            transcripts,
        })
    }

    /// Wire the production Gemini client with in-memory stores
    ///
    /// # Errors
    ///
    /// Returns an error if the knowledge base cannot be serialized
    pub fn from_config(config: ServerConfig) -> AppResult<Self> {
        let provider = GeminiProvider::new(&config.gemini.base_url, &config.gemini.model);
        let transcripts = InMemoryTranscriptStore::with_capacity(config.transcript_capacity);
        Self::new(
            Arc::new(config),
            Arc::new(provider),
            Arc::new(InMemoryFitnessStore::new()),
            Arc::new(transcripts),
        )
    }

    /// Number of configured provider keys
    #[must_use]
    pub fn credential_count(&self) -> usize {
        self.dispatcher.credentials().len()
    }
}
