// ABOUTME: Chat transcript record types for persistence of coach conversations
// ABOUTME: ChatRole and ChatRecord with the user context that accompanied each message
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Author of a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// End-user message
    User,
    /// Coach reply
    Ai,
}

impl ChatRole {
    /// Lowercase wire name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Ai => "ai",
        }
    }
}

/// One persisted transcript entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRecord {
    /// Unique record ID
    pub id: Uuid,
    /// Author
    pub role: ChatRole,
    /// Message text
    pub content: String,
    /// Context snapshot sent with the message
    #[serde(default)]
    pub user_context: Value,
    /// Creation time
    pub timestamp: DateTime<Utc>,
}

impl ChatRecord {
    /// Create a record stamped with the current time
    #[must_use]
    pub fn new(role: ChatRole, content: impl Into<String>, user_context: Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            user_context,
            timestamp: Utc::now(),
        }
    }

    /// User message record
    #[must_use]
    pub fn user(content: impl Into<String>, user_context: Value) -> Self {
        Self::new(ChatRole::User, content, user_context)
    }

    /// Coach reply record
    #[must_use]
    pub fn ai(content: impl Into<String>, user_context: Value) -> Self {
        Self::new(ChatRole::Ai, content, user_context)
    }
}
