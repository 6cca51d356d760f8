// ABOUTME: Coach personality selected by the user in the mobile client
// ABOUTME: Maps short client tags to one of three coaching personas or the general default
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Coaching persona requested by the client
///
/// The client sends a short tag (`"A"`, `"B"`, `"C"`). Any other value,
/// including the client's own `"general"`, `null`, or a non-string, selects
/// [`Personality::General`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(into = "String")]
pub enum Personality {
    /// Supportive and positive
    EncouragementSeeker,
    /// Fun and unconventional
    CreativeExplorer,
    /// Direct and efficient
    GoalFinisher,
    /// Generic helpful coach
    #[default]
    General,
}

impl Personality {
    /// Resolve a client tag, falling back to [`Personality::General`]
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "A" => Self::EncouragementSeeker,
            "B" => Self::CreativeExplorer,
            "C" => Self::GoalFinisher,
            _ => Self::General,
        }
    }

    /// Client tag for this persona
    #[must_use]
    pub const fn as_tag(self) -> &'static str {
        match self {
            Self::EncouragementSeeker => "A",
            Self::CreativeExplorer => "B",
            Self::GoalFinisher => "C",
            Self::General => "general",
        }
    }
}

impl From<String> for Personality {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl<'de> Deserialize<'de> for Personality {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value
            .as_ref()
            .and_then(Value::as_str)
            .map_or(Self::General, Self::from_tag))
    }
}

impl From<Personality> for String {
    fn from(personality: Personality) -> Self {
        personality.as_tag().to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tags() {
        assert_eq!(Personality::from_tag("A"), Personality::EncouragementSeeker);
        assert_eq!(Personality::from_tag("B"), Personality::CreativeExplorer);
        assert_eq!(Personality::from_tag("C"), Personality::GoalFinisher);
    }

    #[test]
    fn test_unknown_tags_fall_back_to_general() {
        assert_eq!(Personality::from_tag("general"), Personality::General);
        assert_eq!(Personality::from_tag("a"), Personality::General);
        assert_eq!(Personality::from_tag(""), Personality::General);
    }

    #[test]
    fn test_serde_uses_tags() {
        let parsed: Personality = serde_json::from_str("\"B\"").unwrap();
        assert_eq!(parsed, Personality::CreativeExplorer);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"B\"");
    }

    #[test]
    fn test_non_string_values_fall_back_to_general() {
        for raw in ["null", "7", "true", "{\"tag\":\"A\"}", "[\"A\"]"] {
            let parsed: Personality = serde_json::from_str(raw).unwrap();
            assert_eq!(parsed, Personality::General, "input {raw}");
        }
    }
}
