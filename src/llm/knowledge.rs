// ABOUTME: Static trusted fitness knowledge base embedded in every coaching prompt
// ABOUTME: Category-ordered topic/fact pairs serialized as a JSON object
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Knowledge Base
//!
//! Read-only facts injected verbatim into each prompt so the model answers
//! common nutrition and training questions from vetted guidance. The data is
//! compiled in and never mutated.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A single trusted fact
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct KnowledgeFact {
    /// Short topic label
    pub topic: &'static str,
    /// The fact itself
    pub fact: &'static str,
}

/// Facts grouped under one category name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnowledgeCategory {
    /// Category key (nutrition, workouts, safety)
    pub name: &'static str,
    /// Facts in display order
    pub facts: &'static [KnowledgeFact],
}

/// Ordered mapping from category to facts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnowledgeBase {
    /// Categories in display order
    pub categories: &'static [KnowledgeCategory],
}

impl KnowledgeBase {
    /// Facts of one category, if present
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&'static [KnowledgeFact]> {
        self.categories
            .iter()
            .find(|category| category.name == name)
            .map(|category| category.facts)
    }

    /// Total number of facts across categories
    #[must_use]
    pub fn fact_count(&self) -> usize {
        self.categories.iter().map(|c| c.facts.len()).sum()
    }

    /// Compact JSON rendering used inside prompts
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// Serialized as `{category: [facts...]}` keeping declaration order.
impl Serialize for KnowledgeBase {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for category in self.categories {
            map.serialize_entry(category.name, category.facts)?;
        }
        map.end()
    }
}

/// Bundled fitness knowledge base
pub static KNOWLEDGE_BASE: KnowledgeBase = KnowledgeBase {
    categories: &[
        KnowledgeCategory {
            name: "nutrition",
            facts: &[
                KnowledgeFact {
                    topic: "Protein Intake",
                    fact: "General recommendation is 1.6g to 2.2g of protein per kg of body weight for muscle building.",
                },
                KnowledgeFact {
                    topic: "Creatine",
                    fact: "Creatine Monohydrate is the most researched supplement. 5g daily is standard. It helps with power output and muscle hydration.",
                },
                KnowledgeFact {
                    topic: "Weight Loss",
                    fact: "Caloric deficit is the primary driver of weight loss. Aim for a 300-500 calorie deficit below TDEE.",
                },
            ],
        },
        KnowledgeCategory {
            name: "workouts",
            facts: &[
                KnowledgeFact {
                    topic: "Rest Days",
                    fact: "Muscles grow during rest, not during the workout. At least 1-2 rest days per week are recommended.",
                },
                KnowledgeFact {
                    topic: "Progressive Overload",
                    fact: "To build muscle, you must gradually increase the weight, frequency, or number of repetitions in your strength training routine.",
                },
            ],
        },
        KnowledgeCategory {
            name: "safety",
            facts: &[KnowledgeFact {
                topic: "Pain",
                fact: "Sharp pain is a bad sign. Stop immediately. Delayed Onset Muscle Soreness (DOMS) is normal 24-48 hours after a workout.",
            }],
        },
    ],
};
