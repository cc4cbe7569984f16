//! Learning store for user-confirmed categories
//!
//! Maps a normalized description to the category the user confirmed for it,
//! with a confidence that grows every time the same description is confirmed
//! again. A separate counter tracks how often each description was seen and
//! feeds the frequency term of similar-transaction ranking.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::config::LearningConfig;

/// Lowercase a description for use as a learning key
pub fn normalize_description(description: &str) -> String {
    description.to_lowercase()
}

/// A learned description → category mapping
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LearnedPattern {
    pub category: String,
    /// Always within [0, max_confidence]
    pub confidence: f64,
}

/// Outcome of a reinforcement call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reinforcement {
    /// First confirmation of this description
    Created,
    /// Existing mapping overwritten and its confidence raised
    Strengthened,
    /// Empty description or category
    Skipped,
}

/// Learned mappings plus per-description frequency counts
#[derive(Debug, Clone, Default)]
pub struct LearningStore {
    patterns: HashMap<String, LearnedPattern>,
    frequencies: HashMap<String, u64>,
    config: LearningConfig,
}

impl LearningStore {
    pub fn new(config: LearningConfig) -> Self {
        Self {
            patterns: HashMap::new(),
            frequencies: HashMap::new(),
            config,
        }
    }

    /// Learned mapping for an already-normalized description
    pub fn lookup(&self, normalized_description: &str) -> Option<&LearnedPattern> {
        self.patterns.get(normalized_description)
    }

    /// How many times a normalized description was reinforced
    pub fn frequency(&self, normalized_description: &str) -> u64 {
        self.frequencies
            .get(normalized_description)
            .copied()
            .unwrap_or(0)
    }

    /// Record that `description` was confirmed as `category`
    ///
    /// A new description starts at the initial confidence. A known one takes the
    /// new category and gains one confidence step, capped at the maximum.
    pub fn reinforce(&mut self, description: &str, category: &str) -> Reinforcement {
        if description.is_empty() || category.is_empty() {
            return Reinforcement::Skipped;
        }

        let key = normalize_description(description);
        let outcome = match self.patterns.get_mut(&key) {
            Some(existing) => {
                existing.category = category.to_string();
                existing.confidence = snap(
                    (existing.confidence + self.config.confidence_step)
                        .min(self.config.max_confidence),
                );
                debug!(
                    "Strengthened '{}' -> {} (confidence: {})",
                    key, existing.category, existing.confidence
                );
                Reinforcement::Strengthened
            }
            None => {
                debug!("Learned '{}' -> {}", key, category);
                self.patterns.insert(
                    key.clone(),
                    LearnedPattern {
                        category: category.to_string(),
                        confidence: self.config.initial_confidence,
                    },
                );
                Reinforcement::Created
            }
        };

        *self.frequencies.entry(key).or_insert(0) += 1;
        outcome
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// All learned mappings, sorted by key
    pub fn patterns(&self) -> Vec<(&str, &LearnedPattern)> {
        let mut entries: Vec<_> = self
            .patterns
            .iter()
            .map(|(key, pattern)| (key.as_str(), pattern))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

/// Snap to 10 decimal places so repeated steps land exactly on the cap
fn snap(value: f64) -> f64 {
    (value * 1e10).round() / 1e10
}
