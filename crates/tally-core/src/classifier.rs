//! Category prediction for free-text transaction descriptions
//!
//! Priority: learned (confidence above threshold) → keyword rules → large amount → "Other".
//! Prediction never fails; the last step always produces a result.

use tracing::debug;

use crate::config::ClassifierConfig;
use crate::learning::{normalize_description, LearningStore};
use crate::models::{PredictionResult, PredictionSource, TransactionType};
use crate::patterns::PatternLibrary;

/// Combines the pattern library with a learning store to suggest categories
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    library: PatternLibrary,
    config: ClassifierConfig,
}

impl Classifier {
    pub fn new(library: PatternLibrary, config: ClassifierConfig) -> Self {
        Self { library, config }
    }

    pub fn library(&self) -> &PatternLibrary {
        &self.library
    }

    /// Predict a category for a description and signed amount
    pub fn predict(&self, store: &LearningStore, description: &str, amount: f64) -> PredictionResult {
        let normalized = normalize_description(description);

        // 1. Learned mappings the user has confirmed often enough
        if let Some(learned) = store.lookup(&normalized) {
            if learned.confidence > self.config.learned_confidence_threshold {
                debug!(
                    "Learned match for '{}': {} (confidence: {})",
                    description, learned.category, learned.confidence
                );
                return PredictionResult {
                    category: learned.category.clone(),
                    confidence: learned.confidence,
                    transaction_type: TransactionType::from_amount(amount),
                    source: PredictionSource::Learned,
                };
            }
        }

        // 2. Keyword rules in declaration order
        if let Some(rule) = self.library.match_description(&normalized) {
            debug!("Keyword match for '{}': {}", description, rule.category());
            return PredictionResult {
                category: rule.category().to_string(),
                confidence: self.config.keyword_confidence,
                transaction_type: rule.transaction_type(),
                source: PredictionSource::Keyword,
            };
        }

        // 3. Large amounts
        if amount > self.config.large_amount_threshold {
            debug!("Large amount for '{}': {}", description, amount);
            return PredictionResult {
                category: self.config.large_amount_category.clone(),
                confidence: self.config.large_amount_confidence,
                transaction_type: TransactionType::Expense,
                source: PredictionSource::LargeAmount,
            };
        }

        // 4. Fallback
        debug!("Falling back to '{}' for '{}'", self.config.fallback_category, description);
        PredictionResult {
            category: self.config.fallback_category.clone(),
            confidence: self.config.fallback_confidence,
            transaction_type: TransactionType::Expense,
            source: PredictionSource::Fallback,
        }
    }
}
