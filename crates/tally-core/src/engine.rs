//! Long-lived classification engine shared by all callers
//!
//! `TransactionClassifier` owns the one adaptive learning store and exposes
//! every engine operation through `&self`. Construct it once and pass it (or an
//! `Arc` of it) to whatever needs suggestions; tests build isolated instances.
//!
//! Reinforcement takes the store's write lock, so concurrent `learn` calls are
//! serialized and never interleave with an in-flight prediction or search.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info};

use crate::analysis::PatternAnalyzer;
use crate::classifier::Classifier;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::learning::{LearnedPattern, LearningStore, Reinforcement};
use crate::models::{PredictionResult, SpendingPatternsSummary, TrainingSummary, TransactionRecord};
use crate::narrative::{NarrativeBackend, SpendingTotals};
use crate::patterns::PatternLibrary;
use crate::similarity::SimilaritySearch;

/// Engine facade: classification, learning, search and analysis
pub struct TransactionClassifier {
    classifier: Classifier,
    search: SimilaritySearch,
    analyzer: PatternAnalyzer,
    store: RwLock<LearningStore>,
}

impl TransactionClassifier {
    /// Create an engine with built-in rules and default thresholds
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine from a loaded configuration
    pub fn with_config(config: EngineConfig) -> Self {
        let library = PatternLibrary::from_config(&config.rules);
        debug!("Engine created with {} keyword rules", library.len());

        Self {
            classifier: Classifier::new(library, config.classifier),
            search: SimilaritySearch::new(config.search),
            analyzer: PatternAnalyzer::new(config.analysis),
            store: RwLock::new(LearningStore::new(config.learning)),
        }
    }

    /// Suggest a category for a new description
    pub fn suggest_category(&self, description: &str, amount: f64) -> PredictionResult {
        self.classifier.predict(&self.read_store(), description, amount)
    }

    /// Reinforce the learning store from one confirmed transaction
    ///
    /// Records without a description or category are ignored.
    pub fn learn(&self, transaction: &TransactionRecord) -> Reinforcement {
        self.write_store()
            .reinforce(&transaction.description, &transaction.category)
    }

    /// Reinforce once per transaction, in list order
    pub fn train_with_historical_data(&self, transactions: &[TransactionRecord]) -> TrainingSummary {
        let mut summary = TrainingSummary {
            transactions_seen: transactions.len(),
            ..Default::default()
        };

        {
            let mut store = self.write_store();
            for transaction in transactions {
                match store.reinforce(&transaction.description, &transaction.category) {
                    Reinforcement::Skipped => summary.transactions_skipped += 1,
                    Reinforcement::Created | Reinforcement::Strengthened => {
                        summary.transactions_learned += 1
                    }
                }
            }
        }

        info!(
            "Trained on {} transactions ({} learned, {} skipped)",
            summary.transactions_seen, summary.transactions_learned, summary.transactions_skipped
        );
        summary
    }

    /// Up to five historical transactions most similar to a description
    pub fn find_similar_transactions<'a>(
        &self,
        description: &str,
        transactions: &'a [TransactionRecord],
    ) -> Vec<&'a TransactionRecord> {
        self.search
            .find_similar(&self.read_store(), description, transactions)
    }

    /// Frequent categories, average amounts and periodic transactions
    pub fn analyze_spending_patterns(
        &self,
        transactions: &[TransactionRecord],
    ) -> SpendingPatternsSummary {
        self.analyzer.analyze(transactions)
    }

    /// Ask a narrative backend to describe the totals of a transaction list
    pub async fn narrate(
        &self,
        backend: &dyn NarrativeBackend,
        transactions: &[TransactionRecord],
    ) -> Result<String> {
        let totals = SpendingTotals::from_transactions(transactions);
        debug!(
            "Requesting narrative from {} for {} categories",
            backend.model(),
            totals.by_category.len()
        );
        backend.summarize(&totals).await
    }

    /// The active keyword rules
    pub fn pattern_library(&self) -> &PatternLibrary {
        self.classifier.library()
    }

    /// Copy of the learned mappings, sorted by normalized description
    pub fn learned_patterns(&self) -> Vec<(String, LearnedPattern, u64)> {
        let store = self.read_store();
        store
            .patterns()
            .into_iter()
            .map(|(key, pattern)| (key.to_string(), pattern.clone(), store.frequency(key)))
            .collect()
    }

    /// Number of learned mappings
    pub fn learned_count(&self) -> usize {
        self.read_store().len()
    }

    // The store holds plain maps; a panic elsewhere cannot leave them half-written
    fn read_store(&self) -> RwLockReadGuard<'_, LearningStore> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_store(&self) -> RwLockWriteGuard<'_, LearningStore> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for TransactionClassifier {
    fn default() -> Self {
        Self::new()
    }
}
