//! Similar-transaction search
//!
//! Two stages with different notions of a matching word:
//! - Prefilter: a candidate passes when any query word occurs as a substring of
//!   its lowercased description ("cafe" admits "cafeteria").
//! - Ranking: Jaccard similarity over whole whitespace-separated tokens
//!   ("cafe" and "cafeteria" share nothing), blended with how often the
//!   candidate's description has been confirmed.

use std::collections::HashSet;

use tracing::debug;

use crate::config::SearchConfig;
use crate::learning::{normalize_description, LearningStore};
use crate::models::TransactionRecord;

/// Jaccard index over lowercased whitespace tokens
///
/// Symmetric, 1.0 for identical non-empty token sets, 0.0 when both are empty.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = tokens(a);
    let b = tokens(b);

    let union = a.union(&b).count();
    if union == 0 {
        return 0.0;
    }

    let intersection = a.intersection(&b).count();
    intersection as f64 / union as f64
}

fn tokens(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Ranks historical transactions against a query
#[derive(Debug, Clone, Default)]
pub struct SimilaritySearch {
    config: SearchConfig,
}

impl SimilaritySearch {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Weighted blend of description similarity and confirmation frequency
    ///
    /// The frequency term saturates at `frequency_saturation` confirmations.
    pub fn relevance_score(
        &self,
        store: &LearningStore,
        transaction: &TransactionRecord,
        query: &str,
    ) -> f64 {
        if transaction.description.is_empty() {
            return 0.0;
        }

        let key = normalize_description(&transaction.description);
        let frequency = store.frequency(&key) as f64;
        let frequency_term = (frequency / f64::from(self.config.frequency_saturation)).min(1.0);

        self.config.similarity_weight * similarity(query, &key)
            + self.config.frequency_weight * frequency_term
    }

    /// Up to `max_results` transactions most relevant to the query
    ///
    /// Ties keep their input order.
    pub fn find_similar<'a>(
        &self,
        store: &LearningStore,
        query: &str,
        transactions: &'a [TransactionRecord],
    ) -> Vec<&'a TransactionRecord> {
        let query = query.to_lowercase();
        let words: Vec<&str> = query.split_whitespace().collect();

        let mut candidates: Vec<(&TransactionRecord, f64)> = transactions
            .iter()
            .filter(|t| {
                if t.description.is_empty() {
                    return false;
                }
                let description = t.description.to_lowercase();
                words.iter().any(|word| description.contains(word))
            })
            .map(|t| (t, self.relevance_score(store, t, &query)))
            .collect();

        debug!(
            "Similar search for '{}': {} of {} candidates passed prefilter",
            query,
            candidates.len(),
            transactions.len()
        );

        candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
        candidates
            .into_iter()
            .take(self.config.max_results)
            .map(|(t, _)| t)
            .collect()
    }
}
