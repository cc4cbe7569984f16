//! Narrative spending summaries from an external text generator
//!
//! The engine only aggregates totals and hands them across the boundary; the
//! returned text is opaque and displayed as-is by the caller.
//!
//! # Architecture
//!
//! - `SpendingTotals`: income, expense and per-category totals
//! - `NarrativeBackend` trait: the boundary call
//! - Backend implementations: `OllamaBackend`, `MockBackend`
//!
//! # Configuration
//!
//! Environment variables:
//! - `OLLAMA_HOST`: Ollama server URL (required for the ollama backend)
//! - `OLLAMA_MODEL`: Model name (default: llama3.2)

mod mock;
mod ollama;

pub use mock::MockBackend;
pub use ollama::OllamaBackend;

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;
use crate::models::{TransactionRecord, TransactionType};

/// Category label used for transactions without a category
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Aggregated totals sent to the narrative backend
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpendingTotals {
    pub total_income: f64,
    pub total_expense: f64,
    /// Sum of amounts per category, ordered by category name
    pub by_category: BTreeMap<String, f64>,
}

impl SpendingTotals {
    /// Sum amounts by the record's own type and by category
    pub fn from_transactions(transactions: &[TransactionRecord]) -> Self {
        let mut totals = Self::default();

        for t in transactions {
            match t.transaction_type {
                TransactionType::Income => totals.total_income += t.amount,
                TransactionType::Expense => totals.total_expense += t.amount,
            }

            let category = if t.category.is_empty() {
                UNCATEGORIZED
            } else {
                t.category.as_str()
            };
            *totals.by_category.entry(category.to_string()).or_insert(0.0) += t.amount;
        }

        totals
    }
}

/// Build the instruction prompt for a set of totals
pub fn build_prompt(totals: &SpendingTotals) -> String {
    let mut prompt = String::from(
        "Analyze the following personal finance data.\n\n",
    );
    prompt.push_str(&format!("Total income: {:.2}\n", totals.total_income));
    prompt.push_str(&format!("Total expenses: {:.2}\n", totals.total_expense));
    prompt.push_str("\nSpending by category:\n");
    for (category, amount) in &totals.by_category {
        prompt.push_str(&format!("{}: {:.2}\n", category, amount));
    }
    prompt.push_str(
        "\nPlease:\n\
         1. Give a short summary of the financial situation\n\
         2. Give 3-4 concrete saving and spending recommendations\n\
         3. Point out notable trends\n\
         4. List anything that needs attention\n\
         Separate the four parts with a blank line.\n",
    );
    prompt
}

/// Trait defining the narrative summarization boundary
///
/// Backends should be Send + Sync to allow use across async tasks.
#[async_trait]
pub trait NarrativeBackend: Send + Sync {
    /// Produce free text describing the given totals
    async fn summarize(&self, totals: &SpendingTotals) -> Result<String>;

    /// Check if the backend is available
    async fn health_check(&self) -> bool;

    /// Get the model name (for logging)
    fn model(&self) -> &str;
}
