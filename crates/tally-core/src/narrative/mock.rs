//! Mock narrative backend for testing
//!
//! Produces a deterministic summary from the totals, useful for tests and for
//! running the CLI without a text generation server.

use async_trait::async_trait;

use crate::error::{Error, Result};

use super::{NarrativeBackend, SpendingTotals};

/// Mock narrative backend
#[derive(Clone, Default)]
pub struct MockBackend {
    /// Whether health_check should return true
    pub healthy: bool,
}

impl MockBackend {
    /// Create a new mock backend (healthy by default)
    pub fn new() -> Self {
        Self { healthy: true }
    }

    /// Create an unhealthy mock backend; summarize fails
    pub fn unhealthy() -> Self {
        Self { healthy: false }
    }
}

#[async_trait]
impl NarrativeBackend for MockBackend {
    async fn summarize(&self, totals: &SpendingTotals) -> Result<String> {
        if !self.healthy {
            return Err(Error::Narrative("mock backend is unhealthy".into()));
        }

        // Expense totals may be recorded with either sign
        let net = totals.total_income - totals.total_expense.abs();
        let largest = totals
            .by_category
            .iter()
            .max_by(|a, b| a.1.abs().total_cmp(&b.1.abs()))
            .map(|(category, _)| category.as_str())
            .unwrap_or("none");

        Ok(format!(
            "Income {:.2}, expenses {:.2}, net {:.2}.\n\n\
             Review spending in {}.\n\n\
             {} categories tracked.\n\n\
             {}",
            totals.total_income,
            totals.total_expense,
            net,
            largest,
            totals.by_category.len(),
            if net < 0.0 {
                "Expenses exceed income."
            } else {
                "No alerts."
            }
        ))
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model(&self) -> &str {
        "mock"
    }
}
