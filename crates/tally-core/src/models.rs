//! Domain models for Tally

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Direction of money flow for a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Non-negative amounts are income, negative amounts are expenses
    pub fn from_amount(amount: f64) -> Self {
        if amount >= 0.0 {
            Self::Income
        } else {
            Self::Expense
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A transaction as supplied by the caller
///
/// The engine never mutates records; it reads descriptions, categories,
/// amounts and dates, and hands back references or clones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: String,
    /// Signed amount in the tracker's currency unit
    pub amount: f64,
    /// User-assigned category (empty when uncategorized)
    #[serde(default)]
    pub category: String,
    /// Free-text description (may be empty)
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}

impl TransactionRecord {
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        description: impl Into<String>,
        category: impl Into<String>,
        amount: f64,
        transaction_type: TransactionType,
    ) -> Self {
        Self {
            id: id.into(),
            amount,
            category: category.into(),
            description: description.into(),
            date,
            transaction_type,
        }
    }
}

/// Which classification step produced a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionSource {
    /// Learned from confirmed transactions
    Learned,
    /// Matched a keyword rule in the pattern library
    Keyword,
    /// Amount exceeded the large-expense threshold
    LargeAmount,
    /// Nothing matched
    Fallback,
}

impl PredictionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Learned => "learned",
            Self::Keyword => "keyword",
            Self::LargeAmount => "large_amount",
            Self::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for PredictionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Suggested category for a description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub category: String,
    pub confidence: f64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub source: PredictionSource,
}

/// Number of transactions in a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Mean transaction amount in a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAverage {
    pub category: String,
    pub amount: f64,
}

/// Aggregate spending statistics over a transaction list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpendingPatternsSummary {
    /// Most used categories, highest count first
    pub frequent_categories: Vec<CategoryCount>,
    /// Categories by mean amount, highest first
    pub average_amounts: Vec<CategoryAverage>,
    /// Transactions whose description recurs at a regular interval
    pub periodic_transactions: Vec<TransactionRecord>,
}

/// Result of a training pass over historical transactions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub transactions_seen: usize,
    pub transactions_learned: usize,
    /// Records without a description or category
    pub transactions_skipped: usize,
}
