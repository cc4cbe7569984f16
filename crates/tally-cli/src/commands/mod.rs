//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `classify` - Category suggestions, similar search, training and rule listing
//! - `patterns` - Spending pattern summary and narrative summaries

pub mod classify;
pub mod patterns;

// Re-export command functions for main.rs
pub use classify::*;
pub use patterns::*;

use std::path::Path;

use anyhow::{Context, Result};
use tally_core::{import, EngineConfig, TransactionClassifier, TransactionRecord};

/// Build the engine from the config file (or built-in defaults)
pub fn load_engine(config_path: Option<&Path>) -> Result<TransactionClassifier> {
    let config = EngineConfig::load(config_path).context("Failed to load engine config")?;
    Ok(TransactionClassifier::with_config(config))
}

/// Load a CSV or JSON transaction list
pub fn load_transactions(path: &Path) -> Result<Vec<TransactionRecord>> {
    import::load_transactions(path)
        .with_context(|| format!("Failed to load transactions from {}", path.display()))
}

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
