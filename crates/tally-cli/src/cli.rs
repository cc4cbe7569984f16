//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - Categorize transactions and spot spending patterns
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Transaction classifier and spending pattern analyzer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Engine config file (defaults to ~/.local/share/tally/config.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Suggest a category for a transaction description
    Suggest {
        /// Transaction description
        description: String,

        /// Signed amount (negative = expense)
        #[arg(short, long, allow_hyphen_values = true)]
        amount: f64,

        /// Categorized history (CSV or JSON) to learn from first
        #[arg(long)]
        history: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Find past transactions similar to a description
    Similar {
        /// Description to search for
        query: String,

        /// Transactions to search (CSV or JSON)
        #[arg(short, long)]
        file: PathBuf,

        /// Categorized history for frequency weighting (defaults to --file)
        #[arg(long)]
        history: Option<PathBuf>,

        /// Print the results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarize frequent categories, averages and periodic transactions
    Patterns {
        /// Transactions to analyze (CSV or JSON)
        #[arg(short, long)]
        file: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Ask a text generation backend for a narrative summary
    Narrate {
        /// Transactions to summarize (CSV or JSON)
        #[arg(short, long)]
        file: PathBuf,

        /// Use the built-in mock backend instead of Ollama
        #[arg(long)]
        mock: bool,
    },

    /// Train on a history file and show what was learned
    Learn {
        /// Categorized history (CSV or JSON)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// List the active keyword rules in match order
    Rules,
}
