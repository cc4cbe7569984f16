//! Tally CLI - Transaction classifier and spending pattern analyzer
//!
//! Usage:
//!   tally suggest "MIGROS KADIKOY" --amount -120   Suggest a category
//!   tally similar coffee --file history.csv        Find similar transactions
//!   tally patterns --file history.csv              Spending pattern summary
//!   tally narrate --file history.csv               Narrative summary via Ollama

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let engine = commands::load_engine(cli.config.as_deref())?;

    match cli.command {
        Commands::Suggest {
            description,
            amount,
            history,
            json,
        } => commands::cmd_suggest(&engine, &description, amount, history.as_deref(), json),
        Commands::Similar {
            query,
            file,
            history,
            json,
        } => commands::cmd_similar(&engine, &query, &file, history.as_deref(), json),
        Commands::Patterns { file, json } => commands::cmd_patterns(&engine, &file, json),
        Commands::Narrate { file, mock } => commands::cmd_narrate(&engine, &file, mock).await,
        Commands::Learn { file } => commands::cmd_learn(&engine, &file),
        Commands::Rules => commands::cmd_rules(&engine),
    }
}
