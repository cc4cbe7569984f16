//! Spending pattern command implementations

use std::path::Path;

use anyhow::{Context, Result};
use tally_core::{MockBackend, NarrativeBackend, OllamaBackend, TransactionClassifier};
use tracing::warn;

use super::{load_transactions, truncate};

pub fn cmd_patterns(engine: &TransactionClassifier, file: &Path, json: bool) -> Result<()> {
    let transactions = load_transactions(file)?;
    let summary = engine.analyze_spending_patterns(&transactions);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!();
    println!("📊 Spending patterns ({} transactions)", transactions.len());

    if summary.frequent_categories.is_empty() {
        println!("   No categorized transactions.");
    } else {
        println!();
        println!("   Most frequent categories");
        for entry in &summary.frequent_categories {
            println!("   {:24} {:>6}", truncate(&entry.category, 24), entry.count);
        }

        println!();
        println!("   Average amount by category");
        for entry in &summary.average_amounts {
            println!("   {:24} {:>12.2}", truncate(&entry.category, 24), entry.amount);
        }
    }

    println!();
    if summary.periodic_transactions.is_empty() {
        println!("   No periodic transactions detected.");
    } else {
        println!("   🔁 Periodic transactions");
        for t in &summary.periodic_transactions {
            println!(
                "   {} │ {:30} │ {:>10.2}",
                t.date,
                truncate(&t.description, 30),
                t.amount
            );
        }
    }

    Ok(())
}

pub async fn cmd_narrate(engine: &TransactionClassifier, file: &Path, mock: bool) -> Result<()> {
    let transactions = load_transactions(file)?;

    let backend: Box<dyn NarrativeBackend> = if mock {
        Box::new(MockBackend::new())
    } else {
        let ollama = OllamaBackend::from_env()
            .context("OLLAMA_HOST is not set (use --mock to run without a server)")?;
        if !ollama.health_check().await {
            warn!("Ollama at {} is not responding", ollama.host());
        }
        Box::new(ollama)
    };

    println!("📝 Generating summary with {}...", backend.model());
    let text = engine
        .narrate(backend.as_ref(), &transactions)
        .await
        .context("Narrative summary failed")?;

    println!();
    println!("{}", text);

    Ok(())
}
