//! Classification command implementations

use std::path::Path;

use anyhow::Result;
use tally_core::TransactionClassifier;

use super::{load_transactions, truncate};

/// Train the engine from an optional history file
fn train_from(engine: &TransactionClassifier, history: Option<&Path>) -> Result<()> {
    if let Some(path) = history {
        let transactions = load_transactions(path)?;
        engine.train_with_historical_data(&transactions);
    }
    Ok(())
}

pub fn cmd_suggest(
    engine: &TransactionClassifier,
    description: &str,
    amount: f64,
    history: Option<&Path>,
    json: bool,
) -> Result<()> {
    train_from(engine, history)?;

    let prediction = engine.suggest_category(description, amount);

    if json {
        println!("{}", serde_json::to_string_pretty(&prediction)?);
        return Ok(());
    }

    println!();
    println!("🏷️  Suggested category for \"{}\"", description);
    println!("   Category:   {}", prediction.category);
    println!("   Type:       {}", prediction.transaction_type);
    println!("   Confidence: {:.0}%", prediction.confidence * 100.0);
    println!("   Source:     {}", prediction.source);

    Ok(())
}

pub fn cmd_similar(
    engine: &TransactionClassifier,
    query: &str,
    file: &Path,
    history: Option<&Path>,
    json: bool,
) -> Result<()> {
    let transactions = load_transactions(file)?;
    match history {
        Some(path) => train_from(engine, Some(path))?,
        None => {
            engine.train_with_historical_data(&transactions);
        }
    }

    let results = engine.find_similar_transactions(query, &transactions);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No transactions similar to \"{}\"", query);
        return Ok(());
    }

    println!();
    println!("🔎 Transactions similar to \"{}\"", query);
    println!("   ─────────────────────────────────────────────────────────────");
    for t in results {
        println!(
            "   {} │ {:30} │ {:>10.2} │ {}",
            t.date,
            truncate(&t.description, 30),
            t.amount,
            if t.category.is_empty() { "-" } else { t.category.as_str() }
        );
    }

    Ok(())
}

pub fn cmd_learn(engine: &TransactionClassifier, file: &Path) -> Result<()> {
    let transactions = load_transactions(file)?;
    let summary = engine.train_with_historical_data(&transactions);

    println!();
    println!(
        "📚 Trained on {} transactions ({} learned, {} skipped)",
        summary.transactions_seen, summary.transactions_learned, summary.transactions_skipped
    );

    let learned = engine.learned_patterns();
    if learned.is_empty() {
        println!("   Nothing learned. Records need both a description and a category.");
        return Ok(());
    }

    println!("   ─────────────────────────────────────────────────────────────");
    for (description, pattern, frequency) in learned {
        println!(
            "   {:30} │ {:20} │ {:>4.0}% │ seen {}x",
            truncate(&description, 30),
            truncate(&pattern.category, 20),
            pattern.confidence * 100.0,
            frequency
        );
    }

    Ok(())
}

pub fn cmd_rules(engine: &TransactionClassifier) -> Result<()> {
    let library = engine.pattern_library();

    if library.is_empty() {
        println!("No keyword rules configured.");
        return Ok(());
    }

    println!();
    println!("📋 Keyword rules (first match wins)");
    println!("   ─────────────────────────────────────────────────────────────");
    for (index, rule) in library.rules().iter().enumerate() {
        println!(
            "   {:>2}. {:16} {:8} │ {}",
            index + 1,
            rule.category(),
            rule.transaction_type().as_str(),
            rule.keywords().join(", ")
        );
    }

    Ok(())
}
