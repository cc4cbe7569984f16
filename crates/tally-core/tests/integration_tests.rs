//! Integration tests for tally-core
//!
//! These tests exercise the full load → train → suggest → search → analyze workflow.

use tally_core::{
    import::parse_csv, EngineConfig, MockBackend, PredictionSource, TransactionClassifier,
    TransactionRecord, TransactionType,
};

/// Six months of history with:
/// - Monthly rent and salary on the 1st (periodic)
/// - A streaming subscription every ~30 days (periodic)
/// - Irregular coffee purchases (not periodic)
/// - A local grocer confirmed six times, mostly weekly (not periodic)
fn history_csv() -> &'static str {
    r#"id,date,description,category,amount,type
1,2024-01-01,Landlord Transfer,Housing,-900,expense
2,2024-02-01,Landlord Transfer,Housing,-900,expense
3,2024-03-01,Landlord Transfer,Housing,-900,expense
4,2024-01-01,ACME Payroll,Salary,3000,income
5,2024-02-01,ACME Payroll,Salary,3000,income
6,2024-03-01,ACME Payroll,Salary,3000,income
7,2024-01-10,Streamflix Monthly,Entertainment,-12.99,expense
8,2024-02-09,Streamflix Monthly,Entertainment,-12.99,expense
9,2024-03-10,Streamflix Monthly,Entertainment,-12.99,expense
10,2024-01-03,Corner Coffee,Dining,-4.50,expense
11,2024-01-04,Corner Coffee,Dining,-3.75,expense
12,2024-02-20,Corner Coffee,Dining,-4.25,expense
13,2024-02-22,Corner Coffee,Dining,-5.00,expense
14,2024-01-15,Ali Usta Bakkal,Groceries,-35.00,expense
15,2024-01-22,Ali Usta Bakkal,Groceries,-41.00,expense
16,2024-01-29,Ali Usta Bakkal,Groceries,-28.00,expense
17,2024-02-05,Ali Usta Bakkal,Groceries,-33.00,expense
18,2024-02-12,Ali Usta Bakkal,Groceries,-30.00,expense
19,2024-02-25,Ali Usta Bakkal,Groceries,-38.00,expense
20,2024-02-25,Taksi,,-20.00,expense"#
}

fn history() -> Vec<TransactionRecord> {
    parse_csv(history_csv().as_bytes()).expect("Failed to parse CSV")
}

#[test]
fn test_full_learning_workflow() {
    let transactions = history();
    assert_eq!(transactions.len(), 20);

    let engine = TransactionClassifier::new();

    // Before training, the shop falls through every rule
    let before = engine.suggest_category("Ali Usta Bakkal", -30.0);
    assert_eq!(before.category, "Other");
    assert_eq!(before.source, PredictionSource::Fallback);

    let summary = engine.train_with_historical_data(&transactions);
    assert_eq!(summary.transactions_seen, 20);
    assert_eq!(summary.transactions_skipped, 1); // uncategorized taxi ride
    assert_eq!(summary.transactions_learned, 19);

    // Six confirmations push the shop to full confidence
    let after = engine.suggest_category("ali usta bakkal", -30.0);
    assert_eq!(after.category, "Groceries");
    assert_eq!(after.confidence, 1.0);
    assert_eq!(after.source, PredictionSource::Learned);
    assert_eq!(after.transaction_type, TransactionType::Expense);

    // Three confirmations are not enough to trust the learned category
    let rent = engine.suggest_category("Landlord Transfer", -900.0);
    assert_eq!(rent.source, PredictionSource::Fallback);

    // Confirming twice more crosses the threshold
    engine.learn(&transactions[0]);
    engine.learn(&transactions[0]);
    let rent = engine.suggest_category("Landlord Transfer", -900.0);
    assert_eq!(rent.category, "Housing");
    assert_eq!(rent.source, PredictionSource::Learned);
}

#[test]
fn test_keyword_rules_without_history() {
    let engine = TransactionClassifier::new();

    let taxi = engine.suggest_category("TAKSI durak", -20.0);
    assert_eq!(taxi.category, "Transportation");
    assert_eq!(taxi.confidence, 0.9);

    let big = engine.suggest_category("New laptop", 6000.0);
    assert_eq!(big.category, "Large Expenses");
    assert_eq!(big.source, PredictionSource::LargeAmount);
}

#[test]
fn test_similar_search_uses_training_frequency() {
    let transactions = history();
    let engine = TransactionClassifier::new();
    engine.train_with_historical_data(&transactions);

    let results = engine.find_similar_transactions("coffee", &transactions);
    assert_eq!(results.len(), 4);
    assert!(results.iter().all(|t| t.description == "Corner Coffee"));

    // "corner" makes the coffee shop the closer token match, but the grocer's
    // six confirmations outweigh the coffee shop's four
    let results = engine.find_similar_transactions("corner bakkal", &transactions);
    let ids: Vec<&str> = results.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["14", "15", "16", "17", "18"]);

    // Without training the token match decides
    let untrained = TransactionClassifier::new();
    let results = untrained.find_similar_transactions("corner bakkal", &transactions);
    assert_eq!(results.len(), 5);
    assert_eq!(results[0].description, "Corner Coffee");
}

#[test]
fn test_spending_patterns() {
    let transactions = history();
    let engine = TransactionClassifier::new();
    let summary = engine.analyze_spending_patterns(&transactions);

    assert_eq!(summary.frequent_categories.len(), 5);
    assert_eq!(summary.frequent_categories[0].category, "Groceries");
    assert_eq!(summary.frequent_categories[0].count, 6);
    assert_eq!(summary.frequent_categories[1].category, "Dining");

    assert_eq!(summary.average_amounts[0].category, "Salary");
    assert_eq!(summary.average_amounts[0].amount, 3000.0);

    // Rent, salary and streaming qualify; coffee and the grocer do not
    let periodic: Vec<&str> = summary
        .periodic_transactions
        .iter()
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(periodic, vec!["1", "2", "3", "4", "5"]);

    // Analysis never depends on learned state
    engine.train_with_historical_data(&transactions);
    assert_eq!(engine.analyze_spending_patterns(&transactions), summary);
}

#[test]
fn test_spending_patterns_empty() {
    let engine = TransactionClassifier::new();
    let summary = engine.analyze_spending_patterns(&[]);
    assert!(summary.frequent_categories.is_empty());
    assert!(summary.average_amounts.is_empty());
    assert!(summary.periodic_transactions.is_empty());
}

#[test]
fn test_custom_config_end_to_end() {
    let config = EngineConfig::from_toml_str(
        r#"
        [classifier]
        learned_confidence_threshold = 0.5

        [[rules]]
        category = "Coffee"
        type = "expense"
        keywords = ["coffee"]
        "#,
    )
    .unwrap();
    let engine = TransactionClassifier::with_config(config);

    assert_eq!(engine.suggest_category("Corner Coffee", -4.0).category, "Coffee");

    let transactions = history();
    engine.train_with_historical_data(&transactions);
    // Four confirmations reach 0.8, above the lowered threshold
    let result = engine.suggest_category("Corner Coffee", -4.0);
    assert_eq!(result.category, "Dining");
    assert_eq!(result.source, PredictionSource::Learned);
}

#[tokio::test]
async fn test_narrative_with_mock_backend() {
    let transactions = history();
    let engine = TransactionClassifier::new();

    let text = engine
        .narrate(&MockBackend::new(), &transactions)
        .await
        .unwrap();
    assert!(text.contains("Income 9000.00"));
    assert!(text.contains("6 categories tracked."));
}
