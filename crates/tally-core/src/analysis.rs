//! Spending pattern analysis
//!
//! Pure functions of the supplied transaction list; nothing is cached between
//! calls and the learning store is not consulted.
//!
//! Computes:
//! - Frequent categories: transaction count per category
//! - Average amounts: mean amount per category
//! - Periodic transactions: descriptions that recur at a regular interval

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::models::{CategoryAverage, CategoryCount, SpendingPatternsSummary, TransactionRecord};

/// Running totals for one category
struct CategoryStats<'a> {
    category: &'a str,
    count: usize,
    total: f64,
}

/// Computes spending summaries over transaction lists
#[derive(Debug, Clone, Default)]
pub struct PatternAnalyzer {
    config: AnalysisConfig,
}

impl PatternAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn analyze(&self, transactions: &[TransactionRecord]) -> SpendingPatternsSummary {
        let stats = category_stats(transactions);

        let mut frequent_categories: Vec<CategoryCount> = stats
            .iter()
            .map(|s| CategoryCount {
                category: s.category.to_string(),
                count: s.count,
            })
            .collect();
        // Stable sort keeps first-seen order among equal counts
        frequent_categories.sort_by(|a, b| b.count.cmp(&a.count));
        frequent_categories.truncate(self.config.top_categories);

        let mut average_amounts: Vec<CategoryAverage> = stats
            .iter()
            .map(|s| CategoryAverage {
                category: s.category.to_string(),
                amount: s.total / s.count as f64,
            })
            .collect();
        average_amounts.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        average_amounts.truncate(self.config.top_categories);

        SpendingPatternsSummary {
            frequent_categories,
            average_amounts,
            periodic_transactions: self.periodic_transactions(transactions),
        }
    }

    /// Transactions whose exact description recurs with a low variation in gaps
    ///
    /// Returned in input order, at most `max_periodic_transactions`.
    pub fn periodic_transactions(&self, transactions: &[TransactionRecord]) -> Vec<TransactionRecord> {
        let mut dates_by_description: HashMap<&str, Vec<NaiveDate>> = HashMap::new();
        for t in transactions.iter().filter(|t| !t.description.is_empty()) {
            dates_by_description
                .entry(t.description.as_str())
                .or_default()
                .push(t.date);
        }

        let periodic: HashSet<&str> = dates_by_description
            .into_iter()
            .filter_map(|(description, mut dates)| {
                let verdict = self.is_periodic(&mut dates);
                debug!(
                    "Periodic check for '{}' ({} occurrences): {}",
                    description,
                    dates.len(),
                    verdict
                );
                verdict.then_some(description)
            })
            .collect();

        transactions
            .iter()
            .filter(|t| periodic.contains(t.description.as_str()))
            .take(self.config.max_periodic_transactions)
            .cloned()
            .collect()
    }

    /// Check whether a set of occurrence dates is regular enough to be periodic
    ///
    /// Requires `min_periodic_occurrences` dates and a coefficient of variation
    /// of the day gaps (population standard deviation / mean) strictly below
    /// `max_variation_coefficient`.
    fn is_periodic(&self, dates: &mut [NaiveDate]) -> bool {
        if dates.len() < self.config.min_periodic_occurrences.max(2) {
            return false;
        }

        dates.sort();
        let gaps: Vec<f64> = dates
            .windows(2)
            .map(|w| (w[1] - w[0]).num_days() as f64)
            .collect();

        let mean = gaps.iter().sum::<f64>() / gaps.len() as f64;
        let variance = gaps.iter().map(|g| (g - mean).powi(2)).sum::<f64>() / gaps.len() as f64;

        variance.sqrt() < self.config.max_variation_coefficient * mean
    }
}

/// Per-category count and total, in first-seen order
fn category_stats(transactions: &[TransactionRecord]) -> Vec<CategoryStats<'_>> {
    let mut stats: Vec<CategoryStats<'_>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for t in transactions.iter().filter(|t| !t.category.is_empty()) {
        match index.get(t.category.as_str()) {
            Some(&i) => {
                stats[i].count += 1;
                stats[i].total += t.amount;
            }
            None => {
                index.insert(t.category.as_str(), stats.len());
                stats.push(CategoryStats {
                    category: t.category.as_str(),
                    count: 1,
                    total: t.amount,
                });
            }
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tx(id: &str, on: NaiveDate, description: &str, category: &str, amount: f64) -> TransactionRecord {
        TransactionRecord::new(id, on, description, category, amount, TransactionType::Expense)
    }

    #[test]
    fn test_empty_input() {
        let summary = PatternAnalyzer::default().analyze(&[]);
        assert!(summary.frequent_categories.is_empty());
        assert!(summary.average_amounts.is_empty());
        assert!(summary.periodic_transactions.is_empty());
        assert_eq!(summary, SpendingPatternsSummary::default());
    }

    #[test]
    fn test_uncategorized_only() {
        let transactions = vec![
            tx("1", date(2024, 1, 1), "a", "", 10.0),
            tx("2", date(2024, 1, 2), "b", "", 20.0),
        ];
        let summary = PatternAnalyzer::default().analyze(&transactions);
        assert!(summary.frequent_categories.is_empty());
        assert!(summary.average_amounts.is_empty());
    }

    #[test]
    fn test_top_five_of_ten_categories() {
        let mut transactions = Vec::new();
        let mut id = 0;
        for c in 0..10 {
            // Category c appears c + 1 times
            for _ in 0..=c {
                id += 1;
                transactions.push(tx(
                    &id.to_string(),
                    date(2024, 1, 1),
                    &format!("shop {}", id),
                    &format!("Cat{}", c),
                    -(c as f64 + 1.0),
                ));
            }
        }

        let summary = PatternAnalyzer::default().analyze(&transactions);
        assert_eq!(summary.frequent_categories.len(), 5);
        let counts: Vec<usize> = summary.frequent_categories.iter().map(|c| c.count).collect();
        assert_eq!(counts, vec![10, 9, 8, 7, 6]);
        assert_eq!(summary.frequent_categories[0].category, "Cat9");

        assert_eq!(summary.average_amounts.len(), 5);
        let amounts: Vec<f64> = summary.average_amounts.iter().map(|a| a.amount).collect();
        assert_eq!(amounts, vec![-1.0, -2.0, -3.0, -4.0, -5.0]);
        assert_eq!(summary.average_amounts[0].category, "Cat0");
    }

    #[test]
    fn test_count_ties_keep_first_seen_order() {
        let transactions = vec![
            tx("1", date(2024, 1, 1), "x", "Rent", -100.0),
            tx("2", date(2024, 1, 2), "y", "Bills", -50.0),
            tx("3", date(2024, 1, 3), "z", "Rent", -100.0),
            tx("4", date(2024, 1, 4), "w", "Bills", -70.0),
        ];

        let summary = PatternAnalyzer::default().analyze(&transactions);
        assert_eq!(summary.frequent_categories[0].category, "Rent");
        assert_eq!(summary.frequent_categories[1].category, "Bills");
        assert_eq!(summary.average_amounts[0].category, "Bills");
        assert_eq!(summary.average_amounts[0].amount, -60.0);
        assert_eq!(summary.average_amounts[1].amount, -100.0);
    }

    #[test]
    fn test_monthly_is_periodic() {
        let transactions = vec![
            tx("1", date(2024, 1, 1), "Netflix", "Entertainment", -15.0),
            tx("2", date(2024, 2, 1), "Netflix", "Entertainment", -15.0),
            tx("3", date(2024, 3, 1), "Netflix", "Entertainment", -15.0),
        ];

        let summary = PatternAnalyzer::default().analyze(&transactions);
        assert_eq!(summary.periodic_transactions.len(), 3);
    }

    #[test]
    fn test_irregular_gaps_are_not_periodic() {
        // Gaps of 1, 40 and 3 days
        let transactions = vec![
            tx("1", date(2024, 1, 1), "Cafe", "Dining", -5.0),
            tx("2", date(2024, 1, 2), "Cafe", "Dining", -5.0),
            tx("3", date(2024, 2, 11), "Cafe", "Dining", -5.0),
            tx("4", date(2024, 2, 14), "Cafe", "Dining", -5.0),
        ];

        let summary = PatternAnalyzer::default().analyze(&transactions);
        assert!(summary.periodic_transactions.is_empty());
    }

    #[test]
    fn test_two_occurrences_are_not_enough() {
        let transactions = vec![
            tx("1", date(2024, 1, 1), "Gym", "Fitness", -30.0),
            tx("2", date(2024, 2, 1), "Gym", "Fitness", -30.0),
        ];

        let summary = PatternAnalyzer::default().analyze(&transactions);
        assert!(summary.periodic_transactions.is_empty());
    }

    #[test]
    fn test_same_day_repeats_are_not_periodic() {
        let transactions = vec![
            tx("1", date(2024, 1, 1), "Vending", "Food", -1.0),
            tx("2", date(2024, 1, 1), "Vending", "Food", -1.0),
            tx("3", date(2024, 1, 1), "Vending", "Food", -1.0),
        ];

        let summary = PatternAnalyzer::default().analyze(&transactions);
        assert!(summary.periodic_transactions.is_empty());
    }

    #[test]
    fn test_unsorted_dates_and_input_order() {
        let transactions = vec![
            tx("1", date(2024, 3, 1), "Rent", "Rent", -900.0),
            tx("2", date(2024, 1, 5), "Coffee", "Dining", -3.0),
            tx("3", date(2024, 1, 1), "Rent", "Rent", -900.0),
            tx("4", date(2024, 2, 1), "Rent", "Rent", -900.0),
        ];

        let summary = PatternAnalyzer::default().analyze(&transactions);
        let ids: Vec<&str> = summary
            .periodic_transactions
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "3", "4"]);
    }

    #[test]
    fn test_description_match_is_exact() {
        let transactions = vec![
            tx("1", date(2024, 1, 1), "Netflix", "", -15.0),
            tx("2", date(2024, 2, 1), "NETFLIX", "", -15.0),
            tx("3", date(2024, 3, 1), "Netflix", "", -15.0),
        ];

        let summary = PatternAnalyzer::default().analyze(&transactions);
        assert!(summary.periodic_transactions.is_empty());
    }

    #[test]
    fn test_periodic_capped_at_five() {
        let transactions: Vec<_> = (1..=8)
            .map(|m| tx(&m.to_string(), date(2024, m, 1), "Rent", "Rent", -900.0))
            .collect();

        let summary = PatternAnalyzer::default().analyze(&transactions);
        assert_eq!(summary.periodic_transactions.len(), 5);
        assert_eq!(summary.periodic_transactions[0].id, "1");
    }

    #[test]
    fn test_empty_descriptions_are_never_periodic() {
        let transactions = vec![
            tx("1", date(2024, 1, 1), "", "Misc", -1.0),
            tx("2", date(2024, 2, 1), "", "Misc", -1.0),
            tx("3", date(2024, 3, 1), "", "Misc", -1.0),
        ];

        let summary = PatternAnalyzer::default().analyze(&transactions);
        assert!(summary.periodic_transactions.is_empty());
        assert_eq!(summary.frequent_categories[0].count, 3);
    }
}
