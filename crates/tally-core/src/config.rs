//! Engine configuration
//!
//! All thresholds and the keyword rule table can be overridden from a TOML file.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, or the override in the data dir
//!    (~/.local/share/tally/config.toml), if the file exists
//! 2. Fall back to built-in defaults
//!
//! Every field is optional in the file; missing fields keep their defaults.
//! A `[[rules]]` table, when present, replaces the built-in rule table as a whole
//! and its declaration order is the match order.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::TransactionType;

/// Top-level engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub classifier: ClassifierConfig,
    pub learning: LearningConfig,
    pub search: SearchConfig,
    pub analysis: AnalysisConfig,
    /// Keyword rules in match order
    pub rules: Vec<RuleConfig>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::default(),
            learning: LearningConfig::default(),
            search: SearchConfig::default(),
            analysis: AnalysisConfig::default(),
            rules: default_rules(),
        }
    }
}

/// Thresholds for the prediction priority chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// A learned mapping is trusted only above this confidence (strict)
    pub learned_confidence_threshold: f64,
    /// Confidence reported for keyword rule matches
    pub keyword_confidence: f64,
    /// Amounts strictly above this are reported as large expenses
    pub large_amount_threshold: f64,
    pub large_amount_confidence: f64,
    pub large_amount_category: String,
    pub fallback_confidence: f64,
    pub fallback_category: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            learned_confidence_threshold: 0.8,
            keyword_confidence: 0.9,
            large_amount_threshold: 5000.0,
            large_amount_confidence: 0.6,
            large_amount_category: "Large Expenses".to_string(),
            fallback_confidence: 0.3,
            fallback_category: "Other".to_string(),
        }
    }
}

/// Confidence schedule for learned mappings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    /// Confidence of a newly learned mapping
    pub initial_confidence: f64,
    /// Added on every repeat reinforcement
    pub confidence_step: f64,
    pub max_confidence: f64,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            initial_confidence: 0.5,
            confidence_step: 0.1,
            max_confidence: 1.0,
        }
    }
}

/// Weights for similar-transaction ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub similarity_weight: f64,
    pub frequency_weight: f64,
    /// Frequency count at which the frequency term reaches 1.0
    pub frequency_saturation: u32,
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            similarity_weight: 0.7,
            frequency_weight: 0.3,
            frequency_saturation: 10,
            max_results: 5,
        }
    }
}

/// Limits for spending pattern analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Entries kept in the frequent-category and average-amount lists
    pub top_categories: usize,
    /// A description must recur at least this often to be considered periodic
    pub min_periodic_occurrences: usize,
    /// Maximum standard deviation of gaps relative to the mean gap
    pub max_variation_coefficient: f64,
    pub max_periodic_transactions: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_categories: 5,
            min_periodic_occurrences: 3,
            max_variation_coefficient: 0.2,
            max_periodic_transactions: 5,
        }
    }
}

/// A keyword rule as written in the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    pub category: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub keywords: Vec<String>,
}

impl RuleConfig {
    fn new(category: &str, transaction_type: TransactionType, keywords: &[&str]) -> Self {
        Self {
            category: category.to_string(),
            transaction_type,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Built-in keyword rules, in match order
///
/// Keywords cover both the Turkish and English spellings seen in bank texts.
pub fn default_rules() -> Vec<RuleConfig> {
    use TransactionType::{Expense, Income};

    vec![
        RuleConfig::new("Salary", Income, &["maaş", "salary", "ücret"]),
        RuleConfig::new(
            "Groceries",
            Expense,
            &["market", "grocery", "migros", "carrefour"],
        ),
        RuleConfig::new("Rent", Expense, &["kira", "rent", "aidat"]),
        RuleConfig::new("Bills", Expense, &["elektrik", "su", "doğalgaz", "internet"]),
        RuleConfig::new("Entertainment", Expense, &["sinema", "tiyatro", "konser"]),
        RuleConfig::new(
            "Transportation",
            Expense,
            &["taksi", "metro", "otobüs", "ulaşım"],
        ),
    ]
}

impl EngineConfig {
    /// Load configuration (override first, then defaults)
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let path = match override_path {
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path(),
        };

        match path {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(&path)?;
                let config = Self::from_toml_str(&content)?;
                info!("Loaded engine config from {}", path.display());
                Ok(config)
            }
            Some(path) => {
                debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges and rule shapes
    pub fn validate(&self) -> Result<()> {
        let c = &self.classifier;
        for (name, value) in [
            ("classifier.learned_confidence_threshold", c.learned_confidence_threshold),
            ("classifier.keyword_confidence", c.keyword_confidence),
            ("classifier.large_amount_confidence", c.large_amount_confidence),
            ("classifier.fallback_confidence", c.fallback_confidence),
            ("learning.initial_confidence", self.learning.initial_confidence),
            ("learning.max_confidence", self.learning.max_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfig(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        if self.learning.initial_confidence > self.learning.max_confidence {
            return Err(Error::InvalidConfig(
                "learning.initial_confidence exceeds learning.max_confidence".into(),
            ));
        }
        if self.learning.confidence_step < 0.0 {
            return Err(Error::InvalidConfig(
                "learning.confidence_step must not be negative".into(),
            ));
        }
        if self.search.similarity_weight < 0.0 || self.search.frequency_weight < 0.0 {
            return Err(Error::InvalidConfig(
                "search weights must not be negative".into(),
            ));
        }
        if self.search.frequency_saturation == 0 {
            return Err(Error::InvalidConfig(
                "search.frequency_saturation must be positive".into(),
            ));
        }
        if c.fallback_category.trim().is_empty() || c.large_amount_category.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "fallback and large amount categories must not be empty".into(),
            ));
        }

        for (index, rule) in self.rules.iter().enumerate() {
            if rule.category.trim().is_empty() {
                return Err(Error::InvalidConfig(format!(
                    "rule #{} has an empty category",
                    index + 1
                )));
            }
            if rule.keywords.iter().all(|k| k.trim().is_empty()) {
                return Err(Error::InvalidConfig(format!(
                    "rule '{}' has no keywords",
                    rule.category
                )));
            }
        }

        Ok(())
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("tally").join("config.toml"))
}
