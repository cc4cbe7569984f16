//! Keyword pattern library
//!
//! An ordered table of keyword rules. A description matches a rule when any of
//! the rule's keywords occurs as a substring of the lowercased description.
//! Rules are tried in declaration order and the first match wins.

use serde::Serialize;

use crate::config::{default_rules, RuleConfig};
use crate::models::TransactionType;

/// A keyword → (category, type) rule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordRule {
    keywords: Vec<String>,
    category: String,
    transaction_type: TransactionType,
}

impl KeywordRule {
    /// Build a rule; keywords are lowercased, trimmed and deduplicated
    pub fn new<I, S>(category: impl Into<String>, transaction_type: TransactionType, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if !keyword.is_empty() && !normalized.contains(&keyword) {
                normalized.push(keyword);
            }
        }

        Self {
            keywords: normalized,
            category: category.into(),
            transaction_type,
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    /// Check an already-lowercased description against this rule
    pub fn matches(&self, normalized_description: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| normalized_description.contains(keyword.as_str()))
    }
}

impl From<&RuleConfig> for KeywordRule {
    fn from(rule: &RuleConfig) -> Self {
        KeywordRule::new(rule.category.clone(), rule.transaction_type, &rule.keywords)
    }
}

/// Immutable, ordered set of keyword rules
#[derive(Debug, Clone, PartialEq)]
pub struct PatternLibrary {
    rules: Vec<KeywordRule>,
}

impl PatternLibrary {
    pub fn new(rules: Vec<KeywordRule>) -> Self {
        Self { rules }
    }

    /// Build from configured rules, keeping their order
    pub fn from_config(rules: &[RuleConfig]) -> Self {
        Self::new(rules.iter().map(KeywordRule::from).collect())
    }

    /// The built-in rule table
    pub fn builtin() -> Self {
        Self::from_config(&default_rules())
    }

    /// First rule (in declaration order) matching the description
    pub fn match_description(&self, description: &str) -> Option<&KeywordRule> {
        let normalized = description.to_lowercase();
        self.rules.iter().find(|rule| rule.matches(&normalized))
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}
