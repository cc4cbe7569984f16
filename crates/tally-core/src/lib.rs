//! Tally Core Library
//!
//! Transaction classification and spending-pattern engine:
//! - Keyword pattern library for first-guess categories
//! - Learning store that adapts to user-confirmed categories
//! - Classifier combining learned mappings, keywords and amount heuristics
//! - Similar-transaction search with frequency weighting
//! - Spending pattern analysis (frequent categories, averages, periodic charges)
//! - Narrative summaries through a pluggable text generation backend
//! - CSV/JSON transaction loading and TOML configuration

pub mod analysis;
pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod import;
pub mod learning;
pub mod models;
pub mod narrative;
pub mod patterns;
pub mod similarity;

pub use analysis::PatternAnalyzer;
pub use classifier::Classifier;
pub use config::{
    AnalysisConfig, ClassifierConfig, EngineConfig, LearningConfig, RuleConfig, SearchConfig,
};
pub use engine::TransactionClassifier;
pub use error::{Error, Result};
pub use learning::{LearnedPattern, LearningStore, Reinforcement};
pub use models::{
    CategoryAverage, CategoryCount, PredictionResult, PredictionSource, SpendingPatternsSummary,
    TrainingSummary, TransactionRecord, TransactionType,
};
pub use narrative::{MockBackend, NarrativeBackend, OllamaBackend, SpendingTotals};
pub use patterns::{KeywordRule, PatternLibrary};
pub use similarity::{similarity, SimilaritySearch};
