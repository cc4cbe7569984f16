//! Error types for Tally

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Narrative error: {0}")]
    Narrative(String),
}

pub type Result<T> = std::result::Result<T, Error>;
