//! Ollama narrative backend
//!
//! Sends the summary prompt to a local Ollama server (`POST /api/generate`,
//! non-streaming) and returns the generated text untouched.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

use super::{build_prompt, NarrativeBackend, SpendingTotals};

/// Ollama-backed narrative generator
#[derive(Clone)]
pub struct OllamaBackend {
    http_client: Client,
    base_url: String,
    model: String,
}

impl OllamaBackend {
    /// Create a new Ollama backend
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Option<Self> {
        let host = std::env::var("OLLAMA_HOST").ok()?;
        let model = std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama3.2".to_string());
        Some(Self::new(&host, &model))
    }

    pub fn host(&self) -> &str {
        &self.base_url
    }
}

/// Request to Ollama API
#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
}

/// Response from Ollama API
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

#[async_trait]
impl NarrativeBackend for OllamaBackend {
    async fn summarize(&self, totals: &SpendingTotals) -> Result<String> {
        let request = OllamaRequest {
            model: self.model.clone(),
            prompt: build_prompt(totals),
            stream: false,
        };

        let response = self
            .http_client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| {
                warn!("Ollama narrative request failed: {}", e);
                Error::Http(e)
            })?;

        let ollama_response: OllamaResponse = response.json().await?;
        debug!("Ollama narrative response: {}", ollama_response.response);

        let text = ollama_response.response.trim();
        if text.is_empty() {
            return Err(Error::Narrative("Ollama returned an empty response".into()));
        }
        Ok(text.to_string())
    }

    async fn health_check(&self) -> bool {
        match self
            .http_client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    fn model(&self) -> &str {
        &self.model
    }
}
