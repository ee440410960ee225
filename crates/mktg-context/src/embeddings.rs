//! Ollama embeddings client.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ContextError;

/// Ollama `/api/embeddings` HTTP client.
#[derive(Debug, Clone)]
pub struct OllamaEmbedder {
    client: reqwest::Client,
    url: String,
    model: String,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    #[serde(default)]
    embedding: Vec<f32>,
}

impl OllamaEmbedder {
    /// Create a new `OllamaEmbedder` against an Ollama base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(base_url: &str, model: &str, timeout_secs: u64) -> Result<Self, ContextError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            url: format!("{}/api/embeddings", base_url.trim_end_matches('/')),
            model: model.to_string(),
        })
    }

    /// Embed a single text.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::Embed`] if the request fails, returns a
    /// non-success status, or yields an empty vector.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, ContextError> {
        let request = EmbedRequest {
            model: &self.model,
            prompt: text,
        };
        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ContextError::Embed(format!("embedding request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ContextError::Embed(format!(
                "embedding endpoint returned status {}",
                response.status()
            )));
        }

        let body: EmbedResponse = response
            .json()
            .await
            .map_err(|e| ContextError::Embed(format!("embedding response parse error: {e}")))?;

        if body.embedding.is_empty() {
            return Err(ContextError::Embed(format!(
                "model '{}' returned an empty embedding",
                self.model
            )));
        }

        Ok(body.embedding)
    }
}
