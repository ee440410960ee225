//! Qdrant search client over the ICP/niche document collection.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ContextError;

/// Qdrant HTTP client bound to one collection.
#[derive(Debug, Clone)]
pub struct QdrantClient {
    client: reqwest::Client,
    base_url: String,
    collection: String,
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    vector: &'a [f32],
    limit: usize,
    with_payload: bool,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    result: Vec<SearchHit>,
}

#[derive(Deserialize)]
struct SearchHit {
    score: f32,
    #[serde(default)]
    payload: serde_json::Map<String, serde_json::Value>,
}

/// One nearest-neighbour hit: the stored chunk text and its score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredChunk {
    pub text: String,
    pub score: f32,
}

impl QdrantClient {
    /// Create a new `QdrantClient`.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(qdrant_url: &str, collection: &str, timeout_secs: u64) -> Result<Self, ContextError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            base_url: qdrant_url.trim_end_matches('/').to_string(),
            collection: collection.to_string(),
        })
    }

    /// Return the `limit` chunks closest to `vector`, best first.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::Qdrant`] on network failure, a non-success
    /// status, or an unparseable response.
    pub async fn search(&self, vector: &[f32], limit: usize) -> Result<Vec<ScoredChunk>, ContextError> {
        let url = format!(
            "{}/collections/{}/points/search",
            self.base_url, self.collection
        );
        let body = SearchRequest {
            vector,
            limit,
            with_payload: true,
        };

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ContextError::Qdrant(format!("search request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(ContextError::Qdrant(format!(
                "search returned status {}",
                resp.status()
            )));
        }

        let parsed: SearchResponse = resp
            .json()
            .await
            .map_err(|e| ContextError::Qdrant(format!("search response parse error: {e}")))?;

        Ok(parsed
            .result
            .into_iter()
            .map(|hit| ScoredChunk {
                text: payload_text(&hit.payload),
                score: hit.score,
            })
            .collect())
    }
}

/// Chunk text from a point payload. Collections indexed by LangChain store it
/// under `page_content`.
fn payload_text(payload: &serde_json::Map<String, serde_json::Value>) -> String {
    ["text", "page_content"]
        .iter()
        .find_map(|key| payload.get(*key).and_then(serde_json::Value::as_str))
        .unwrap_or_default()
        .to_string()
}
