//! SerpAPI search client.

use std::time::Duration;

use mktg_core::{NewsItem, NewsSource};
use reqwest::{Client, Url};

use crate::error::ContextError;

use super::normalize::parse_results;

pub const DEFAULT_SERPAPI_URL: &str = "https://serpapi.com/search";

/// Client for the SerpAPI search endpoint.
///
/// Use [`SerpApiClient::new`] for production or
/// [`SerpApiClient::with_base_url`] to point at a mock server in tests.
pub struct SerpApiClient {
    client: Client,
    api_key: String,
    endpoint: Url,
}

impl SerpApiClient {
    /// Creates a new client pointed at the production SerpAPI endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, ContextError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_SERPAPI_URL)
    }

    /// Creates a new client with a custom endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`ContextError::InvalidBaseUrl`] if `endpoint` does
    /// not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        endpoint: &str,
    ) -> Result<Self, ContextError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        let endpoint = Url::parse(endpoint).map_err(|e| ContextError::InvalidBaseUrl {
            url: endpoint.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoint,
        })
    }

    fn build_url(&self, query: &str, source: NewsSource, num: usize) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("engine", source.engine())
            .append_pair("num", &num.to_string())
            .append_pair("api_key", &self.api_key);
        url
    }

    /// Raw SerpAPI response body for one query against one engine.
    ///
    /// # Errors
    ///
    /// - [`ContextError::Http`] on network failure or timeout.
    /// - [`ContextError::SerpApiStatus`] on any status other than 200.
    /// - [`ContextError::Deserialize`] if the body is not JSON.
    pub async fn search(
        &self,
        query: &str,
        source: NewsSource,
        num: usize,
    ) -> Result<serde_json::Value, ContextError> {
        let url = self.build_url(query, source, num);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(ContextError::SerpApiStatus {
                query: query.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ContextError::Deserialize {
            context: format!("serpapi(engine={}, q={query})", source.engine()),
            source: e,
        })
    }

    /// Search and normalize, degrading every failure to an empty result.
    pub async fn fetch_news(&self, query: &str, source: NewsSource, num: usize) -> Vec<NewsItem> {
        match self.search(query, source, num).await {
            Ok(body) => {
                let items = parse_results(&body, source, chrono::Utc::now());
                tracing::debug!(
                    query,
                    engine = source.engine(),
                    count = items.len(),
                    "parsed search results"
                );
                items
            }
            Err(e) => {
                tracing::warn!(
                    query,
                    engine = source.engine(),
                    error = %e,
                    "news search failed, continuing without results"
                );
                Vec::new()
            }
        }
    }
}
