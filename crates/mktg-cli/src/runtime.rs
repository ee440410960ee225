//! Wiring from [`AppConfig`] to the clients each command needs.

use mktg_context::{QdrantRetriever, SerpApiClient};
use mktg_core::{AppConfig, ConfigError};
use mktg_generation::{GeminiClient, RetryPolicy};
use mktg_store::FileStore;

pub(crate) struct Runtime {
    pub(crate) config: AppConfig,
    pub(crate) store: FileStore,
}

impl Runtime {
    pub(crate) fn new(config: AppConfig) -> Self {
        let store = FileStore::new(config.data_dir.clone());
        Self { config, store }
    }

    /// Model client. A missing API key is a missing-input failure.
    pub(crate) fn generator(&self) -> anyhow::Result<GeminiClient> {
        let key = self
            .config
            .llm_api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("GEMINI_API_KEY".to_string()))?;
        Ok(GeminiClient::with_base_url(
            key,
            &self.config.llm_model,
            self.config.llm_temperature,
            self.config.llm_timeout_secs,
            &self.config.llm_base_url,
        )?)
    }

    pub(crate) fn retriever(&self) -> anyhow::Result<QdrantRetriever> {
        Ok(QdrantRetriever::from_endpoints(
            &self.config.embedding_url,
            &self.config.embedding_model,
            &self.config.qdrant_url,
            &self.config.qdrant_collection,
        )?)
    }

    /// News client, or `None` when `SERPAPI_KEY` is unset.
    pub(crate) fn news_client(&self) -> anyhow::Result<Option<SerpApiClient>> {
        let Some(key) = self.config.serpapi_key.as_deref() else {
            return Ok(None);
        };
        Ok(Some(SerpApiClient::with_base_url(
            key,
            self.config.news_timeout_secs,
            &self.config.serpapi_url,
        )?))
    }

    pub(crate) fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.config.topic_max_attempts)
    }
}
