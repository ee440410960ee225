use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("embedding error: {0}")]
    Embed(String),

    #[error("Qdrant error: {0}")]
    Qdrant(String),

    #[error("SerpAPI returned status {status} for query '{query}'")]
    SerpApiStatus { query: String, status: u16 },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("failed to deserialize {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
