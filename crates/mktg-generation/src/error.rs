use mktg_context::ContextError;
use mktg_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model endpoint returned status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("model returned no candidates")]
    EmptyResponse,

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("no unique topic after {attempts} attempts (last candidate: '{last_candidate}')")]
    RetryExhausted { attempts: u32, last_candidate: String },

    #[error("topic with id {0} not found in the topics file")]
    TopicNotFound(i64),

    #[error("niche profile not found (expected niche/niche_icp.json)")]
    MissingNiche,

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("context error: {0}")]
    Context(#[from] ContextError),
}
