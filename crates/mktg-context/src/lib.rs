//! Context gathering for content generation.
//!
//! Pulls news and social items through SerpAPI, retrieves reference text from
//! the ICP/niche knowledge base (Ollama embeddings searched in Qdrant), and
//! gates news by keyword and semantic relevance to the niche.

pub mod embeddings;
pub mod error;
pub mod news;
pub mod relevance;
pub mod retrieval;
pub mod vector_store;

pub use embeddings::OllamaEmbedder;
pub use error::ContextError;
pub use news::{collect_news, dedup_by_url, parse_results, SerpApiClient};
pub use relevance::{keyword_hit, related_news, relevance_filter, relevance_keywords};
pub use retrieval::{context_block, QdrantRetriever, Retriever};
pub use vector_store::{QdrantClient, ScoredChunk};
