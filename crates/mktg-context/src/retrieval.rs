//! Similarity search over the ICP/niche knowledge base.

use async_trait::async_trait;

use crate::embeddings::OllamaEmbedder;
use crate::error::ContextError;
use crate::vector_store::{QdrantClient, ScoredChunk};

const RETRIEVAL_TIMEOUT_SECS: u64 = 30;

/// Nearest-neighbour lookup of reference text.
///
/// Scores are similarities: higher means closer.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// The `k` chunks most similar to `query`, best first.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError`] when the embedding or search backend fails.
    async fn similarity_search_with_score(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<ScoredChunk>, ContextError>;

    /// Retrieve `k` chunks and join their text with `separator`.
    ///
    /// # Errors
    ///
    /// Same as [`Retriever::similarity_search_with_score`].
    async fn context(&self, query: &str, k: usize, separator: &str) -> Result<String, ContextError> {
        let chunks = self.similarity_search_with_score(query, k).await?;
        Ok(context_block(&chunks, separator))
    }
}

/// Join chunk texts in rank order.
#[must_use]
pub fn context_block(chunks: &[ScoredChunk], separator: &str) -> String {
    chunks
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Ollama embeddings + Qdrant search.
#[derive(Debug, Clone)]
pub struct QdrantRetriever {
    embedder: OllamaEmbedder,
    qdrant: QdrantClient,
}

impl QdrantRetriever {
    #[must_use]
    pub fn new(embedder: OllamaEmbedder, qdrant: QdrantClient) -> Self {
        Self { embedder, qdrant }
    }

    /// Build both clients from their endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::Http`] if either HTTP client cannot be built.
    pub fn from_endpoints(
        embedding_url: &str,
        embedding_model: &str,
        qdrant_url: &str,
        collection: &str,
    ) -> Result<Self, ContextError> {
        Ok(Self::new(
            OllamaEmbedder::new(embedding_url, embedding_model, RETRIEVAL_TIMEOUT_SECS)?,
            QdrantClient::new(qdrant_url, collection, RETRIEVAL_TIMEOUT_SECS)?,
        ))
    }
}

#[async_trait]
impl Retriever for QdrantRetriever {
    async fn similarity_search_with_score(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<ScoredChunk>, ContextError> {
        let vector = self.embedder.embed(query).await?;
        let chunks = self.qdrant.search(&vector, k).await?;
        tracing::debug!(k, hits = chunks.len(), "similarity search complete");
        Ok(chunks)
    }
}
