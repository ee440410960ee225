//! Trend discovery: niche → queries → search → relevance filter → filtered news.

use mktg_context::{collect_news, relevance_filter, Retriever, SerpApiClient};
use mktg_core::{NewsItem, NewsSource};
use mktg_store::{DocumentStore, StoreKey};

use crate::error::GenerationError;
use crate::llm::TextGenerator;
use crate::queries::build_search_queries;
use crate::topics::require_niche;

/// Results requested per query and engine.
pub const TREND_RESULTS_PER_QUERY: usize = 5;

#[derive(Debug, Clone)]
pub struct TrendRequest {
    pub sources: Vec<NewsSource>,
    pub top_k: usize,
    pub threshold: f32,
}

#[derive(Debug, Clone)]
pub struct TrendRun {
    pub queries: Vec<String>,
    pub candidates: usize,
    pub kept: Vec<NewsItem>,
}

/// Fetch, filter and overwrite the filtered-news file.
///
/// Without a news client no search runs and the file is overwritten with an
/// empty list.
///
/// # Errors
///
/// Returns [`GenerationError::MissingNiche`], store errors, or transport
/// errors from the query-building model call.
pub async fn run_trends<G, R, S>(
    generator: &G,
    retriever: &R,
    store: &S,
    news_client: Option<&SerpApiClient>,
    request: &TrendRequest,
) -> Result<TrendRun, GenerationError>
where
    G: TextGenerator + ?Sized,
    R: Retriever + ?Sized,
    S: DocumentStore,
{
    let niche = require_niche(store)?;
    let queries = build_search_queries(generator, &niche).await?;

    let candidates = match news_client {
        Some(client) => {
            collect_news(client, &queries, &request.sources, TREND_RESULTS_PER_QUERY).await
        }
        None => {
            tracing::warn!("SERPAPI_KEY not set, skipping news search");
            Vec::new()
        }
    };
    let candidate_count = candidates.len();

    let kept = relevance_filter(
        candidates,
        &niche,
        request.top_k,
        request.threshold,
        retriever,
    )
    .await;

    store.save(&StoreKey::FilteredNews, &kept)?;
    tracing::info!(
        candidates = candidate_count,
        kept = kept.len(),
        "filtered news saved"
    );

    Ok(TrendRun {
        queries,
        candidates: candidate_count,
        kept,
    })
}
