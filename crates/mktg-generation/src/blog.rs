//! Long-form blog generation.

use chrono::Utc;
use mktg_context::{Retriever, SerpApiClient};
use mktg_core::{BlogContent, BlogTemplate, NewsItem, NewsSource, UsedTopic};
use mktg_store::{DocumentStore, StoreKey};

use crate::dedup::RetryPolicy;
use crate::error::GenerationError;
use crate::extract::extract_structured;
use crate::llm::TextGenerator;
use crate::prompts::blog_prompt;
use crate::topics::{generate_unique_topic, require_niche};

pub const BLOG_NEWS_RESULTS: usize = 10;
pub const BLOG_CONTEXT_K: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlogMode {
    /// Write about the given topic.
    Manual(String),
    /// Ideate a topic, dedup it against history and record it as used.
    Automatic,
}

#[derive(Debug, Clone)]
pub struct BlogRequest {
    pub mode: BlogMode,
    pub template: BlogTemplate,
    pub retry: RetryPolicy,
}

#[derive(Debug, Clone)]
pub struct BlogRun {
    pub key: StoreKey,
    pub topic: String,
    pub content: BlogContent,
    pub news_count: usize,
}

/// Produce and store one blog.
///
/// News and retrieval context are optional enrichment: a missing news client
/// or a failed lookup is logged and the blog is written with less context.
///
/// # Errors
///
/// Returns [`GenerationError::MissingNiche`], [`GenerationError::RetryExhausted`]
/// in automatic mode, store errors, or transport errors from the model.
pub async fn run_blog<G, R, S>(
    generator: &G,
    retriever: &R,
    store: &S,
    news_client: Option<&SerpApiClient>,
    request: &BlogRequest,
) -> Result<BlogRun, GenerationError>
where
    G: TextGenerator + ?Sized,
    R: Retriever + ?Sized,
    S: DocumentStore,
{
    let niche = require_niche(store)?;

    let topic = match &request.mode {
        BlogMode::Manual(topic) => topic.trim().to_string(),
        BlogMode::Automatic => {
            let history: Vec<UsedTopic> = store.load_or_default(&StoreKey::UsedTopics)?;
            let accepted =
                generate_unique_topic(generator, &niche, &history, request.retry).await?;
            store.append(&StoreKey::UsedTopics, &[UsedTopic::now(accepted.title.clone())])?;
            accepted.title
        }
    };

    let news: Vec<NewsItem> = match news_client {
        Some(client) => {
            client
                .fetch_news(&topic, NewsSource::GoogleNews, BLOG_NEWS_RESULTS)
                .await
        }
        None => {
            tracing::warn!("SERPAPI_KEY not set, writing blog without news");
            Vec::new()
        }
    };

    let reference = match retriever.context(&topic, BLOG_CONTEXT_K, "\n").await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(error = %e, "reference lookup failed, writing blog without it");
            String::new()
        }
    };

    let prompt = blog_prompt(request.template, &topic, &niche, &news, &reference);
    let reply = generator.generate(&prompt, None).await?;
    let extracted = extract_structured(&reply, "blog");

    let blog = extracted.str_field("blog").unwrap_or_default();
    let missing_body = blog.trim().is_empty();
    if missing_body {
        tracing::warn!(topic = %topic, "model reply had no blog body");
    }
    let content = BlogContent {
        title: extracted
            .str_field("title")
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| topic.clone()),
        outline: extracted.string_list("outline"),
        blog,
        low_confidence: extracted.is_low_confidence() || missing_body,
    };

    let key = StoreKey::blog_at(Utc::now());
    store.save(&key, &content)?;
    tracing::info!(key = %key, title = %content.title, low_confidence = content.low_confidence, "blog saved");

    Ok(BlogRun {
        key,
        topic,
        content,
        news_count: news.len(),
    })
}
