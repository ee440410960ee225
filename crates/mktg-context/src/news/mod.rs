//! News and social search through SerpAPI.

mod normalize;
mod serpapi;

pub use normalize::parse_results;
pub use serpapi::{SerpApiClient, DEFAULT_SERPAPI_URL};

use std::collections::HashSet;

use mktg_core::{NewsItem, NewsSource};

/// Run every query against every source and merge the results.
///
/// Individual search failures are logged and skipped (see
/// [`SerpApiClient::fetch_news`]). Items are deduplicated by URL in
/// discovery order; items without a URL are kept.
pub async fn collect_news(
    client: &SerpApiClient,
    queries: &[String],
    sources: &[NewsSource],
    num: usize,
) -> Vec<NewsItem> {
    let mut items = Vec::new();
    for query in queries {
        for source in sources {
            let found = client.fetch_news(query, *source, num).await;
            tracing::debug!(
                query = %query,
                engine = source.engine(),
                count = found.len(),
                "collected news items"
            );
            items.extend(found);
        }
    }

    dedup_by_url(&mut items);
    items
}

/// Drop later items whose URL was already seen.
pub fn dedup_by_url(items: &mut Vec<NewsItem>) {
    let mut seen_urls: HashSet<String> = HashSet::new();
    items.retain(|item| item.url.is_empty() || seen_urls.insert(item.url.clone()));
}
