//! Per-engine normalization of SerpAPI responses into [`NewsItem`]s.

use chrono::{DateTime, SecondsFormat, Utc};
use mktg_core::{NewsItem, NewsSource};
use serde_json::Value;

/// Array field holding the results for each engine.
fn results_field(source: NewsSource) -> &'static str {
    match source {
        NewsSource::GoogleNews => "news_results",
        NewsSource::Reddit | NewsSource::Twitter | NewsSource::LinkedIn => "organic_results",
        NewsSource::YouTube => "video_results",
    }
}

fn str_field(entry: &Value, key: &str) -> Option<String> {
    entry.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Normalize a raw response body.
///
/// Google News keeps the article's own `date` (empty when absent); YouTube
/// keeps the video date falling back to `now`; the organic-result engines
/// carry no date and are stamped with `now`.
#[must_use]
pub fn parse_results(data: &Value, source: NewsSource, now: DateTime<Utc>) -> Vec<NewsItem> {
    let Some(entries) = data.get(results_field(source)).and_then(Value::as_array) else {
        return Vec::new();
    };
    let stamp = now.to_rfc3339_opts(SecondsFormat::Secs, true);

    entries
        .iter()
        .map(|entry| {
            let date = str_field(entry, "date");
            let published_at = match source {
                NewsSource::GoogleNews => date.unwrap_or_default(),
                NewsSource::YouTube => date.unwrap_or_else(|| stamp.clone()),
                NewsSource::Reddit | NewsSource::Twitter | NewsSource::LinkedIn => stamp.clone(),
            };
            NewsItem {
                title: str_field(entry, "title").unwrap_or_default(),
                url: str_field(entry, "link").unwrap_or_default(),
                description: str_field(entry, "snippet").unwrap_or_default(),
                published_at,
                source,
                relevance_context: None,
                similarity_score: None,
            }
        })
        .collect()
}
