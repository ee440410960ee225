//! Search-query generation for trend discovery.

use std::sync::LazyLock;

use mktg_core::NicheProfile;
use regex::Regex;
use serde_json::Value;

use crate::error::GenerationError;
use crate::extract::extract_structured;
use crate::llm::TextGenerator;
use crate::prompts::search_query_prompt;

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9\s]").expect("valid query-cleaning regex"));

/// Strip punctuation and keep queries of two to four words.
#[must_use]
pub fn clean_query(raw: &str) -> Option<String> {
    let stripped = NON_ALPHANUMERIC.replace_all(raw, "");
    let words: Vec<&str> = stripped.split_whitespace().collect();
    (2..=4).contains(&words.len()).then(|| words.join(" "))
}

/// Used when the model yields no usable query.
#[must_use]
pub fn fallback_query(niche: &NicheProfile) -> String {
    format!("{} trends", niche.industry)
}

/// Ask the model for search queries at temperature 0.
///
/// The reply should hold a JSON array of strings (bare or under `queries`);
/// when no query survives [`clean_query`] the result is `"{industry} trends"`.
///
/// # Errors
///
/// Returns [`GenerationError`] only on transport failure.
pub async fn build_search_queries<G>(
    generator: &G,
    niche: &NicheProfile,
) -> Result<Vec<String>, GenerationError>
where
    G: TextGenerator + ?Sized,
{
    let reply = generator
        .generate(&search_query_prompt(niche), Some(0.0))
        .await?;
    let extracted = extract_structured(&reply, "queries");

    let queries: Vec<String> = extracted
        .array_or_field("queries")
        .iter()
        .filter_map(Value::as_str)
        .filter_map(clean_query)
        .collect();

    if queries.is_empty() {
        let fallback = fallback_query(niche);
        tracing::warn!(query = %fallback, "no usable search queries in reply, using fallback");
        return Ok(vec![fallback]);
    }
    tracing::info!(count = queries.len(), ?queries, "search queries built");
    Ok(queries)
}
