//! Keyword + semantic relevance gating for news items.

use mktg_core::{NewsItem, NicheProfile};

use crate::retrieval::Retriever;

/// Lower-cased industry, challenge and need strings; blanks dropped.
#[must_use]
pub fn relevance_keywords(niche: &NicheProfile) -> Vec<String> {
    std::iter::once(niche.industry.as_str())
        .chain(niche.challenges())
        .chain(niche.needs())
        .map(str::to_lowercase)
        .filter(|k| !k.trim().is_empty())
        .collect()
}

/// True when any keyword is a substring of the item's match text.
#[must_use]
pub fn keyword_hit(item: &NewsItem, keywords: &[String]) -> bool {
    let text = item.match_text();
    keywords.iter().any(|kw| text.contains(kw.as_str()))
}

/// Keep items that mention the niche or sit close to the reference corpus.
///
/// An item is accepted on a keyword hit or when its best nearest-neighbour
/// score reaches `threshold`. Accepted items carry the matched snippet and
/// score. Output keeps discovery order and is capped at `top_k`. A failed
/// similarity lookup counts as no semantic hit for that item only.
pub async fn relevance_filter<R>(
    items: Vec<NewsItem>,
    niche: &NicheProfile,
    top_k: usize,
    threshold: f32,
    retriever: &R,
) -> Vec<NewsItem>
where
    R: Retriever + ?Sized,
{
    let keywords = relevance_keywords(niche);
    let total = items.len();
    let mut accepted = Vec::new();

    for mut item in items {
        if accepted.len() >= top_k {
            break;
        }

        let best = match retriever
            .similarity_search_with_score(&item.match_text(), 1)
            .await
        {
            Ok(mut hits) => (!hits.is_empty()).then(|| hits.swap_remove(0)),
            Err(e) => {
                tracing::warn!(url = %item.url, error = %e, "similarity lookup failed, keyword match only");
                None
            }
        };

        let semantic_hit = best.as_ref().is_some_and(|hit| hit.score >= threshold);
        if keyword_hit(&item, &keywords) || semantic_hit {
            if let Some(hit) = best {
                item.relevance_context = Some(hit.text);
                item.similarity_score = Some(hit.score);
            }
            accepted.push(item);
        }
    }

    tracing::info!(
        candidates = total,
        accepted = accepted.len(),
        top_k,
        threshold,
        "relevance filter applied"
    );
    accepted
}

/// News preselection for a topic: items whose title or description contains
/// any word of `title`, case-insensitively.
#[must_use]
pub fn related_news(news: &[NewsItem], title: &str) -> Vec<NewsItem> {
    let words: Vec<String> = title.split_whitespace().map(str::to_lowercase).collect();
    news.iter()
        .filter(|item| {
            let text = item.match_text();
            words.iter().any(|w| text.contains(w.as_str()))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
#[path = "relevance_test.rs"]
mod tests;
