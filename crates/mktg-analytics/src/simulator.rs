//! Simulated engagement for the most recent content on each platform.
//!
//! No publishing API is wired up, so metrics are drawn uniformly from fixed
//! ranges. The caller supplies the RNG; tests seed it.

use std::ops::RangeInclusive;

use chrono::Utc;
use mktg_core::{EngagementMetrics, PerformanceRecord, Platform};
use mktg_store::{DocumentStore, StoreKey};
use rand::Rng;
use serde::Deserialize;

use crate::error::AnalyticsError;

pub const IMPRESSIONS: RangeInclusive<u64> = 2000..=20_000;
pub const LIKES: RangeInclusive<u64> = 40..=300;
pub const COMMENTS: RangeInclusive<u64> = 5..=60;
pub const SHARES: RangeInclusive<u64> = 5..=50;

const UNTITLED: &str = "Untitled";

/// The fields a performance record needs from any content document.
#[derive(Debug, Default, Deserialize)]
struct ContentSummary {
    #[serde(default)]
    id: Option<i64>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    hashtags: Vec<String>,
}

/// Draw one set of metrics.
pub fn simulate_metrics<R: Rng + ?Sized>(rng: &mut R) -> EngagementMetrics {
    EngagementMetrics::from_counts(
        rng.random_range(IMPRESSIONS),
        rng.random_range(LIKES),
        rng.random_range(COMMENTS),
        rng.random_range(SHARES),
    )
}

/// Record simulated metrics for the current LinkedIn, Twitter and YouTube
/// content and the latest blog, appending them to the performance history.
///
/// Platforms without readable content are skipped with a warning. Returns the
/// new records; nothing is written when there are none.
///
/// # Errors
///
/// Returns [`AnalyticsError::Store`] if a document cannot be read or the
/// performance history cannot be written.
pub fn collect_metrics<S, R>(store: &S, rng: &mut R) -> Result<Vec<PerformanceRecord>, AnalyticsError>
where
    S: DocumentStore,
    R: Rng + ?Sized,
{
    let mut records = Vec::new();

    for platform in Platform::ALL {
        let Some(source) = load_source(store, platform)? else {
            continue;
        };

        let topic_id = if platform == Platform::Blog { None } else { source.id };
        let title = source
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| UNTITLED.to_string());
        let metrics = simulate_metrics(rng);

        tracing::info!(
            %platform,
            %title,
            engagement_rate = metrics.engagement_rate,
            "metrics collected"
        );
        records.push(PerformanceRecord {
            topic_id,
            platform,
            title,
            metrics,
            hashtags: source.hashtags,
            timestamp: Utc::now(),
        });
    }

    if records.is_empty() {
        tracing::warn!("no metrics collected, check the generated content files");
        return Ok(records);
    }

    let total = store.append(&StoreKey::Performance, &records)?;
    tracing::info!(added = records.len(), total, "performance history updated");
    Ok(records)
}

fn load_source<S: DocumentStore>(
    store: &S,
    platform: Platform,
) -> Result<Option<ContentSummary>, AnalyticsError> {
    let key = if platform == Platform::Blog {
        match store.latest_blog()? {
            Some(key) => key,
            None => {
                tracing::warn!("no blog files found, skipping blog metrics");
                return Ok(None);
            }
        }
    } else {
        StoreKey::PlatformContent(platform)
    };

    let source = store.load::<ContentSummary>(&key)?;
    if source.is_none() {
        tracing::warn!(%platform, "no content found, skipping");
    }
    Ok(source)
}
