//! Engagement records appended to `analytics/performance_data.json`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::content::Platform;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementMetrics {
    #[serde(default)]
    pub impressions: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub shares: u64,
    pub engagement_rate: f64,
}

impl EngagementMetrics {
    /// Build metrics from raw counts, deriving the engagement rate.
    #[must_use]
    pub fn from_counts(impressions: u64, likes: u64, comments: u64, shares: u64) -> Self {
        Self {
            impressions,
            likes,
            comments,
            shares,
            engagement_rate: engagement_rate(impressions, likes, comments, shares),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    #[serde(default)]
    pub topic_id: Option<i64>,
    pub platform: Platform,
    pub title: String,
    pub metrics: EngagementMetrics,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hashtags: Vec<String>,
    #[serde(with = "crate::timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// `(likes + comments + shares) / impressions`, rounded to 3 decimals.
///
/// Zero impressions yield `0.0`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn engagement_rate(impressions: u64, likes: u64, comments: u64, shares: u64) -> f64 {
    if impressions == 0 {
        return 0.0;
    }
    let interactions = likes + comments + shares;
    round3(interactions as f64 / impressions as f64)
}

/// Round half away from zero to 3 decimal places.
#[must_use]
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
