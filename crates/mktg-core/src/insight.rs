//! Insight reports derived from performance history.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::content::Platform;

/// Deterministic per-platform rollup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformInsight {
    pub avg_engagement: f64,
    pub top_titles: Vec<String>,
    pub avoid_titles: Vec<String>,
    pub top_hashtags: Vec<String>,
    pub low_hashtags: Vec<String>,
}

/// Numeric report, keyed by platform.
pub type InsightReport = BTreeMap<Platform, PlatformInsight>;

/// LLM-narrated per-platform rollup.
///
/// `avg_engagement` and `top_titles` are computed, the prose fields come from
/// the model and carry no reproducibility guarantee.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NarratedInsight {
    pub avg_engagement: f64,
    pub insights: String,
    pub recommendations: String,
    pub top_titles: Vec<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub low_confidence: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NarratedInsightReport {
    pub platforms: BTreeMap<Platform, NarratedInsight>,
    pub global_insights: String,
}
