//! Document keys and their on-disk layout.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use mktg_core::Platform;

pub(crate) const BLOG_DIR: &str = "content/blogs";
pub(crate) const BLOG_PREFIX: &str = "blog_";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StoreKey {
    /// `niche/niche_icp.json`, read-only input.
    Niche,
    /// `topics/topics.json`
    Topics,
    /// `topics/used_blog_topics.json`, append-only history.
    UsedTopics,
    /// `news/filtered_news.json`
    FilteredNews,
    /// `content/generated_content/{platform}.json`
    PlatformContent(Platform),
    /// `content/blogs/{name}.json`, write-once.
    Blog(String),
    /// `analytics/performance_data.json`, append-only.
    Performance,
    /// `analytics/adaptive_insights.json`
    AdaptiveInsights,
    /// `analytics/llm_insights.json`
    NarratedInsights,
}

impl StoreKey {
    /// Key for a new blog named after its creation time.
    #[must_use]
    pub fn blog_at(at: DateTime<Utc>) -> Self {
        StoreKey::Blog(format!("{BLOG_PREFIX}{}", at.format("%Y%m%d_%H%M%S")))
    }

    /// Path relative to the data directory.
    #[must_use]
    pub fn relative_path(&self) -> PathBuf {
        match self {
            StoreKey::Niche => PathBuf::from("niche/niche_icp.json"),
            StoreKey::Topics => PathBuf::from("topics/topics.json"),
            StoreKey::UsedTopics => PathBuf::from("topics/used_blog_topics.json"),
            StoreKey::FilteredNews => PathBuf::from("news/filtered_news.json"),
            StoreKey::PlatformContent(platform) => {
                PathBuf::from(format!("content/generated_content/{platform}.json"))
            }
            StoreKey::Blog(name) => PathBuf::from(format!("{BLOG_DIR}/{name}.json")),
            StoreKey::Performance => PathBuf::from("analytics/performance_data.json"),
            StoreKey::AdaptiveInsights => PathBuf::from("analytics/adaptive_insights.json"),
            StoreKey::NarratedInsights => PathBuf::from("analytics/llm_insights.json"),
        }
    }

    #[must_use]
    pub fn is_write_once(&self) -> bool {
        matches!(self, StoreKey::Blog(_))
    }
}

impl std::fmt::Display for StoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.relative_path().display())
    }
}
