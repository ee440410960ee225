//! Normalized news/social item shared by every search source.

use serde::{Deserialize, Serialize};

/// Where a news item was discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NewsSource {
    #[serde(rename = "Google News")]
    GoogleNews,
    Reddit,
    Twitter,
    LinkedIn,
    YouTube,
}

impl NewsSource {
    pub const ALL: [NewsSource; 5] = [
        NewsSource::GoogleNews,
        NewsSource::Reddit,
        NewsSource::Twitter,
        NewsSource::LinkedIn,
        NewsSource::YouTube,
    ];

    /// SerpAPI engine name for this source.
    #[must_use]
    pub fn engine(self) -> &'static str {
        match self {
            NewsSource::GoogleNews => "google_news",
            NewsSource::Reddit => "reddit",
            NewsSource::Twitter => "twitter",
            NewsSource::LinkedIn => "linkedin",
            NewsSource::YouTube => "youtube",
        }
    }

    /// Inverse of [`NewsSource::engine`].
    #[must_use]
    pub fn from_engine(engine: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.engine() == engine)
    }
}

impl std::fmt::Display for NewsSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            NewsSource::GoogleNews => "Google News",
            NewsSource::Reddit => "Reddit",
            NewsSource::Twitter => "Twitter",
            NewsSource::LinkedIn => "LinkedIn",
            NewsSource::YouTube => "YouTube",
        };
        f.write_str(label)
    }
}

/// A single search result in the common schema.
///
/// `relevance_context` and `similarity_score` are only populated on items
/// that passed the relevance filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, alias = "snippet")]
    pub description: String,
    #[serde(rename = "publishedAt", default)]
    pub published_at: String,
    pub source: NewsSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance_context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity_score: Option<f32>,
}

impl NewsItem {
    /// Lower-cased `title + " " + description`, the text all matching runs on.
    #[must_use]
    pub fn match_text(&self) -> String {
        format!("{} {}", self.title, self.description).to_lowercase()
    }
}
