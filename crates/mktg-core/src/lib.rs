//! Shared data model and configuration for the marketing content pipeline.
//!
//! Every other crate in the workspace speaks in these types: the niche/ICP
//! profile that steers generation, topics and their usage history, normalized
//! news items, per-platform generated content, performance records, and the
//! insight reports derived from them.

pub mod app_config;
pub mod config;
pub mod content;
pub mod error;
pub mod insight;
pub mod news;
pub mod niche;
pub mod performance;
pub mod timestamp;
pub mod topic;

pub use app_config::{
    AppConfig, BlogTemplate, DEFAULT_RELEVANCE_THRESHOLD, DEFAULT_RELEVANCE_TOP_K,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use content::{BlogContent, LinkedInContent, Platform, TwitterContent, YouTubeContent};
pub use error::ConfigError;
pub use insight::{InsightReport, NarratedInsight, NarratedInsightReport, PlatformInsight};
pub use news::{NewsItem, NewsSource};
pub use niche::{CustomerNeed, NicheProfile, PainPoint, PainPointCause};
pub use performance::{engagement_rate, round3, EngagementMetrics, PerformanceRecord};
pub use timestamp::parse_timestamp;
pub use topic::{find_topic, next_topic_id, Topic, UsedTopic};
