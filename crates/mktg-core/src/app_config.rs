use std::path::PathBuf;

/// Named prompt variants for long-form blog writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlogTemplate {
    /// Practical, skimmable explainer.
    Standard,
    /// Analytical long-form piece in the consulting/VC register.
    ThoughtLeadership,
}

impl std::fmt::Display for BlogTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlogTemplate::Standard => write!(f, "standard"),
            BlogTemplate::ThoughtLeadership => write!(f, "thought_leadership"),
        }
    }
}

impl std::str::FromStr for BlogTemplate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(BlogTemplate::Standard),
            "thought_leadership" => Ok(BlogTemplate::ThoughtLeadership),
            other => Err(format!(
                "unknown blog template '{other}'; expected 'standard' or 'thought_leadership'"
            )),
        }
    }
}

/// Minimum similarity a news item needs against the reference corpus.
pub const DEFAULT_RELEVANCE_THRESHOLD: f32 = 0.65;
/// Maximum number of news items kept after relevance filtering.
pub const DEFAULT_RELEVANCE_TOP_K: usize = 10;

#[derive(Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub log_level: String,
    pub serpapi_key: Option<String>,
    pub serpapi_url: String,
    pub news_timeout_secs: u64,
    pub llm_api_key: Option<String>,
    pub llm_base_url: String,
    pub llm_model: String,
    pub llm_temperature: f32,
    pub llm_timeout_secs: u64,
    pub embedding_url: String,
    pub embedding_model: String,
    pub qdrant_url: String,
    pub qdrant_collection: String,
    pub relevance_threshold: f32,
    pub relevance_top_k: usize,
    pub topic_max_attempts: u32,
    pub blog_template: BlogTemplate,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("data_dir", &self.data_dir)
            .field("log_level", &self.log_level)
            .field("serpapi_key", &self.serpapi_key.as_ref().map(|_| "[redacted]"))
            .field("serpapi_url", &self.serpapi_url)
            .field("news_timeout_secs", &self.news_timeout_secs)
            .field("llm_api_key", &self.llm_api_key.as_ref().map(|_| "[redacted]"))
            .field("llm_base_url", &self.llm_base_url)
            .field("llm_model", &self.llm_model)
            .field("llm_temperature", &self.llm_temperature)
            .field("llm_timeout_secs", &self.llm_timeout_secs)
            .field("embedding_url", &self.embedding_url)
            .field("embedding_model", &self.embedding_model)
            .field("qdrant_url", &self.qdrant_url)
            .field("qdrant_collection", &self.qdrant_collection)
            .field("relevance_threshold", &self.relevance_threshold)
            .field("relevance_top_k", &self.relevance_top_k)
            .field("topic_max_attempts", &self.topic_max_attempts)
            .field("blog_template", &self.blog_template)
            .finish()
    }
}
