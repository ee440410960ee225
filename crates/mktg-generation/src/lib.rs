//! Content generation stages for the marketing pipeline.
//!
//! Each stage loads its inputs through a [`mktg_store::DocumentStore`],
//! renders a prompt from [`prompts`], calls a [`TextGenerator`], recovers
//! structured output with [`extract::extract_structured`] and persists the
//! result. Model-output parse failures never abort a stage; they surface as
//! `low_confidence` content instead.

pub mod ask;
pub mod blog;
pub mod dedup;
pub mod error;
pub mod extract;
pub mod llm;
pub mod posts;
pub mod prompts;
pub mod queries;
pub mod topics;
pub mod trends;

#[cfg(test)]
pub(crate) mod testing;

pub use ask::{ask, DEFAULT_ASK_K};
pub use blog::{run_blog, BlogMode, BlogRequest, BlogRun};
pub use dedup::{is_duplicate, similarity_ratio, RetryPolicy};
pub use error::GenerationError;
pub use extract::{extract_structured, Confidence, Extracted};
pub use llm::{GeminiClient, TextGenerator};
pub use posts::{run_posts, GeneratedPosts, PostRequest};
pub use queries::build_search_queries;
pub use topics::{generate_topic, generate_unique_topic, ideate_topics, require_niche};
pub use trends::{run_trends, TrendRequest, TrendRun};
