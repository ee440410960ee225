//! LinkedIn, X and YouTube posts for a stored topic.

use mktg_context::{related_news, Retriever};
use mktg_core::{
    find_topic, LinkedInContent, NewsItem, Platform, Topic, TwitterContent, YouTubeContent,
};
use mktg_store::{DocumentStore, StoreKey};

use crate::error::GenerationError;
use crate::extract::extract_structured;
use crate::llm::TextGenerator;
use crate::prompts::{linkedin_prompt, twitter_prompt, youtube_prompt, PostContext};
use crate::topics::require_niche;

pub const POST_CONTEXT_K: usize = 10;

#[derive(Debug, Clone)]
pub struct PostRequest {
    pub topic_id: i64,
    pub audience: String,
    pub tone: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPosts {
    pub linkedin: LinkedInContent,
    pub twitter: TwitterContent,
    pub youtube: YouTubeContent,
}

impl GeneratedPosts {
    #[must_use]
    pub fn low_confidence_platforms(&self) -> Vec<Platform> {
        [
            (Platform::LinkedIn, self.linkedin.low_confidence),
            (Platform::Twitter, self.twitter.low_confidence),
            (Platform::YouTube, self.youtube.low_confidence),
        ]
        .into_iter()
        .filter_map(|(p, low)| low.then_some(p))
        .collect()
    }
}

/// Generate all three posts for `request.topic_id` and overwrite the
/// platform files.
///
/// # Errors
///
/// Returns [`GenerationError::TopicNotFound`] for an unknown id,
/// [`GenerationError::MissingNiche`], store errors, or transport errors.
pub async fn run_posts<G, R, S>(
    generator: &G,
    retriever: &R,
    store: &S,
    request: &PostRequest,
) -> Result<GeneratedPosts, GenerationError>
where
    G: TextGenerator + ?Sized,
    R: Retriever + ?Sized,
    S: DocumentStore,
{
    let niche = require_niche(store)?;
    let topics: Vec<Topic> = store.load_or_default(&StoreKey::Topics)?;
    let topic = find_topic(&topics, request.topic_id)
        .cloned()
        .ok_or(GenerationError::TopicNotFound(request.topic_id))?;

    let news: Vec<NewsItem> = store.load_or_default(&StoreKey::FilteredNews)?;
    let related = related_news(&news, &topic.title);
    tracing::debug!(topic_id = topic.id, news = news.len(), related = related.len(), "preselected news");

    let reference = match retriever.context(&topic.title, POST_CONTEXT_K, "\n").await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(error = %e, "reference lookup failed, writing posts without it");
            String::new()
        }
    };

    let ctx = PostContext {
        title: &topic.title,
        niche: &niche,
        audience: &request.audience,
        tone: &request.tone,
        related_news: &related,
        reference: &reference,
    };

    let reply = generator.generate(&linkedin_prompt(&ctx), None).await?;
    let li = extract_structured(&reply, "caption").scoped("linkedin");
    let caption = li.str_field("caption").unwrap_or_default();
    let linkedin = LinkedInContent {
        id: topic.id,
        title: topic.title.clone(),
        low_confidence: li.is_low_confidence() || is_blank(&caption),
        caption,
        hashtags: li.string_list("hashtags"),
    };

    let reply = generator.generate(&twitter_prompt(&ctx), None).await?;
    let tw = extract_structured(&reply, "tweet").scoped("twitter");
    let tweet = tw.str_field("tweet").unwrap_or_default();
    let twitter = TwitterContent {
        id: topic.id,
        title: topic.title.clone(),
        low_confidence: tw.is_low_confidence() || is_blank(&tweet),
        caption: tweet,
        hashtags: tw.string_list("hashtags"),
    };

    let reply = generator.generate(&youtube_prompt(&ctx), None).await?;
    let yt = extract_structured(&reply, "script_intro").scoped("youtube");
    let script_intro = yt.str_field("script_intro").unwrap_or_default();
    let description = yt.str_field("description").unwrap_or_default();
    let youtube = YouTubeContent {
        id: topic.id,
        title: topic.title.clone(),
        low_confidence: yt.is_low_confidence() || is_blank(&script_intro) || is_blank(&description),
        script_intro,
        caption: description,
        hashtags: yt.string_list("tags"),
    };

    store.save(&StoreKey::PlatformContent(Platform::LinkedIn), &linkedin)?;
    store.save(&StoreKey::PlatformContent(Platform::Twitter), &twitter)?;
    store.save(&StoreKey::PlatformContent(Platform::YouTube), &youtube)?;

    let posts = GeneratedPosts {
        linkedin,
        twitter,
        youtube,
    };
    for platform in posts.low_confidence_platforms() {
        tracing::warn!(platform = %platform, "model reply was not JSON or left the post text empty");
    }
    tracing::info!(topic_id = topic.id, "platform content saved");
    Ok(posts)
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

#[cfg(test)]
#[path = "posts_test.rs"]
mod tests;
