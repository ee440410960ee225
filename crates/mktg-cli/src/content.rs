//! `blog` and `posts` command handlers.

use clap::ValueEnum;
use mktg_core::BlogTemplate;
use mktg_generation::{run_blog, run_posts, BlogMode, BlogRequest, PostRequest};

use crate::runtime::Runtime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BlogModeArg {
    /// Write about the topic passed with `--topic`
    Manual,
    /// Ideate a fresh topic not used before
    Automatic,
}

pub(crate) async fn run_blog_command(
    runtime: &Runtime,
    mode: BlogModeArg,
    topic: Option<String>,
    template: Option<BlogTemplate>,
) -> anyhow::Result<()> {
    let mode = match (mode, topic) {
        (BlogModeArg::Manual, Some(topic)) if !topic.trim().is_empty() => {
            BlogMode::Manual(topic.trim().to_string())
        }
        (BlogModeArg::Manual, _) => anyhow::bail!("--mode manual requires a non-empty --topic"),
        (BlogModeArg::Automatic, _) => BlogMode::Automatic,
    };

    let generator = runtime.generator()?;
    let retriever = runtime.retriever()?;
    let news_client = runtime.news_client()?;
    let request = BlogRequest {
        mode,
        template: template.unwrap_or(runtime.config.blog_template),
        retry: runtime.retry_policy(),
    };

    let run = run_blog(
        &generator,
        &retriever,
        &runtime.store,
        news_client.as_ref(),
        &request,
    )
    .await?;

    println!("Topic: {}", run.topic);
    println!("Title: {}", run.content.title);
    println!("News items used: {}", run.news_count);
    if run.content.low_confidence {
        println!("Warning: model reply was not JSON or had no blog body; check the saved file");
    }
    println!(
        "Saved to {}",
        runtime.store.path_of(&run.key).display()
    );
    Ok(())
}

pub(crate) async fn run_posts_command(runtime: &Runtime, request: &PostRequest) -> anyhow::Result<()> {
    let generator = runtime.generator()?;
    let retriever = runtime.retriever()?;

    let posts = run_posts(&generator, &retriever, &runtime.store, request).await?;

    println!("LinkedIn: {}", posts.linkedin.title);
    println!("Twitter:  {}", posts.twitter.caption);
    println!("YouTube:  {}", posts.youtube.title);
    for platform in posts.low_confidence_platforms() {
        println!("Warning: {platform} reply was not JSON or missing the post text");
    }
    Ok(())
}
