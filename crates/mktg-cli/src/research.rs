//! `trends` and `ask` command handlers.

use mktg_core::NewsSource;
use mktg_generation::{ask, run_trends, TrendRequest};

use crate::runtime::Runtime;

/// Parse a SerpAPI engine name such as `google_news` or `reddit`.
pub(crate) fn parse_engine(value: &str) -> Result<NewsSource, String> {
    NewsSource::from_engine(value).ok_or_else(|| {
        let known: Vec<&str> = NewsSource::ALL.iter().map(|s| s.engine()).collect();
        format!("unknown engine '{value}'; expected one of {}", known.join(", "))
    })
}

pub(crate) async fn run_trends_command(
    runtime: &Runtime,
    engines: Vec<NewsSource>,
    top_k: Option<usize>,
) -> anyhow::Result<()> {
    let generator = runtime.generator()?;
    let retriever = runtime.retriever()?;
    let news_client = runtime.news_client()?;

    let request = TrendRequest {
        sources: if engines.is_empty() {
            vec![NewsSource::GoogleNews]
        } else {
            engines
        },
        top_k: top_k.unwrap_or(runtime.config.relevance_top_k),
        threshold: runtime.config.relevance_threshold,
    };

    let run = run_trends(
        &generator,
        &retriever,
        &runtime.store,
        news_client.as_ref(),
        &request,
    )
    .await?;

    println!("Queries: {}", run.queries.join(" | "));
    println!("Kept {} of {} news item(s):", run.kept.len(), run.candidates);
    for item in &run.kept {
        match item.similarity_score {
            Some(score) => println!("  [{}] {} ({score:.2})", item.source, item.title),
            None => println!("  [{}] {}", item.source, item.title),
        }
    }
    Ok(())
}

pub(crate) async fn run_ask_command(runtime: &Runtime, question: &str, k: usize) -> anyhow::Result<()> {
    let generator = runtime.generator()?;
    let retriever = runtime.retriever()?;

    let answer = ask(&generator, &retriever, question, k).await?;
    println!("{answer}");
    Ok(())
}
