//! `topics` command handlers.

use clap::Subcommand;
use mktg_core::Topic;
use mktg_generation::ideate_topics;
use mktg_store::{DocumentStore, StoreKey};

use crate::runtime::Runtime;

/// Sub-commands available under `topics`.
#[derive(Debug, Subcommand)]
pub enum TopicsCommands {
    /// Print the stored topics
    List,
}

/// Generate `count` new topics and add them to the topics file.
pub(crate) async fn run_topics_generate(runtime: &Runtime, count: usize) -> anyhow::Result<()> {
    let generator = runtime.generator()?;
    let topics = ideate_topics(&generator, &runtime.store, count, runtime.retry_policy()).await?;

    println!("Generated {} topic(s):", topics.len());
    print_topics(&topics);
    Ok(())
}

pub(crate) fn run_topics_list(runtime: &Runtime) -> anyhow::Result<()> {
    let topics: Vec<Topic> = runtime.store.load_or_default(&StoreKey::Topics)?;
    if topics.is_empty() {
        println!("No topics stored yet. Run `mktg topics --count N` first.");
        return Ok(());
    }
    print_topics(&topics);
    Ok(())
}

fn print_topics(topics: &[Topic]) {
    for topic in topics {
        println!("{:>4}  {}", topic.id, topic.title);
    }
}
