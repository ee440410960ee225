mod analytics;
mod content;
mod research;
mod runtime;
mod topics;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use mktg_analytics::InsightStrategy;
use mktg_core::{BlogTemplate, ConfigError, NewsSource};
use mktg_generation::{GenerationError, PostRequest, DEFAULT_ASK_K};
use tracing_subscriber::EnvFilter;

use crate::analytics::MetricsCommands;
use crate::content::BlogModeArg;
use crate::runtime::Runtime;
use crate::topics::TopicsCommands;

#[derive(Debug, Parser)]
#[command(name = "mktg")]
#[command(about = "Marketing content pipeline: topics, blogs, posts, trends and analytics")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate new blog topics, or list stored ones
    Topics {
        /// Number of topics to generate
        #[arg(long, default_value_t = 5)]
        count: usize,
        #[command(subcommand)]
        command: Option<TopicsCommands>,
    },
    /// Write a long-form blog post
    Blog {
        #[arg(long, value_enum, default_value_t = BlogModeArg::Automatic)]
        mode: BlogModeArg,
        /// Topic for manual mode
        #[arg(long)]
        topic: Option<String>,
        /// Prompt template (standard or thought_leadership); defaults to MKTG_BLOG_TEMPLATE
        #[arg(long)]
        template: Option<BlogTemplate>,
    },
    /// Write LinkedIn, Twitter and YouTube posts for a stored topic
    Posts {
        /// Id from the topics file
        #[arg(long)]
        topic_id: i64,
        #[arg(long, default_value = "CXOs")]
        audience: String,
        #[arg(long, default_value = "bold")]
        tone: String,
    },
    /// Search news for the niche and keep the relevant items
    Trends {
        /// SerpAPI engine; repeat for several (defaults to google_news)
        #[arg(long = "engine", value_parser = research::parse_engine)]
        engines: Vec<NewsSource>,
        /// Maximum items to keep; defaults to MKTG_RELEVANCE_TOP_K
        #[arg(long)]
        top_k: Option<usize>,
    },
    /// Answer a question from the reference corpus
    Ask {
        question: String,
        /// Number of passages to retrieve
        #[arg(long, default_value_t = DEFAULT_ASK_K)]
        k: usize,
    },
    /// Engagement metrics
    Metrics {
        #[command(subcommand)]
        command: MetricsCommands,
    },
    /// Derive insights from the performance history
    Insights {
        /// numeric or narrated
        #[arg(long, default_value_t = InsightStrategy::Numeric)]
        strategy: InsightStrategy,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {e:#}");
            ExitCode::from(exit_code(&e))
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = mktg_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let runtime = Runtime::new(config);
    match cli.command {
        Commands::Topics {
            command: Some(TopicsCommands::List),
            ..
        } => topics::run_topics_list(&runtime),
        Commands::Topics {
            count,
            command: None,
        } => topics::run_topics_generate(&runtime, count).await,
        Commands::Blog {
            mode,
            topic,
            template,
        } => content::run_blog_command(&runtime, mode, topic, template).await,
        Commands::Posts {
            topic_id,
            audience,
            tone,
        } => {
            let request = PostRequest {
                topic_id,
                audience,
                tone,
            };
            content::run_posts_command(&runtime, &request).await
        }
        Commands::Trends { engines, top_k } => {
            research::run_trends_command(&runtime, engines, top_k).await
        }
        Commands::Ask { question, k } => research::run_ask_command(&runtime, &question, k).await,
        Commands::Metrics {
            command: MetricsCommands::Collect,
        } => analytics::run_metrics_collect(&runtime),
        Commands::Insights { strategy } => analytics::run_insights_command(&runtime, strategy).await,
    }
}

/// 2 for missing required input, 3 when topic retries ran out, 1 otherwise.
fn exit_code(err: &anyhow::Error) -> u8 {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<GenerationError>() {
            match e {
                GenerationError::TopicNotFound(_) | GenerationError::MissingNiche => return 2,
                GenerationError::RetryExhausted { .. } => return 3,
                _ => {}
            }
        }
        if matches!(
            cause.downcast_ref::<ConfigError>(),
            Some(ConfigError::MissingEnvVar(_))
        ) {
            return 2;
        }
    }
    1
}
