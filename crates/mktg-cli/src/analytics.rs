//! `metrics` and `insights` command handlers.

use clap::Subcommand;
use mktg_analytics::{collect_metrics, run_narrated_insights, run_numeric_insights, InsightStrategy};

use crate::runtime::Runtime;

/// Sub-commands available under `metrics`.
#[derive(Debug, Subcommand)]
pub enum MetricsCommands {
    /// Record simulated engagement for the latest content on each platform
    Collect,
}

pub(crate) fn run_metrics_collect(runtime: &Runtime) -> anyhow::Result<()> {
    let mut rng = rand::rng();
    let records = collect_metrics(&runtime.store, &mut rng)?;

    if records.is_empty() {
        println!("No metrics collected. Generate content first.");
        return Ok(());
    }
    for record in &records {
        println!(
            "{:<9} {:.3}  {}",
            record.platform.as_str(),
            record.metrics.engagement_rate,
            record.title
        );
    }
    println!("Saved {} new record(s).", records.len());
    Ok(())
}

pub(crate) async fn run_insights_command(
    runtime: &Runtime,
    strategy: InsightStrategy,
) -> anyhow::Result<()> {
    let report = match strategy {
        InsightStrategy::Numeric => run_numeric_insights(&runtime.store)?
            .map(|r| serde_json::to_string_pretty(&r))
            .transpose()?,
        InsightStrategy::Narrated => {
            let generator = runtime.generator()?;
            run_narrated_insights(&generator, &runtime.store)
                .await?
                .map(|r| serde_json::to_string_pretty(&r))
                .transpose()?
        }
    };

    match report {
        Some(json) => println!("{json}"),
        None => println!("No performance data to analyze. Run `mktg metrics collect` first."),
    }
    Ok(())
}
