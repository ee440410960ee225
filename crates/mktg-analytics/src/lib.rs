//! Performance tracking for published content.
//!
//! [`simulator`] appends engagement records for the latest content;
//! [`aggregate`] and [`narrated`] turn the history into insight reports.

pub mod aggregate;
pub mod error;
pub mod narrated;
pub mod simulator;

pub use aggregate::{aggregate, analyze_platform};
pub use error::AnalyticsError;
pub use narrated::narrate;
pub use simulator::{collect_metrics, simulate_metrics};

use mktg_core::{InsightReport, NarratedInsightReport, PerformanceRecord};
use mktg_generation::TextGenerator;
use mktg_store::{DocumentStore, StoreKey};

/// How the performance history is turned into insights.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InsightStrategy {
    /// Deterministic rollup saved to `adaptive_insights.json`.
    #[default]
    Numeric,
    /// Model-written rollup saved to `llm_insights.json`.
    Narrated,
}

impl InsightStrategy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            InsightStrategy::Numeric => "numeric",
            InsightStrategy::Narrated => "narrated",
        }
    }
}

impl std::fmt::Display for InsightStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for InsightStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "numeric" => Ok(InsightStrategy::Numeric),
            "narrated" => Ok(InsightStrategy::Narrated),
            other => Err(format!("unknown insight strategy '{other}'")),
        }
    }
}

fn load_history<S: DocumentStore>(store: &S) -> Result<Vec<PerformanceRecord>, AnalyticsError> {
    let records: Vec<PerformanceRecord> = store.load_or_default(&StoreKey::Performance)?;
    if records.is_empty() {
        tracing::warn!("no performance data to analyze");
    }
    Ok(records)
}

/// Build and save the numeric report. `None` when there is no history.
///
/// # Errors
///
/// Returns [`AnalyticsError::Store`] on read or write failure.
pub fn run_numeric_insights<S: DocumentStore>(
    store: &S,
) -> Result<Option<InsightReport>, AnalyticsError> {
    let records = load_history(store)?;
    if records.is_empty() {
        return Ok(None);
    }

    let report = aggregate(&records);
    store.save(&StoreKey::AdaptiveInsights, &report)?;
    tracing::info!(platforms = report.len(), records = records.len(), "adaptive insights saved");
    Ok(Some(report))
}

/// Build and save the narrated report. `None` when there is no history.
///
/// # Errors
///
/// Returns [`AnalyticsError::Store`] on read or write failure and
/// [`AnalyticsError::Generation`] when a model call fails in transport.
pub async fn run_narrated_insights<S, G>(
    generator: &G,
    store: &S,
) -> Result<Option<NarratedInsightReport>, AnalyticsError>
where
    S: DocumentStore,
    G: TextGenerator + ?Sized,
{
    let records = load_history(store)?;
    if records.is_empty() {
        return Ok(None);
    }

    let report = narrate(generator, &records).await?;
    store.save(&StoreKey::NarratedInsights, &report)?;
    tracing::info!(platforms = report.platforms.len(), "narrated insights saved");
    Ok(Some(report))
}
