//! Model-narrated performance insights.
//!
//! The numeric parts (`avg_engagement`, `top_titles`) come from
//! [`crate::aggregate`]; the prose is whatever the model says. Replies that do
//! not parse are kept as raw text and flagged `low_confidence`, as are replies
//! that leave `insights` or `recommendations` empty.

use std::fmt::Write as _;

use mktg_core::{NarratedInsight, NarratedInsightReport, PerformanceRecord, Platform};
use mktg_generation::extract_structured;
use mktg_generation::prompts::{global_insight_prompt, platform_insight_prompt};
use mktg_generation::TextGenerator;

use crate::aggregate::{average_engagement, group_by_platform, rank_by_engagement, TITLE_WINDOW};
use crate::error::AnalyticsError;

/// Narrate each platform present in `records`, then summarise across them.
///
/// # Errors
///
/// Returns [`AnalyticsError::Generation`] when a model call fails in
/// transport. Unparseable replies never fail.
pub async fn narrate<G>(
    generator: &G,
    records: &[PerformanceRecord],
) -> Result<NarratedInsightReport, AnalyticsError>
where
    G: TextGenerator + ?Sized,
{
    let mut report = NarratedInsightReport::default();

    for (platform, group) in group_by_platform(records) {
        let insight = narrate_platform(generator, platform, &group).await?;
        report.platforms.insert(platform, insight);
    }

    if report.platforms.is_empty() {
        return Ok(report);
    }

    let reply = generator
        .generate(&global_insight_prompt(&summaries(&report)), None)
        .await?;
    let extracted = extract_structured(&reply, "global_insights");
    if extracted.is_low_confidence() {
        tracing::warn!("global insight reply kept as raw text");
    }
    report.global_insights = extracted.str_field("global_insights").unwrap_or_default();

    Ok(report)
}

async fn narrate_platform<G>(
    generator: &G,
    platform: Platform,
    records: &[&PerformanceRecord],
) -> Result<NarratedInsight, AnalyticsError>
where
    G: TextGenerator + ?Sized,
{
    let avg_engagement = average_engagement(records);
    let ranked = rank_by_engagement(records);
    let top_titles = ranked
        .iter()
        .take(TITLE_WINDOW)
        .map(|r| r.title.clone())
        .collect();

    let records_json = serde_json::to_string_pretty(&ranked).unwrap_or_default();
    let prompt = platform_insight_prompt(platform.as_str(), avg_engagement, &records_json);
    let reply = generator.generate(&prompt, None).await?;

    let extracted = extract_structured(&reply, "insights");
    let insights = extracted.str_field("insights").unwrap_or_default();
    let recommendations = extracted.str_field("recommendations").unwrap_or_default();
    let low_confidence = extracted.is_low_confidence()
        || insights.trim().is_empty()
        || recommendations.trim().is_empty();
    if low_confidence {
        tracing::warn!(%platform, "insight reply was not JSON or left a field empty");
    }
    tracing::info!(%platform, records = records.len(), avg_engagement, "platform narrated");

    Ok(NarratedInsight {
        avg_engagement,
        insights,
        recommendations,
        top_titles,
        low_confidence,
    })
}

fn summaries(report: &NarratedInsightReport) -> String {
    let mut out = String::new();
    for (platform, insight) in &report.platforms {
        let _ = writeln!(
            out,
            "{platform} (avg engagement {}): {} Recommendations: {}",
            insight.avg_engagement, insight.insights, insight.recommendations
        );
    }
    out
}
