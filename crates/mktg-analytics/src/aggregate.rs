//! Deterministic per-platform rollup of the performance history.

use std::collections::{BTreeMap, HashMap};

use mktg_core::{round3, InsightReport, PerformanceRecord, Platform, PlatformInsight};

/// Titles kept at each end of the ranking.
pub const TITLE_WINDOW: usize = 3;
/// Hashtags kept at each end of the frequency table.
pub const HASHTAG_WINDOW: usize = 5;

/// Records per platform, in history order.
#[must_use]
pub fn group_by_platform(records: &[PerformanceRecord]) -> BTreeMap<Platform, Vec<&PerformanceRecord>> {
    let mut groups: BTreeMap<Platform, Vec<&PerformanceRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.platform).or_default().push(record);
    }
    groups
}

/// Mean engagement rate rounded to 3 decimals; `0.0` for no records.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_engagement(records: &[&PerformanceRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let sum: f64 = records.iter().map(|r| r.metrics.engagement_rate).sum();
    round3(sum / records.len() as f64)
}

/// Records ordered best first. Ties keep history order.
#[must_use]
pub fn rank_by_engagement<'a>(records: &[&'a PerformanceRecord]) -> Vec<&'a PerformanceRecord> {
    let mut ranked = records.to_vec();
    ranked.sort_by(|a, b| b.metrics.engagement_rate.total_cmp(&a.metrics.engagement_rate));
    ranked
}

/// `(tag, count)` ordered by count descending; equal counts keep first-seen
/// order.
#[must_use]
pub fn hashtag_frequency(records: &[&PerformanceRecord]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for tag in records.iter().flat_map(|r| r.hashtags.iter()) {
        match index.get(tag.as_str()) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(tag.as_str(), counts.len());
                counts.push((tag.clone(), 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Rollup for one platform's records.
#[must_use]
pub fn analyze_platform(records: &[&PerformanceRecord]) -> PlatformInsight {
    let ranked = rank_by_engagement(records);
    let tags = hashtag_frequency(records);

    PlatformInsight {
        avg_engagement: average_engagement(records),
        top_titles: titles(&ranked[..ranked.len().min(TITLE_WINDOW)]),
        avoid_titles: titles(&ranked[ranked.len().saturating_sub(TITLE_WINDOW)..]),
        top_hashtags: names(&tags[..tags.len().min(HASHTAG_WINDOW)]),
        low_hashtags: names(&tags[tags.len().saturating_sub(HASHTAG_WINDOW)..]),
    }
}

fn titles(records: &[&PerformanceRecord]) -> Vec<String> {
    records.iter().map(|r| r.title.clone()).collect()
}

fn names(tags: &[(String, usize)]) -> Vec<String> {
    tags.iter().map(|(tag, _)| tag.clone()).collect()
}

/// Rollup for every platform present in `records`.
#[must_use]
pub fn aggregate(records: &[PerformanceRecord]) -> InsightReport {
    group_by_platform(records)
        .into_iter()
        .map(|(platform, group)| (platform, analyze_platform(&group)))
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mktg_core::EngagementMetrics;

    use super::*;

    fn record(platform: Platform, title: &str, rate: f64, hashtags: &[&str]) -> PerformanceRecord {
        PerformanceRecord {
            topic_id: None,
            platform,
            title: title.to_string(),
            metrics: EngagementMetrics {
                impressions: 0,
                likes: 0,
                comments: 0,
                shares: 0,
                engagement_rate: rate,
            },
            hashtags: hashtags.iter().map(|h| (*h).to_string()).collect(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn two_blog_records_roll_up() {
        let records = vec![
            record(Platform::Blog, "A", 0.10, &[]),
            record(Platform::Blog, "B", 0.05, &[]),
        ];
        let report = aggregate(&records);
        let blog = &report[&Platform::Blog];

        assert!((blog.avg_engagement - 0.075).abs() < 1e-9);
        assert_eq!(blog.top_titles, vec!["A", "B"]);
        assert_eq!(blog.avoid_titles, vec!["A", "B"]);
        assert!(blog.top_hashtags.is_empty());
        assert!(blog.low_hashtags.is_empty());
    }

    #[test]
    fn average_is_rounded_mean() {
        let records = [
            record(Platform::Twitter, "x", 0.011, &[]),
            record(Platform::Twitter, "y", 0.012, &[]),
            record(Platform::Twitter, "z", 0.0125, &[]),
        ];
        let refs: Vec<&PerformanceRecord> = records.iter().collect();
        // mean 0.011833…
        assert!((average_engagement(&refs) - 0.012).abs() < 1e-9);
        assert!(average_engagement(&[]).abs() < f64::EPSILON);
    }

    #[test]
    fn ranking_is_stable_for_equal_rates() {
        let records = [
            record(Platform::LinkedIn, "first", 0.02, &[]),
            record(Platform::LinkedIn, "best", 0.09, &[]),
            record(Platform::LinkedIn, "second", 0.02, &[]),
            record(Platform::LinkedIn, "worst", 0.01, &[]),
            record(Platform::LinkedIn, "third", 0.02, &[]),
        ];
        let refs: Vec<&PerformanceRecord> = records.iter().collect();
        let insight = analyze_platform(&refs);

        assert_eq!(insight.top_titles, vec!["best", "first", "second"]);
        assert_eq!(insight.avoid_titles, vec!["second", "third", "worst"]);
    }

    #[test]
    fn hashtags_rank_by_count_then_first_seen() {
        let records = [
            record(Platform::LinkedIn, "a", 0.1, &["#a", "#b", "#c"]),
            record(Platform::LinkedIn, "b", 0.1, &["#c", "#d", "#e"]),
            record(Platform::LinkedIn, "c", 0.1, &["#f", "#c", "#b"]),
        ];
        let refs: Vec<&PerformanceRecord> = records.iter().collect();

        let freq = hashtag_frequency(&refs);
        assert_eq!(freq[0], ("#c".to_string(), 3));
        assert_eq!(freq[1], ("#b".to_string(), 2));

        let insight = analyze_platform(&refs);
        assert_eq!(insight.top_hashtags, vec!["#c", "#b", "#a", "#d", "#e"]);
        assert_eq!(insight.low_hashtags, vec!["#b", "#a", "#d", "#e", "#f"]);
    }

    #[test]
    fn platforms_are_reported_separately() {
        let records = vec![
            record(Platform::Blog, "A", 0.10, &[]),
            record(Platform::Twitter, "T", 0.02, &["#x"]),
        ];
        let report = aggregate(&records);
        assert_eq!(report.len(), 2);
        assert_eq!(report[&Platform::Twitter].top_hashtags, vec!["#x"]);
        assert!(!report.contains_key(&Platform::YouTube));
    }
}
