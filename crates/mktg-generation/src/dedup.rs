//! Near-duplicate detection for topic titles.

use similar::TextDiff;

/// Candidates scoring strictly above this against any used title are rejected.
pub const DUPLICATE_THRESHOLD: f32 = 0.8;

/// Case-insensitive character-level similarity in `[0, 1]`.
///
/// `2 * matched / (len(a) + len(b))` over the lower-cased strings, so a title
/// that only appends words to another still scores high. Equal strings
/// (including two empty ones) score 1.0.
#[must_use]
pub fn similarity_ratio(a: &str, b: &str) -> f32 {
    let (a, b) = (a.to_lowercase(), b.to_lowercase());
    TextDiff::from_chars(a.as_str(), b.as_str()).ratio()
}

/// True when `candidate` is too close to any of `used`.
pub fn is_duplicate<'a, I>(candidate: &str, used: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    used.into_iter()
        .any(|title| similarity_ratio(candidate, title) > DUPLICATE_THRESHOLD)
}

/// Bound on regeneration attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
}

impl RetryPolicy {
    #[must_use]
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 5 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_insensitive_equal_strings_score_one() {
        assert!((similarity_ratio("Rewiring SaaS GTM", "rewiring saas gtm") - 1.0).abs() < f32::EPSILON);
        assert!((similarity_ratio("", "") - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn rewiring_saas_gtm_is_rejected_against_history() {
        let history = ["Rewiring SaaS GTM"];
        assert!(is_duplicate("rewiring saas gtm", history));
    }

    #[test]
    fn appended_words_still_count_as_duplicate() {
        // 17 shared chars over 25 + 17: 34 / 42 = 0.81
        let ratio = similarity_ratio("Rewiring SaaS GTM motions", "Rewiring SaaS GTM");
        assert!((ratio - 34.0 / 42.0).abs() < 1e-6, "ratio = {ratio}");
        assert!(is_duplicate("Rewiring SaaS GTM motions", ["Rewiring SaaS GTM"]));
    }

    #[test]
    fn distinct_titles_pass() {
        let history = ["Rewiring SaaS GTM"];
        assert!(!is_duplicate("Why churn dashboards lie to CFOs", history));
        assert!(!is_duplicate("anything", std::iter::empty()));
    }

    #[test]
    fn threshold_is_strict() {
        // 9 of 10 chars shared: 18 / 20 = 0.9 > 0.8
        assert!(is_duplicate("abcdefghij", ["abcdefghiX"]));
        // 4 of 5 chars shared: 8 / 10 = 0.8, not above
        assert!(!is_duplicate("abcde", ["abcdX"]));
    }

    #[test]
    fn retry_policy_never_drops_below_one_attempt() {
        assert_eq!(RetryPolicy::new(0).max_attempts, 1);
        assert_eq!(RetryPolicy::default().max_attempts, 5);
    }
}
