//! Content topics and the history of topics already used.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A topic available to the content generators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: i64,
    pub title: String,
}

/// A title that has already been generated and must not resurface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsedTopic {
    pub title: String,
    #[serde(with = "crate::timestamp")]
    pub generated_on: DateTime<Utc>,
}

impl UsedTopic {
    #[must_use]
    pub fn now(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            generated_on: Utc::now(),
        }
    }
}

/// Find a topic by id. Ids are assumed unique; the first match wins.
#[must_use]
pub fn find_topic(topics: &[Topic], id: i64) -> Option<&Topic> {
    topics.iter().find(|t| t.id == id)
}

/// Next free id after the largest one in `topics` (1 for an empty list).
#[must_use]
pub fn next_topic_id(topics: &[Topic]) -> i64 {
    topics.iter().map(|t| t.id).max().map_or(1, |max| max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic(id: i64, title: &str) -> Topic {
        Topic {
            id,
            title: title.to_string(),
        }
    }

    #[test]
    fn find_topic_returns_first_match() {
        let topics = vec![topic(1, "a"), topic(2, "b"), topic(2, "c")];
        assert_eq!(find_topic(&topics, 2).unwrap().title, "b");
        assert!(find_topic(&topics, 9).is_none());
    }

    #[test]
    fn next_topic_id_follows_largest() {
        assert_eq!(next_topic_id(&[]), 1);
        assert_eq!(next_topic_id(&[topic(4, "a"), topic(2, "b")]), 5);
    }

    #[test]
    fn used_topic_accepts_offsetless_timestamp() {
        let json = r#"{"title":"Rewiring SaaS GTM","generated_on":"2025-01-01T10:00:00.250000"}"#;
        let used: UsedTopic = serde_json::from_str(json).unwrap();
        assert_eq!(used.title, "Rewiring SaaS GTM");
    }
}
