use mktg_core::UsedTopic;
use mktg_store::MemoryStore;

use super::*;
use crate::testing::{saas_niche, seeded_store, ScriptedGenerator};

fn history(titles: &[&str]) -> Vec<UsedTopic> {
    titles.iter().map(|t| UsedTopic::now(*t)).collect()
}

#[tokio::test]
async fn generate_topic_reads_topic_field() {
    let generator = ScriptedGenerator::new([r#"{"topic": "  Deconstructing SaaS churn  "}"#]);
    let topic = generate_topic(&generator, &saas_niche()).await.unwrap();
    assert_eq!(topic.title, "Deconstructing SaaS churn");
    assert!(!topic.low_confidence);
}

#[tokio::test]
async fn generate_topic_keeps_raw_text_when_not_json() {
    let generator = ScriptedGenerator::new(["Reframing retention as a GTM problem"]);
    let topic = generate_topic(&generator, &saas_niche()).await.unwrap();
    assert_eq!(topic.title, "Reframing retention as a GTM problem");
    assert!(topic.low_confidence);
}

#[tokio::test]
async fn duplicate_of_history_is_regenerated() {
    let generator = ScriptedGenerator::new([
        r#"{"topic": "rewiring saas gtm"}"#,
        r#"{"topic": "Why churn dashboards mislead CFOs"}"#,
    ]);
    let used = history(&["Rewiring SaaS GTM"]);
    let topic = generate_unique_topic(&generator, &saas_niche(), &used, RetryPolicy::default())
        .await
        .unwrap();
    assert_eq!(topic.title, "Why churn dashboards mislead CFOs");
    assert_eq!(generator.call_count(), 2);
}

#[tokio::test]
async fn endless_duplicates_exhaust_the_retry_policy() {
    let generator = ScriptedGenerator::new(vec![r#"{"topic": "Rewiring SaaS GTM"}"#; 3]);
    let used = history(&["Rewiring SaaS GTM"]);
    let err = generate_unique_topic(&generator, &saas_niche(), &used, RetryPolicy::new(3))
        .await
        .unwrap_err();
    assert!(
        matches!(
            err,
            GenerationError::RetryExhausted { attempts: 3, ref last_candidate } if last_candidate == "Rewiring SaaS GTM"
        ),
        "got: {err:?}"
    );
    assert_eq!(generator.call_count(), 3);
}

#[tokio::test]
async fn ideate_topics_assigns_ids_after_existing_and_records_history() {
    let store = seeded_store();
    store
        .save(
            &StoreKey::Topics,
            &vec![Topic {
                id: 7,
                title: "Existing topic".to_string(),
            }],
        )
        .unwrap();
    store
        .append(&StoreKey::UsedTopics, &history(&["Rewiring SaaS GTM"]))
        .unwrap();

    let generator = ScriptedGenerator::new([r#"```json
{"topics": ["rewiring saas gtm", "Churn is a pricing problem", "churn is a pricing problem!", {"title": "Retention tooling buyers guide"}]}
```"#]);

    let created = ideate_topics(&generator, &store, 2, RetryPolicy::default())
        .await
        .unwrap();

    assert_eq!(
        created,
        vec![
            Topic {
                id: 8,
                title: "Churn is a pricing problem".to_string()
            },
            Topic {
                id: 9,
                title: "Retention tooling buyers guide".to_string()
            },
        ]
    );
    let topics: Vec<Topic> = store.load_or_default(&StoreKey::Topics).unwrap();
    assert_eq!(topics.len(), 3);
    let used: Vec<UsedTopic> = store.load_or_default(&StoreKey::UsedTopics).unwrap();
    assert_eq!(used.len(), 3);
    assert_eq!(generator.call_count(), 1);
}

#[tokio::test]
async fn ideate_topics_asks_again_for_the_shortfall() {
    let store = seeded_store();
    let generator = ScriptedGenerator::new([
        r#"{"topics": ["Churn is a pricing problem"]}"#,
        r#"["Retention tooling buyers guide"]"#,
    ]);

    let created = ideate_topics(&generator, &store, 2, RetryPolicy::default())
        .await
        .unwrap();
    assert_eq!(created.len(), 2);
    assert_eq!(created[0].id, 1);
    assert!(generator.prompts()[1].contains("- Churn is a pricing problem"));
}

#[tokio::test]
async fn ideate_topics_requires_a_niche() {
    let store = MemoryStore::new();
    let generator = ScriptedGenerator::new(Vec::<String>::new());
    let err = ideate_topics(&generator, &store, 3, RetryPolicy::default())
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::MissingNiche));
    assert_eq!(generator.call_count(), 0);
}

#[tokio::test]
async fn ideate_topics_sets_aside_an_unreadable_topics_file() {
    let store = seeded_store();
    let broken = r#"[{"id": 1, "title": "Kept by hand"}, {"id": "two"}]"#;
    store.insert_raw(StoreKey::Topics, broken);
    let generator = ScriptedGenerator::new([r#"{"topics": ["Churn is a pricing problem"]}"#]);

    let created = ideate_topics(&generator, &store, 1, RetryPolicy::default())
        .await
        .unwrap();

    assert_eq!(created[0].id, 1);
    assert_eq!(store.quarantined(&StoreKey::Topics), vec![broken.to_string()]);
    let topics: Vec<Topic> = store.load_or_default(&StoreKey::Topics).unwrap();
    assert_eq!(topics, created);
}

#[tokio::test]
async fn failed_ideation_leaves_the_topics_file_alone() {
    let store = seeded_store();
    store.insert_raw(StoreKey::Topics, "{ broken");
    let generator = ScriptedGenerator::new([r#"{"topics": []}"#]);
    let policy = RetryPolicy::new(1);

    let err = ideate_topics(&generator, &store, 1, policy).await.unwrap_err();
    assert!(matches!(err, GenerationError::RetryExhausted { .. }));
    assert_eq!(store.raw(&StoreKey::Topics).as_deref(), Some("{ broken"));
    assert!(store.quarantined(&StoreKey::Topics).is_empty());
}
