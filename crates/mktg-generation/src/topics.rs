//! Topic ideation: a single deduplicated blog topic, or a batch of post topics.

use mktg_core::{next_topic_id, NicheProfile, Topic, UsedTopic};
use mktg_store::{DocumentStore, StoreKey};
use serde_json::Value;

use crate::dedup::{is_duplicate, RetryPolicy};
use crate::error::GenerationError;
use crate::extract::extract_structured;
use crate::llm::TextGenerator;
use crate::prompts::{topic_list_prompt, topic_prompt};

/// A topic title as proposed by the model.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedTopic {
    pub title: String,
    pub low_confidence: bool,
}

/// Load the niche profile, which every generation stage requires.
///
/// # Errors
///
/// Returns [`GenerationError::MissingNiche`] when the profile is absent or
/// unparseable, or a store error if it cannot be read.
pub fn require_niche<S: DocumentStore>(store: &S) -> Result<NicheProfile, GenerationError> {
    store
        .load(&StoreKey::Niche)?
        .ok_or(GenerationError::MissingNiche)
}

/// Ask the model for one blog topic.
///
/// # Errors
///
/// Returns [`GenerationError`] only on transport failure.
pub async fn generate_topic<G>(
    generator: &G,
    niche: &NicheProfile,
) -> Result<GeneratedTopic, GenerationError>
where
    G: TextGenerator + ?Sized,
{
    let reply = generator.generate(&topic_prompt(niche), None).await?;
    let extracted = extract_structured(&reply, "topic");
    let title = extracted
        .str_field("topic")
        .map(|t| t.trim().to_string())
        .unwrap_or_default();
    Ok(GeneratedTopic {
        low_confidence: extracted.is_low_confidence(),
        title,
    })
}

/// Generate a topic that is not a near-duplicate of `history`.
///
/// Empty candidates count as failed attempts.
///
/// # Errors
///
/// Returns [`GenerationError::RetryExhausted`] after `policy.max_attempts`
/// rejected candidates, or any transport error.
pub async fn generate_unique_topic<G>(
    generator: &G,
    niche: &NicheProfile,
    history: &[UsedTopic],
    policy: RetryPolicy,
) -> Result<GeneratedTopic, GenerationError>
where
    G: TextGenerator + ?Sized,
{
    let mut last_candidate = String::new();
    for attempt in 1..=policy.max_attempts {
        let candidate = generate_topic(generator, niche).await?;
        if candidate.title.is_empty() {
            tracing::warn!(attempt, "model proposed an empty topic, regenerating");
            continue;
        }
        if is_duplicate(&candidate.title, history.iter().map(|u| u.title.as_str())) {
            tracing::warn!(attempt, candidate = %candidate.title, "duplicate topic detected, regenerating");
            last_candidate = candidate.title;
            continue;
        }
        tracing::info!(attempt, topic = %candidate.title, "topic accepted");
        return Ok(candidate);
    }

    Err(GenerationError::RetryExhausted {
        attempts: policy.max_attempts,
        last_candidate,
    })
}

/// Titles out of a topic-list reply: a bare array or `{"topics": [...]}`,
/// entries either strings or `{"title": ...}` objects.
fn topic_titles(reply: &str) -> Vec<String> {
    extract_structured(reply, "topics")
        .array_or_field("topics")
        .into_iter()
        .filter_map(|entry| match entry {
            Value::String(s) => Some(s),
            Value::Object(map) => map.get("title").and_then(Value::as_str).map(str::to_string),
            _ => None,
        })
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Generate `count` new topics, extend the topics file and record them as used.
///
/// Candidates close to the used-topic history or to each other are dropped;
/// rounds repeat for the shortfall up to `policy.max_attempts`. New ids
/// continue after the largest existing id. A topics file that no longer
/// parses is moved aside before the new list is written. Returns only the
/// new topics.
///
/// # Errors
///
/// Returns [`GenerationError::MissingNiche`] without a niche profile,
/// [`GenerationError::RetryExhausted`] if no topic at all was accepted, and
/// store or transport errors.
pub async fn ideate_topics<G, S>(
    generator: &G,
    store: &S,
    count: usize,
    policy: RetryPolicy,
) -> Result<Vec<Topic>, GenerationError>
where
    G: TextGenerator + ?Sized,
    S: DocumentStore,
{
    let niche = require_niche(store)?;
    if count == 0 {
        return Ok(Vec::new());
    }
    let history: Vec<UsedTopic> = store.load_or_default(&StoreKey::UsedTopics)?;

    let mut known: Vec<String> = history.iter().map(|u| u.title.clone()).collect();
    let mut accepted: Vec<String> = Vec::new();
    let mut last_candidate = String::new();

    for round in 1..=policy.max_attempts {
        let wanted = count - accepted.len();
        let reply = generator
            .generate(&topic_list_prompt(&niche, wanted, &known), None)
            .await?;
        for title in topic_titles(&reply) {
            if accepted.len() == count {
                break;
            }
            if is_duplicate(&title, known.iter().map(String::as_str)) {
                tracing::debug!(round, candidate = %title, "dropping near-duplicate topic");
                last_candidate = title;
                continue;
            }
            known.push(title.clone());
            accepted.push(title);
        }
        if accepted.len() == count {
            break;
        }
        tracing::warn!(round, accepted = accepted.len(), count, "topic batch short, asking again");
    }

    if accepted.is_empty() {
        return Err(GenerationError::RetryExhausted {
            attempts: policy.max_attempts,
            last_candidate,
        });
    }

    let mut topics: Vec<Topic> = store
        .load_for_update(&StoreKey::Topics)?
        .unwrap_or_default();
    let mut next_id = next_topic_id(&topics);
    let mut created = Vec::with_capacity(accepted.len());
    for title in &accepted {
        let topic = Topic {
            id: next_id,
            title: title.clone(),
        };
        next_id += 1;
        created.push(topic.clone());
        topics.push(topic);
    }

    store.save(&StoreKey::Topics, &topics)?;
    let used: Vec<UsedTopic> = accepted.iter().map(UsedTopic::now).collect();
    store.append(&StoreKey::UsedTopics, &used)?;

    tracing::info!(created = created.len(), total = topics.len(), "topics saved");
    Ok(created)
}

#[cfg(test)]
#[path = "topics_test.rs"]
mod tests;
