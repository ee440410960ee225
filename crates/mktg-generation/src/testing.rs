//! Scripted collaborators shared by the pipeline tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use mktg_context::{ContextError, Retriever, ScoredChunk};
use mktg_core::{CustomerNeed, NicheProfile, PainPoint};
use mktg_store::{DocumentStore, MemoryStore, StoreKey};

use crate::error::GenerationError;
use crate::llm::TextGenerator;

/// Replays canned replies in order and records every prompt.
pub(crate) struct ScriptedGenerator {
    replies: Mutex<VecDeque<String>>,
    pub(crate) calls: Mutex<Vec<(String, Option<f32>)>>,
}

impl ScriptedGenerator {
    pub(crate) fn new<I, T>(replies: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(p, _)| p.clone()).collect()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        prompt: &str,
        temperature: Option<f32>,
    ) -> Result<String, GenerationError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), temperature));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(GenerationError::EmptyResponse)
    }
}

/// Returns fixed chunks, or fails every lookup.
pub(crate) struct StubRetriever {
    chunks: Option<Vec<ScoredChunk>>,
    pub(crate) queries: Mutex<Vec<(String, usize)>>,
}

impl StubRetriever {
    pub(crate) fn with_texts(texts: &[&str]) -> Self {
        Self {
            chunks: Some(
                texts
                    .iter()
                    .map(|t| ScoredChunk {
                        text: (*t).to_string(),
                        score: 0.9,
                    })
                    .collect(),
            ),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            chunks: None,
            queries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Retriever for StubRetriever {
    async fn similarity_search_with_score(
        &self,
        query: &str,
        k: usize,
    ) -> Result<Vec<ScoredChunk>, ContextError> {
        self.queries.lock().unwrap().push((query.to_string(), k));
        match &self.chunks {
            Some(chunks) => Ok(chunks.iter().take(k).cloned().collect()),
            None => Err(ContextError::Qdrant("connection refused".to_string())),
        }
    }
}

pub(crate) fn saas_niche() -> NicheProfile {
    NicheProfile {
        industry: "SaaS".to_string(),
        customer_pain_points: vec![PainPoint {
            challenge: "churn".to_string(),
            why: vec![],
        }],
        customer_needs: vec![CustomerNeed {
            need: "retention tooling".to_string(),
        }],
    }
}

/// Memory store seeded with the SaaS niche profile.
pub(crate) fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();
    store.save(&StoreKey::Niche, &saas_niche()).unwrap();
    store
}
