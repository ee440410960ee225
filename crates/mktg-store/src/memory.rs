//! In-process [`DocumentStore`] used by tests and dry runs.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;
use crate::key::StoreKey;
use crate::{parse_or_warn, to_pretty_json, DocumentStore};

/// Documents held as serialized JSON text, so the serde path is exercised
/// exactly as it is on disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: Mutex<Documents>,
}

#[derive(Debug, Default)]
struct Documents {
    entries: BTreeMap<StoreKey, (u64, String)>,
    quarantined: Vec<(StoreKey, String)>,
    next_seq: u64,
}

impl Documents {
    fn put(&mut self, key: StoreKey, text: String) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert(key, (seq, text));
    }

    fn take_for_update<T: DeserializeOwned>(&mut self, key: &StoreKey) -> Option<T> {
        let (_, text) = self.entries.get(key)?;
        match serde_json::from_str(text) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "stored document did not parse, moved aside before rewrite");
                if let Some((_, text)) = self.entries.remove(key) {
                    self.quarantined.push((key.clone(), text));
                }
                None
            }
        }
    }
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw text under `key`, bypassing serialization.
    pub fn insert_raw(&self, key: StoreKey, text: impl Into<String>) {
        self.guard().put(key, text.into());
    }

    /// Raw text stored under `key`.
    #[must_use]
    pub fn raw(&self, key: &StoreKey) -> Option<String> {
        self.guard().entries.get(key).map(|(_, text)| text.clone())
    }

    /// Unparseable documents moved aside under `key`, oldest first.
    #[must_use]
    pub fn quarantined(&self, key: &StoreKey) -> Vec<String> {
        self.guard()
            .quarantined
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, text)| text.clone())
            .collect()
    }

    #[must_use]
    pub fn contains(&self, key: &StoreKey) -> bool {
        self.guard().entries.contains_key(key)
    }

    fn guard(&self) -> MutexGuard<'_, Documents> {
        self.docs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DocumentStore for MemoryStore {
    fn load<T: DeserializeOwned>(&self, key: &StoreKey) -> Result<Option<T>, StoreError> {
        let text = self.raw(key);
        Ok(text.and_then(|t| parse_or_warn(key, &t)))
    }

    fn load_for_update<T: DeserializeOwned>(&self, key: &StoreKey) -> Result<Option<T>, StoreError> {
        Ok(self.guard().take_for_update(key))
    }

    fn save<T: Serialize>(&self, key: &StoreKey, value: &T) -> Result<(), StoreError> {
        let text = to_pretty_json(key, value)?;
        let mut docs = self.guard();
        if key.is_write_once() && docs.entries.contains_key(key) {
            return Err(StoreError::AlreadyExists {
                key: key.to_string(),
            });
        }
        docs.put(key.clone(), text);
        Ok(())
    }

    fn append<T>(&self, key: &StoreKey, items: &[T]) -> Result<usize, StoreError>
    where
        T: Serialize + DeserializeOwned + Clone,
    {
        let mut docs = self.guard();
        let mut existing: Vec<T> = docs.take_for_update(key).unwrap_or_default();
        existing.extend_from_slice(items);
        let text = to_pretty_json(key, &existing)?;
        docs.put(key.clone(), text);
        Ok(existing.len())
    }

    fn blog_keys(&self) -> Result<Vec<StoreKey>, StoreError> {
        let docs = self.guard();
        let mut blogs: Vec<(u64, StoreKey)> = docs
            .entries
            .iter()
            .filter(|(key, _)| matches!(key, StoreKey::Blog(_)))
            .map(|(key, (seq, _))| (*seq, key.clone()))
            .collect();
        blogs.sort_by_key(|(seq, _)| *seq);
        Ok(blogs.into_iter().map(|(_, key)| key).collect())
    }
}
