//! Durable cross-run state for the content pipeline.
//!
//! Every stage reads and writes JSON documents through [`DocumentStore`].
//! [`FileStore`] maps keys onto the on-disk layout under a data directory and
//! serializes writers with an advisory lock file; [`MemoryStore`] backs tests.

pub mod error;
pub mod file;
pub mod key;
pub mod memory;

pub use error::StoreError;
pub use file::FileStore;
pub use key::StoreKey;
pub use memory::MemoryStore;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Keyed JSON document storage.
///
/// Absent documents load as `None`. Documents that exist but do not parse are
/// logged and also load as `None`, so a corrupt file degrades to "no data"
/// instead of aborting the run. Before such a document is rewritten it is
/// moved aside, never overwritten. Blog documents are write-once.
pub trait DocumentStore {
    /// Load and deserialize a document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the document exists but cannot be read.
    fn load<T: DeserializeOwned>(&self, key: &StoreKey) -> Result<Option<T>, StoreError>;

    /// Load a document that the caller is about to rewrite with `save`.
    ///
    /// A document that exists but does not parse is moved aside and `None`
    /// is returned, so the following `save` cannot destroy it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Locked`] when another writer holds the document,
    /// or [`StoreError::Io`] if it cannot be read or moved.
    fn load_for_update<T: DeserializeOwned>(&self, key: &StoreKey) -> Result<Option<T>, StoreError>;

    /// Serialize and replace a document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Locked`] when another writer holds the document,
    /// [`StoreError::AlreadyExists`] when overwriting a write-once blog, or
    /// an I/O / serialization error.
    fn save<T: Serialize>(&self, key: &StoreKey, value: &T) -> Result<(), StoreError>;

    /// Append `items` to a JSON array document, creating it if absent.
    ///
    /// An existing document that does not parse is moved aside, as in
    /// [`DocumentStore::load_for_update`], and the array starts fresh.
    ///
    /// Returns the length of the array after the append.
    ///
    /// # Errors
    ///
    /// Same as [`DocumentStore::save`].
    fn append<T>(&self, key: &StoreKey, items: &[T]) -> Result<usize, StoreError>
    where
        T: Serialize + DeserializeOwned + Clone;

    /// Keys of all stored blogs, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the blog collection cannot be listed.
    fn blog_keys(&self) -> Result<Vec<StoreKey>, StoreError>;

    /// Load a document, falling back to `T::default()` when absent.
    ///
    /// # Errors
    ///
    /// Same as [`DocumentStore::load`].
    fn load_or_default<T: DeserializeOwned + Default>(
        &self,
        key: &StoreKey,
    ) -> Result<T, StoreError> {
        Ok(self.load(key)?.unwrap_or_default())
    }

    /// Key of the most recently written blog, if any.
    ///
    /// # Errors
    ///
    /// Same as [`DocumentStore::blog_keys`].
    fn latest_blog(&self) -> Result<Option<StoreKey>, StoreError> {
        Ok(self.blog_keys()?.pop())
    }
}

/// Parse stored text, logging and discarding it when malformed.
pub(crate) fn parse_or_warn<T: DeserializeOwned>(key: &StoreKey, text: &str) -> Option<T> {
    match serde_json::from_str(text) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "could not parse stored document, treating as absent");
            None
        }
    }
}

pub(crate) fn to_pretty_json<T: Serialize>(key: &StoreKey, value: &T) -> Result<String, StoreError> {
    serde_json::to_string_pretty(value).map_err(|e| StoreError::Serialize {
        context: key.to_string(),
        source: e,
    })
}
