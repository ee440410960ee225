//! Filesystem-backed [`DocumentStore`].

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;
use crate::key::{StoreKey, BLOG_DIR, BLOG_PREFIX};
use crate::{parse_or_warn, to_pretty_json, DocumentStore};

/// JSON documents laid out under a data directory.
///
/// Writes take an advisory `<file>.lock` (created exclusively, removed on
/// drop) and land atomically through a temp file + rename, so two concurrent
/// writers fail loudly instead of silently losing an update. A lock whose
/// recorded PID is no longer running is treated as stale and replaced.
///
/// A document that fails to parse when it is about to be rewritten is
/// renamed to `<file>.corrupt-<timestamp>` first and left for inspection.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a document.
    #[must_use]
    pub fn path_of(&self, key: &StoreKey) -> PathBuf {
        self.root.join(key.relative_path())
    }

    fn read_text(path: &Path) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_err(path, e)),
        }
    }

    fn write_atomic(path: &Path, contents: &str) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
        }
        let tmp = with_suffix(path, "tmp");
        fs::write(&tmp, contents).map_err(|e| io_err(&tmp, e))?;
        fs::rename(&tmp, path).map_err(|e| io_err(path, e))
    }

    /// Read a document the caller holds the write lock for, moving it aside
    /// when it does not parse.
    fn read_for_update<T: DeserializeOwned>(
        path: &Path,
        key: &StoreKey,
    ) -> Result<Option<T>, StoreError> {
        let Some(text) = Self::read_text(path)? else {
            return Ok(None);
        };
        match serde_json::from_str(&text) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                let suffix = format!("corrupt-{}", Utc::now().format("%Y%m%d_%H%M%S_%3f"));
                let aside = with_suffix(path, &suffix);
                fs::rename(path, &aside).map_err(|err| io_err(path, err))?;
                tracing::warn!(
                    key = %key,
                    error = %e,
                    moved_to = %aside.display(),
                    "stored document did not parse, moved aside before rewrite"
                );
                Ok(None)
            }
        }
    }
}

impl DocumentStore for FileStore {
    fn load<T: DeserializeOwned>(&self, key: &StoreKey) -> Result<Option<T>, StoreError> {
        let path = self.path_of(key);
        let Some(text) = Self::read_text(&path)? else {
            tracing::debug!(key = %key, "document not found");
            return Ok(None);
        };
        Ok(parse_or_warn(key, &text))
    }

    fn load_for_update<T: DeserializeOwned>(&self, key: &StoreKey) -> Result<Option<T>, StoreError> {
        let path = self.path_of(key);
        let _lock = WriteLock::acquire(&path)?;
        Self::read_for_update(&path, key)
    }

    fn save<T: Serialize>(&self, key: &StoreKey, value: &T) -> Result<(), StoreError> {
        let path = self.path_of(key);
        let contents = to_pretty_json(key, value)?;
        let _lock = WriteLock::acquire(&path)?;
        if key.is_write_once() && path.exists() {
            return Err(StoreError::AlreadyExists {
                key: key.to_string(),
            });
        }
        Self::write_atomic(&path, &contents)?;
        tracing::debug!(key = %key, bytes = contents.len(), "document saved");
        Ok(())
    }

    fn append<T>(&self, key: &StoreKey, items: &[T]) -> Result<usize, StoreError>
    where
        T: Serialize + DeserializeOwned + Clone,
    {
        let path = self.path_of(key);
        // Held across read-modify-write so a concurrent append cannot interleave.
        let _lock = WriteLock::acquire(&path)?;
        let mut existing: Vec<T> = Self::read_for_update(&path, key)?.unwrap_or_default();
        existing.extend_from_slice(items);
        let contents = to_pretty_json(key, &existing)?;
        Self::write_atomic(&path, &contents)?;
        tracing::debug!(key = %key, appended = items.len(), total = existing.len(), "documents appended");
        Ok(existing.len())
    }

    fn blog_keys(&self) -> Result<Vec<StoreKey>, StoreError> {
        let dir = self.root.join(BLOG_DIR);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_err(&dir, e)),
        };

        let mut blogs: Vec<(SystemTime, String)> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| io_err(&dir, e))?;
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            let Some(stem) = name.strip_suffix(".json") else {
                continue;
            };
            if !stem.starts_with(BLOG_PREFIX) {
                continue;
            }
            let modified = entry
                .metadata()
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            blogs.push((modified, stem.to_string()));
        }

        blogs.sort();
        Ok(blogs
            .into_iter()
            .map(|(_, stem)| StoreKey::Blog(stem))
            .collect())
    }
}

/// Exclusive `<file>.lock` marker, removed on drop.
#[derive(Debug)]
struct WriteLock {
    path: PathBuf,
}

impl WriteLock {
    fn acquire(target: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
        }
        let path = with_suffix(target, "lock");
        let created = match Self::create(&path) {
            Err(e) if e.kind() == ErrorKind::AlreadyExists && is_stale(&path) => {
                tracing::warn!(path = %path.display(), "removing write lock left by a process that is no longer running");
                match fs::remove_file(&path) {
                    Ok(()) => {}
                    Err(e) if e.kind() == ErrorKind::NotFound => {}
                    Err(e) => return Err(io_err(&path, e)),
                }
                Self::create(&path)
            }
            other => other,
        };
        match created {
            Ok(lock) => Ok(lock),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Err(StoreError::Locked {
                path: target.display().to_string(),
            }),
            Err(e) => Err(io_err(&path, e)),
        }
    }

    fn create(path: &Path) -> std::io::Result<Self> {
        let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
        let _ = writeln!(file, "{}", std::process::id());
        Ok(Self {
            path: path.to_path_buf(),
        })
    }
}

/// True when the lock file names a PID that is not running.
///
/// Only decidable where `/proc` exists; elsewhere, and for locks without a
/// readable PID, the lock is assumed live.
fn is_stale(lock: &Path) -> bool {
    if !Path::new("/proc/self").exists() {
        return false;
    }
    let Ok(text) = fs::read_to_string(lock) else {
        return false;
    };
    text.trim()
        .parse::<u32>()
        .is_ok_and(|pid| !Path::new("/proc").join(pid.to_string()).exists())
}

impl Drop for WriteLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to release write lock");
        }
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut os = path.as_os_str().to_owned();
    os.push(".");
    os.push(suffix);
    PathBuf::from(os)
}

fn io_err(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
#[path = "file_test.rs"]
mod tests;
