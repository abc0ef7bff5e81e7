//! File-backed storage backend.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use super::{StorageBackend, StorageError};

/// Default byte quota for a single stored value (5 MiB).
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Storage backend keeping one file per key under a directory.
///
/// Writes go through a temp file followed by a rename, so readers (including
/// other processes) never observe a half-written blob. The store is shared
/// across processes with last-writer-wins semantics.
pub struct FileStore {
    directory: PathBuf,
    quota_bytes: usize,
}

impl FileStore {
    /// Create a store rooted at `directory` with the default quota.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self::with_quota(directory, DEFAULT_QUOTA_BYTES)
    }

    /// Create a store that rejects values larger than `quota_bytes`.
    pub fn with_quota(directory: impl Into<PathBuf>, quota_bytes: usize) -> Self {
        Self {
            directory: directory.into(),
            quota_bytes,
        }
    }

    /// The directory this store writes into.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn value_path(&self, key: &str) -> PathBuf {
        // Keys are fixed identifiers like "thumbnailCache"; sanitize anything
        // that would escape the store directory.
        let safe: String = key
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        self.directory.join(format!("{}.json", safe))
    }
}

impl StorageBackend for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.value_path(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if value.len() > self.quota_bytes {
            return Err(StorageError::QuotaExceeded {
                size: value.len(),
                quota: self.quota_bytes,
            });
        }

        fs::create_dir_all(&self.directory)?;

        let path = self.value_path(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.value_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Fold mtime and length of every stored file into a change indicator.
    ///
    /// Derived from file metadata rather than an in-process counter so writes
    /// by other processes are observable.
    fn version(&self) -> u64 {
        let entries = match fs::read_dir(&self.directory) {
            Ok(entries) => entries,
            Err(_) => return 0,
        };

        let mut version: u64 = 0;
        for entry in entries.flatten() {
            let Ok(meta) = entry.metadata() else { continue };
            if !meta.is_file() {
                continue;
            }
            let mtime_ms = meta
                .modified()
                .ok()
                .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0);
            version = version
                .wrapping_mul(31)
                .wrapping_add(mtime_ms)
                .wrapping_add(meta.len());
        }
        version
    }
}
