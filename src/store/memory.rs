//! In-process storage backend.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use super::{StorageBackend, StorageError};

/// Default byte quota, matching the file store (5 MiB).
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Storage backend holding values in a process-local map.
///
/// Enforces the same byte quota semantics as [`super::FileStore`] and counts
/// physical writes, which tests use to assert debounce coalescing.
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    quota_bytes: usize,
    version: AtomicU64,
    set_calls: AtomicU64,
}

impl MemoryStore {
    /// Create a store with the default quota.
    pub fn new() -> Self {
        Self::with_quota(DEFAULT_QUOTA_BYTES)
    }

    /// Create a store that rejects values larger than `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
            quota_bytes,
            version: AtomicU64::new(0),
            set_calls: AtomicU64::new(0),
        }
    }

    /// Number of successful physical writes so far.
    pub fn set_calls(&self) -> u64 {
        self.set_calls.load(Ordering::SeqCst)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageBackend for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if value.len() > self.quota_bytes {
            return Err(StorageError::QuotaExceeded {
                size: value.len(),
                quota: self.quota_bytes,
            });
        }
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        self.version.fetch_add(1, Ordering::SeqCst);
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.values.lock().unwrap().remove(key).is_some() {
            self.version.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }

    fn version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }
}
