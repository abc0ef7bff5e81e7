//! Persistent key-value storage backends.
//!
//! The cache core is storage-agnostic: it only speaks the narrow
//! [`StorageBackend`] interface. [`FileStore`] is the production backend (one
//! JSON file per storage key under the cache directory); [`MemoryStore`]
//! backs tests and embedding scenarios.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Value of {size} bytes exceeds storage quota of {quota} bytes")]
    QuotaExceeded { size: usize, quota: usize },

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Whether this failure is the quota condition that triggers the
    /// halve-and-retry recovery in the cache flush path.
    pub fn is_quota(&self) -> bool {
        matches!(self, StorageError::QuotaExceeded { .. })
    }
}

/// Narrow persistent key-value interface.
///
/// `version()` is a change indicator covering the whole store; it moves
/// whenever any value changes, including changes made by other
/// processes for file-backed stores. Watchers poll it to refresh stats views.
pub trait StorageBackend: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
    fn version(&self) -> u64;
}
