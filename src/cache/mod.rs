//! Thumbnail URL cache with batched persistence.
//!
//! [`ThumbnailCache`] memoizes generated thumbnail URLs keyed by
//! (number, folder, width, height). Reads and writes hit an in-memory mirror
//! synchronously; persistence happens in debounced batches so bursts of
//! writes (a slideshow preloading a folder) cost one physical write. The
//! cache is purely an optimization layer: every public operation degrades to
//! a miss or a no-op on internal failure, never an error.

mod debounce;
mod state;
mod stats;
mod sweeper;

pub use state::CacheEntry;
pub use stats::{CacheStats, RecentEntry, StatsWatcher};
pub use sweeper::SweeperGuard;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use debounce::Debouncer;
use state::{CacheState, PendingOp};

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::keys;
use crate::preload::{HttpFetcher, PreloadHandle, PreloadReport, Preloader, ThumbnailFetcher};
use crate::store::{FileStore, StorageBackend, StorageError};

/// Storage key of the persisted blob.
pub const DEFAULT_STORAGE_KEY: &str = "thumbnailCache";

/// Tuning knobs for the cache service.
#[derive(Debug, Clone)]
pub struct CacheOptions {
    /// Base URL of the gallery backend.
    pub base_url: String,
    /// Key of the persisted blob in the storage backend.
    pub storage_key: String,
    /// Maximum entry count after a flush.
    pub max_entries: usize,
    /// Entries older than this are invalid on read.
    pub max_age: Duration,
    /// Debounce window for batched persistence.
    pub debounce: Duration,
    /// Thumbnails fetched concurrently per preload batch chunk.
    pub batch_size: usize,
    /// Preload worker pool size.
    pub pool_size: usize,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            max_entries: 2000,
            max_age: Duration::from_secs(7 * 24 * 60 * 60),
            debounce: Duration::from_millis(100),
            batch_size: 5,
            pool_size: 4,
        }
    }
}

/// Shared core: everything the flush and sweep paths need without borrowing
/// the service itself.
pub(crate) struct CacheInner {
    backend: Arc<dyn StorageBackend>,
    clock: Arc<dyn Clock>,
    options: CacheOptions,
    state: Mutex<CacheState>,
}

impl CacheInner {
    fn lock_state(&self) -> MutexGuard<'_, CacheState> {
        // A poisoned mutex means a panic elsewhere; the mirror itself is
        // still valid data, so keep serving it.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn max_age_ms(&self) -> i64 {
        self.options.max_age.as_millis() as i64
    }

    /// Deserialize the persisted blob into the mirror, once per lifetime.
    ///
    /// Absent or corrupt blobs degrade to an empty cache.
    fn ensure_loaded(&self, state: &mut CacheState) {
        if state.loaded {
            return;
        }
        state.entries = self.read_persisted();
        state.loaded = true;
    }

    /// Parse the persisted blob, degrading to empty on any failure.
    fn read_persisted(&self) -> HashMap<String, CacheEntry> {
        let blob = match self.backend.get(&self.options.storage_key) {
            Ok(Some(blob)) => blob,
            Ok(None) => return HashMap::new(),
            Err(e) => {
                tracing::warn!("Failed to read cache blob, starting empty: {}", e);
                return HashMap::new();
            }
        };
        match serde_json::from_str(&blob) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Corrupt cache blob, starting empty: {}", e);
                HashMap::new()
            }
        }
    }

    fn persist(&self, state: &CacheState) -> Result<(), StorageError> {
        let blob = serde_json::to_string(&state.entries).map_err(|e| {
            StorageError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
        })?;
        self.backend.set(&self.options.storage_key, &blob)
    }

    /// Flush the mirror to the backend, applying capacity eviction first.
    ///
    /// Quota failures recover by evicting the oldest half and retrying once;
    /// a second failure clears the cache entirely. Other failures keep the
    /// queue for the next flush. Never surfaces an error.
    fn flush(&self) {
        let mut state = self.lock_state();
        self.flush_locked(&mut state);
    }

    fn flush_locked(&self, state: &mut CacheState) {
        self.ensure_loaded(state);
        if state.pending.is_empty() {
            return;
        }

        let evicted = state.evict_to_capacity(self.options.max_entries);
        if evicted > 0 {
            tracing::debug!("Capacity eviction removed {} entries", evicted);
        }

        match self.persist(state) {
            Ok(()) => {
                tracing::debug!(
                    "Flushed {} pending writes ({} entries persisted)",
                    state.pending.len(),
                    state.entries.len()
                );
                state.pending.clear();
            }
            Err(e) if e.is_quota() => self.recover_from_quota(state, e),
            Err(e) => {
                tracing::warn!("Cache flush failed, keeping queue for retry: {}", e);
            }
        }
    }

    /// Halve-and-retry-then-clear policy for quota failures.
    fn recover_from_quota(&self, state: &mut CacheState, cause: StorageError) {
        let evicted = state.evict_oldest_half();
        tracing::warn!(
            "Storage quota exceeded ({}), evicted oldest {} entries and retrying",
            cause,
            evicted
        );

        match self.persist(state) {
            Ok(()) => state.pending.clear(),
            Err(retry_err) => {
                tracing::warn!(
                    "Retry after quota eviction failed ({}), clearing cache",
                    retry_err
                );
                state.entries.clear();
                state.pending.clear();
                if let Err(e) = self.backend.remove(&self.options.storage_key) {
                    tracing::warn!("Failed to remove cache blob: {}", e);
                }
            }
        }
    }

    /// Remove expired entries and flush if anything changed.
    fn sweep(&self) -> usize {
        let mut state = self.lock_state();
        self.ensure_loaded(&mut state);
        let removed = state.remove_expired(self.clock.now_ms(), self.max_age_ms());
        if removed > 0 {
            self.flush_locked(&mut state);
        }
        removed
    }
}

/// The thumbnail URL cache service.
///
/// Owns the in-memory mirror, the debounced flush timer, and the preload
/// worker pool. Constructed once and shared by handle; dropping the service
/// flushes any pending writes.
pub struct ThumbnailCache {
    inner: Arc<CacheInner>,
    debouncer: Debouncer,
    preloader: Preloader,
}

impl ThumbnailCache {
    /// Create a cache over an injectable backend, clock, and fetcher.
    pub fn new(
        backend: Arc<dyn StorageBackend>,
        clock: Arc<dyn Clock>,
        fetcher: Arc<dyn ThumbnailFetcher>,
        options: CacheOptions,
    ) -> Self {
        let pool_size = options.pool_size;
        let debounce = options.debounce;
        let inner = Arc::new(CacheInner {
            backend,
            clock,
            options,
            state: Mutex::new(CacheState::default()),
        });

        let flush_target = Arc::clone(&inner);
        let debouncer = Debouncer::new(debounce, move || flush_target.flush());
        let preloader = Preloader::new(pool_size, fetcher);

        Self {
            inner,
            debouncer,
            preloader,
        }
    }

    /// Production wiring: file store, wall clock, and HTTP fetcher per config.
    pub fn from_config(config: &Config) -> Self {
        let backend = Arc::new(FileStore::with_quota(
            config.cache_directory(),
            config.cache.max_store_bytes,
        ));
        let fetcher = Arc::new(HttpFetcher::with_timeout(Duration::from_secs(
            config.preload.timeout_secs,
        )));
        Self::new(backend, Arc::new(SystemClock), fetcher, config.cache_options())
    }

    /// Look up a cached URL; expired entries count as misses.
    ///
    /// Synchronous and infallible. An expired hit removes the entry from the
    /// mirror and queues its deletion for the next flush.
    pub fn cached_url(
        &self,
        number: u32,
        folder: &str,
        width: u32,
        height: u32,
    ) -> Option<String> {
        let key = keys::image_key(number, folder, width, height);
        let now = self.inner.clock.now_ms();

        let (result, expired) = {
            let mut state = self.inner.lock_state();
            self.inner.ensure_loaded(&mut state);
            match state.entries.get(&key) {
                Some(entry) if now - entry.timestamp < self.inner.max_age_ms() => {
                    (Some(entry.url.clone()), false)
                }
                Some(_) => {
                    state.entries.remove(&key);
                    state.pending.push_back(PendingOp::Delete(key));
                    (None, true)
                }
                None => (None, false),
            }
        };

        if expired {
            self.debouncer.touch();
        }
        result
    }

    /// Generate and cache the URL for a thumbnail request.
    ///
    /// The entry lands in the mirror synchronously, so a `cached_url` call in
    /// the same tick already sees it; persistence rides the debounced flush.
    /// Re-caching an existing key refreshes its timestamp and URL.
    pub fn cache_url(&self, number: u32, folder: &str, width: u32, height: u32) -> String {
        let key = keys::image_key(number, folder, width, height);
        let url = keys::thumbnail_url(&self.inner.options.base_url, number, folder, width, height);
        let entry = CacheEntry {
            url: url.clone(),
            timestamp: self.inner.clock.now_ms(),
            width,
            height,
        };

        {
            let mut state = self.inner.lock_state();
            self.inner.ensure_loaded(&mut state);
            state.entries.insert(key.clone(), entry);
            state.pending.push_back(PendingOp::Put(key));
        }

        self.debouncer.touch();
        url
    }

    /// Read-through entry point: cached URL or fresh generation + cache write.
    pub fn url_for(&self, number: u32, folder: &str, width: u32, height: u32) -> String {
        self.cached_url(number, folder, width, height)
            .unwrap_or_else(|| self.cache_url(number, folder, width, height))
    }

    /// Resolve the URL, then fetch and decode the image out-of-band.
    ///
    /// The cache write happens synchronously before the job is submitted, so
    /// abandoning the handle never leaves inconsistent state.
    pub fn preload(&self, number: u32, folder: &str, width: u32, height: u32) -> PreloadHandle {
        let url = self.url_for(number, folder, width, height);
        self.preloader.submit(url)
    }

    /// Preload several thumbnails of one folder in bounded chunks.
    ///
    /// Failures are counted, never fatal.
    pub fn preload_batch(
        &self,
        numbers: &[u32],
        folder: &str,
        width: u32,
        height: u32,
    ) -> PreloadReport {
        let mut report = PreloadReport {
            requested: numbers.len(),
            ..Default::default()
        };

        for chunk in numbers.chunks(self.inner.options.batch_size.max(1)) {
            let handles: Vec<PreloadHandle> = chunk
                .iter()
                .map(|&number| self.preload(number, folder, width, height))
                .collect();
            for handle in handles {
                match handle.wait() {
                    Ok(()) => report.succeeded += 1,
                    Err(e) => {
                        tracing::debug!("Preload failed: {}", e);
                        report.failed += 1;
                    }
                }
            }
        }

        report
    }

    /// Run the debounced flush synchronously, disarming any pending timer.
    pub fn flush_now(&self) {
        self.debouncer.cancel();
        self.inner.flush();
    }

    /// Remove expired entries now; returns how many were removed.
    pub fn sweep_now(&self) -> usize {
        self.inner.sweep()
    }

    /// Run expiry sweeps on a fixed interval until the guard is dropped.
    pub fn spawn_sweeper(&self, interval: Duration) -> SweeperGuard {
        SweeperGuard::spawn(Arc::clone(&self.inner), interval)
    }

    /// Wipe the mirror, the queue, and the persisted blob.
    ///
    /// Atomic from the caller's perspective: no cache operation interleaves
    /// between the clear and the next read.
    pub fn clear(&self) {
        self.debouncer.cancel();
        let mut state = self.inner.lock_state();
        state.entries.clear();
        state.pending.clear();
        state.loaded = true;
        if let Err(e) = self.inner.backend.remove(&self.inner.options.storage_key) {
            tracing::warn!("Failed to remove cache blob: {}", e);
        }
    }

    /// Snapshot statistics without mutating state.
    ///
    /// Persisted figures are re-read from the backend on every call so the
    /// view stays meaningful across processes; mirror figures come from the
    /// current in-memory state.
    pub fn stats(&self) -> CacheStats {
        let persisted = self.inner.read_persisted();
        let timestamps: Vec<i64> = persisted.values().map(|e| e.timestamp).collect();

        let state = self.inner.lock_state();
        CacheStats {
            size: persisted.len(),
            oldest_entry: timestamps.iter().copied().min().unwrap_or(0),
            newest_entry: timestamps.iter().copied().max().unwrap_or(0),
            memory_cache_size: state.entries.len(),
            pending_writes: state.pending.len(),
        }
    }

    /// Newest-first view of persisted entries, capped at `limit`.
    pub fn recent_entries(&self, limit: usize) -> Vec<RecentEntry> {
        let now = self.inner.clock.now_ms();
        let mut persisted: Vec<(String, i64)> = self
            .inner
            .read_persisted()
            .into_iter()
            .map(|(key, entry)| (key, entry.timestamp))
            .collect();
        persisted.sort_by_key(|(_, timestamp)| std::cmp::Reverse(*timestamp));

        persisted
            .into_iter()
            .filter_map(|(key, timestamp)| stats::parse_recent(&key, timestamp, now))
            .take(limit)
            .collect()
    }

    /// Watcher over the backend's change counter, for reactive stats views.
    pub fn stats_watcher(&self) -> StatsWatcher {
        StatsWatcher::new(Arc::clone(&self.inner.backend))
    }
}

impl Drop for ThumbnailCache {
    fn drop(&mut self) {
        self.flush_now();
    }
}
