//! Cache statistics and the cross-process stats watcher.

use std::sync::Arc;

use humansize::{format_size, BINARY};

use crate::keys::ParsedKey;
use crate::store::StorageBackend;

/// Rough serialized footprint of one entry, for the on-disk size estimate.
const APPROX_ENTRY_BYTES: u64 = 200;

/// Read-only snapshot over the persisted blob and the in-memory mirror.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Entry count in the persisted blob.
    pub size: usize,
    /// Oldest persisted timestamp (epoch ms), 0 when empty.
    pub oldest_entry: i64,
    /// Newest persisted timestamp (epoch ms), 0 when empty.
    pub newest_entry: i64,
    /// Entry count in the in-memory mirror.
    pub memory_cache_size: usize,
    /// Queued writes awaiting the next flush.
    pub pending_writes: usize,
}

impl CacheStats {
    /// Approximate on-disk size of the persisted blob.
    pub fn approx_size_human(&self) -> String {
        format_size(self.size as u64 * APPROX_ENTRY_BYTES, BINARY)
    }

    /// Format a summary for display.
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Thumbnail Cache: {} entries (~{})\n   Memory: {} entries, {} pending writes",
            self.size,
            self.approx_size_human(),
            self.memory_cache_size,
            self.pending_writes
        );

        if self.size > 0 {
            summary.push_str(&format!(
                "\n   Oldest: {}\n   Newest: {}",
                format_timestamp(self.oldest_entry),
                format_timestamp(self.newest_entry)
            ));
        }

        summary
    }
}

fn format_timestamp(epoch_ms: i64) -> String {
    match chrono::DateTime::from_timestamp_millis(epoch_ms) {
        Some(ts) => ts.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => epoch_ms.to_string(),
    }
}

/// One persisted entry in the newest-first introspection view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentEntry {
    pub folder: String,
    pub number: u32,
    pub width: u32,
    pub height: u32,
    /// Milliseconds since the entry was written.
    pub age_ms: i64,
}

impl RecentEntry {
    /// Smart age format: minutes under an hour, hours under a day, else days.
    pub fn format_age(&self) -> String {
        let minutes = self.age_ms / 60_000;
        let hours = minutes / 60;
        let days = hours / 24;
        if hours == 0 {
            format!("{:>4}m", minutes)
        } else if days == 0 {
            format!("{:>4}h", hours)
        } else {
            format!("{:>4}d", days)
        }
    }
}

pub(crate) fn parse_recent(key: &str, timestamp: i64, now_ms: i64) -> Option<RecentEntry> {
    let parsed = ParsedKey::parse(key)?;
    Some(RecentEntry {
        folder: parsed.folder,
        number: parsed.number,
        width: parsed.width,
        height: parsed.height,
        age_ms: (now_ms - timestamp).max(0),
    })
}

/// Detects persisted-blob changes made by this or another process.
///
/// Polls the backend's version counter; a change means the stats view should
/// be re-read. The in-memory mirror is never hot-reloaded from here.
pub struct StatsWatcher {
    backend: Arc<dyn StorageBackend>,
    last_version: u64,
}

impl StatsWatcher {
    pub(crate) fn new(backend: Arc<dyn StorageBackend>) -> Self {
        let last_version = backend.version();
        Self {
            backend,
            last_version,
        }
    }

    /// Whether the store changed since the last poll.
    pub fn changed(&mut self) -> bool {
        let current = self.backend.version();
        if current != self.last_version {
            self.last_version = current;
            true
        } else {
            false
        }
    }
}
