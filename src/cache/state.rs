//! In-memory mirror of the persisted cache blob.

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};

/// One resolved thumbnail URL for a specific (item, dimensions) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub url: String,
    /// Creation/refresh time in epoch milliseconds.
    pub timestamp: i64,
    pub width: u32,
    pub height: u32,
}

/// A queued write awaiting the next flush.
///
/// The flush serializes the whole mirror, so markers only record *that*
/// something changed; last write per key wins by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingOp {
    Put(String),
    Delete(String),
}

/// Mirror state: entry map, pending write queue, and the lazy-load flag.
///
/// All mutation happens under the cache service's mutex; this type itself is
/// plain data plus the eviction/expiry primitives the flush path needs.
#[derive(Debug, Default)]
pub(crate) struct CacheState {
    pub entries: HashMap<String, CacheEntry>,
    pub pending: VecDeque<PendingOp>,
    pub loaded: bool,
}

impl CacheState {
    /// Remove the oldest entries until at most `max_entries` remain.
    ///
    /// Returns the number of evicted entries.
    pub fn evict_to_capacity(&mut self, max_entries: usize) -> usize {
        if self.entries.len() <= max_entries {
            return 0;
        }
        let excess = self.entries.len() - max_entries;
        self.evict_oldest(excess)
    }

    /// Remove the oldest half of the entries (quota recovery).
    pub fn evict_oldest_half(&mut self) -> usize {
        let half = (self.entries.len() + 1) / 2;
        self.evict_oldest(half)
    }

    fn evict_oldest(&mut self, count: usize) -> usize {
        let mut by_age: Vec<(String, i64)> = self
            .entries
            .iter()
            .map(|(key, entry)| (key.clone(), entry.timestamp))
            .collect();
        by_age.sort_by_key(|(_, timestamp)| *timestamp);

        let mut removed = 0;
        for (key, _) in by_age.into_iter().take(count) {
            self.entries.remove(&key);
            removed += 1;
        }
        removed
    }

    /// Remove every entry older than `max_age_ms`, queueing delete markers.
    ///
    /// Returns the number of removed entries.
    pub fn remove_expired(&mut self, now_ms: i64, max_age_ms: i64) -> usize {
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| now_ms - entry.timestamp >= max_age_ms)
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.entries.remove(key);
            self.pending.push_back(PendingOp::Delete(key.clone()));
        }
        expired.len()
    }
}
