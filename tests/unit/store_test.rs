//! Unit tests for the cache service over a file-backed store

use std::fs;
use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;

use gtc::{
    CacheOptions, Clock, FileStore, ManualClock, PreloadError, ThumbnailCache, ThumbnailFetcher,
};

fn noop_fetcher() -> Arc<dyn ThumbnailFetcher> {
    Arc::new(|_: &str| -> Result<(), PreloadError> { Ok(()) })
}

fn options() -> CacheOptions {
    CacheOptions {
        // Long window so only explicit flushes persist
        debounce: Duration::from_secs(60),
        ..CacheOptions::default()
    }
}

fn cache_at(dir: &TempDir, clock: Arc<dyn Clock>) -> ThumbnailCache {
    let backend = Arc::new(FileStore::new(dir.path()));
    ThumbnailCache::new(backend, clock, noop_fetcher(), options())
}

#[test]
fn flush_persists_blob_to_disk() {
    let dir = TempDir::new().unwrap();
    let cache = cache_at(&dir, Arc::new(ManualClock::new(1_000)));

    cache.cache_url(42, "vacation", 150, 200);
    assert!(!dir.path().join("thumbnailCache.json").exists());

    cache.flush_now();
    let blob = fs::read_to_string(dir.path().join("thumbnailCache.json")).unwrap();
    assert!(blob.contains("thumb_vacation_42_150x200"));
}

#[test]
fn second_service_reads_what_the_first_flushed() {
    let dir = TempDir::new().unwrap();

    {
        let cache = cache_at(&dir, Arc::new(ManualClock::new(1_000)));
        cache.cache_url(7, "pets", 300, 400);
        // Drop flushes
    }

    let cache = cache_at(&dir, Arc::new(ManualClock::new(2_000)));
    let url = cache.cached_url(7, "pets", 300, 400).unwrap();
    assert!(url.contains("number=7"));
    assert!(url.contains("folder=pets"));
}

#[test]
fn expiry_applies_across_restarts() {
    let dir = TempDir::new().unwrap();
    let day_ms: i64 = 24 * 60 * 60 * 1000;

    {
        let cache = cache_at(&dir, Arc::new(ManualClock::new(0)));
        cache.cache_url(1, "old", 150, 200);
    }

    // Default max age is 7 days; restart 8 days later
    let cache = cache_at(&dir, Arc::new(ManualClock::new(8 * day_ms)));
    assert!(cache.cached_url(1, "old", 150, 200).is_none());
}

#[test]
fn corrupt_blob_on_disk_degrades_to_empty() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path()).unwrap();
    fs::write(dir.path().join("thumbnailCache.json"), "not json at all").unwrap();

    let cache = cache_at(&dir, Arc::new(ManualClock::new(1_000)));
    assert!(cache.cached_url(1, "any", 150, 200).is_none());

    // The cache stays usable and overwrites the corrupt blob on flush
    cache.cache_url(1, "any", 150, 200);
    cache.flush_now();
    assert!(cache.cached_url(1, "any", 150, 200).is_some());
    let blob = fs::read_to_string(dir.path().join("thumbnailCache.json")).unwrap();
    serde_json::from_str::<serde_json::Value>(&blob).unwrap();
}

#[test]
fn clear_removes_the_blob_file() {
    let dir = TempDir::new().unwrap();
    let cache = cache_at(&dir, Arc::new(ManualClock::new(1_000)));

    cache.cache_url(3, "beach", 150, 200);
    cache.flush_now();
    assert!(dir.path().join("thumbnailCache.json").exists());

    cache.clear();
    assert!(!dir.path().join("thumbnailCache.json").exists());
    assert!(cache.cached_url(3, "beach", 150, 200).is_none());
}

#[test]
fn stats_watcher_sees_another_service_flush() {
    let dir = TempDir::new().unwrap();
    let observer = cache_at(&dir, Arc::new(ManualClock::new(1_000)));
    let mut watcher = observer.stats_watcher();
    assert!(!watcher.changed());

    let writer = cache_at(&dir, Arc::new(ManualClock::new(2_000)));
    writer.cache_url(5, "shared", 150, 200);
    writer.flush_now();

    assert!(watcher.changed());
    assert_eq!(observer.stats().size, 1);
}
