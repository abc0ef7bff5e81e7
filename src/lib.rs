//! Gallery Thumbnail Cache (GTC) Library
//!
//! A Rust library for memoizing gallery thumbnail URLs with batched
//! persistence, size-bounded eviction, and periodic expiry sweeps.

pub mod cache;
pub mod cli;
pub mod clock;
pub mod config;
pub mod keys;
pub mod preload;
pub mod store;

pub use cache::{CacheOptions, CacheStats, RecentEntry, StatsWatcher, SweeperGuard, ThumbnailCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use keys::ParsedKey;
pub use preload::{PreloadError, PreloadHandle, PreloadReport, Preloader, ThumbnailFetcher};
pub use store::{FileStore, MemoryStore, StorageBackend, StorageError};
