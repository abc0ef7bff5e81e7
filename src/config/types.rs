//! Configuration type definitions and defaults

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub preload: PreloadConfig,
}

/// Gallery backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the gallery backend serving thumbnail downloads
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

pub fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Cache storage and lifecycle configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Directory holding the persisted cache blob
    #[serde(default = "default_directory")]
    pub directory: String,
    /// Maximum entry count after a flush
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    /// Entries older than this are invalid on read
    #[serde(default = "default_max_age_days")]
    pub max_age_days: u32,
    /// Debounce window for batched persistence
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Interval between background expiry sweeps
    #[serde(default = "default_sweep_interval_minutes")]
    pub sweep_interval_minutes: u64,
    /// Byte quota for the persisted blob
    #[serde(default = "default_max_store_bytes")]
    pub max_store_bytes: usize,
}

pub fn default_directory() -> String {
    "~/.cache/gtc".to_string()
}

pub fn default_max_entries() -> usize {
    2000
}

pub fn default_max_age_days() -> u32 {
    7
}

pub fn default_debounce_ms() -> u64 {
    100
}

pub fn default_sweep_interval_minutes() -> u64 {
    60
}

pub fn default_max_store_bytes() -> usize {
    5 * 1024 * 1024
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            max_entries: default_max_entries(),
            max_age_days: default_max_age_days(),
            debounce_ms: default_debounce_ms(),
            sweep_interval_minutes: default_sweep_interval_minutes(),
            max_store_bytes: default_max_store_bytes(),
        }
    }
}

/// Preload dimensions and concurrency configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreloadConfig {
    /// Full-size preload width
    #[serde(default = "default_width")]
    pub width: u32,
    /// Full-size preload height
    #[serde(default = "default_height")]
    pub height: u32,
    /// Grid thumbnail width
    #[serde(default = "default_thumb_width")]
    pub thumb_width: u32,
    /// Grid thumbnail height
    #[serde(default = "default_thumb_height")]
    pub thumb_height: u32,
    /// Thumbnails fetched concurrently per batch chunk
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Preload worker pool size
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

pub fn default_width() -> u32 {
    300
}

pub fn default_height() -> u32 {
    400
}

pub fn default_thumb_width() -> u32 {
    150
}

pub fn default_thumb_height() -> u32 {
    200
}

pub fn default_batch_size() -> usize {
    5
}

pub fn default_pool_size() -> usize {
    4
}

pub fn default_timeout_secs() -> u64 {
    10
}

impl Default for PreloadConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            thumb_width: default_thumb_width(),
            thumb_height: default_thumb_height(),
            batch_size: default_batch_size(),
            pool_size: default_pool_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
