//! Configuration management for GTC

mod io;
mod types;

pub use types::*;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use crate::cache::CacheOptions;

impl Config {
    /// Get the config file path (~/.config/gtc/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        io::config_path()
    }

    /// Get the config directory path (~/.config/gtc)
    pub fn config_dir() -> Result<PathBuf> {
        io::config_dir()
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> Result<Self> {
        io::load()
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        io::save(self)
    }

    /// Expand ~ in the cache directory path
    pub fn cache_directory(&self) -> PathBuf {
        let dir = &self.cache.directory;
        if let Some(stripped) = dir.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        }
        PathBuf::from(dir)
    }

    /// Cache service options derived from this configuration
    pub fn cache_options(&self) -> CacheOptions {
        CacheOptions {
            base_url: self.server.base_url.clone(),
            max_entries: self.cache.max_entries,
            max_age: Duration::from_secs(self.cache.max_age_days as u64 * 24 * 60 * 60),
            debounce: Duration::from_millis(self.cache.debounce_ms),
            batch_size: self.preload.batch_size,
            pool_size: self.preload.pool_size,
            ..CacheOptions::default()
        }
    }

    /// Interval between background expiry sweeps
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.cache.sweep_interval_minutes * 60)
    }
}
