//! Sweep command handler

use anyhow::Result;

use gtc::{Config, ThumbnailCache};

/// Run an expiry sweep immediately.
pub fn handle(config: &Config) -> Result<()> {
    let cache = ThumbnailCache::from_config(config);
    let removed = cache.sweep_now();

    if removed == 0 {
        println!("No expired entries.");
    } else {
        println!("Removed {} expired entries.", removed);
    }

    let stats = cache.stats();
    println!("Cache now holds {} entries.", stats.size);
    Ok(())
}
