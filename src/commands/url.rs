//! Url command handler

use anyhow::Result;

use gtc::{Config, ThumbnailCache};

/// Resolve a thumbnail URL through the cache and print it.
pub fn handle(
    config: &Config,
    number: u32,
    folder: &str,
    width: Option<u32>,
    height: Option<u32>,
) -> Result<()> {
    let width = width.unwrap_or(config.preload.width);
    let height = height.unwrap_or(config.preload.height);

    let cache = ThumbnailCache::from_config(config);
    let url = cache.url_for(number, folder, width, height);
    println!("{}", url);

    // Dropping the cache flushes the write
    Ok(())
}
