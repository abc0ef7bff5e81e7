//! Clear command handler

use std::io::{self, BufRead, Write};

use anyhow::Result;

use gtc::{Config, ThumbnailCache};

/// Clear the entire cache, confirming first on an interactive terminal.
pub fn handle(config: &Config, yes: bool) -> Result<()> {
    let cache = ThumbnailCache::from_config(config);
    let stats = cache.stats();

    if stats.size == 0 && stats.memory_cache_size == 0 {
        println!("Cache is already empty.");
        return Ok(());
    }

    if !yes && atty::is(atty::Stream::Stdin) {
        print!(
            "Clear {} cached thumbnails (~{})? [y/N]: ",
            stats.size,
            stats.approx_size_human()
        );
        io::stdout().flush()?;

        let mut confirm = String::new();
        io::stdin().lock().read_line(&mut confirm)?;
        if confirm.trim().to_lowercase() != "y" {
            println!("Cancelled.");
            return Ok(());
        }
    }

    cache.clear();
    println!("Cache cleared.");
    Ok(())
}
