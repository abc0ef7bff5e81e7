//! Stats command handler

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use gtc::{Config, ThumbnailCache};

/// Poll interval for `--watch` mode.
const WATCH_POLL: Duration = Duration::from_millis(500);

/// Print cache statistics, optionally watching for changes.
pub fn handle(config: &Config, watch: bool) -> Result<()> {
    let cache = ThumbnailCache::from_config(config);
    println!("{}", cache.stats().summary());

    if !watch {
        return Ok(());
    }

    let running = Arc::new(AtomicBool::new(true));
    let running_flag = Arc::clone(&running);
    ctrlc::set_handler(move || {
        running_flag.store(false, Ordering::SeqCst);
    })?;

    println!("\nWatching for changes (Ctrl-C to stop)...");
    // Long-running session: run the periodic expiry sweep while we watch
    let _sweeper = cache.spawn_sweeper(config.sweep_interval());
    let mut watcher = cache.stats_watcher();
    while running.load(Ordering::SeqCst) {
        std::thread::sleep(WATCH_POLL);
        if watcher.changed() {
            println!();
            println!("{}", cache.stats().summary());
        }
    }

    Ok(())
}
