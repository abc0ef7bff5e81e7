//! Warm command handler

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;

use gtc::{Config, PreloadReport, ThumbnailCache};

/// Preload a folder's thumbnails in bounded batches.
///
/// Ctrl-C stops between batches; whatever was cached so far is flushed
/// before exiting.
pub fn handle(config: &Config, folder: &str, numbers: &[u32], thumb: bool) -> Result<()> {
    let (width, height) = if thumb {
        (config.preload.thumb_width, config.preload.thumb_height)
    } else {
        (config.preload.width, config.preload.height)
    };

    let running = Arc::new(AtomicBool::new(true));
    let running_flag = Arc::clone(&running);
    ctrlc::set_handler(move || {
        running_flag.store(false, Ordering::SeqCst);
    })?;

    let cache = ThumbnailCache::from_config(config);

    println!(
        "Warming {} thumbnails in '{}' at {}x{}...",
        numbers.len(),
        folder,
        width,
        height
    );

    let mut report = PreloadReport::default();
    for chunk in numbers.chunks(config.preload.batch_size.max(1)) {
        if !running.load(Ordering::SeqCst) {
            println!("Interrupted, flushing cache...");
            break;
        }
        let chunk_report = cache.preload_batch(chunk, folder, width, height);
        report.requested += chunk_report.requested;
        report.succeeded += chunk_report.succeeded;
        report.failed += chunk_report.failed;
    }

    cache.flush_now();
    println!("{}", report.summary());
    Ok(())
}
