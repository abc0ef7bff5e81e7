//! List command handler

use anyhow::Result;

use gtc::{Config, ThumbnailCache};

/// List recently cached thumbnails, newest first.
pub fn handle(config: &Config, limit: usize) -> Result<()> {
    let cache = ThumbnailCache::from_config(config);
    let entries = cache.recent_entries(limit);

    if entries.is_empty() {
        println!("No cached thumbnails.");
        return Ok(());
    }

    let stats = cache.stats();
    println!("Cached thumbnails: {} total (showing {})", stats.size, entries.len());
    println!();

    println!("  #  | Age   | Size     | Folder              | Photo");
    println!("-----+-------+----------+---------------------+-------");
    for (i, entry) in entries.iter().enumerate() {
        println!(
            "{:>3}  | {} | {:>4}x{:<3} | {:19} | {}",
            i + 1,
            entry.format_age(),
            entry.width,
            entry.height,
            truncate_string(&entry.folder, 19),
            entry.number
        );
    }

    Ok(())
}

/// Truncate a string to a maximum length, adding ellipsis if needed.
fn truncate_string(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    } else {
        s.chars().take(max_len).collect()
    }
}
