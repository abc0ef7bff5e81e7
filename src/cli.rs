//! CLI definitions for GTC
//!
//! This module contains the clap CLI structure definitions, separated from main.rs
//! so they can be accessed by xtask for documentation generation (man pages, markdown).

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};
use clap_complete::Shell as CompletionShell;

/// Build clap styles using our theme colors.
///
/// - Green: headers, usage, command names (accent color)
/// - White: descriptions, placeholders (renders as light gray on dark terminals)
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Parser)]
#[command(name = "gtc")]
#[command(about = "[ Gallery Thumbnail Cache ] - cache, warm and inspect gallery thumbnail URLs")]
#[command(
    long_about = "Gallery Thumbnail Cache (GTC) - memoize gallery thumbnail URLs locally.

GTC keeps a size-bounded cache of generated thumbnail URLs under
~/.cache/gtc/ so repeated gallery browsing never rebuilds the same URL
twice. Writes are batched, old entries expire after 7 days, and warming
a folder preloads its thumbnails so the backend generates renditions
ahead of browsing.

QUICK START:
    gtc url 42 vacation            Resolve a thumbnail URL
    gtc warm vacation              Preload a folder's thumbnails
    gtc stats                      Check cache usage
    gtc clear                      Wipe the cache

For more information, see: https://github.com/simon/gallery-thumbnail-cache"
)]
#[command(version)]
#[command(styles = build_cli_styles())]
pub struct Cli {
    /// Override the cache directory (defaults to [cache].directory)
    #[arg(long, global = true, help = "Cache directory override")]
    pub cache_dir: Option<String>,

    /// Override the backend base URL (defaults to [server].base_url)
    #[arg(long, global = true, help = "Backend base URL override")]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve and print a thumbnail URL
    #[command(long_about = "Resolve a thumbnail URL, reading through the cache.

A cache hit returns the stored URL; a miss generates the URL, stores it,
and persists the write in the next batched flush.

EXAMPLES:
    gtc url 42 vacation                  Resolve with configured dimensions
    gtc url 42 vacation --width 150 --height 200
    gtc url 1 pets --base-url http://gallery.local:8000")]
    Url {
        /// Photo number within the folder
        #[arg(help = "Photo number within the folder")]
        number: u32,
        /// Folder name
        #[arg(help = "Gallery folder name")]
        folder: String,
        /// Thumbnail width (overrides config)
        #[arg(long, help = "Thumbnail width in pixels")]
        width: Option<u32>,
        /// Thumbnail height (overrides config)
        #[arg(long, help = "Thumbnail height in pixels")]
        height: Option<u32>,
    },

    /// Preload a folder's thumbnails
    #[command(long_about = "Preload thumbnails so the backend generates renditions ahead of
browsing. URLs are cached first, then fetched and decoded in bounded
batches; failures are counted but never abort the run.

EXAMPLES:
    gtc warm vacation                    Warm the folder preview (numbers 1-3)
    gtc warm vacation --numbers 1,2,3,4,5,6
    gtc warm vacation --thumb            Use the 150x200 grid variant")]
    Warm {
        /// Folder name
        #[arg(help = "Gallery folder name")]
        folder: String,
        /// Photo numbers to preload (comma-separated)
        #[arg(
            long,
            value_delimiter = ',',
            default_value = "1,2,3",
            help = "Photo numbers to preload"
        )]
        numbers: Vec<u32>,
        /// Use grid thumbnail dimensions instead of full preload dimensions
        #[arg(long, help = "Use grid thumbnail dimensions (150x200)")]
        thumb: bool,
    },

    /// Show cache statistics
    #[command(long_about = "Display cache statistics: persisted entry count, approximate
on-disk size, in-memory mirror size, and pending writes.

EXAMPLES:
    gtc stats
    gtc stats --watch        Re-print whenever the cache blob changes

OUTPUT:
    Thumbnail Cache: 120 entries (~23.4 KiB)
       Memory: 120 entries, 0 pending writes
       Oldest: 2026-08-16 10:00:12
       Newest: 2026-08-23 09:41:55")]
    Stats {
        /// Watch for changes (including writes from other processes)
        #[arg(long, help = "Re-print stats whenever the cache changes")]
        watch: bool,
    },

    /// List the most recently cached thumbnails
    #[command(
        visible_alias = "ls",
        long_about = "List recently cached thumbnails, newest first.

EXAMPLES:
    gtc list                 Show the 6 most recent entries
    gtc ls --limit 20        Show up to 20 entries"
    )]
    List {
        /// Maximum number of entries to show
        #[arg(long, default_value_t = 6, help = "Maximum entries to show")]
        limit: usize,
    },

    /// Remove expired cache entries now
    #[command(long_about = "Run an expiry sweep immediately, removing every entry older than
the configured max age (default: 7 days) and persisting the result.

EXAMPLE:
    gtc sweep")]
    Sweep,

    /// Clear the entire cache
    #[command(long_about = "Wipe the in-memory mirror, any pending writes, and the persisted
cache blob. Asks for confirmation when run interactively.

EXAMPLES:
    gtc clear                Interactive confirm
    gtc clear --yes          Skip confirmation (for scripts)")]
    Clear {
        /// Skip the confirmation prompt
        #[arg(long, short = 'y', help = "Skip confirmation prompt")]
        yes: bool,
    },

    /// Configuration management
    #[command(
        subcommand,
        long_about = "View and edit the GTC configuration file.

Configuration is stored in ~/.config/gtc/config.toml and includes the
backend base URL, cache limits, and preload dimensions.

EXAMPLES:
    gtc config show          Display current configuration
    gtc config edit          Open config in $EDITOR
    gtc config path          Print the config file location"
    )]
    Config(ConfigCommands),

    /// Generate shell completions
    #[command(long_about = "Generate a completion script for your shell.

EXAMPLES:
    gtc completions zsh > ~/.zfunc/_gtc
    gtc completions bash > /etc/bash_completion.d/gtc")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum, help = "Shell to generate completions for")]
        shell: CompletionShell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration as TOML
    #[command(long_about = "Display the current configuration in TOML format.

EXAMPLE:
    gtc config show")]
    Show,
    /// Open configuration file in your default editor
    #[command(long_about = "Open the configuration file in your default editor.

Uses the $EDITOR environment variable (defaults to 'vi').
Config file location: ~/.config/gtc/config.toml

EXAMPLE:
    gtc config edit
    EDITOR=nano gtc config edit")]
    Edit,
    /// Print the config file path
    #[command(long_about = "Print the configuration file path.

EXAMPLE:
    gtc config path")]
    Path,
}
