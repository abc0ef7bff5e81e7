//! Gallery Thumbnail Cache (GTC) - CLI entry point

use anyhow::Result;
use clap::Parser;

use gtc::cli::{Cli, Commands, ConfigCommands};
use gtc::Config;

mod commands;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(cache_dir) = &cli.cache_dir {
        config.cache.directory = cache_dir.clone();
    }
    if let Some(base_url) = &cli.base_url {
        config.server.base_url = base_url.clone();
    }

    match cli.command {
        Commands::Url {
            number,
            folder,
            width,
            height,
        } => commands::url::handle(&config, number, &folder, width, height),
        Commands::Warm {
            folder,
            numbers,
            thumb,
        } => commands::warm::handle(&config, &folder, &numbers, thumb),
        Commands::Stats { watch } => commands::stats::handle(&config, watch),
        Commands::List { limit } => commands::list::handle(&config, limit),
        Commands::Sweep => commands::sweep::handle(&config),
        Commands::Clear { yes } => commands::clear::handle(&config, yes),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::show(&config),
            ConfigCommands::Edit => commands::config::edit(),
            ConfigCommands::Path => commands::config::path(),
        },
        Commands::Completions { shell } => commands::completions::handle(shell),
    }
}
