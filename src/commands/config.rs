//! Config command handlers

use anyhow::Result;

use gtc::Config;

/// Print the effective configuration as TOML.
pub fn show(config: &Config) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{}", toml_str);
    Ok(())
}

/// Open the configuration file in $EDITOR.
pub fn edit() -> Result<()> {
    let config_path = Config::config_path()?;

    // Ensure config exists
    if !config_path.exists() {
        let config = Config::default();
        config.save()?;
    }

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    println!("Opening {} with {}", config_path.display(), editor);

    std::process::Command::new(&editor)
        .arg(&config_path)
        .status()
        .map_err(|e| anyhow::anyhow!("Failed to open editor: {}", e))?;

    Ok(())
}

/// Print the configuration file path.
pub fn path() -> Result<()> {
    println!("{}", Config::config_path()?.display());
    Ok(())
}
