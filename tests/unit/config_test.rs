//! Unit tests for config module

use std::time::Duration;

use gtc::Config;

#[test]
fn default_config_has_expected_values() {
    let config = Config::default();
    assert_eq!(config.server.base_url, "http://localhost:8000");
    assert_eq!(config.cache.directory, "~/.cache/gtc");
    assert_eq!(config.cache.max_entries, 2000);
    assert_eq!(config.cache.max_age_days, 7);
    assert_eq!(config.cache.debounce_ms, 100);
    assert_eq!(config.cache.sweep_interval_minutes, 60);
    assert_eq!(config.cache.max_store_bytes, 5 * 1024 * 1024);
    // Preload defaults
    assert_eq!(config.preload.width, 300);
    assert_eq!(config.preload.height, 400);
    assert_eq!(config.preload.thumb_width, 150);
    assert_eq!(config.preload.thumb_height, 200);
    assert_eq!(config.preload.batch_size, 5);
    assert_eq!(config.preload.pool_size, 4);
    assert_eq!(config.preload.timeout_secs, 10);
}

#[test]
fn config_serialization_roundtrip() {
    let config = Config::default();
    let toml_str = toml::to_string(&config).unwrap();
    let parsed: Config = toml::from_str(&toml_str).unwrap();
    assert_eq!(parsed.server.base_url, config.server.base_url);
    assert_eq!(parsed.cache.max_entries, config.cache.max_entries);
    assert_eq!(parsed.preload.batch_size, config.preload.batch_size);
}

#[test]
fn server_config_parses_from_toml() {
    let toml_str = r#"
[server]
base_url = "https://gallery.example.com"
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.server.base_url, "https://gallery.example.com");
}

#[test]
fn cache_config_defaults_when_missing() {
    let toml_str = r#"
[server]
base_url = "https://gallery.example.com"
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.cache.max_entries, 2000);
    assert_eq!(config.cache.debounce_ms, 100);
}

#[test]
fn partial_cache_section_fills_remaining_defaults() {
    let toml_str = r#"
[cache]
max_entries = 50
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.cache.max_entries, 50);
    assert_eq!(config.cache.max_age_days, 7);
    assert_eq!(config.cache.directory, "~/.cache/gtc");
}

#[test]
fn cache_directory_expands_tilde() {
    let config = Config::default();
    let path = config.cache_directory();
    assert!(!path.to_string_lossy().contains('~'));
    assert!(path.to_string_lossy().contains(".cache"));
}

#[test]
fn cache_directory_handles_absolute_path() {
    let mut config = Config::default();
    config.cache.directory = "/var/cache/gtc".to_string();
    assert_eq!(
        config.cache_directory(),
        std::path::PathBuf::from("/var/cache/gtc")
    );
}

#[test]
fn cache_options_derive_from_config() {
    let mut config = Config::default();
    config.server.base_url = "http://gallery:9000".to_string();
    config.cache.max_entries = 10;
    config.cache.max_age_days = 1;
    config.cache.debounce_ms = 250;

    let options = config.cache_options();
    assert_eq!(options.base_url, "http://gallery:9000");
    assert_eq!(options.max_entries, 10);
    assert_eq!(options.max_age, Duration::from_secs(24 * 60 * 60));
    assert_eq!(options.debounce, Duration::from_millis(250));
    assert_eq!(options.batch_size, config.preload.batch_size);
    assert_eq!(options.pool_size, config.preload.pool_size);
}

#[test]
fn sweep_interval_converts_minutes() {
    let mut config = Config::default();
    config.cache.sweep_interval_minutes = 30;
    assert_eq!(config.sweep_interval(), Duration::from_secs(30 * 60));
}

#[test]
fn config_path_returns_valid_path() {
    let path = Config::config_path().unwrap();
    assert!(path.to_string_lossy().contains("config.toml"));
    assert!(path.to_string_lossy().contains("gtc"));
}

#[test]
fn config_dir_returns_valid_path() {
    let dir = Config::config_dir().unwrap();
    assert!(dir.to_string_lossy().contains("gtc"));
}
