//! End-to-end tests running the gtc binary against a temporary cache dir.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Build a gtc invocation isolated to a temporary home and cache directory.
fn gtc(home: &TempDir, cache: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("gtc").unwrap();
    cmd.env("HOME", home.path());
    cmd.env("NO_COLOR", "1");
    cmd.arg("--cache-dir").arg(cache.path());
    cmd
}

#[test]
fn url_prints_the_backend_download_url() {
    let home = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();

    gtc(&home, &cache)
        .args(["url", "42", "vacation", "--width", "150", "--height", "200"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "http://localhost:8000/folders/thumbnail/folder/download?number=42&folder=vacation&width=150&height=200",
        ));
}

#[test]
fn url_respects_base_url_override() {
    let home = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();

    gtc(&home, &cache)
        .args(["--base-url", "https://gallery.example.com"])
        .args(["url", "1", "pets"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "https://gallery.example.com/folders/thumbnail/",
        ));
}

#[test]
fn url_persists_so_stats_sees_the_entry() {
    let home = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();

    gtc(&home, &cache)
        .args(["url", "42", "vacation"])
        .assert()
        .success();

    gtc(&home, &cache)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 entries"));
}

#[test]
fn stats_on_empty_cache() {
    let home = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();

    gtc(&home, &cache)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 entries"));
}

#[test]
fn list_shows_cached_thumbnails_newest_first() {
    let home = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();

    gtc(&home, &cache)
        .args(["url", "42", "vacation"])
        .assert()
        .success();
    gtc(&home, &cache)
        .args(["url", "7", "beach"])
        .assert()
        .success();

    let assert = gtc(&home, &cache).arg("list").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(stdout.contains("vacation"));
    assert!(stdout.contains("beach"));
    // Newest entry is listed first
    let beach_pos = stdout.find("beach").unwrap();
    let vacation_pos = stdout.find("vacation").unwrap();
    assert!(beach_pos < vacation_pos);
}

#[test]
fn list_on_empty_cache() {
    let home = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();

    gtc(&home, &cache)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No cached thumbnails."));
}

#[test]
fn list_accepts_ls_alias() {
    let home = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();

    gtc(&home, &cache)
        .arg("ls")
        .assert()
        .success()
        .stdout(predicate::str::contains("No cached thumbnails."));
}

#[test]
fn sweep_with_nothing_expired() {
    let home = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();

    gtc(&home, &cache)
        .args(["url", "1", "pets"])
        .assert()
        .success();

    gtc(&home, &cache)
        .arg("sweep")
        .assert()
        .success()
        .stdout(predicate::str::contains("No expired entries."))
        .stdout(predicate::str::contains("1 entries"));
}

#[test]
fn clear_empties_the_cache() {
    let home = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();

    gtc(&home, &cache)
        .args(["url", "42", "vacation"])
        .assert()
        .success();

    gtc(&home, &cache)
        .args(["clear", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cache cleared."));

    gtc(&home, &cache)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 entries"));
}

#[test]
fn clear_on_empty_cache_is_a_noop() {
    let home = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();

    gtc(&home, &cache)
        .args(["clear", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cache is already empty."));
}

#[test]
fn config_path_points_at_config_toml() {
    let home = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();

    gtc(&home, &cache)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn config_show_prints_effective_toml() {
    let home = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();

    gtc(&home, &cache)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[server]"))
        .stdout(predicate::str::contains("[cache]"))
        .stdout(predicate::str::contains("max_entries = 2000"));
}

#[test]
fn config_show_reflects_cache_dir_override() {
    let home = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();

    gtc(&home, &cache)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            cache.path().to_string_lossy().as_ref(),
        ));
}

#[test]
fn completions_generate_for_bash() {
    let home = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();

    gtc(&home, &cache)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gtc"));
}

#[test]
fn help_lists_all_subcommands() {
    let home = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();

    let assert = gtc(&home, &cache).arg("--help").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    for subcommand in ["url", "warm", "stats", "list", "sweep", "clear", "config"] {
        assert!(stdout.contains(subcommand), "missing {}", subcommand);
    }
}

#[test]
fn unknown_subcommand_fails() {
    let home = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();

    gtc(&home, &cache).arg("frobnicate").assert().failure();
}
