//! Warm command tests against an unreachable backend.
//!
//! Nothing listens on port 1, so every fetch fails fast. Failed preloads
//! must still leave the generated URLs cached.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn gtc(home: &TempDir, cache: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("gtc").unwrap();
    cmd.env("HOME", home.path());
    cmd.env("NO_COLOR", "1");
    cmd.arg("--cache-dir").arg(cache.path());
    cmd.args(["--base-url", "http://127.0.0.1:1"]);
    cmd
}

#[test]
fn warm_reports_failures_against_dead_backend() {
    let home = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();

    gtc(&home, &cache)
        .args(["warm", "beach", "--numbers", "1,2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Warming 2 thumbnails in 'beach'"))
        .stdout(predicate::str::contains("Preloaded 0/2 thumbnails (2 failed)"));
}

#[test]
fn warm_caches_urls_even_when_fetches_fail() {
    let home = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();

    gtc(&home, &cache)
        .args(["warm", "beach", "--numbers", "1,2,3"])
        .assert()
        .success();

    gtc(&home, &cache)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 entries"));
}

#[test]
fn warm_thumb_uses_grid_dimensions() {
    let home = TempDir::new().unwrap();
    let cache = TempDir::new().unwrap();

    gtc(&home, &cache)
        .args(["warm", "beach", "--numbers", "5", "--thumb"])
        .assert()
        .success()
        .stdout(predicate::str::contains("at 150x200"));
}
