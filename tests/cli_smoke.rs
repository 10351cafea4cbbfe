#![allow(clippy::unwrap_used)]
//! CLI smoke tests against the compiled binary.
//!
//! Every test points `XDG_CONFIG_HOME` and `XDG_CACHE_HOME` at a temporary
//! directory so the user's own configuration is never read.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const URL: &str = "https://example.com/a";
const URL_KEY: &str = "https___example_com_a";

#[allow(deprecated)]
fn langtutor(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("langtutor").unwrap();
    cmd.env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("XDG_CACHE_HOME", home.path().join("cache"))
        .env_remove("LANGTUTOR_LOG");
    cmd
}

fn write_config(home: &TempDir, extra: &str) {
    let dir = home.path().join("config").join("langtutor");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("config.toml"),
        format!(
            "[langtutor]\n\
             provider = \"local\"\n\
             model = \"test-model\"\n\
             replay_delay_ms = 0\n\
             {extra}\n\
             [providers.local]\n\
             endpoint = \"http://127.0.0.1:9\"\n"
        ),
    )
    .unwrap();
}

#[test]
fn test_help_displays_usage() {
    let home = TempDir::new().unwrap();
    langtutor(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("translate"))
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("--provider"))
        .stdout(predicate::str::contains("--no-prefill"));
}

#[test]
fn test_version_displays_version() {
    let home = TempDir::new().unwrap();
    langtutor(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_translate_help_shows_output_flag() {
    let home = TempDir::new().unwrap();
    langtutor(&home)
        .args(["translate", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("<URL>"));
}

#[test]
fn test_missing_subcommand_fails() {
    let home = TempDir::new().unwrap();
    langtutor(&home).assert().failure();
}

#[test]
fn test_translate_without_config_reports_missing_provider() {
    let home = TempDir::new().unwrap();
    langtutor(&home)
        .args(["translate", URL])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'provider'"));
}

#[test]
fn test_translate_replays_cached_article() {
    let home = TempDir::new().unwrap();
    write_config(&home, "");
    let cache = home.path().join("cache").join("langtutor");
    fs::create_dir_all(&cache).unwrap();
    fs::write(
        cache.join(URL_KEY),
        "[\"Der Hund bellt.\",\"The dog barks.\"]\n[\"Die Katze schläft.\",\"The cat sleeps.\"]\n",
    )
    .unwrap();

    langtutor(&home)
        .args(["translate", URL])
        .assert()
        .success()
        .stdout(predicate::eq(
            "[\"Der Hund bellt.\",\"The dog barks.\"]\n[\"Die Katze schläft.\",\"The cat sleeps.\"]\n",
        ));
}

#[test]
fn test_translate_writes_output_file_from_cache() {
    let home = TempDir::new().unwrap();
    let cache = home.path().join("custom-cache");
    fs::create_dir_all(&cache).unwrap();
    write_config(&home, "");
    fs::write(cache.join(URL_KEY), "[\"Hola.\",\"Hello.\"]\n").unwrap();

    let output = home.path().join("article.jsonl");
    langtutor(&home)
        .args(["translate", URL, "--cache-dir"])
        .arg(&cache)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "[\"Hola.\",\"Hello.\"]\n"
    );
}

#[cfg(unix)]
#[test]
fn test_translate_reports_extraction_failure() {
    let home = TempDir::new().unwrap();
    write_config(
        &home,
        "extractor = [\"sh\", \"-c\", \"echo unreachable >&2; exit 3\", \"sh\"]",
    );

    langtutor(&home)
        .args(["translate", URL, "--no-cache"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("extraction failed"))
        .stderr(predicate::str::contains("unreachable"));
}
