//! Smoke tests for the harvester CLI
//!
//! Each test runs the binary with a cleared environment inside its own
//! temp directory so no stray `.env` or exported variable leaks in.

#![allow(deprecated)] // Allow deprecated Command::cargo_bin until assert_cmd is updated
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const RESOURCES_PAGE: &str = r#"<html><body>
  <p class="name">Pre-Read Materials</p>
  <div class="fileBox">
    <div class="fileContentCol"><p>Case study: Nimbus</p><span>03 Feb 2025</span></div>
  </div>
  <div class="player-container"></div>
</body></html>"#;

/// Get a command for the harvester binary, isolated in `dir`
fn harvester(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("harvester").expect("harvester binary should exist");
    cmd.env_clear().current_dir(dir.path());
    cmd
}

fn workdir() -> TempDir {
    TempDir::new().expect("temp dir")
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    harvester(&workdir())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_flag() {
    harvester(&workdir())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("selectors"))
        .stdout(predicate::str::contains("resolve"));
}

#[test]
fn test_missing_subcommand_fails() {
    harvester(&workdir()).assert().failure();
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn test_config_defaults() {
    harvester(&workdir())
        .args(["config", "--color", "never"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Settings ==="))
        .stdout(predicate::str::contains("= 30s"))
        .stdout(predicate::str::contains("/tmp/harvester_downloads"));
}

#[test]
fn test_config_env_override() {
    harvester(&workdir())
        .args(["config", "--format", "json"])
        .env("HARVESTER_WAIT_TIMEOUT", "45")
        .env("SELENIUM_HEADLESS", "no")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"wait_timeout\": 45"))
        .stdout(predicate::str::contains("\"selenium_headless\": false"));
}

#[test]
fn test_config_invalid_value_fails_fast() {
    harvester(&workdir())
        .arg("config")
        .env("HARVESTER_PAGE_LOAD_TIMEOUT", "notanumber")
        .assert()
        .failure()
        .stderr(predicate::str::contains("HARVESTER_PAGE_LOAD_TIMEOUT"))
        .stderr(predicate::str::contains("notanumber"));
}

#[test]
fn test_config_reads_env_file() {
    let dir = workdir();
    fs::write(
        dir.path().join(".env"),
        "HARVESTER_WAIT_TIMEOUT=12\nHARVESTER_RESOURCE_BATCH_SIZE=7\n",
    )
    .unwrap();

    harvester(&dir)
        .args(["config", "--format", "json"])
        .env("HARVESTER_WAIT_TIMEOUT", "99")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"wait_timeout\": 99"))
        .stdout(predicate::str::contains("\"resource_batch_size\": 7"));
}

#[test]
fn test_config_custom_env_file() {
    let dir = workdir();
    fs::write(dir.path().join("prod.env"), "HARVESTER_TELEMETRY_LOG_LEVEL=WARNING\n").unwrap();

    harvester(&dir)
        .args(["--env-file", "prod.env", "config", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"telemetry_log_level\": \"WARNING\""));
}

#[test]
fn test_config_lowercase_names() {
    let dir = workdir();
    fs::write(dir.path().join(".env"), "harvester_wait_timeout=12\n").unwrap();

    harvester(&dir)
        .args(["config", "--format", "json"])
        .env("selenium_headless", "off")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"wait_timeout\": 12"))
        .stdout(predicate::str::contains("\"selenium_headless\": false"));
}

#[test]
fn test_verbose_logs_env_file() {
    let dir = workdir();
    fs::write(dir.path().join(".env"), "HARVESTER_WAIT_TIMEOUT=12\n").unwrap();

    harvester(&dir)
        .args(["-v", "config"])
        .assert()
        .success()
        .stderr(predicate::str::contains("loaded env file"));
}

// ============================================================================
// Courses
// ============================================================================

#[test]
fn test_courses_group_filter() {
    harvester(&workdir())
        .args(["courses", "--group", "Global Dynamics"])
        .assert()
        .success()
        .stdout(predicate::str::contains("LA103"))
        .stdout(predicate::str::contains("MAST103"))
        .stdout(predicate::str::contains("CAP023").not());
}

#[test]
fn test_courses_unknown_group() {
    harvester(&workdir())
        .args(["courses", "--group", "Finance"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid argument"));
}

#[test]
fn test_course_lookup() {
    harvester(&workdir())
        .args(["course", "COMM203", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"group\": \"Management Project - III\""));
}

#[test]
fn test_course_lookup_unknown() {
    harvester(&workdir())
        .args(["course", "ZZZ999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Course not found: ZZZ999"));
}

// ============================================================================
// Selectors
// ============================================================================

#[test]
fn test_selectors_index() {
    harvester(&workdir())
        .arg("selectors")
        .assert()
        .success()
        .stdout(predicate::str::contains("login.username"))
        .stdout(predicate::str::contains("zoom.initial_interaction"));
}

#[test]
fn test_selectors_unknown_name() {
    harvester(&workdir())
        .args(["selectors", "login.captcha"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("login.captcha"));
}

// ============================================================================
// Resolve
// ============================================================================

#[test]
fn test_resolve_against_saved_page() {
    let dir = workdir();
    fs::write(dir.path().join("page.html"), RESOURCES_PAGE).unwrap();

    harvester(&dir)
        .args(["resolve", "resources.item_title", "--html", "page.html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Case study: Nimbus"))
        .stdout(predicate::str::contains("(#0)"));
}

#[test]
fn test_resolve_reports_fallback_index() {
    let dir = workdir();
    fs::write(dir.path().join("page.html"), RESOURCES_PAGE).unwrap();

    harvester(&dir)
        .args([
            "resolve",
            "zoom.initial_interaction",
            "--html",
            "page.html",
            "--format",
            "json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"index\": 1"))
        .stdout(predicate::str::contains("\"fallback\": true"));
}

#[test]
fn test_resolve_xpath_login_button() {
    let dir = workdir();
    fs::write(
        dir.path().join("login.html"),
        r#"<html><body><form><button type="submit">Login</button></form></body></html>"#,
    )
    .unwrap();

    harvester(&dir)
        .args(["resolve", "login.submit", "--html", "login.html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("xpath=//button[normalize-space(.)='Login'] (#0)"))
        .stdout(predicate::str::contains("text: Login"));
}

#[test]
fn test_resolve_missing_param() {
    let dir = workdir();
    fs::write(dir.path().join("page.html"), RESOURCES_PAGE).unwrap();

    harvester(&dir)
        .args(["resolve", "courses.course_card", "--html", "page.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("course_code"));
}

#[test]
fn test_resolve_not_found() {
    let dir = workdir();
    fs::write(dir.path().join("page.html"), RESOURCES_PAGE).unwrap();

    harvester(&dir)
        .args([
            "resolve",
            "courses.course_card",
            "--html",
            "page.html",
            "--param",
            "course_code=LA103",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No element matched any of 2 selectors"));
}

#[test]
fn test_resolve_missing_file() {
    harvester(&workdir())
        .args(["resolve", "login.submit", "--html", "absent.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("I/O error"));
}
