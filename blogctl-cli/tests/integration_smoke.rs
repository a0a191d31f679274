//! Smoke tests to verify command module wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn blogctl() -> Command {
    let mut cmd = Command::cargo_bin("blogctl").unwrap();
    // Keep tests away from a developer's ~/.blogctl and shell environment
    cmd.env_remove("DATABASE_URL")
        .env_remove("BLOGCTL_ENDPOINT")
        .env_remove("BLOGCTL_LOGIN_AS");
    cmd
}

// === Serve Command Tests ===

#[test]
fn test_serve_help() {
    let mut cmd = blogctl();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--login-as"))
        .stdout(predicate::str::contains("--client-url"))
        .stdout(predicate::str::contains("--cors-permissive"));
}

// === Db Command Tests ===

#[test]
fn test_db_seed_help() {
    let mut cmd = blogctl();
    cmd.arg("db").arg("seed").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("demo users"));
}

#[test]
fn test_db_without_database_url_fails() {
    let home = tempfile::tempdir().unwrap();
    let mut cmd = blogctl();
    cmd.env("HOME", home.path())
        .current_dir(home.path())
        .arg("db")
        .arg("migrate");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL not set"));
}

// === Posts Command Tests ===

#[test]
fn test_posts_show_help() {
    let mut cmd = blogctl();
    cmd.arg("posts").arg("show").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Post ID"))
        .stdout(predicate::str::contains("--json"));
}

#[test]
fn test_posts_show_rejects_non_uuid() {
    let mut cmd = blogctl();
    cmd.arg("posts").arg("show").arg("42");

    cmd.assert().failure().stderr(predicate::str::contains("invalid"));
}

// === Comments Command Tests ===

#[test]
fn test_comments_add_help() {
    let mut cmd = blogctl();
    cmd.arg("comments").arg("add").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Comment ID to reply to"));
}

#[test]
fn test_comments_like_help() {
    let mut cmd = blogctl();
    cmd.arg("comments").arg("like").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Comment ID"));
}

// === Config Command Tests ===

#[test]
fn test_config_path_uses_home() {
    let home = tempfile::tempdir().unwrap();
    let mut cmd = blogctl();
    cmd.env("HOME", home.path()).arg("config").arg("path");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(".blogctl"))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_then_show() {
    let home = tempfile::tempdir().unwrap();

    blogctl()
        .env("HOME", home.path())
        .args(["config", "init"])
        .assert()
        .success();

    blogctl()
        .env("HOME", home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("login_as = \"Kyle\""));

    blogctl()
        .env("HOME", home.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

// === Completions ===

#[test]
fn test_completions_bash() {
    let mut cmd = blogctl();
    cmd.arg("completions").arg("bash");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("blogctl"));
}
