//! End-to-end checks against the `tour` binary: help, dispatch, unknown
//! names and exit codes.

use assert_cmd::Command;
use predicates::prelude::*;

fn tour() -> Command {
    let mut cmd = Command::cargo_bin("tour").expect("tour binary is built");
    cmd.env("NO_COLOR", "1")
        .env_remove("CLICOLOR_FORCE")
        .env_remove("RUST_LOG");
    cmd
}

fn banner_once(title: &'static str) -> impl Predicate<str> {
    let banner = format!("=== {title} ===");
    predicate::function(move |out: &str| out.matches(banner.as_str()).count() == 1)
}

#[test]
fn test_no_arguments_prints_usage() {
    tour()
        .assert()
        .success()
        .stdout(predicate::str::contains("usage"))
        .stdout(predicate::str::contains("Pointers"))
        .stdout(predicate::str::contains("JWTAuth"));
}

#[test]
fn test_usage_is_stable_across_runs() {
    let first = tour().output().expect("first run");
    let second = tour().output().expect("second run");

    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_pointers_runs_without_usage() {
    tour()
        .arg("Pointers")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("=== Pointers ==="))
        .stdout(predicate::str::contains("usage:").not());
}

#[test]
fn test_unknown_demo_fails_with_name() {
    tour()
        .arg("NoSuchDemo")
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("NoSuchDemo"));
}

#[test]
fn test_unknown_demo_is_stable_across_runs() {
    let first = tour().arg("NoSuchDemo").output().expect("first run");
    let second = tour().arg("NoSuchDemo").output().expect("second run");

    assert_eq!(first.status.code(), second.status.code());
    assert_eq!(first.stderr, second.stderr);
}

#[test]
fn test_goroutine_runs_once() {
    tour()
        .arg("Goroutine")
        .assert()
        .success()
        .stdout(banner_once("Goroutine"));
}

#[test]
fn test_extra_arguments_are_ignored() {
    tour()
        .args(["JWTAuth", "extra-arg", "another"])
        .assert()
        .success()
        .stdout(banner_once("JWTAuth"))
        .stdout(predicate::str::contains("admin token"));
}

#[test]
fn test_names_are_case_sensitive() {
    tour()
        .arg("pointers")
        .assert()
        .failure()
        .stdout(predicate::str::contains("=== Pointers ===").not())
        .stderr(predicate::str::contains("pointers"));
}

#[test]
fn test_data_layer_demos_run() {
    tour()
        .arg("Preload")
        .assert()
        .success()
        .stdout(predicate::str::contains("Octavia E. Butler"));
    tour()
        .arg("Crud")
        .assert()
        .success()
        .stdout(predicate::str::contains("not found"));
}

#[test]
fn test_piped_output_has_no_escape_codes() {
    for args in [&[][..], &["NoSuchDemo"][..]] {
        let out = Command::cargo_bin("tour")
            .expect("tour binary is built")
            .args(args)
            .env_remove("NO_COLOR")
            .env_remove("CLICOLOR_FORCE")
            .env_remove("RUST_LOG")
            .output()
            .expect("tour runs");

        assert!(!out.stdout.contains(&0x1b), "stdout has ANSI escapes for {args:?}");
        assert!(!out.stderr.contains(&0x1b), "stderr has ANSI escapes for {args:?}");
    }
}
