//! Option resolution through the CLI: flags, config files, and exit codes.

use std::path::Path;

use predicates::str::contains;
use tempfile::TempDir;

use crate::helpers::{read_file, run_mqstrip, sample_css, write_file};

/// assert_cmd runner for the exit-code assertions below.
fn mqstrip_in(dir: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("mqstrip").unwrap();
    cmd.current_dir(dir).env("NO_COLOR", "1");
    cmd
}

// ============================================================================
// Validation Errors
// ============================================================================

#[test]
fn missing_widths_exits_1_with_a_hint() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a.css", sample_css());

    mqstrip_in(dir.path())
        .args(["a.css", "--dest", "out.css"])
        .assert()
        .code(1)
        .stderr(contains("widths"));
}

#[test]
fn missing_dest_exits_1_with_a_hint() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a.css", sample_css());

    mqstrip_in(dir.path())
        .args(["a.css", "--widths", "400"])
        .assert()
        .code(1)
        .stderr(contains("dest"));
}

#[test]
fn no_sources_at_all_exits_1() {
    let dir = TempDir::new().unwrap();

    mqstrip_in(dir.path())
        .args(["--widths", "400", "--dest", "out.css"])
        .assert()
        .code(1)
        .stderr(contains("source files"));
}

#[test]
fn unmatched_src_pattern_is_reported_with_its_text() {
    let dir = TempDir::new().unwrap();

    mqstrip_in(dir.path())
        .args(["--src", "missing/*.css", "--widths", "400", "--dest", "out.css"])
        .assert()
        .code(1)
        .stderr(contains("missing/*.css"));
}

#[test]
fn invalid_glob_pattern_is_rejected() {
    let dir = TempDir::new().unwrap();

    mqstrip_in(dir.path())
        .args(["--src", "css/[.css", "--widths", "400", "--dest", "out.css"])
        .assert()
        .code(1)
        .stderr(contains("invalid glob pattern"));
}

#[test]
fn unknown_flag_is_a_usage_error() {
    let dir = TempDir::new().unwrap();

    mqstrip_in(dir.path()).arg("--frobnicate").assert().code(2);
}

// ============================================================================
// Config File
// ============================================================================

#[test]
fn config_file_in_the_working_directory_supplies_defaults() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a.css", sample_css());
    write_file(
        dir.path(),
        "mqstrip.toml",
        "src = \"*.css\"\nwidths = 1200\ndest = \"out.css\"\n",
    );

    let (_stdout, stderr, exit_code) = run_mqstrip(dir.path(), &[]);

    assert_eq!(exit_code, 0, "stderr: {stderr}");
    assert_eq!(
        read_file(&dir.path().join("out.css")),
        "@media (min-width:1200px){.y{color:blue}}"
    );
}

#[test]
fn cli_values_override_the_config_file() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a.css", sample_css());
    write_file(
        dir.path(),
        "mqstrip.toml",
        "src = \"*.css\"\nwidths = 999\ndest = \"out.css\"\n",
    );

    // Config widths match nothing; the CLI value does.
    let (_stdout, _stderr, exit_code) = run_mqstrip(dir.path(), &["--widths", "1200"]);

    assert_eq!(exit_code, 0);
    assert_eq!(
        read_file(&dir.path().join("out.css")),
        "@media (min-width:1200px){.y{color:blue}}"
    );
}

#[test]
fn explicit_config_path_is_loaded() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a.css", sample_css());
    write_file(
        dir.path(),
        "conf/strip.toml",
        "files = [\"a.css\"]\nwidths = \"1200\"\ndest = \"out.css\"\n",
    );

    let (_stdout, stderr, exit_code) =
        run_mqstrip(dir.path(), &["--config", "conf/strip.toml"]);

    assert_eq!(exit_code, 0, "stderr: {stderr}");
    assert!(dir.path().join("a.stripped.css").exists());
}

#[test]
fn missing_explicit_config_path_is_fatal() {
    let dir = TempDir::new().unwrap();

    let (_stdout, stderr, exit_code) = run_mqstrip(dir.path(), &["--config", "absent.toml"]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("absent.toml"));
}

#[test]
fn camel_case_config_keys_are_accepted() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a.css", sample_css());
    write_file(
        dir.path(),
        "mqstrip.toml",
        "src = \"*.css\"\nwidth = 1200\ndest = \"out.css\"\noverrideOriginal = true\n",
    );

    let (_stdout, stderr, exit_code) = run_mqstrip(dir.path(), &[]);

    assert_eq!(exit_code, 0, "stderr: {stderr}");
    assert_eq!(read_file(&dir.path().join("a.css")), ".x{color:red}\n");
    assert!(!dir.path().join("a.stripped.css").exists());
}

#[test]
fn config_typos_are_rejected() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a.css", sample_css());
    write_file(dir.path(), "mqstrip.toml", "widht = 1200\n");

    let (_stdout, stderr, exit_code) = run_mqstrip(dir.path(), &["a.css"]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("mqstrip.toml"));
}

// ============================================================================
// Help, Version, Completions
// ============================================================================

#[test]
fn help_exits_0_and_lists_the_options() {
    let dir = TempDir::new().unwrap();

    let (stdout, _stderr, exit_code) = run_mqstrip(dir.path(), &["--help"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("--widths"));
    assert!(stdout.contains("--dest"));
    assert!(stdout.contains("--extract"));
    assert!(stdout.contains("--override-original"));
}

#[test]
fn version_prints_the_crate_version() {
    let dir = TempDir::new().unwrap();

    let (stdout, _stderr, exit_code) = run_mqstrip(dir.path(), &["--version"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.starts_with("mqstrip "));
}

#[test]
fn completions_print_a_script_and_exit() {
    let dir = TempDir::new().unwrap();

    let (stdout, _stderr, exit_code) = run_mqstrip(dir.path(), &["--completions", "bash"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("complete"));
}
