//! Source selection: glob expansion, ignore patterns, self-exclusion.

use tempfile::TempDir;

use crate::helpers::{read_file, run_mqstrip, write_file};

// ============================================================================
// Glob Selection
// ============================================================================

#[test]
fn src_pattern_processes_matches_in_alphabetical_order() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "c.css", "@media (min-width:400px){.c{x:3}}");
    write_file(dir.path(), "a.css", "@media (min-width:400px){.a{x:1}}");

    let (_stdout, stderr, exit_code) = run_mqstrip(
        dir.path(),
        &["--src", "*.css", "--widths", "400", "--dest", "out.css"],
    );

    assert_eq!(exit_code, 0, "stderr: {stderr}");
    assert_eq!(
        read_file(&dir.path().join("out.css")),
        "@media (min-width:400px){.a{x:1}}\n@media (min-width:400px){.c{x:3}}"
    );
}

#[test]
fn nested_directories_need_their_own_pattern() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "sub/a.css", "@media (min-width:400px){.a{x:1}}");

    let (_stdout, _stderr, exit_code) = run_mqstrip(
        dir.path(),
        &["--src", "**/*.css", "--widths", "400", "--dest", "out.css"],
    );

    assert_eq!(exit_code, 0);
    assert!(dir.path().join("sub/a.stripped.css").exists());
}

// ============================================================================
// Exclusions
// ============================================================================

#[test]
fn the_destination_file_is_never_a_source() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a.css", "@media (min-width:400px){.a{x:1}}");
    // A stale combined file sits right next to the sources.
    write_file(dir.path(), "out.css", "@media (min-width:400px){.old{x:9}}");

    let (_stdout, stderr, exit_code) = run_mqstrip(
        dir.path(),
        &["--src", "*.css", "--widths", "400", "--dest", "out.css"],
    );

    assert_eq!(exit_code, 0, "stderr: {stderr}");
    assert_eq!(
        read_file(&dir.path().join("out.css")),
        "@media (min-width:400px){.a{x:1}}"
    );
    assert!(!dir.path().join("out.stripped.css").exists());
}

#[test]
fn stripped_outputs_of_a_previous_run_are_skipped() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a.css", "@media (min-width:400px){.a{x:1}}");
    write_file(dir.path(), "a.stripped.css", ".left{x:0}");

    let (_stdout, _stderr, exit_code) = run_mqstrip(
        dir.path(),
        &["--src", "*.css", "--widths", "400", "--dest", "out.css"],
    );

    assert_eq!(exit_code, 0);
    assert!(!dir.path().join("a.stripped.stripped.css").exists());
    // The old output was simply overwritten by this run's result.
    assert_eq!(read_file(&dir.path().join("a.stripped.css")), "");
}

#[test]
fn ignore_flag_excludes_matching_files() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a.css", "@media (min-width:400px){.a{x:1}}");
    write_file(dir.path(), "vendor.css", "@media (min-width:400px){.v{x:9}}");

    let (_stdout, _stderr, exit_code) = run_mqstrip(
        dir.path(),
        &[
            "--src",
            "*.css",
            "--ignore",
            "vendor*.css",
            "--widths",
            "400",
            "--dest",
            "out.css",
        ],
    );

    assert_eq!(exit_code, 0);
    assert_eq!(
        read_file(&dir.path().join("out.css")),
        "@media (min-width:400px){.a{x:1}}"
    );
    assert!(!dir.path().join("vendor.stripped.css").exists());
}

#[test]
fn config_ignore_accepts_a_list() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "a.css", "@media (min-width:400px){.a{x:1}}");
    write_file(dir.path(), "skip.css", "@media (min-width:400px){.s{x:9}}");
    write_file(
        dir.path(),
        "mqstrip.toml",
        "src = \"*.css\"\nignore = [\"skip.css\"]\nwidths = 400\ndest = \"out.css\"\n",
    );

    let (_stdout, _stderr, exit_code) = run_mqstrip(dir.path(), &[]);

    assert_eq!(exit_code, 0);
    assert!(!dir.path().join("skip.stripped.css").exists());
    assert!(dir.path().join("a.stripped.css").exists());
}
