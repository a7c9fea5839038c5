//! Shared helpers for the integration suite.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Run the mqstrip binary with `dir` as working directory and capture output.
pub fn run_mqstrip(dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_mqstrip"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute mqstrip");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

/// Write a file under `dir`, creating parent directories as needed.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(&path, content).expect("Failed to write file");
    path
}

pub fn read_file(path: &Path) -> String {
    fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("Failed to read {}: {err}", path.display()))
}

/// One plain rule plus one 1200px breakpoint block.
pub fn sample_css() -> &'static str {
    ".x{color:red} @media (min-width:1200px){.y{color:blue}}"
}
