//! Repository tasks, run as `cargo xtask <task>`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "xtask", about = "Repository tasks for mqstrip")]
enum Task {
    /// Generate the man page into target/dist
    Man,
    /// Generate shell completion scripts into target/dist
    Completions,
}

fn main() -> Result<()> {
    match Task::parse() {
        Task::Man => man(),
        Task::Completions => completions(),
    }
}

fn man() -> Result<()> {
    let cmd = mqstrip::Cli::command();
    let mut buf: Vec<u8> = Vec::new();
    clap_mangen::Man::new(cmd)
        .render(&mut buf)
        .context("failed to render man page")?;

    let path = dist_dir()?.join("mqstrip.1");
    fs::write(&path, buf).with_context(|| format!("failed to write {}", path.display()))?;
    println!("wrote {}", path.display());
    Ok(())
}

fn completions() -> Result<()> {
    let dist = dist_dir()?;
    for shell in [Shell::Bash, Shell::Zsh, Shell::Fish] {
        let mut cmd = mqstrip::Cli::command();
        let path = clap_complete::generate_to(shell, &mut cmd, "mqstrip", &dist)
            .with_context(|| format!("failed to generate {shell} completions"))?;
        println!("wrote {}", path.display());
    }
    Ok(())
}

fn dist_dir() -> Result<PathBuf> {
    let dist = project_root().join("target").join("dist");
    fs::create_dir_all(&dist).with_context(|| format!("failed to create {}", dist.display()))?;
    Ok(dist)
}

fn project_root() -> PathBuf {
    let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or(manifest)
}
