use std::io;
use std::time::Instant;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use humansize::{format_size, DECIMAL};

use mqstrip::cli::Cli;
use mqstrip::config::{FileConfig, Settings};
use mqstrip::console;
use mqstrip::stripper::MediaStripper;

#[cfg(not(tarpaulin_include))]
fn main() {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
        return;
    }

    if let Err(err) = run(cli) {
        eprintln!("{}", console::error_text(&format!("Error: {err:#}")));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let file = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::discover()?,
    };
    let settings = Settings::resolve(&cli, file)?;
    tracing::debug!(
        sources = settings.sources.len(),
        widths = %settings.strip_widths,
        extract = %settings.extract_widths,
        "starting strip run"
    );

    let started = Instant::now();
    let stripper = MediaStripper::new(settings);
    let summary = stripper.run()?;

    if !stripper.settings().quiet {
        println!(
            "{}",
            console::success_text(&format!(
                "done in {:.2?}: {} file(s), {} media block(s) moved, {} combined",
                started.elapsed(),
                summary.sources,
                summary.media_blocks,
                format_size(summary.combined_bytes, DECIMAL)
            ))
        );
    }
    Ok(())
}
