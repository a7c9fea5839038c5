//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

/// Strip breakpoint media queries out of CSS files and collect them into a
/// combined stylesheet.
///
/// Every option can also be set in `mqstrip.toml`; command-line values win.
#[derive(Parser, Debug)]
#[command(
    name = "mqstrip",
    version = crate::version(),
    long_version = crate::long_version()
)]
pub struct Cli {
    /// CSS files to process (takes precedence over --src)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Glob pattern selecting source files, e.g. 'css/*.css'
    #[arg(long, value_name = "PATTERN")]
    pub src: Option<String>,

    /// Path of the combined media-query file
    #[arg(short, long, value_name = "PATH")]
    pub dest: Option<PathBuf>,

    /// Glob pattern of files to skip (repeatable)
    #[arg(short, long, value_name = "PATTERN")]
    pub ignore: Vec<String>,

    /// Breakpoint widths to strip, comma separated or repeated
    #[arg(
        short,
        long,
        visible_alias = "width",
        value_name = "WIDTH",
        value_delimiter = ','
    )]
    pub widths: Vec<String>,

    /// Widths whose remaining media blocks are unwrapped into the stripped
    /// output, dropping the media wrapper
    #[arg(short, long, value_name = "WIDTH", value_delimiter = ',')]
    pub extract: Vec<String>,

    /// Rewrite source files in place instead of writing suffixed copies
    #[arg(long)]
    pub override_original: bool,

    /// Suffix for stripped file names (a.css -> a.stripped.css) [default: stripped]
    #[arg(long, value_name = "SUFFIX")]
    pub stripped_suffix: Option<String>,

    /// Read options from this file instead of mqstrip.toml
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress per-file progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL", value_enum)]
    pub completions: Option<Shell>,
}
