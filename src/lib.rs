//! Core library for the `mqstrip` CLI.
//!
//! `mqstrip` splits CSS files in two: `@media` blocks whose conditions match
//! configured breakpoint widths move into one combined stylesheet, and
//! everything else stays behind in a stripped copy of each source (or in the
//! source itself). The pieces:
//!
//! - [`css`]: block-level stylesheet parsing and serialization
//! - [`classify`]: width matching and the strip/extract node transforms
//! - [`cache`]: one shared parse per source file
//! - [`config`]: CLI-over-TOML option resolution
//! - [`stripper`]: the two-phase run that writes all outputs

pub mod cache;
pub mod classify;
pub mod cli;
pub mod config;
pub mod console;
pub mod css;
pub mod files;
pub mod stripper;

pub use cli::Cli;
pub use config::{FileConfig, Settings};
pub use stripper::{MediaStripper, RunSummary};

/// Version string shown by `--version`: the crate version, with the short
/// commit hash and build date appended on builds from a checkout.
#[cfg(not(feature = "release"))]
pub fn version() -> String {
    let base = env!("CARGO_PKG_VERSION");
    let sha = env!("VERGEN_GIT_SHA");
    if sha.is_empty() || sha == "unknown" {
        base.to_string()
    } else {
        format!("{base} ({sha} {})", env!("MQSTRIP_BUILD_DATE"))
    }
}

/// Version string shown by `--version`. Official builds carry the plain
/// crate version.
#[cfg(feature = "release")]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

pub fn long_version() -> String {
    format!("{}\nbuilt: {}", version(), env!("MQSTRIP_BUILD_DATE"))
}
