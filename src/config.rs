//! Run configuration: command-line flags merged over an optional TOML file.
//!
//! Every option can live in `mqstrip.toml` or on the command line; CLI values
//! win field by field. The merged result is validated into [`Settings`], the
//! fully resolved inputs for one run.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::classify::WidthSet;
use crate::cli::Cli;
use crate::files::{self, PatternError, SourceQuery};

pub const DEFAULT_CONFIG_FILE: &str = "mqstrip.toml";
pub const DEFAULT_STRIPPED_SUFFIX: &str = "stripped";

/// Fatal configuration problems, reported before any file is touched.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no breakpoint widths configured (use --widths or `widths` in {DEFAULT_CONFIG_FILE})")]
    MissingWidths,

    #[error("no destination configured (use --dest or `dest` in {DEFAULT_CONFIG_FILE})")]
    MissingDest,

    #[error("no source files configured (pass file arguments or set `src`)")]
    NoSourcesConfigured,

    #[error("no source files matched `{pattern}`")]
    NoSourceMatches { pattern: String },

    #[error("all given source files were excluded")]
    AllSourcesExcluded,

    #[error(transparent)]
    BadPattern(#[from] PatternError),
}

/// Accepted shapes for `widths` and `extract` in the config file: a CSV
/// string, a bare number, a list of numbers or strings, or a table whose
/// keys are labels and whose values are widths.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WidthsValue {
    Csv(String),
    Single(u32),
    List(Vec<WidthToken>),
    Map(BTreeMap<String, WidthToken>),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WidthToken {
    Number(u32),
    Text(String),
}

impl WidthToken {
    fn into_token(self) -> String {
        match self {
            WidthToken::Number(n) => n.to_string(),
            WidthToken::Text(s) => s,
        }
    }
}

impl WidthsValue {
    pub fn into_width_set(self) -> WidthSet {
        match self {
            WidthsValue::Csv(csv) => WidthSet::from_csv(&csv),
            WidthsValue::Single(n) => WidthSet::new([n.to_string()]),
            WidthsValue::List(items) => {
                WidthSet::new(items.into_iter().map(WidthToken::into_token))
            }
            WidthsValue::Map(map) => {
                WidthSet::new(map.into_values().map(WidthToken::into_token))
            }
        }
    }
}

/// `ignore` accepts a single pattern or a list of patterns.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PatternList {
    One(String),
    Many(Vec<String>),
}

impl PatternList {
    fn into_vec(self) -> Vec<String> {
        match self {
            PatternList::One(pattern) => vec![pattern],
            PatternList::Many(patterns) => patterns,
        }
    }
}

/// The on-disk configuration file. All fields are optional; a few keys also
/// accept a camelCase spelling.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub src: Option<String>,
    pub files: Option<Vec<PathBuf>>,
    pub dest: Option<PathBuf>,
    pub ignore: Option<PatternList>,
    #[serde(alias = "width")]
    pub widths: Option<WidthsValue>,
    pub extract: Option<WidthsValue>,
    #[serde(alias = "overrideOriginal")]
    pub override_original: Option<bool>,
    #[serde(alias = "strippedSuffix")]
    pub stripped_suffix: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = toml::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Load `mqstrip.toml` from the working directory when present.
    pub fn discover() -> Result<Self> {
        let path = Path::new(DEFAULT_CONFIG_FILE);
        if path.exists() {
            tracing::debug!(path = %path.display(), "loading config file");
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Fully resolved options for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Source files in processing order.
    pub sources: Vec<PathBuf>,
    /// Path of the combined media-query file.
    pub dest: PathBuf,
    /// Widths whose media blocks move to the combined file.
    pub strip_widths: WidthSet,
    /// Widths whose surviving media blocks are unwrapped in place.
    pub extract_widths: WidthSet,
    /// Rewrite sources in place instead of writing suffixed copies.
    pub override_original: bool,
    /// Suffix for stripped output files.
    pub stripped_suffix: String,
    /// Suppress per-file progress output.
    pub quiet: bool,
}

impl Settings {
    /// Merge CLI arguments over the config file and validate. Widths are
    /// checked first, then the destination, then the source selection.
    pub fn resolve(cli: &Cli, file: FileConfig) -> Result<Self, ConfigError> {
        let strip_widths = if !cli.widths.is_empty() {
            WidthSet::new(&cli.widths)
        } else {
            file.widths
                .map(WidthsValue::into_width_set)
                .unwrap_or_default()
        };
        if strip_widths.is_empty() {
            return Err(ConfigError::MissingWidths);
        }

        let extract_widths = if !cli.extract.is_empty() {
            WidthSet::new(&cli.extract)
        } else {
            file.extract
                .map(WidthsValue::into_width_set)
                .unwrap_or_default()
        };

        let dest = cli
            .dest
            .clone()
            .or(file.dest)
            .ok_or(ConfigError::MissingDest)?;

        let stripped_suffix = cli
            .stripped_suffix
            .clone()
            .or(file.stripped_suffix)
            .unwrap_or_else(|| DEFAULT_STRIPPED_SUFFIX.to_string());

        let override_original = cli.override_original || file.override_original.unwrap_or(false);

        let ignore: Vec<String> = if !cli.ignore.is_empty() {
            cli.ignore.clone()
        } else {
            file.ignore.map(PatternList::into_vec).unwrap_or_default()
        };

        let explicit: Vec<PathBuf> = if !cli.files.is_empty() {
            cli.files.clone()
        } else {
            file.files.unwrap_or_default()
        };
        let pattern = cli.src.clone().or(file.src);
        if explicit.is_empty() && pattern.is_none() {
            return Err(ConfigError::NoSourcesConfigured);
        }

        let sources = files::select_sources(&SourceQuery {
            explicit: &explicit,
            pattern: pattern.as_deref(),
            ignore: &ignore,
            dest: &dest,
            suffix: &stripped_suffix,
        })?;
        if sources.is_empty() {
            return Err(if !explicit.is_empty() {
                ConfigError::AllSourcesExcluded
            } else {
                match pattern {
                    Some(pattern) => ConfigError::NoSourceMatches { pattern },
                    None => ConfigError::NoSourcesConfigured,
                }
            });
        }

        Ok(Settings {
            sources,
            dest,
            strip_widths,
            extract_widths,
            override_original,
            stripped_suffix,
            quiet: cli.quiet,
        })
    }
}
