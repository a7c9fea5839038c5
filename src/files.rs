//! Source file selection and output naming.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use glob::glob;

/// A glob pattern that failed to compile.
#[derive(Debug, thiserror::Error)]
#[error("invalid glob pattern `{pattern}`: {source}")]
pub struct PatternError {
    pub pattern: String,
    #[source]
    pub source: glob::PatternError,
}

/// Inputs for [`select_sources`]. An explicit file list takes precedence
/// over the glob pattern.
#[derive(Debug)]
pub struct SourceQuery<'a> {
    pub explicit: &'a [PathBuf],
    pub pattern: Option<&'a str>,
    pub ignore: &'a [String],
    pub dest: &'a Path,
    pub suffix: &'a str,
}

/// Resolve the list of source files to process.
///
/// Candidates come from the explicit list when one is given, otherwise from
/// expanding the glob pattern (alphabetical order). Dropped from the result:
/// directories, paths matched by any ignore pattern, the combined destination
/// file itself, and files whose name contains the stripped suffix. The last
/// two keep a rerun over the same directory from consuming its own outputs.
pub fn select_sources(query: &SourceQuery) -> Result<Vec<PathBuf>, PatternError> {
    let mut ignored: HashSet<PathBuf> = HashSet::new();
    for pattern in query.ignore {
        ignored.extend(expand(pattern)?);
    }

    let candidates: Vec<PathBuf> = if !query.explicit.is_empty() {
        query.explicit.to_vec()
    } else if let Some(pattern) = query.pattern {
        expand(pattern)?
    } else {
        Vec::new()
    };

    let mut seen = HashSet::new();
    let mut sources = Vec::new();
    for path in candidates {
        if path.is_dir() || ignored.contains(&path) || path.as_path() == query.dest {
            continue;
        }
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => continue,
        };
        if name.contains(query.suffix) {
            continue;
        }
        if seen.insert(path.clone()) {
            sources.push(path);
        }
    }

    tracing::debug!(count = sources.len(), "selected source files");
    Ok(sources)
}

fn expand(pattern: &str) -> Result<Vec<PathBuf>, PatternError> {
    let entries = glob(pattern).map_err(|source| PatternError {
        pattern: pattern.to_string(),
        source,
    })?;
    let mut paths = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) => paths.push(path),
            // Unreadable entries are skipped, not fatal to the pattern.
            Err(err) => tracing::warn!(pattern, error = %err, "skipping glob entry"),
        }
    }
    Ok(paths)
}

/// Derive the stripped-output path for a source file: the stripped suffix is
/// inserted before the extension (`a.css` -> `a.stripped.css`), or appended
/// when there is none (`style` -> `style.stripped`).
pub fn stripped_path(path: &Path, suffix: &str) -> PathBuf {
    match (path.file_stem(), path.extension()) {
        (Some(stem), Some(ext)) => path.with_file_name(format!(
            "{}.{}.{}",
            stem.to_string_lossy(),
            suffix,
            ext.to_string_lossy()
        )),
        _ => match path.file_name() {
            Some(name) => path.with_file_name(format!("{}.{}", name.to_string_lossy(), suffix)),
            None => path.to_path_buf(),
        },
    }
}
