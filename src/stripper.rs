//! The strip run: classify every source file once, then write the combined
//! media-query file and the per-source stripped files.
//!
//! The run has two strictly ordered phases. Phase one collects the matching
//! media blocks from every source, in configured order, and writes the
//! combined file; any failure here aborts the run. Phase two writes one
//! stripped file per source; a failure there is reported but does not stop
//! the remaining files, and the first failure surfaces once all of them have
//! been attempted. Both phases share one parse per source file through the
//! cache, so phase two still sees the original content when overwrite mode
//! rewrites sources in place.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::cache::StylesheetCache;
use crate::classify;
use crate::config::Settings;
use crate::console;
use crate::css;
use crate::files;

/// What a finished run did, for the closing summary line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Source files processed.
    pub sources: usize,
    /// Media blocks moved into the combined file.
    pub media_blocks: usize,
    /// Size of the combined file.
    pub combined_bytes: u64,
    /// Stripped files written.
    pub stripped_files: usize,
}

pub struct MediaStripper {
    settings: Settings,
    cache: StylesheetCache,
}

impl MediaStripper {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            cache: StylesheetCache::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn run(&self) -> Result<RunSummary> {
        let (combined_bytes, media_blocks) = self.write_combined()?;
        let stripped_files = self.write_stripped()?;
        Ok(RunSummary {
            sources: self.settings.sources.len(),
            media_blocks,
            combined_bytes,
            stripped_files,
        })
    }

    /// Phase one: the combined media-query file. Written unconditionally,
    /// even when no block matched anywhere.
    fn write_combined(&self) -> Result<(u64, usize)> {
        let parts: Vec<(String, usize)> = self
            .settings
            .sources
            .par_iter()
            .map(|path| self.collect_matching(path))
            .collect::<Result<_>>()?;

        let blocks: usize = parts.iter().map(|(_, count)| count).sum();
        let body = parts
            .into_iter()
            .map(|(chunk, _)| chunk)
            .collect::<Vec<_>>()
            .join("\n");

        if let Some(parent) = self.settings.dest.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }
        fs::write(&self.settings.dest, &body).with_context(|| {
            format!(
                "failed to write combined file {}",
                self.settings.dest.display()
            )
        })?;

        tracing::info!(
            dest = %self.settings.dest.display(),
            blocks,
            bytes = body.len(),
            "combined file written"
        );
        if !self.settings.quiet {
            println!(
                "{}",
                console::success_text(&format!(
                    "wrote {} ({} media block(s))",
                    self.settings.dest.display(),
                    blocks
                ))
            );
        }
        Ok((body.len() as u64, blocks))
    }

    /// Serialize the media blocks of one source that match the strip widths.
    fn collect_matching(&self, path: &Path) -> Result<(String, usize)> {
        let sheet = self.cache.get_or_parse(path)?;
        let matching = classify::matching_media(&self.settings.strip_widths, &sheet.nodes);
        let count = matching.len();
        Ok((css::serialize_nodes(matching), count))
    }

    /// Phase two: one stripped file per source. Every file is attempted;
    /// failures are reported as they happen and the first one (in source
    /// order) is returned after the whole pass.
    fn write_stripped(&self) -> Result<usize> {
        tracing::debug!(files = self.settings.sources.len(), "stripped-files phase");
        let outcomes: Vec<Result<()>> = self
            .settings
            .sources
            .par_iter()
            .map(|path| {
                self.strip_one(path).map_err(|err| {
                    eprintln!(
                        "{}",
                        console::warn_text(&format!(
                            "failed to strip {}: {err:#}",
                            path.display()
                        ))
                    );
                    tracing::warn!(path = %path.display(), "stripped output failed");
                    err
                })
            })
            .collect();

        let written = outcomes.iter().filter(|outcome| outcome.is_ok()).count();
        let failed = outcomes.len() - written;
        if let Some(first) = outcomes.into_iter().find_map(Result::err) {
            return Err(first.context(format!(
                "{failed} of {} stripped files failed",
                self.settings.sources.len()
            )));
        }
        Ok(written)
    }

    fn strip_one(&self, path: &Path) -> Result<()> {
        let sheet = self.cache.get_or_parse(path)?;
        let total = sheet.nodes.len();
        let moved = classify::matching_media(&self.settings.strip_widths, &sheet.nodes).len();
        let kept = classify::strip_nodes(
            &self.settings.strip_widths,
            &self.settings.extract_widths,
            &sheet.nodes,
        );
        let kept_count = kept.len();

        let body = css::serialize_nodes(kept);
        let body = if body.is_empty() { body } else { body + "\n" };

        let target = self.target_path(path);
        fs::write(&target, body)
            .with_context(|| format!("failed to write {}", target.display()))?;

        if !self.settings.quiet {
            println!(
                "{}",
                console::detail_text(&format!(
                    "{}: moved {moved} media block(s), kept {kept_count}/{total} -> {}",
                    path.display(),
                    target.display()
                ))
            );
        }
        Ok(())
    }

    fn target_path(&self, source: &Path) -> PathBuf {
        if self.settings.override_original {
            source.to_path_buf()
        } else {
            files::stripped_path(source, &self.settings.stripped_suffix)
        }
    }
}
