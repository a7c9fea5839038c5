//! Shared stylesheet parse cache.
//!
//! Both output phases classify the same source files, so each file is read
//! and parsed once and the parsed sheet is shared from then on. Entries are
//! never invalidated: a run works against the state the files had when first
//! touched, even when the overwrite mode later rewrites them on disk.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::Result;

use crate::css::Stylesheet;

#[derive(Debug, Default)]
pub struct StylesheetCache {
    entries: Mutex<HashMap<PathBuf, Arc<Stylesheet>>>,
}

impl StylesheetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached sheet for `path`, reading and parsing it on first
    /// use. Read and parse failures propagate and cache nothing, so a later
    /// call retries. Parsing happens outside the lock; when two workers race
    /// on the same path the first insert wins and the loser's parse is
    /// dropped.
    pub fn get_or_parse(&self, path: &Path) -> Result<Arc<Stylesheet>> {
        if let Some(hit) = self.entries.lock().unwrap().get(path) {
            return Ok(Arc::clone(hit));
        }

        tracing::debug!(path = %path.display(), "parse cache miss");
        let sheet = Arc::new(Stylesheet::parse_file(path)?);

        let mut entries = self.entries.lock().unwrap();
        let entry = entries
            .entry(path.to_path_buf())
            .or_insert(sheet);
        Ok(Arc::clone(entry))
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}
