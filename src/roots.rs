//! Registered scan roots.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::errors::{CanonError, Result};

/// Ordered, de-duplicated set of root directories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootSet {
    roots: Vec<PathBuf>,
}

impl RootSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one root given as raw user text.
    ///
    /// Returns `Ok(true)` when added, `Ok(false)` when already present.
    pub fn add(&mut self, raw: &str) -> Result<bool> {
        let path = normalize_root(raw)?;
        if self.roots.contains(&path) {
            debug!(root = %path.display(), "root already registered");
            return Ok(false);
        }
        self.roots.push(path);
        Ok(true)
    }

    /// Register every root in `text`, split on newlines and `;`.
    /// Invalid parts are skipped with a warning. Returns how many were added.
    pub fn add_bulk(&mut self, text: &str) -> usize {
        let mut added = 0;
        for part in text.split(['\n', '\r', ';']) {
            if part.trim().is_empty() {
                continue;
            }
            match self.add(part) {
                Ok(true) => added += 1,
                Ok(false) => {}
                Err(e) => warn!(input = part.trim(), error = %e, "ignoring root"),
            }
        }
        added
    }

    pub fn remove(&mut self, path: &Path) -> bool {
        let before = self.roots.len();
        self.roots.retain(|r| r != path);
        self.roots.len() != before
    }

    pub fn clear(&mut self) {
        self.roots.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.roots.iter().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn as_slice(&self) -> &[PathBuf] {
        &self.roots
    }
}

/// Trim whitespace and quotes, expand a leading `~`, require an existing directory.
pub fn normalize_root(raw: &str) -> Result<PathBuf> {
    let trimmed = raw.trim().trim_matches(|c| c == '"' || c == '\'').trim();
    let path = expand_home(trimmed);
    if trimmed.is_empty() || !path.is_dir() {
        return Err(CanonError::InvalidRoot(path));
    }
    Ok(path)
}

fn expand_home(s: &str) -> PathBuf {
    let rest = if s == "~" {
        Some("")
    } else {
        s.strip_prefix("~/").or_else(|| s.strip_prefix("~\\"))
    };
    match (rest, dirs::home_dir()) {
        (Some(rest), Some(home)) if rest.is_empty() => home,
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(s),
    }
}
