//! Path enumeration.
//! - Walks every root once (walkdir, file-name order, links not followed).
//! - Keeps directories and/or regular files at the depths selected by `DepthMode`.
//! - Missing roots and roots that are not directories are skipped.
//!
//! Nothing is cached: each call reflects the filesystem as it is now.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::errors::{CanonError, Result};
use crate::types::{CandidateEntry, DepthMode, EntryKind, KindFilter};

/// Collect candidates under `roots`, root by root.
pub fn enumerate<P: AsRef<Path>>(
    roots: &[P],
    kinds: KindFilter,
    depth: DepthMode,
) -> Result<Vec<CandidateEntry>> {
    let mut out = Vec::new();
    for root in roots {
        let root = root.as_ref();
        if !is_existing_dir(root) {
            debug!(root = %root.display(), "skipping root: not an existing directory");
            continue;
        }
        let before = out.len();
        scan_root(root, kinds, depth, &mut out)?;
        info!(root = %root.display(), found = out.len() - before, %depth, "scanned root");
    }
    Ok(out)
}

fn is_existing_dir(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}

fn scan_root(
    root: &Path,
    kinds: KindFilter,
    depth: DepthMode,
    out: &mut Vec<CandidateEntry>,
) -> Result<()> {
    let mut walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name();
    if let Some(max) = depth.max_depth() {
        walker = walker.max_depth(max);
    }

    for entry in walker {
        let entry = entry.map_err(|e| CanonError::Enumeration {
            path: e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf()),
            source: e,
        })?;
        if !depth.includes(entry.depth()) {
            continue;
        }
        let ft = entry.file_type();
        let kind = if ft.is_dir() {
            EntryKind::Directory
        } else if ft.is_file() {
            EntryKind::File
        } else {
            // Links and special files are never renamed.
            continue;
        };
        if !kinds.accepts(kind) {
            continue;
        }
        out.push(CandidateEntry {
            root: root.to_path_buf(),
            depth: entry.depth(),
            path: entry.into_path(),
            kind,
        });
    }
    Ok(())
}

/// Relative path of `entry` below its root, for display.
pub fn relative_to_root(entry: &CandidateEntry) -> PathBuf {
    entry
        .path
        .strip_prefix(&entry.root)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| entry.path.clone())
}
