//! Copy fallback used when a move crosses a device boundary.
//!
//! - Files: copy into a hidden temp file in the destination directory, then
//!   rename it into place, so a half-written copy never carries the final name.
//! - Directories: recreate the tree (walkdir), copy the files in parallel
//!   (rayon), then carry metadata over for every copied entry.
//!
//! The source is left untouched; removing it is the caller's job.

use rayon::prelude::*;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::atomic::try_atomic_rename;
use super::helpers::io_error_with_help;
use super::metadata::preserve_metadata;
use super::util;
use crate::errors::{CanonError, Result};

/// Copy a single file to `dest` via a temp sibling.
pub fn copy_file_safely(src: &Path, dest: &Path) -> Result<()> {
    let dest_dir = dest.parent().unwrap_or_else(|| Path::new("."));
    let tmp_path = util::unique_temp_path(dest_dir);

    if let Err(e) = fs::copy(src, &tmp_path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(io_error_with_help("copy to temporary file", &tmp_path)(e));
    }
    if let Err(e) = try_atomic_rename(&tmp_path, dest) {
        let _ = fs::remove_file(&tmp_path);
        return Err(io_error_with_help("rename temporary file into place", dest)(e));
    }

    let meta = fs::metadata(src).map_err(io_error_with_help("stat source", src))?;
    preserve_metadata(dest, &meta);
    Ok(())
}

/// Recursively copy the directory `src` to a new directory `dest`.
pub fn copy_dir_tree(src: &Path, dest: &Path) -> Result<()> {
    let mut files = Vec::new();
    let mut dirs = Vec::new();

    for entry in WalkDir::new(src).follow_links(false) {
        let entry = entry.map_err(|e| CanonError::Enumeration {
            path: src.to_path_buf(),
            source: e,
        })?;
        let rel = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dest.join(rel);
        let ft = entry.file_type();
        if ft.is_dir() {
            fs::create_dir_all(&target).map_err(io_error_with_help("create directory", &target))?;
            dirs.push((entry.into_path(), target));
        } else if ft.is_file() {
            files.push((entry.into_path(), target));
        } else {
            copy_symlink(entry.path(), &target)?;
        }
    }

    files
        .par_iter()
        .try_for_each(|(from, to)| copy_file_safely(from, to))?;

    // Directory times last, after their contents stopped changing.
    for (from, to) in dirs.iter().rev() {
        if let Ok(meta) = fs::metadata(from) {
            preserve_metadata(to, &meta);
        }
    }
    Ok(())
}

#[cfg(unix)]
fn copy_symlink(src: &Path, dest: &Path) -> Result<()> {
    let link = fs::read_link(src).map_err(io_error_with_help("read link", src))?;
    std::os::unix::fs::symlink(&link, dest).map_err(io_error_with_help("create link", dest))
}

#[cfg(not(unix))]
fn copy_symlink(src: &Path, dest: &Path) -> Result<()> {
    if src.is_dir() {
        copy_dir_tree(src, dest)
    } else {
        copy_file_safely(src, dest)
    }
}
