use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use super::atomic::try_atomic_rename;
use super::copy::{copy_dir_tree, copy_file_safely};
use super::helpers::{io_error_with_help, mutation_error};
use super::util::is_cross_device;
use crate::errors::Result;

/// How an entry reached its new place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relocation {
    /// Plain rename on the same filesystem.
    Renamed,
    /// Copied then removed because the rename crossed devices.
    Copied,
}

/// Rename `src` to `dest` in one step. No fallback: used for sibling-local renames.
pub fn rename_in_place(src: &Path, dest: &Path) -> Result<()> {
    try_atomic_rename(src, dest).map_err(io_error_with_help("rename", src))?;
    debug!(src = %src.display(), dest = %dest.display(), "renamed");
    Ok(())
}

/// Move `src` to the free path `dest`, copying across devices when needed.
/// Stats once with symlink_metadata so links are moved as links.
pub fn relocate(src: &Path, dest: &Path) -> Result<Relocation> {
    let err = match try_atomic_rename(src, dest) {
        Ok(()) => return Ok(Relocation::Renamed),
        Err(e) => e,
    };
    if !is_cross_device(&err) {
        return Err(mutation_error("move", src, err));
    }

    warn!(src = %src.display(), dest = %dest.display(), "rename crosses devices, copying instead");
    let lmeta = fs::symlink_metadata(src).map_err(io_error_with_help("stat", src))?;
    let copied = if lmeta.is_dir() {
        copy_dir_tree(src, dest)
    } else {
        copy_file_safely(src, dest)
    };
    if let Err(e) = copied {
        // Do not leave a partial copy under the destination name.
        let _ = remove_entry(dest);
        return Err(e);
    }
    discard_source(src, dest);
    Ok(Relocation::Copied)
}

/// Drop the source once its copy is complete at `dest`.
///
/// The entry already lives at `dest`, so a failed removal is not a failed
/// move: it is logged and whatever remains of the source stays behind.
fn discard_source(src: &Path, dest: &Path) {
    match remove_entry(src) {
        Ok(()) => {
            info!(src = %src.display(), dest = %dest.display(), "copied entry and removed source")
        }
        Err(e) => warn!(
            src = %src.display(),
            dest = %dest.display(),
            code = e.code(),
            error = %e,
            "copied entry but could not remove source, a duplicate remains"
        ),
    }
}

/// Remove a file, link, or whole directory tree.
pub fn remove_entry(path: &Path) -> Result<()> {
    let lmeta = fs::symlink_metadata(path).map_err(io_error_with_help("stat", path))?;
    if lmeta.is_dir() {
        fs::remove_dir_all(path).map_err(io_error_with_help("remove directory", path))
    } else {
        fs::remove_file(path).map_err(io_error_with_help("remove file", path))
    }
}
