//! Merge engine: reconciles a source directory into an existing target.
//!
//! Per child of the source:
//! - name free in target: move it (copy + delete across devices)
//! - dir vs dir: recurse, then drop the emptied source subdirectory
//! - file vs file: identical content is dropped, different content is kept
//!   under a suffixed name
//! - mixed kinds: kept under a suffixed name
//!
//! Failures are counted in `MergeStats::errors` and leave the child in place.

use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::digest::files_identical;
use crate::errors::Result;
use crate::fs_ops::{free_name, io_error_with_help, occupied, relocate, Relocation};
use crate::types::MergeStats;

/// Merge `src_dir` into `target_dir`, returning the summed counters.
pub fn merge_into(src_dir: &Path, target_dir: &Path) -> MergeStats {
    let mut stats = MergeStats::default();
    match sorted_children(src_dir) {
        Ok(children) => {
            for name in children {
                let src = src_dir.join(&name);
                let dst = target_dir.join(&name);
                if let Err(e) = merge_child(&src, &dst, target_dir, &mut stats) {
                    warn!(src = %src.display(), dest = %dst.display(), error = %e, "merge item failed, left in place");
                    stats.errors += 1;
                }
            }
        }
        Err(e) => {
            warn!(dir = %src_dir.display(), error = %e, "cannot list merge source");
            stats.errors += 1;
        }
    }
    remove_if_empty(src_dir);
    info!(
        src = %src_dir.display(),
        dest = %target_dir.display(),
        moved = stats.moved,
        copied = stats.copied,
        deduplicated = stats.deduplicated,
        kept_both = stats.kept_both_conflicts,
        errors = stats.errors,
        "merged directory"
    );
    stats
}

fn sorted_children(dir: &Path) -> Result<Vec<std::ffi::OsString>> {
    let rd = fs::read_dir(dir).map_err(io_error_with_help("read directory", dir))?;
    let mut names = Vec::new();
    for entry in rd {
        let entry = entry.map_err(io_error_with_help("read directory", dir))?;
        names.push(entry.file_name());
    }
    names.sort();
    Ok(names)
}

fn merge_child(src: &Path, dst: &Path, target_dir: &Path, stats: &mut MergeStats) -> Result<()> {
    if !occupied(dst) {
        count_move(relocate(src, dst)?, stats);
        return Ok(());
    }

    let src_meta = fs::symlink_metadata(src).map_err(io_error_with_help("stat", src))?;
    let dst_meta = fs::symlink_metadata(dst).map_err(io_error_with_help("stat", dst))?;

    if src_meta.is_dir() && dst_meta.is_dir() {
        // Nested merges report their own per-child failures through the counters.
        let nested = merge_into(src, dst);
        *stats += nested;
        return Ok(());
    }

    if src_meta.is_file() && dst_meta.is_file() && files_identical(src, dst)? {
        fs::remove_file(src).map_err(io_error_with_help("remove duplicate", src))?;
        debug!(src = %src.display(), dest = %dst.display(), "dropped identical file");
        stats.deduplicated += 1;
        return Ok(());
    }

    let free = free_name(dst)?;
    debug_assert_eq!(free.parent(), Some(target_dir));
    // Counted as a conflict however the entry got there.
    let how = relocate(src, &free)?;
    stats.kept_both_conflicts += 1;
    debug!(src = %src.display(), dest = %free.display(), ?how, "kept both");
    Ok(())
}

fn count_move(how: Relocation, stats: &mut MergeStats) {
    match how {
        Relocation::Renamed => stats.moved += 1,
        Relocation::Copied => stats.copied += 1,
    }
}

/// Best-effort removal of the source once emptied.
fn remove_if_empty(dir: &Path) {
    if fs::remove_dir(dir).is_ok() {
        return;
    }
    match fs::read_dir(dir) {
        Ok(rd) => {
            let left = rd.count();
            if left > 0 {
                warn!(dir = %dir.display(), remaining = left, "merge source not empty, left behind");
            }
        }
        Err(e) => debug!(dir = %dir.display(), error = %e, "merge source already gone"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn merges_nested_trees() {
        let td = assert_fs::TempDir::new().unwrap();
        td.child("src/only_src.txt").write_str("s").unwrap();
        td.child("src/same.txt").write_str("same").unwrap();
        td.child("src/diff.txt").write_str("mine").unwrap();
        td.child("src/sub/deep.txt").write_str("deep").unwrap();
        td.child("dst/same.txt").write_str("same").unwrap();
        td.child("dst/diff.txt").write_str("theirs").unwrap();
        td.child("dst/sub/other.txt").write_str("o").unwrap();

        let stats = merge_into(&td.path().join("src"), &td.path().join("dst"));

        assert_eq!(stats.moved, 2);
        assert_eq!(stats.deduplicated, 1);
        assert_eq!(stats.kept_both_conflicts, 1);
        assert_eq!(stats.errors, 0);
        td.child("dst/only_src.txt").assert("s");
        td.child("dst/diff.txt").assert("theirs");
        td.child("dst/diff.txt_1").assert("mine");
        td.child("dst/sub/deep.txt").assert("deep");
        td.child("dst/sub/other.txt").assert("o");
        assert!(!td.path().join("src").exists());
    }

    #[test]
    fn mixed_kinds_keep_both() {
        let td = assert_fs::TempDir::new().unwrap();
        td.child("src/thing").write_str("file").unwrap();
        td.child("dst/thing").create_dir_all().unwrap();

        let stats = merge_into(&td.path().join("src"), &td.path().join("dst"));
        assert_eq!(stats.kept_both_conflicts, 1);
        assert!(td.path().join("dst/thing").is_dir());
        td.child("dst/thing_1").assert("file");
    }

    #[test]
    fn unreadable_source_counts_an_error() {
        let td = assert_fs::TempDir::new().unwrap();
        td.child("dst").create_dir_all().unwrap();
        let stats = merge_into(&td.path().join("gone"), &td.path().join("dst"));
        assert_eq!(stats.errors, 1);
    }
}
