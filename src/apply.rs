//! Apply engine: executes a plan under a collision policy.
//!
//! Every operation yields exactly one `AppliedOperation`, in input order. A
//! failing item is recorded as `Outcome::Error` and the batch continues.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::digest::files_identical;
use crate::errors::Result;
use crate::fs_ops::{free_name, io_error_with_help, occupied, remove_entry, rename_in_place};
use crate::merge::merge_into;
use crate::types::{AppliedOperation, CollisionPolicy, MergeStats, Outcome, PlannedOperation};

/// Result of one successful item.
struct Done {
    actual: PathBuf,
    outcome: Outcome,
    stats: Option<MergeStats>,
}

impl Done {
    fn at(actual: PathBuf, outcome: Outcome) -> Self {
        Self { actual, outcome, stats: None }
    }
}

/// Execute `ops` in order against the filesystem.
pub fn apply(ops: Vec<PlannedOperation>, policy: CollisionPolicy) -> Vec<AppliedOperation> {
    info!(count = ops.len(), %policy, "applying batch");
    let applied: Vec<AppliedOperation> = ops.into_iter().map(|op| apply_op(op, policy)).collect();
    let errors = applied.iter().filter(|a| a.outcome == Outcome::Error).count();
    info!(applied = applied.len(), errors, "batch finished");
    applied
}

fn apply_op(op: PlannedOperation, policy: CollisionPolicy) -> AppliedOperation {
    let src = op.source.path.clone();
    let (actual_target, outcome, merge_stats, error) =
        match apply_one(&src, &op.intended_target, policy) {
            Ok(done) => {
                info!(
                    src = %src.display(),
                    dest = %done.actual.display(),
                    outcome = %done.outcome,
                    "applied"
                );
                (done.actual, done.outcome, done.stats, None)
            }
            Err(e) => {
                warn!(src = %src.display(), dest = %op.intended_target.display(), code = e.code(), error = %e, "rename failed");
                (src, Outcome::Error, None, Some(e.to_string()))
            }
        };
    AppliedOperation {
        root: op.root,
        source: op.source,
        intended_target: op.intended_target,
        actual_target,
        outcome,
        merge_stats,
        error,
    }
}

fn apply_one(src: &Path, target: &Path, policy: CollisionPolicy) -> Result<Done> {
    if !occupied(target) {
        rename_in_place(src, target)?;
        return Ok(Done::at(target.to_path_buf(), Outcome::Renamed));
    }
    match policy {
        CollisionPolicy::Suffix => rename_with_suffix(src, target, Outcome::RenamedWithSuffix),
        CollisionPolicy::Delete => delete_then_rename(src, target),
        CollisionPolicy::Merge => merge_with_existing(src, target),
    }
}

fn rename_with_suffix(src: &Path, target: &Path, outcome: Outcome) -> Result<Done> {
    let free = free_name(target)?;
    rename_in_place(src, &free)?;
    Ok(Done::at(free, outcome))
}

fn delete_then_rename(src: &Path, target: &Path) -> Result<Done> {
    let replaced = remove_entry(target).and_then(|()| rename_in_place(src, target));
    match replaced {
        Ok(()) => Ok(Done::at(target.to_path_buf(), Outcome::DeletedThenRenamed)),
        Err(e) => {
            warn!(target = %target.display(), error = %e, "replace failed, keeping both with a suffix");
            rename_with_suffix(src, target, Outcome::RenamedWithSuffix)
        }
    }
}

fn merge_with_existing(src: &Path, target: &Path) -> Result<Done> {
    let src_meta = fs::symlink_metadata(src).map_err(io_error_with_help("stat", src))?;
    let dst_meta = fs::symlink_metadata(target).map_err(io_error_with_help("stat", target))?;

    if src_meta.is_dir() && dst_meta.is_dir() {
        let stats = merge_into(src, target);
        return Ok(Done {
            actual: target.to_path_buf(),
            outcome: Outcome::Merged,
            stats: Some(stats),
        });
    }
    if src_meta.is_file() && dst_meta.is_file() {
        if files_identical(src, target)? {
            fs::remove_file(src).map_err(io_error_with_help("remove duplicate", src))?;
            return Ok(Done::at(target.to_path_buf(), Outcome::MergedSkippedIdentical));
        }
        return rename_with_suffix(src, target, Outcome::MergedKeptBothWithSuffix);
    }
    rename_with_suffix(src, target, Outcome::RenamedWithSuffix)
}
