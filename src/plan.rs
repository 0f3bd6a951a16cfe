//! Rename planning and dry-run preview.

use serde::Serialize;
use std::cmp::Reverse;
use std::fmt;
use tracing::{debug, info};

use crate::fs_ops::occupied;
use crate::transform::transform;
use crate::types::{CandidateEntry, PlannedOperation};

/// Pair each candidate with its transformed sibling path.
///
/// Candidates whose name is already canonical, or is not valid Unicode, are
/// dropped. The result is ordered deepest first so that children are renamed
/// before the directories that contain them; ties keep input order.
pub fn plan(candidates: Vec<CandidateEntry>, replace_spaces: bool) -> Vec<PlannedOperation> {
    let total = candidates.len();
    let mut ops: Vec<PlannedOperation> = candidates
        .into_iter()
        .filter_map(|c| plan_one(c, replace_spaces))
        .collect();
    ops.sort_by_key(|op| Reverse(op.source.path.components().count()));
    info!(candidates = total, planned = ops.len(), "planned renames");
    ops
}

fn plan_one(source: CandidateEntry, replace_spaces: bool) -> Option<PlannedOperation> {
    let Some(name) = source.path.file_name() else {
        return None;
    };
    let Some(name) = name.to_str() else {
        debug!(path = %source.path.display(), "skipping name that is not valid UTF-8");
        return None;
    };
    let new_name = transform(name, replace_spaces);
    if new_name == name {
        return None;
    }
    let intended_target = source.path.with_file_name(new_name);
    Some(PlannedOperation {
        root: source.root.clone(),
        source,
        intended_target,
    })
}

/// Predicted status of a planned rename, judged against the filesystem now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewStatus {
    /// Target name is free.
    Rename,
    /// Target name is taken; the collision policy will decide.
    Collision,
}

impl fmt::Display for PreviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PreviewStatus::Rename => "rename",
            PreviewStatus::Collision => "collision",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRow<'a> {
    pub op: &'a PlannedOperation,
    pub status: PreviewStatus,
}

/// Classify every planned operation. Does not touch the filesystem beyond
/// existence checks, and cannot foresee collisions created by earlier items
/// of the same batch.
pub fn preview(ops: &[PlannedOperation]) -> Vec<PreviewRow<'_>> {
    ops.iter()
        .map(|op| PreviewRow {
            op,
            status: if occupied(&op.intended_target) {
                PreviewStatus::Collision
            } else {
                PreviewStatus::Rename
            },
        })
        .collect()
}

/// Number of planned targets that already exist.
pub fn count_collisions(ops: &[PlannedOperation]) -> usize {
    ops.iter().filter(|op| occupied(&op.intended_target)).count()
}
