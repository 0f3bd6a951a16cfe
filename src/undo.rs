//! Best-effort reversal of an applied batch.

use std::cmp::Reverse;
use std::path::Path;
use tracing::{info, warn};

use crate::errors::{CanonError, Result};
use crate::fs_ops::{free_name, occupied, rename_in_place};
use crate::types::{AppliedOperation, Outcome, UndoOutcome, UndoResult};

/// Reverse every reversible entry of `applied`.
///
/// Entries are processed shallowest `actual_target` first, walking the apply
/// order backwards on ties: a child recorded under its parent's old name only
/// becomes reachable again once the parent is back in place. Merge outcomes
/// are reported as `SkippedMerge` and left alone. `Error` entries changed
/// nothing on disk and produce no result.
pub fn undo(applied: &[AppliedOperation]) -> Vec<UndoResult> {
    let mut order: Vec<&AppliedOperation> = applied
        .iter()
        .rev()
        .filter(|a| a.outcome != Outcome::Error)
        .collect();
    order.sort_by_key(|a| a.actual_target.components().count());

    let results: Vec<UndoResult> = order.into_iter().map(undo_one).collect();
    let undone = results.iter().filter(|r| r.outcome == UndoOutcome::Undone).count();
    info!(entries = results.len(), undone, "undo finished");
    results
}

fn undo_one(op: &AppliedOperation) -> UndoResult {
    let from = op.actual_target.clone();
    let original = op.source.path.clone();

    if op.outcome.is_merge() {
        let refusal = CanonError::NonReversible(from.clone());
        info!(path = %from.display(), outcome = %op.outcome, "{refusal}");
        return UndoResult {
            from,
            to: original,
            outcome: UndoOutcome::SkippedMerge,
            error: None,
        };
    }
    if !occupied(&from) {
        warn!(path = %from.display(), "renamed entry no longer exists");
        return UndoResult {
            from,
            to: original,
            outcome: UndoOutcome::MissingActual,
            error: None,
        };
    }
    match restore(&from, &original) {
        Ok(to) => {
            info!(src = %from.display(), dest = %to.display(), "restored");
            UndoResult { from, to, outcome: UndoOutcome::Undone, error: None }
        }
        Err(e) => {
            warn!(src = %from.display(), dest = %original.display(), error = %e, "undo failed");
            UndoResult {
                from,
                to: original,
                outcome: UndoOutcome::Error,
                error: Some(e.to_string()),
            }
        }
    }
}

fn restore(from: &Path, original: &Path) -> Result<std::path::PathBuf> {
    let to = free_name(original)?;
    rename_in_place(from, &to)?;
    Ok(to)
}

/// Owns the applied operations of one batch until they are undone.
#[derive(Debug, Default)]
pub struct UndoLog {
    entries: Vec<AppliedOperation>,
}

impl UndoLog {
    pub fn new(entries: Vec<AppliedOperation>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[AppliedOperation] {
        &self.entries
    }

    /// Undo the batch and consume the log; a second call returns nothing.
    pub fn undo(&mut self) -> Vec<UndoResult> {
        let entries = std::mem::take(&mut self.entries);
        undo(&entries)
    }
}
