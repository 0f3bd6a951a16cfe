//! Export rows and batch summaries.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::plan::PreviewRow;
use crate::types::{AppliedOperation, EntryKind, Outcome, UndoOutcome, UndoResult};

/// One row of the CSV/JSON export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRecord {
    #[serde(rename = "base")]
    pub root: String,
    pub kind: EntryKind,
    pub current_path: String,
    pub intended_new_path: String,
    pub actual_new_path: String,
    pub op: String,
}

impl ExportRecord {
    pub fn from_applied(a: &AppliedOperation) -> Self {
        Self {
            root: a.root.display().to_string(),
            kind: a.source.kind,
            current_path: a.source.path.display().to_string(),
            intended_new_path: a.intended_target.display().to_string(),
            actual_new_path: a.actual_target.display().to_string(),
            op: a.outcome.to_string(),
        }
    }

    /// Preview rows have no actual path yet.
    pub fn from_preview(row: &PreviewRow<'_>) -> Self {
        Self {
            root: row.op.root.display().to_string(),
            kind: row.op.source.kind,
            current_path: row.op.source.path.display().to_string(),
            intended_new_path: row.op.intended_target.display().to_string(),
            actual_new_path: String::new(),
            op: row.status.to_string(),
        }
    }
}

pub fn export_applied(applied: &[AppliedOperation]) -> Vec<ExportRecord> {
    applied.iter().map(ExportRecord::from_applied).collect()
}

pub fn export_preview(rows: &[PreviewRow<'_>]) -> Vec<ExportRecord> {
    rows.iter().map(ExportRecord::from_preview).collect()
}

/// Write `records` as CSV with a header line.
pub fn write_csv(path: &Path, records: &[ExportRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("create CSV file '{}'", path.display()))?;
    for rec in records {
        wtr.serialize(rec)
            .with_context(|| format!("write CSV row to '{}'", path.display()))?;
    }
    // An empty export still gets its header.
    if records.is_empty() {
        wtr.write_record([
            "base",
            "kind",
            "current_path",
            "intended_new_path",
            "actual_new_path",
            "op",
        ])?;
    }
    wtr.flush()
        .with_context(|| format!("flush CSV file '{}'", path.display()))?;
    info!(path = %path.display(), rows = records.len(), "wrote CSV");
    Ok(())
}

/// Outcome counts for one applied batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub renamed: usize,
    pub suffixed: usize,
    pub deleted_then_renamed: usize,
    pub merged: usize,
    pub skipped_identical: usize,
    pub kept_both: usize,
    pub errors: usize,
}

impl BatchSummary {
    pub fn from_applied(applied: &[AppliedOperation]) -> Self {
        let mut s = Self::default();
        for a in applied {
            match a.outcome {
                Outcome::Renamed => s.renamed += 1,
                Outcome::RenamedWithSuffix => s.suffixed += 1,
                Outcome::DeletedThenRenamed => s.deleted_then_renamed += 1,
                Outcome::Merged => s.merged += 1,
                Outcome::MergedSkippedIdentical => s.skipped_identical += 1,
                Outcome::MergedKeptBothWithSuffix => s.kept_both += 1,
                Outcome::Error => s.errors += 1,
            }
        }
        s
    }

    pub fn total(&self) -> usize {
        self.renamed
            + self.suffixed
            + self.deleted_then_renamed
            + self.merged
            + self.skipped_identical
            + self.kept_both
            + self.errors
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UndoSummary {
    pub undone: usize,
    pub skipped_merge: usize,
    pub missing: usize,
    pub errors: usize,
}

impl UndoSummary {
    pub fn from_results(results: &[UndoResult]) -> Self {
        let mut s = Self::default();
        for r in results {
            match r.outcome {
                UndoOutcome::Undone => s.undone += 1,
                UndoOutcome::SkippedMerge => s.skipped_merge += 1,
                UndoOutcome::MissingActual => s.missing += 1,
                UndoOutcome::Error => s.errors += 1,
            }
        }
        s
    }
}
