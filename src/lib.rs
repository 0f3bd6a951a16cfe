//! Core library for `canon_rename`.
//!
//! Pipeline: [`enumerate`] roots into candidates, [`plan`] their canonical
//! names, [`apply`] the plan under a [`CollisionPolicy`], and reverse simple
//! renames with [`undo`] / [`UndoLog`]. The core reads no config files or
//! environment variables; `config`, `cli` and `output` serve the binary.

pub mod apply;
pub mod cli;
pub mod config;
pub mod digest;
pub mod enumerate;
pub mod errors;
pub mod fs_ops;
pub mod merge;
pub mod output;
pub mod plan;
pub mod platform;
pub mod report;
pub mod roots;
pub mod shutdown;
pub mod transform;
pub mod types;
pub mod undo;

pub use apply::apply;
pub use config::{Config, LogLevel};
pub use digest::{files_identical, sha256_file};
pub use enumerate::enumerate;
pub use errors::{CanonError, Result};
pub use fs_ops::free_name;
pub use merge::merge_into;
pub use plan::{count_collisions, plan, preview, PreviewRow, PreviewStatus};
pub use report::{write_csv, BatchSummary, ExportRecord, UndoSummary};
pub use roots::RootSet;
pub use transform::{transform, TransformOptions};
pub use types::{
    AppliedOperation, CandidateEntry, CollisionPolicy, DepthMode, EntryKind, KindFilter,
    MergeStats, Outcome, PlannedOperation, UndoOutcome, UndoResult,
};
pub use undo::{undo, UndoLog};

/// Everything needed to run a batch.
pub mod prelude {
    pub use crate::{
        apply, enumerate, plan, preview, undo, AppliedOperation, BatchSummary, CandidateEntry,
        CanonError, CollisionPolicy, DepthMode, EntryKind, ExportRecord, KindFilter, Outcome,
        PlannedOperation, RootSet, UndoLog, UndoOutcome, UndoSummary,
    };
}
