//! Core data model: scan filters, candidates, planned and applied operations,
//! merge counters and undo results.

use serde::Serialize;
use std::fmt;
use std::ops::AddAssign;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::errors::{CanonError, Result};

/// Kind of a filesystem entry eligible for renaming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntryKind {
    #[serde(rename = "DIR")]
    Directory,
    #[serde(rename = "FILE")]
    File,
}

impl EntryKind {
    pub fn label(self) -> &'static str {
        match self {
            EntryKind::Directory => "DIR",
            EntryKind::File => "FILE",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which depths below a root are scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthMode {
    /// Direct children of the root only.
    Level1,
    /// Grandchildren only.
    Level2,
    /// Children and grandchildren.
    UpToLevel2,
    /// Everything below the root.
    #[default]
    All,
}

impl DepthMode {
    /// Deepest level to walk, `None` for unbounded.
    pub fn max_depth(self) -> Option<usize> {
        match self {
            DepthMode::Level1 => Some(1),
            DepthMode::Level2 | DepthMode::UpToLevel2 => Some(2),
            DepthMode::All => None,
        }
    }

    pub fn includes(self, depth: usize) -> bool {
        match self {
            DepthMode::Level1 => depth == 1,
            DepthMode::Level2 => depth == 2,
            DepthMode::UpToLevel2 => depth == 1 || depth == 2,
            DepthMode::All => depth >= 1,
        }
    }

    /// Parse common spellings (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "1" | "level1" | "level_1" | "level1_only" | "level_1_only" => Some(DepthMode::Level1),
            "2" | "level2" | "level_2" | "level2_only" | "level_2_only" => Some(DepthMode::Level2),
            "up_to_2" | "up_to_level2" | "up_to_level_2" | "1_2" => Some(DepthMode::UpToLevel2),
            "all" | "all_levels" => Some(DepthMode::All),
            _ => None,
        }
    }
}

impl fmt::Display for DepthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DepthMode::Level1 => "level1",
            DepthMode::Level2 => "level2",
            DepthMode::UpToLevel2 => "up-to-level2",
            DepthMode::All => "all",
        };
        f.write_str(s)
    }
}

impl FromStr for DepthMode {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid depth mode: '{s}'"))
    }
}

/// Entry kinds to include in a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindFilter {
    pub directories: bool,
    pub files: bool,
}

impl Default for KindFilter {
    fn default() -> Self {
        Self {
            directories: true,
            files: false,
        }
    }
}

impl KindFilter {
    pub fn new(directories: bool, files: bool) -> Self {
        Self { directories, files }
    }

    pub fn accepts(self, kind: EntryKind) -> bool {
        match kind {
            EntryKind::Directory => self.directories,
            EntryKind::File => self.files,
        }
    }

    /// At least one kind must be selected; the enumerator itself does not check.
    pub fn validate(self) -> Result<()> {
        if self.directories || self.files {
            Ok(())
        } else {
            Err(CanonError::NoKindSelected)
        }
    }
}

/// Strategy used when the intended name is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// Keep both by renaming to `NAME_1`, `NAME_2`, ...
    #[default]
    Suffix,
    /// Remove the existing target, then rename.
    Delete,
    /// Merge directories and de-duplicate identical files.
    Merge,
}

impl CollisionPolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "suffix" | "keep" | "keep_both" | "unique" => Some(CollisionPolicy::Suffix),
            "delete" | "replace" | "overwrite" => Some(CollisionPolicy::Delete),
            "merge" | "merge_hash" => Some(CollisionPolicy::Merge),
            _ => None,
        }
    }
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CollisionPolicy::Suffix => "suffix",
            CollisionPolicy::Delete => "delete",
            CollisionPolicy::Merge => "merge",
        };
        f.write_str(s)
    }
}

impl FromStr for CollisionPolicy {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid collision policy: '{s}'"))
    }
}

/// A filesystem entry found under a root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateEntry {
    pub root: PathBuf,
    pub path: PathBuf,
    pub kind: EntryKind,
    /// Path segments below `root` (direct children have depth 1).
    pub depth: usize,
}

/// A rename the planner intends to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedOperation {
    pub root: PathBuf,
    pub source: CandidateEntry,
    /// Always a sibling of `source.path`.
    pub intended_target: PathBuf,
}

impl PlannedOperation {
    pub fn source_path(&self) -> &Path {
        &self.source.path
    }
}

/// What happened to one planned operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Renamed,
    RenamedWithSuffix,
    DeletedThenRenamed,
    Merged,
    MergedSkippedIdentical,
    MergedKeptBothWithSuffix,
    Error,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Renamed => "renamed",
            Outcome::RenamedWithSuffix => "renamed_with_suffix",
            Outcome::DeletedThenRenamed => "deleted_then_renamed",
            Outcome::Merged => "merged",
            Outcome::MergedSkippedIdentical => "merged_skipped_identical",
            Outcome::MergedKeptBothWithSuffix => "merged_kept_both_with_suffix",
            Outcome::Error => "error",
        }
    }

    /// Merge outcomes interleave or drop content and cannot be undone.
    pub fn is_merge(self) -> bool {
        matches!(
            self,
            Outcome::Merged | Outcome::MergedSkippedIdentical | Outcome::MergedKeptBothWithSuffix
        )
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record of one executed operation; the undo log is a list of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedOperation {
    pub root: PathBuf,
    pub source: CandidateEntry,
    pub intended_target: PathBuf,
    /// Where the entry ended up (`source.path` on error).
    pub actual_target: PathBuf,
    pub outcome: Outcome,
    /// Counters of the merge, for `Outcome::Merged`.
    pub merge_stats: Option<MergeStats>,
    /// Failure message, for `Outcome::Error`.
    pub error: Option<String>,
}

/// Counters accumulated by one merge, summed across recursion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeStats {
    pub moved: u64,
    pub copied: u64,
    pub deduplicated: u64,
    pub kept_both_conflicts: u64,
    pub errors: u64,
}

impl AddAssign for MergeStats {
    fn add_assign(&mut self, rhs: Self) {
        self.moved += rhs.moved;
        self.copied += rhs.copied;
        self.deduplicated += rhs.deduplicated;
        self.kept_both_conflicts += rhs.kept_both_conflicts;
        self.errors += rhs.errors;
    }
}

/// Result of reversing one applied operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UndoOutcome {
    Undone,
    SkippedMerge,
    MissingActual,
    Error,
}

impl fmt::Display for UndoOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UndoOutcome::Undone => "undone",
            UndoOutcome::SkippedMerge => "skipped_merge",
            UndoOutcome::MissingActual => "missing_actual",
            UndoOutcome::Error => "error",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoResult {
    /// The applied operation's `actual_target`.
    pub from: PathBuf,
    /// Where it was moved back to (the original path, or a free variant of it).
    pub to: PathBuf,
    pub outcome: UndoOutcome,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_mode_selection() {
        assert!(DepthMode::Level1.includes(1) && !DepthMode::Level1.includes(2));
        assert!(DepthMode::Level2.includes(2) && !DepthMode::Level2.includes(1));
        assert!(DepthMode::UpToLevel2.includes(1) && DepthMode::UpToLevel2.includes(2));
        assert!(!DepthMode::UpToLevel2.includes(3));
        assert!(DepthMode::All.includes(7) && !DepthMode::All.includes(0));
    }

    #[test]
    fn depth_mode_parse_and_display() {
        for m in [DepthMode::Level1, DepthMode::Level2, DepthMode::UpToLevel2, DepthMode::All] {
            assert_eq!(m.to_string().parse::<DepthMode>().unwrap(), m);
        }
        assert_eq!(DepthMode::parse("Up to Level 2"), Some(DepthMode::UpToLevel2));
        assert_eq!(DepthMode::parse("All levels"), Some(DepthMode::All));
        assert!("deep".parse::<DepthMode>().is_err());
    }

    #[test]
    fn policy_parse() {
        assert_eq!(CollisionPolicy::parse("MERGE"), Some(CollisionPolicy::Merge));
        assert_eq!(CollisionPolicy::parse("delete"), Some(CollisionPolicy::Delete));
        assert_eq!(CollisionPolicy::parse("suffix"), Some(CollisionPolicy::Suffix));
        assert!("drop".parse::<CollisionPolicy>().is_err());
    }

    #[test]
    fn empty_kind_filter_is_rejected() {
        assert!(matches!(
            KindFilter::new(false, false).validate(),
            Err(CanonError::NoKindSelected)
        ));
        assert!(KindFilter::new(true, false).validate().is_ok());
    }

    #[test]
    fn merge_stats_add() {
        let mut a = MergeStats { moved: 1, errors: 1, ..Default::default() };
        a += MergeStats { moved: 2, deduplicated: 3, ..Default::default() };
        assert_eq!(a.moved, 3);
        assert_eq!(a.deduplicated, 3);
        assert_eq!(a.errors, 1);
    }
}
