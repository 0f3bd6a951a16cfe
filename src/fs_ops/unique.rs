//! Collision-free name search.
//!
//! Policy:
//! - Return the requested path when nothing occupies it.
//! - Otherwise append "_n" to the *full* file name (extension included):
//!   "REPORT.PDF" -> "REPORT.PDF_1", "REPORT.PDF_2", ...
//!
//! This is the single probe used by every caller that needs a free slot
//! (suffix policy, delete fallback, merge keep-both, undo). It is a linear
//! probe against the live filesystem and is not atomic against other writers.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::trace;

use super::util::occupied;
use crate::errors::{CanonError, Result};

/// Upper bound on probes before giving up.
const MAX_TRIES: u64 = 100_000;

/// First free path among `target`, `target_1`, `target_2`, ...
pub fn free_name(target: &Path) -> Result<PathBuf> {
    if !occupied(target) {
        return Ok(target.to_path_buf());
    }
    first_free_suffix(target)
}

fn first_free_suffix(target: &Path) -> Result<PathBuf> {
    let name = target
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("_"));

    for n in 1..=MAX_TRIES {
        let mut candidate_name = name.clone();
        candidate_name.push(format!("_{n}"));
        let candidate = target.with_file_name(&candidate_name);
        if !occupied(&candidate) {
            return Ok(candidate);
        }
        if n == 3 {
            trace!(target = %target.display(), "free_name: several suffixes taken, still probing");
        }
    }
    Err(CanonError::CollisionExhausted(target.to_path_buf()))
}
