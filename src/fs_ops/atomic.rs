//! Rename primitive.
//! - Performs a plain rename (never used to overwrite: callers pick a free slot first).
//! - On Unix, best-effort fsync of the destination directory after the rename.

use std::fs;
use std::io;
use std::path::Path;

pub fn try_atomic_rename(src: &Path, dst: &Path) -> io::Result<()> {
    fs::rename(src, dst)?;

    #[cfg(unix)]
    if let Some(parent) = dst.parent() {
        // A successful rename stays successful even if the fsync fails.
        let _ = super::util::fsync_dir(parent);
    }

    Ok(())
}
