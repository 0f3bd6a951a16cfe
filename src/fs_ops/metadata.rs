//! Metadata carry-over for copied entries.
//! - Copies timestamps (atime, mtime) and permissions from the source metadata.
//! - Best-effort: failures are logged and ignored; the copy itself already succeeded.

use filetime::{set_file_times, FileTime};
use std::fs;
use std::path::Path;
use tracing::{trace, warn};

/// Apply `src_meta`'s times and permission bits to `dest`.
pub fn preserve_metadata(dest: &Path, src_meta: &fs::Metadata) {
    let at = FileTime::from_last_access_time(src_meta);
    let mt = FileTime::from_last_modification_time(src_meta);
    if let Err(e) = set_file_times(dest, at, mt) {
        warn!(path = %dest.display(), error = %e, "failed to set atime/mtime on copy");
    } else {
        trace!(path = %dest.display(), "set atime/mtime on copy");
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = src_meta.permissions().mode() & 0o7777;
        if let Err(e) = fs::set_permissions(dest, fs::Permissions::from_mode(mode)) {
            warn!(path = %dest.display(), mode = format!("{:o}", mode), error = %e, "failed to set permissions on copy");
        }
    }

    #[cfg(windows)]
    {
        if let Ok(meta) = fs::metadata(dest) {
            let mut perms = meta.permissions();
            perms.set_readonly(src_meta.permissions().readonly());
            let _ = fs::set_permissions(dest, perms);
        }
    }
}
