use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// True when something (file, directory, or link, even dangling) holds `path`.
pub fn occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Hidden temp name inside `dst_dir` for copy-then-rename.
pub(super) fn unique_temp_path(dst_dir: &Path) -> PathBuf {
    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    dst_dir.join(format!(".canon_rename.{}.{}.tmp", pid, nanos))
}

pub(super) fn is_cross_device(e: &io::Error) -> bool {
    // std::io::ErrorKind has no stable CrossesDevices variant yet; match raw codes.
    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            if code == libc::EXDEV {
                return true;
            }
        }
        #[cfg(windows)]
        {
            // ERROR_NOT_SAME_DEVICE
            if code == 17 {
                return true;
            }
        }
    }
    false
}

#[cfg(unix)]
pub(super) fn fsync_dir(dir: &Path) -> io::Result<()> {
    let f = File::open(dir)?;
    f.sync_all()
}

#[cfg(not(unix))]
pub(super) fn fsync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}
