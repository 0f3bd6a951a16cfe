//! I/O error adapters.
//!
//! Turns a raw io::Error into a `CanonError::Mutation` whose message names the
//! operation, the path and, when the OS code is recognised, a short hint.
//!
//! Usage:
//!   fs::rename(src, dst).map_err(io_error_with_help("rename", src))?;

use std::io;
use std::path::Path;

use crate::errors::CanonError;

/// Platform hint for a raw OS error code.
fn hint_for_code(code: i32) -> Option<&'static str> {
    #[cfg(unix)]
    {
        match code {
            libc::EACCES | libc::EPERM => Some("permission denied; check ownership and write permissions"),
            libc::EXDEV => Some("cross-filesystem; a plain rename is not possible here"),
            libc::EBUSY => Some("resource busy; another process holds the entry"),
            libc::ENOENT => Some("entry vanished since the scan"),
            libc::EEXIST => Some("name already taken"),
            libc::ENOTEMPTY => Some("directory not empty"),
            libc::EROFS => Some("read-only filesystem"),
            libc::ENAMETOOLONG => Some("name or path too long"),
            libc::ENOSPC => Some("no space left on device"),
            _ => None,
        }
    }
    #[cfg(windows)]
    {
        match code {
            5 => Some("access denied; check permissions"),
            17 => Some("not same device; a plain rename is not possible here"),
            32 => Some("sharing violation; entry is in use"),
            2 | 3 => Some("entry vanished since the scan"),
            80 | 183 => Some("name already taken"),
            145 => Some("directory not empty"),
            206 => Some("name or path too long"),
            _ => None,
        }
    }
    #[cfg(not(any(unix, windows)))]
    {
        let _ = code;
        None
    }
}

/// Fallback hint from the portable error kind.
fn hint_for_kind(kind: io::ErrorKind) -> Option<&'static str> {
    match kind {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and write permissions"),
        io::ErrorKind::NotFound => Some("entry vanished since the scan"),
        io::ErrorKind::AlreadyExists => Some("name already taken"),
        _ => None,
    }
}

fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);
    let hint = match e.raw_os_error() {
        Some(code) => hint_for_code(code),
        None => hint_for_kind(e.kind()),
    };
    if let Some(h) = hint {
        msg.push_str(" (");
        msg.push_str(h);
        msg.push(')');
    }
    msg
}

/// Wrap an io::Error as a mutation failure on `path`.
pub fn mutation_error(op: &str, path: &Path, e: io::Error) -> CanonError {
    CanonError::Mutation {
        path: path.to_path_buf(),
        message: build_message(op, path, &e),
        source: e,
    }
}

/// Closure form of [`mutation_error`] for use with `.map_err(...)`.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> CanonError + 'a {
    move |e: io::Error| mutation_error(op, path, e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_operation_and_path() {
        let err = mutation_error(
            "rename",
            Path::new("/tmp/a"),
            io::Error::from(io::ErrorKind::NotFound),
        );
        let msg = err.to_string();
        assert!(msg.starts_with("rename '/tmp/a'"), "{msg}");
        assert!(msg.contains("vanished"), "{msg}");
    }

    #[cfg(unix)]
    #[test]
    fn raw_code_hint_wins() {
        let err = mutation_error(
            "remove directory",
            Path::new("/tmp/d"),
            io::Error::from_raw_os_error(libc::ENOTEMPTY),
        );
        assert!(err.to_string().contains("directory not empty"));
    }
}
