//! Content identity: byte length plus streaming SHA-256.

use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;
use tracing::trace;

use crate::errors::Result;
use crate::fs_ops::io_error_with_help;

/// Read size for hashing.
const CHUNK: usize = 1024 * 1024;

pub type ContentDigest = [u8; 32];

/// SHA-256 of the file's bytes, read in fixed 1 MiB chunks.
pub fn sha256_file(path: &Path) -> io::Result<ContentDigest> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; CHUNK];
    loop {
        let n = match file.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize().into())
}

/// Lowercase hex rendering of a digest, for logs.
pub fn to_hex(digest: &ContentDigest) -> String {
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// True when both files have the same length and the same digest.
/// Differing lengths short-circuit without reading either file.
pub fn files_identical(a: &Path, b: &Path) -> Result<bool> {
    let len_a = fs::metadata(a).map_err(io_error_with_help("stat", a))?.len();
    let len_b = fs::metadata(b).map_err(io_error_with_help("stat", b))?.len();
    if len_a != len_b {
        trace!(a = %a.display(), b = %b.display(), len_a, len_b, "sizes differ");
        return Ok(false);
    }
    let da = sha256_file(a).map_err(io_error_with_help("hash", a))?;
    let db = sha256_file(b).map_err(io_error_with_help("hash", b))?;
    trace!(a = %a.display(), digest = %to_hex(&da), "hashed");
    Ok(da == db)
}
