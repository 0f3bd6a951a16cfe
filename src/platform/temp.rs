//! Unique hidden sibling names for atomic config writes.
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Pattern: .canon_rename.config.tmp.<pid>.<nanos>.<seq>
pub fn tmp_config_sibling_name(target: &Path) -> PathBuf {
    let pid = std::process::id();
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_nanos()).unwrap_or(0);
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    let name = format!(".canon_rename.config.tmp.{pid}.{nanos}.{seq}");
    target.parent().unwrap_or_else(|| Path::new(".")).join(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn names_are_unique_across_threads() {
        let handles: Vec<_> = (0..16)
            .map(|_| thread::spawn(|| tmp_config_sibling_name(Path::new("cfg/config.xml"))))
            .collect();
        let names: HashSet<PathBuf> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(names.len(), 16);
        assert!(names.iter().all(|p| p.parent() == Some(Path::new("cfg"))));
    }
}
