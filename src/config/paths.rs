//! Default path helpers and symlink checks.

use anyhow::{anyhow, Result};
use dirs::{config_dir, data_dir};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::CONFIG_ENV;

/// Config file in use: `$CANON_RENAME_CONFIG` when set, else the OS config dir.
/// A relative override is resolved against the current directory; an override
/// naming a directory means `config.xml` inside it.
pub fn default_config_path() -> Result<PathBuf> {
    if let Some(raw) = env::var_os(CONFIG_ENV) {
        let mut p = PathBuf::from(raw);
        if p.as_os_str().is_empty() {
            return Err(anyhow!("{CONFIG_ENV} is set but empty"));
        }
        if p.is_relative() {
            p = env::current_dir()?.join(p);
        }
        if p.is_dir() {
            p.push("config.xml");
        }
        return Ok(p);
    }
    let mut base = config_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
        .ok_or_else(|| anyhow!("cannot determine a config directory"))?;
    base.push("canon_rename");
    base.push("config.xml");
    Ok(base)
}

/// Suggested log file location (data dir). Not created here.
pub fn default_log_path() -> Result<PathBuf> {
    let mut base = data_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".local").join("share")))
        .ok_or_else(|| anyhow!("cannot determine a data directory"))?;
    base.push("canon_rename");
    base.push("canon_rename.log");
    Ok(base)
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if fs::symlink_metadata(anc).is_ok_and(|m| m.file_type().is_symlink()) {
            return Ok(true);
        }
        p = anc.parent();
    }
    Ok(false)
}
