//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Creates a secure template when the default location has none.
//!
//! Unknown XML fields are rejected so typos surface instead of being ignored.

use anyhow::{anyhow, Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
use super::types::{Config, LogLevel};
use super::CONFIG_ENV;
use crate::platform::{set_dir_mode_0700, set_file_mode_0600, write_config_secure_new_0600};
use crate::types::{CollisionPolicy, DepthMode};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(rename = "root", default)]
    roots: Vec<String>,
    include_dirs: Option<bool>,
    include_files: Option<bool>,
    depth: Option<String>,
    policy: Option<String>,
    replace_spaces: Option<bool>,
    log_level: Option<String>,
    log_file: Option<String>,
}

fn non_empty(s: &str) -> Option<&str> {
    let t = s.trim();
    if t.is_empty() { None } else { Some(t) }
}

// Map XmlConfig -> Config; absent fields keep their defaults.
fn xml_to_config(parsed: XmlConfig, origin: &Path) -> Result<Config> {
    let mut cfg = Config::default();

    cfg.roots = parsed
        .roots
        .iter()
        .filter_map(|s| non_empty(s))
        .map(PathBuf::from)
        .collect();
    if let Some(v) = parsed.include_dirs {
        cfg.include_dirs = v;
    }
    if let Some(v) = parsed.include_files {
        cfg.include_files = v;
    }
    if let Some(s) = parsed.depth.as_deref().and_then(non_empty) {
        cfg.depth = DepthMode::parse(s)
            .ok_or_else(|| anyhow!("invalid <depth> '{s}' in {}", origin.display()))?;
    }
    if let Some(s) = parsed.policy.as_deref().and_then(non_empty) {
        cfg.policy = CollisionPolicy::parse(s)
            .ok_or_else(|| anyhow!("invalid <policy> '{s}' in {}", origin.display()))?;
    }
    if let Some(v) = parsed.replace_spaces {
        cfg.replace_spaces = v;
    }
    if let Some(s) = parsed.log_level.as_deref().and_then(non_empty) {
        match s.parse::<LogLevel>() {
            Ok(level) => cfg.log_level = level,
            Err(e) => debug!("ignoring log_level in {}: {e}", origin.display()),
        }
    }
    cfg.log_file = parsed.log_file.as_deref().and_then(non_empty).map(PathBuf::from);
    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed, path)
}

/// Outcome of looking for the config file.
#[derive(Debug)]
pub enum LoadResult {
    /// File found and parsed.
    Loaded(Config, PathBuf),
    /// Default location was empty; a template was written there.
    CreatedTemplate(PathBuf),
    /// No file and no template (explicit override missing, or creation refused).
    Missing,
}

/// Load the config in use, writing a template on first run at the default path.
pub fn load_or_init() -> Result<LoadResult> {
    let explicit = env::var_os(CONFIG_ENV).is_some();
    let path = default_config_path()?;
    if path.exists() {
        let cfg = load_config_from_xml_path(&path)?;
        return Ok(LoadResult::Loaded(cfg, path));
    }
    if explicit {
        return Err(anyhow!("{CONFIG_ENV} points to a missing file: {}", path.display()));
    }
    match create_template_config(&path) {
        Ok(()) => Ok(LoadResult::CreatedTemplate(path)),
        Err(e) => {
            debug!("not creating template config at {}: {e:#}", path.display());
            Ok(LoadResult::Missing)
        }
    }
}

/// Write a commented template with every field at its default.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        return Err(anyhow!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        ));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
        let _ = set_dir_mode_0700(parent);
    }

    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "/path/to/canon_rename.log".into());
    let defaults = Config::default();

    let content = format!(
        "<!--\n  canon_rename configuration (XML)\n\n  root            -> directory to scan; repeat the element for several roots\n  include_dirs    -> rename directories (true/false)\n  include_files   -> rename files (true/false)\n  depth           -> level1 | level2 | up-to-level2 | all\n  policy          -> suffix | delete | merge (what to do when the new name exists)\n  replace_spaces  -> turn spaces into '_' (true/false)\n  log_level       -> quiet | normal | info | debug\n  log_file        -> optional log file, e.g. {suggested_log}\n\n  Command-line flags override these values.\n-->\n<config>\n  <include_dirs>{}</include_dirs>\n  <include_files>{}</include_files>\n  <depth>{}</depth>\n  <policy>{}</policy>\n  <replace_spaces>{}</replace_spaces>\n  <log_level>{}</log_level>\n</config>\n",
        defaults.include_dirs,
        defaults.include_files,
        defaults.depth,
        defaults.policy,
        defaults.replace_spaces,
        defaults.log_level,
    );

    write_config_secure_new_0600(path, content.as_bytes())?;
    let _ = set_file_mode_0600(path);
    info!("Created template config at {}", path.display());
    Ok(())
}
