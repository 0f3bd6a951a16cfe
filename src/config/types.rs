//! Core configuration types.
//! - Config holds front-end settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::types::{CollisionPolicy, DepthMode, KindFilter};

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Warnings and errors (default)
    #[default]
    Normal,
    /// One line per renamed entry
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" | "warn" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration of one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directories to scan
    pub roots: Vec<PathBuf>,
    pub include_dirs: bool,
    pub include_files: bool,
    pub depth: DepthMode,
    pub policy: CollisionPolicy,
    /// Replace spaces with `_` in new names
    pub replace_spaces: bool,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// Print the plan, change nothing
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            include_dirs: true,
            include_files: false,
            depth: DepthMode::default(),
            policy: CollisionPolicy::default(),
            replace_spaces: true,
            log_level: LogLevel::Normal,
            log_file: None,
            dry_run: false,
        }
    }
}

impl Config {
    pub fn kind_filter(&self) -> KindFilter {
        KindFilter::new(self.include_dirs, self.include_files)
    }
}
