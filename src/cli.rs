//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Positional ROOTs replace the roots listed in the config file.
//! - --dirs / --files replace the configured kind selection when either is given.
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};
use crate::types::{CollisionPolicy, DepthMode};

/// Rename folders/files under ROOTs to UPPER_SNAKE form without diacritics.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone, Default)]
#[command(
    author,
    version,
    about = "Batch-rename folders and files to a canonical UPPER_SNAKE form"
)]
pub struct Args {
    /// Directories to scan; several may be given.
    #[arg(value_name = "ROOT", value_hint = ValueHint::DirPath)]
    pub roots: Vec<String>,

    /// Rename directories.
    #[arg(long, help = "Include directories (default when neither --dirs nor --files is given)")]
    pub dirs: bool,

    /// Rename files.
    #[arg(long, help = "Include regular files")]
    pub files: bool,

    #[arg(long, value_name = "MODE", help = "Depth to scan: level1, level2, up-to-level2, all")]
    pub depth: Option<DepthMode>,

    #[arg(long, value_name = "POLICY", help = "When the new name exists: suffix, delete, merge")]
    pub policy: Option<CollisionPolicy>,

    /// Keep spaces instead of turning them into '_'.
    #[arg(long, help = "Keep spaces in new names")]
    pub keep_spaces: bool,

    #[arg(long, help = "Show the plan, but do not rename anything")]
    pub dry_run: bool,

    /// Skip the confirmation and the undo offer.
    #[arg(short = 'y', long, help = "Do not ask for confirmation")]
    pub yes: bool,

    /// Write the applied (or, with --dry-run, planned) rows as CSV.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub csv: Option<PathBuf>,

    #[arg(
        short = 'd',
        long,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    #[arg(long, help = "Print the config file location used by canon_rename and exit")]
    pub print_config: bool,

    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,
}

impl Args {
    /// Roots as typed, with shell quoting leftovers removed.
    pub fn resolved_roots(&self) -> Vec<PathBuf> {
        self.roots
            .iter()
            .map(|s| Self::sanitize_str(s))
            .filter(|p| !p.as_os_str().is_empty())
            .collect()
    }

    fn sanitize_str(s: &str) -> PathBuf {
        // PowerShell and CMD can hand over quotes verbatim.
        let trimmed = s.trim();
        let mut inner = if trimmed.len() >= 2
            && ((trimmed.starts_with('"') && trimmed.ends_with('"'))
                || (trimmed.starts_with('\'') && trimmed.ends_with('\'')))
        {
            trimmed[1..trimmed.len() - 1].to_string()
        } else {
            trimmed.trim_matches(|c| c == '\'' || c == '"').to_string()
        };

        // Drop ONE trailing separator, never the root itself.
        if (inner.ends_with('\\') || inner.ends_with('/')) && inner.len() > 1 {
            inner.pop();
        }
        PathBuf::from(inner)
    }

    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        let roots = self.resolved_roots();
        if !roots.is_empty() {
            cfg.roots = roots;
        }
        if self.dirs || self.files {
            cfg.include_dirs = self.dirs;
            cfg.include_files = self.files;
        }
        if let Some(depth) = self.depth {
            cfg.depth = depth;
        }
        if let Some(policy) = self.policy {
            cfg.policy = policy;
        }
        if self.keep_spaces {
            cfg.replace_spaces = false;
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
