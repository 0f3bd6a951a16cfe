//! Typed error definitions for canon_rename.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CanonError {
    #[error("No entry kind selected: include directories, files, or both")]
    NoKindSelected,

    #[error("Invalid root (not an existing directory): {0}")]
    InvalidRoot(PathBuf),

    #[error("Failed to read {path} while scanning: {source}")]
    Enumeration {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("No free name found next to {0}")]
    CollisionExhausted(PathBuf),

    #[error("{message}")]
    Mutation {
        path: PathBuf,
        message: String,
        #[source]
        source: io::Error,
    },

    #[error("Merged entry cannot be restored: {0}")]
    NonReversible(PathBuf),
}

impl CanonError {
    /// Stable numeric code for structured logs.
    pub fn code(&self) -> u16 {
        match self {
            CanonError::NoKindSelected => 10,
            CanonError::InvalidRoot(_) => 11,
            CanonError::Enumeration { .. } => 20,
            CanonError::CollisionExhausted(_) => 30,
            CanonError::Mutation { .. } => 40,
            CanonError::NonReversible(_) => 50,
        }
    }

    /// True for errors raised before anything touched the filesystem.
    pub fn is_configuration(&self) -> bool {
        matches!(self, CanonError::NoKindSelected | CanonError::InvalidRoot(_))
    }

    /// Underlying io::ErrorKind for mutation failures.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            CanonError::Mutation { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CanonError>;
