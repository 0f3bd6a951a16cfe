//! Config validation: kind selection and root normalisation.

use std::path::PathBuf;
use tracing::{info, warn};

use crate::errors::{CanonError, Result};
use crate::roots::RootSet;

use super::types::Config;

impl Config {
    /// Check the kind selection and normalise roots in place.
    ///
    /// Unusable roots are dropped with a warning; a config left without any
    /// root fails with `InvalidRoot` naming the first one given.
    pub fn validate_and_normalize(&mut self) -> Result<()> {
        self.kind_filter().validate()?;

        let mut set = RootSet::new();
        for raw in &self.roots {
            let text = raw.to_string_lossy();
            if let Err(e) = set.add(&text) {
                warn!(root = %raw.display(), error = %e, "ignoring root");
            }
        }
        if set.is_empty() {
            let first = self.roots.first().cloned().unwrap_or_else(PathBuf::new);
            return Err(CanonError::InvalidRoot(first));
        }
        self.roots = set.as_slice().to_vec();

        info!(
            roots = self.roots.len(),
            depth = %self.depth,
            policy = %self.policy,
            dirs = self.include_dirs,
            files = self.include_files,
            "config validated"
        );
        Ok(())
    }
}
