//! Config validation logic.
//! Runs before any traversal: both flags present, destination an existing directory.

use std::fs;
use tracing::{debug, error};

use crate::errors::CollectError;

use super::types::Config;

impl Config {
    /// Check required settings and the destination directory.
    ///
    /// The source is not checked here; an absent source surfaces as a walk error.
    pub fn validate(&self) -> Result<(), CollectError> {
        if self.source_dir.as_os_str().is_empty() {
            return Err(CollectError::MissingFlag("-s"));
        }
        if self.dest_dir.as_os_str().is_empty() {
            return Err(CollectError::MissingFlag("-d"));
        }

        let dest = &self.dest_dir;
        match fs::metadata(dest) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                error!(path = %dest.display(), "Destination is not a directory");
                return Err(CollectError::DestinationNotDirectory(dest.clone()));
            }
            Err(e) => {
                error!(path = %dest.display(), error = %e, "Destination Directory does not exist");
                return Err(CollectError::DestinationMissing(dest.clone()));
            }
        }

        debug!(
            source = %self.source_dir.display(),
            dest = %dest.display(),
            remove = self.remove_source,
            "Config validated"
        );
        Ok(())
    }
}
