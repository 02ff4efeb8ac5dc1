//! Error types for a restore run.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RestoreError {
    /// Source is missing, unreadable, or not valid UTF-8.
    #[error("read source {}", .path.display())]
    ResourceNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Destination could not be written in full.
    #[error("write destination {}", .path.display())]
    ResourceWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RestoreError {
    pub fn path(&self) -> &Path {
        match self {
            RestoreError::ResourceNotFound { path, .. }
            | RestoreError::ResourceWrite { path, .. } => path,
        }
    }
}
