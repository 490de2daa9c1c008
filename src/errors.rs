//! Typed error definitions for media_collect.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::ffi::OsString;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Step of a single-file copy that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyStage {
    /// Opening the source for reading.
    Open,
    /// Creating (or truncating) the destination.
    Create,
    /// Streaming bytes from source to destination.
    Stream,
    /// Flushing and closing the destination.
    Close,
}

impl fmt::Display for CopyStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CopyStage::Open => "open source",
            CopyStage::Create => "create destination",
            CopyStage::Stream => "copy data",
            CopyStage::Close => "close destination",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
pub enum CollectError {
    #[error("missing required flag {0}")]
    MissingFlag(&'static str),

    #[error("Destination Directory does not exist: {0}")]
    DestinationMissing(PathBuf),

    #[error("Destination is not a directory: {0}")]
    DestinationNotDirectory(PathBuf),

    #[error("Cannot read {}: {source}", .path.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "<unknown>".into()))]
    Walk {
        path: Option<PathBuf>,
        #[source]
        source: io::Error,
    },

    #[error("Error copying {} to {}: gave up naming {}: {limit} names already taken", .src.display(), .dir.display(), .name.to_string_lossy())]
    TooManyCollisions {
        src: PathBuf,
        name: OsString,
        dir: PathBuf,
        limit: u64,
    },

    #[error("Error copying {} to {}: {stage}: {source}", .src.display(), .dest.display())]
    Copy {
        src: PathBuf,
        dest: PathBuf,
        stage: CopyStage,
        #[source]
        source: io::Error,
    },

    #[error("Error removing {}: {source}", .path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CollectError {
    /// Stable numeric code for structured logs.
    pub fn code(&self) -> u16 {
        match self {
            CollectError::MissingFlag(_) => 10,
            CollectError::DestinationMissing(_) => 11,
            CollectError::DestinationNotDirectory(_) => 12,
            CollectError::Walk { .. } => 20,
            CollectError::TooManyCollisions { .. } => 30,
            CollectError::Copy { .. } => 40,
            CollectError::Remove { .. } => 50,
        }
    }

    /// Short label used as the `kind` field in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            CollectError::MissingFlag(_) => "missing_flag",
            CollectError::DestinationMissing(_) => "destination_missing",
            CollectError::DestinationNotDirectory(_) => "destination_not_directory",
            CollectError::Walk { .. } => "walk",
            CollectError::TooManyCollisions { .. } => "too_many_collisions",
            CollectError::Copy { .. } => "copy",
            CollectError::Remove { .. } => "remove",
        }
    }

    /// True for errors raised before any traversal happens.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            CollectError::MissingFlag(_)
                | CollectError::DestinationMissing(_)
                | CollectError::DestinationNotDirectory(_)
        )
    }

    /// Underlying I/O error, if any.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            CollectError::Walk { source, .. }
            | CollectError::Copy { source, .. }
            | CollectError::Remove { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<walkdir::Error> for CollectError {
    fn from(e: walkdir::Error) -> Self {
        let msg = e.to_string();
        let path = e.path().map(|p| p.to_path_buf());
        let source = e.into_io_error().unwrap_or_else(|| io::Error::other(msg));
        CollectError::Walk { path, source }
    }
}
