//! Filesystem operations: modularized.
//!
//! Everything the collector touches goes through [`MediaFs`], so the collision
//! and copy/remove logic can run against [`RealFs`] or an in-memory fake.

mod copy;
mod filter;
mod helpers;
#[cfg(any(test, feature = "test-helpers"))]
mod memfs;
mod resolve;
mod walk;

pub use copy::copy_streaming;
pub use filter::{MEDIA_SUFFIXES, MediaFilter};
pub use helpers::io_hint;
#[cfg(any(test, feature = "test-helpers"))]
pub use memfs::{Fault, MemFs};
pub use resolve::{resolve_destination, split_name};
pub use walk::{TraversalEntry, walk_tree};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::errors::CollectError;

/// Boxed lazy walk, one item per visited entry.
pub type Walk<'a> = Box<dyn Iterator<Item = Result<TraversalEntry, CollectError>> + 'a>;

/// Filesystem seam used by the collector.
pub trait MediaFs {
    /// Visit every entry under `root` once; `prune` names a directory to skip.
    fn walk<'a>(&'a self, root: &Path, prune: Option<&Path>) -> Walk<'a>;

    /// True if any entry (file, dir or symlink, even dangling) exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Copy one file, returning bytes written.
    fn copy_file(&self, src: &Path, dest: &Path) -> Result<u64, CollectError>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Absolute, symlink-free form of `path`, if it exists.
    fn canonical(&self, path: &Path) -> Option<PathBuf>;
}

/// The real filesystem: walkdir + std::fs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFs;

impl MediaFs for RealFs {
    fn walk<'a>(&'a self, root: &Path, prune: Option<&Path>) -> Walk<'a> {
        Box::new(walk_tree(root, prune))
    }

    fn exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    fn copy_file(&self, src: &Path, dest: &Path) -> Result<u64, CollectError> {
        copy_streaming(src, dest)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    fn canonical(&self, path: &Path) -> Option<PathBuf> {
        fs::canonicalize(path).ok()
    }
}
