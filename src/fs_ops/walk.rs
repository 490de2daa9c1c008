//! Directory traversal.
//!
//! `walk_tree` streams entries lazily from walkdir: depth-first, symlinks not
//! followed, the root itself included. Each directory's listing is read in
//! full (sorted by name) before its children are yielded, so files copied into
//! a directory that is already being walked are never revisited.
//! A pruned directory (the destination, when it lives inside the source) is
//! skipped with its subtree.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::errors::CollectError;

/// One visited filesystem entry; produced by the walk and consumed immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalEntry {
    pub path: PathBuf,
    pub file_name: OsString,
    pub is_dir: bool,
    pub depth: usize,
}

/// Lazy walk over `root`, skipping the `prune` directory if given.
pub fn walk_tree(
    root: &Path,
    prune: Option<&Path>,
) -> impl Iterator<Item = Result<TraversalEntry, CollectError>> + use<> {
    let prune_real = prune.and_then(|p| fs::canonicalize(p).ok());

    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |e| match &prune_real {
            // Only directories need the (costly) canonical comparison.
            Some(pr) if e.file_type().is_dir() && e.depth() > 0 => {
                fs::canonicalize(e.path()).map(|p| &p != pr).unwrap_or(true)
            }
            _ => true,
        })
        .map(|res| {
            res.map(|e| TraversalEntry {
                file_name: e.file_name().to_os_string(),
                is_dir: e.file_type().is_dir(),
                depth: e.depth(),
                path: e.into_path(),
            })
            .map_err(CollectError::from)
        })
}
