//! In-memory fake filesystem for tests.
//!
//! Paths are kept in a BTreeMap; component-wise `Path` ordering makes a
//! prefix scan a depth-first pre-order walk. Faults can be injected per path
//! to exercise each failure stage without real permissions tricks.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::{Path, PathBuf};

use crate::errors::{CollectError, CopyStage};

use super::{MediaFs, TraversalEntry, Walk};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Dir,
    File(Vec<u8>),
}

/// Failure to inject at a given path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Source cannot be opened.
    Open,
    /// Destination cannot be created.
    Create,
    /// Copy fails after writing half of the bytes.
    Stream,
    /// All bytes written, then closing the destination fails.
    Close,
    /// Source cannot be removed.
    Remove,
    /// Walk reports an unreadable entry here and skips its subtree.
    Walk,
}

#[derive(Debug, Default)]
pub struct MemFs {
    nodes: RefCell<BTreeMap<PathBuf, Node>>,
    faults: RefCell<HashMap<PathBuf, Fault>>,
}

impl MemFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory (and any missing parents).
    pub fn add_dir(&self, path: impl AsRef<Path>) -> &Self {
        let mut nodes = self.nodes.borrow_mut();
        for anc in path.as_ref().ancestors() {
            if anc.as_os_str().is_empty() {
                continue;
            }
            nodes.entry(anc.to_path_buf()).or_insert(Node::Dir);
        }
        drop(nodes);
        self
    }

    /// Add a file with contents, creating parent directories.
    pub fn add_file(&self, path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) -> &Self {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.nodes
            .borrow_mut()
            .insert(path.to_path_buf(), Node::File(contents.into()));
        self
    }

    pub fn inject(&self, path: impl AsRef<Path>, fault: Fault) -> &Self {
        self.faults
            .borrow_mut()
            .insert(path.as_ref().to_path_buf(), fault);
        self
    }

    /// Contents of a file, or None if absent or a directory.
    pub fn read(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        match self.nodes.borrow().get(path.as_ref()) {
            Some(Node::File(data)) => Some(data.clone()),
            _ => None,
        }
    }

    /// Names of the files directly inside `dir`, sorted.
    pub fn file_names_in(&self, dir: impl AsRef<Path>) -> Vec<String> {
        let dir = dir.as_ref();
        self.nodes
            .borrow()
            .iter()
            .filter(|(p, n)| matches!(n, Node::File(_)) && p.parent() == Some(dir))
            .filter_map(|(p, _)| p.file_name().map(|f| f.to_string_lossy().into_owned()))
            .collect()
    }

    fn fault_at(&self, path: &Path) -> Option<Fault> {
        self.faults.borrow().get(path).copied()
    }

    fn copy_err(src: &Path, dest: &Path, stage: CopyStage, source: io::Error) -> CollectError {
        CollectError::Copy {
            src: src.to_path_buf(),
            dest: dest.to_path_buf(),
            stage,
            source,
        }
    }
}

impl MediaFs for MemFs {
    fn walk<'a>(&'a self, root: &Path, prune: Option<&Path>) -> Walk<'a> {
        let nodes = self.nodes.borrow();
        if !nodes.contains_key(root) {
            let err = CollectError::Walk {
                path: Some(root.to_path_buf()),
                source: io::Error::from(io::ErrorKind::NotFound),
            };
            return Box::new(std::iter::once(Err(err)));
        }

        let root_depth = root.components().count();
        let mut out = Vec::new();
        let mut skip_under: Option<PathBuf> = None;
        for (path, node) in nodes.range(root.to_path_buf()..) {
            if !path.starts_with(root) {
                break;
            }
            if let Some(s) = &skip_under
                && path.starts_with(s)
            {
                continue;
            }
            if let Some(pr) = prune
                && path != root
                && path.starts_with(pr)
            {
                continue;
            }
            if self.fault_at(path) == Some(Fault::Walk) {
                out.push(Err(CollectError::Walk {
                    path: Some(path.clone()),
                    source: io::Error::from(io::ErrorKind::PermissionDenied),
                }));
                skip_under = Some(path.clone());
                continue;
            }
            out.push(Ok(TraversalEntry {
                path: path.clone(),
                file_name: path
                    .file_name()
                    .map(|f| f.to_os_string())
                    .unwrap_or_else(|| path.as_os_str().to_os_string()),
                is_dir: *node == Node::Dir,
                depth: path.components().count() - root_depth,
            }));
        }
        Box::new(out.into_iter())
    }

    fn exists(&self, path: &Path) -> bool {
        self.nodes.borrow().contains_key(path)
    }

    fn copy_file(&self, src: &Path, dest: &Path) -> Result<u64, CollectError> {
        let data = match self.nodes.borrow().get(src) {
            _ if self.fault_at(src) == Some(Fault::Open) => {
                return Err(Self::copy_err(src, dest, CopyStage::Open, io::Error::from(io::ErrorKind::PermissionDenied)));
            }
            Some(Node::File(data)) => Some(data.clone()),
            Some(Node::Dir) => None,
            None => {
                return Err(Self::copy_err(src, dest, CopyStage::Open, io::Error::from(io::ErrorKind::NotFound)));
            }
        };

        let parent_is_dir = dest
            .parent()
            .is_some_and(|p| self.nodes.borrow().get(p) == Some(&Node::Dir));
        let dest_is_dir = self.nodes.borrow().get(dest) == Some(&Node::Dir);
        if self.fault_at(dest) == Some(Fault::Create) || !parent_is_dir || dest_is_dir {
            return Err(Self::copy_err(src, dest, CopyStage::Create, io::Error::from(io::ErrorKind::PermissionDenied)));
        }

        let Some(data) = data else {
            // Reading a directory fails after the destination was created.
            self.nodes.borrow_mut().insert(dest.to_path_buf(), Node::File(Vec::new()));
            return Err(Self::copy_err(src, dest, CopyStage::Stream, io::Error::other("is a directory")));
        };

        match self.fault_at(src) {
            Some(Fault::Stream) => {
                let partial = data[..data.len() / 2].to_vec();
                self.nodes.borrow_mut().insert(dest.to_path_buf(), Node::File(partial));
                Err(Self::copy_err(src, dest, CopyStage::Stream, io::Error::other("short read")))
            }
            Some(Fault::Close) => {
                self.nodes.borrow_mut().insert(dest.to_path_buf(), Node::File(data));
                Err(Self::copy_err(src, dest, CopyStage::Close, io::Error::other("deferred write failed")))
            }
            _ => {
                let len = data.len() as u64;
                self.nodes.borrow_mut().insert(dest.to_path_buf(), Node::File(data));
                Ok(len)
            }
        }
    }

    fn canonical(&self, path: &Path) -> Option<PathBuf> {
        self.exists(path).then(|| path.to_path_buf())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        if self.fault_at(path) == Some(Fault::Remove) {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        let mut nodes = self.nodes.borrow_mut();
        match nodes.get(path).map(|n| *n == Node::Dir) {
            Some(false) => {
                nodes.remove(path);
                Ok(())
            }
            Some(true) => Err(io::Error::other("is a directory")),
            None => Err(io::Error::from(io::ErrorKind::NotFound)),
        }
    }
}
