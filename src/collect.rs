//! The collector: walk, filter, resolve, copy, optionally remove.
//!
//! Per matched file:
//! `Matched -> Copying -> {CopyFailed | Copied} -> (remove?) {RemoveFailed | Removed}`
//!
//! Copy and remove failures are logged and the walk continues with the next
//! entry. Walk errors follow [`WalkErrorPolicy`].

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::config::{Config, WalkErrorPolicy};
use crate::errors::CollectError;
use crate::fs_ops::{MediaFilter, MediaFs, TraversalEntry, io_hint, resolve_destination};

/// Terminal state of one matched file.
#[derive(Debug)]
pub enum Outcome {
    /// Copy-only mode: duplicate written, source kept.
    Copied { src: PathBuf, dest: PathBuf, bytes: u64 },
    /// Copied and the source removed.
    Moved { src: PathBuf, dest: PathBuf, bytes: u64 },
    /// Nothing usable was written (or a partial file was left); source kept.
    CopyFailed { src: PathBuf, error: CollectError },
    /// Copy succeeded but the source could not be removed; both copies exist.
    RemoveFailed { src: PathBuf, dest: PathBuf, error: CollectError },
}

impl Outcome {
    pub fn src(&self) -> &Path {
        match self {
            Outcome::Copied { src, .. }
            | Outcome::Moved { src, .. }
            | Outcome::CopyFailed { src, .. }
            | Outcome::RemoveFailed { src, .. } => src,
        }
    }

    /// Destination written, if the copy completed.
    pub fn dest(&self) -> Option<&Path> {
        match self {
            Outcome::Copied { dest, .. }
            | Outcome::Moved { dest, .. }
            | Outcome::RemoveFailed { dest, .. } => Some(dest),
            Outcome::CopyFailed { .. } => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::CopyFailed { .. } | Outcome::RemoveFailed { .. })
    }
}

/// What a run did; returned to callers, never printed as a summary.
#[derive(Debug, Default)]
pub struct RunReport {
    /// One entry per matched file, in walk order.
    pub outcomes: Vec<Outcome>,
    /// Entries visited (directories included).
    pub visited: usize,
    /// Walk errors logged and skipped under [`WalkErrorPolicy::Skip`].
    pub skipped_walk_errors: usize,
}

pub struct Collector<'a, F: MediaFs + ?Sized> {
    config: &'a Config,
    fs: &'a F,
    filter: MediaFilter,
}

impl<'a, F: MediaFs + ?Sized> Collector<'a, F> {
    pub fn new(config: &'a Config, fs: &'a F) -> Self {
        Self {
            config,
            fs,
            filter: MediaFilter::new(),
        }
    }

    /// Walk the whole source tree. Returns Err only when a walk error aborts the run.
    pub fn run(&self) -> Result<RunReport, CollectError> {
        let mut report = RunReport::default();
        let prune = self.prune_dir();
        if let Some(p) = &prune {
            debug!(dir = %p.display(), "Destination is inside source; skipping it");
        }

        for item in self.fs.walk(&self.config.source_dir, prune.as_deref()) {
            let entry = match item {
                Ok(entry) => entry,
                Err(e) => match self.config.walk_errors {
                    WalkErrorPolicy::Abort => {
                        log_failure(&e);
                        return Err(e);
                    }
                    WalkErrorPolicy::Skip => {
                        warn!(code = e.code(), kind = e.kind(), "{e}; skipping");
                        report.skipped_walk_errors += 1;
                        continue;
                    }
                },
            };
            report.visited += 1;
            if let Some(outcome) = self.process(&entry) {
                report.outcomes.push(outcome);
            }
        }
        Ok(report)
    }

    /// Handle one traversal entry; None when it is a directory or not media.
    pub fn process(&self, entry: &TraversalEntry) -> Option<Outcome> {
        if entry.is_dir || !self.filter.matches(&entry.file_name) {
            return None;
        }
        Some(self.collect_file(&entry.path, &entry.file_name))
    }

    fn collect_file(&self, src: &Path, name: &OsStr) -> Outcome {
        let dest = match resolve_destination(
            self.fs,
            &self.config.dest_dir,
            src,
            name,
            self.config.max_collisions,
        ) {
            Ok(d) => d,
            Err(error) => {
                log_failure(&error);
                return Outcome::CopyFailed { src: src.to_path_buf(), error };
            }
        };

        debug!("Copying {} to {}", src.display(), dest.display());
        let bytes = match self.fs.copy_file(src, &dest) {
            Ok(n) => n,
            Err(error) => {
                log_failure(&error);
                return Outcome::CopyFailed { src: src.to_path_buf(), error };
            }
        };

        if !self.config.remove_source {
            return Outcome::Copied { src: src.to_path_buf(), dest, bytes };
        }

        info!("Removing {}", src.display());
        match self.fs.remove_file(src) {
            Ok(()) => Outcome::Moved { src: src.to_path_buf(), dest, bytes },
            Err(source) => {
                let error = CollectError::Remove { path: src.to_path_buf(), source };
                log_failure(&error);
                Outcome::RemoveFailed { src: src.to_path_buf(), dest, error }
            }
        }
    }

    /// The destination, when it sits strictly inside the source tree.
    fn prune_dir(&self) -> Option<PathBuf> {
        let src = self.fs.canonical(&self.config.source_dir)?;
        let dest = self.fs.canonical(&self.config.dest_dir)?;
        (dest != src && dest.starts_with(&src)).then(|| self.config.dest_dir.clone())
    }
}

fn log_failure(e: &CollectError) {
    let hint = e.io_error().and_then(io_hint).unwrap_or("");
    error!(code = e.code(), kind = e.kind(), hint, "{e}");
}
