//! Core configuration types.
//! - Config holds the run settings; it is built once and passed by reference.
//! - LogLevel represents verbosity with simple parsing helpers.
//! - WalkErrorPolicy decides what an unreadable entry does to the walk.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::DEFAULT_MAX_COLLISIONS;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Removals and per-file failures (default)
    #[default]
    Normal,
    /// Progress messages too (what `-v` turns on)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// What to do when the walk cannot read an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WalkErrorPolicy {
    /// Stop the traversal at the first walk error.
    #[default]
    Abort,
    /// Log the error and carry on with the remaining entries.
    Skip,
}

impl FromStr for WalkErrorPolicy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" | "stop" => Ok(WalkErrorPolicy::Abort),
            "skip" | "continue" => Ok(WalkErrorPolicy::Skip),
            other => Err(format!("invalid walk error policy: '{other}'")),
        }
    }
}

/// Runtime configuration used by the collector.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the tree to scan
    pub source_dir: PathBuf,
    /// Flat output directory; must already exist
    pub dest_dir: PathBuf,
    /// Delete each source after a successful copy
    pub remove_source: bool,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// Upper bound on `stem-N.ext` probes per file
    pub max_collisions: u64,
    pub walk_errors: WalkErrorPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::new(),
            dest_dir: PathBuf::new(),
            remove_source: false,
            log_level: LogLevel::Normal,
            log_file: None,
            max_collisions: DEFAULT_MAX_COLLISIONS,
            walk_errors: WalkErrorPolicy::Abort,
        }
    }
}

impl Config {
    /// Construct a Config with explicit directories; other fields use defaults.
    pub fn new(source_dir: impl Into<PathBuf>, dest_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            dest_dir: dest_dir.into(),
            ..Default::default()
        }
    }

    /// Builder-style toggle for move semantics.
    pub fn with_remove_source(mut self, remove: bool) -> Self {
        self.remove_source = remove;
        self
    }
}
