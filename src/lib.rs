//! Core library for `media_collect`.
//!
//! Walks a source tree, picks out photo/video files by extension and copies
//! them into one flat destination directory, renaming on collisions and
//! optionally removing each source after a successful copy.
//!
//! The binary is a thin layer over [`Collector`]: build a [`Config`], validate
//! it, then run the collector against [`RealFs`].

pub mod cli;
pub mod collect;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod platform;

pub use collect::{Collector, Outcome, RunReport};
pub use config::{Config, LogLevel, WalkErrorPolicy, default_config_path, path_has_symlink_ancestor};
pub use errors::{CollectError, CopyStage};
pub use fs_ops::{MediaFilter, MediaFs, RealFs, TraversalEntry};
