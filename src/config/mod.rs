//! Config module (modularized).
//! Provides configuration types, the config file location, XML loading, and validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{default_config_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel, WalkErrorPolicy};
pub use xml::{FileSettings, load_config_file, load_config_from_xml, parse_config_xml};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "MEDIA_COLLECT_CONFIG";

/// Default bound on collision probes per file.
pub const DEFAULT_MAX_COLLISIONS: u64 = 10_000;
