//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - `-s`/`-d` are optional at the clap level and taken as raw `OsString`s, so a
//!   missing or empty flag is reported with our own usage line and exit status
//!   instead of clap's (clap's PathBuf parser rejects empty values).
//! - `--log-level` beats `-v`; `-v` alone means `info`.

use clap::{Parser, ValueHint};
use std::ffi::OsString;

use crate::config::types::{Config, LogLevel};

/// One-line usage printed when a required flag is missing.
pub const USAGE: &str = "Usage: media_collect [-v] -s <src-dir> -d <dest-dir> [-r]";

/// Collect photos and videos from a tree into one flat directory.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Copy (or move) media files from a directory tree into one flat folder"
)]
pub struct Args {
    /// Source directory root to scan.
    #[arg(short = 's', long = "source", value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub source: Option<OsString>,

    /// Destination directory (must already exist).
    #[arg(short = 'd', long = "dest", value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub dest: Option<OsString>,

    /// Print progress messages to stderr.
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Remove each source file after it was copied successfully.
    #[arg(short = 'r', long = "remove")]
    pub remove: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Emit diagnostics as JSON lines (still on stderr).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Print where media_collect looks for its config file, then exit.
    #[arg(long, help = "Print the config file location and exit")]
    pub print_config: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --log-level value > -v > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if let Some(lvl) = self.log_level.as_deref().and_then(LogLevel::parse) {
            return Some(lvl);
        }
        self.verbose.then_some(LogLevel::Info)
    }

    /// Apply CLI values to a Config (in-place). Unset optional flags are no-ops.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(s) = &self.source {
            cfg.source_dir = s.into();
        }
        if let Some(d) = &self.dest {
            cfg.dest_dir = d.into();
        }
        if self.remove {
            cfg.remove_source = true;
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
