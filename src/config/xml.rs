//! XML configuration support.
//! - Loads optional settings from config.xml (quick_xml + serde).
//! - A missing file means "use defaults"; nothing is ever written here.
//!
//! Notes:
//! - Unknown fields or unparsable values are hard errors so misconfigurations surface early.

use anyhow::{Context, Result, anyhow};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::paths::default_config_path;
use super::types::{Config, LogLevel, WalkErrorPolicy};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(rename = "log_level")]
    log_level: Option<String>,
    #[serde(rename = "log_file")]
    log_file: Option<String>,
    #[serde(rename = "max_collisions", default, deserialize_with = "de_u64_trimmed_opt")]
    max_collisions: Option<u64>,
    #[serde(rename = "walk_errors")]
    walk_errors: Option<String>,
}

// Custom deserializer that trims surrounding whitespace for optional u64
fn de_u64_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error as _;
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<u64>()
            .map(Some)
            .map_err(|e| D::Error::custom(format!("max_collisions '{s}': {e}"))),
    }
}

/// Settings read from a config file; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSettings {
    pub log_level: Option<LogLevel>,
    pub log_file: Option<PathBuf>,
    pub max_collisions: Option<u64>,
    pub walk_errors: Option<WalkErrorPolicy>,
}

impl FileSettings {
    /// Fold file values into `cfg` (fields absent from the file are left alone).
    pub fn apply_to(&self, cfg: &mut Config) {
        if let Some(lvl) = &self.log_level {
            cfg.log_level = lvl.clone();
        }
        if let Some(lf) = &self.log_file {
            cfg.log_file = Some(lf.clone());
        }
        if let Some(n) = self.max_collisions {
            cfg.max_collisions = n;
        }
        if let Some(p) = self.walk_errors {
            cfg.walk_errors = p;
        }
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

/// Parse config XML text.
pub fn parse_config_xml(content: &str) -> Result<FileSettings> {
    let parsed: XmlConfig = from_xml_str(content).map_err(|e| anyhow!("invalid config XML: {e}"))?;

    let log_level = non_empty(parsed.log_level.as_deref())
        .map(|s| s.parse::<LogLevel>().map_err(|e| anyhow!(e)))
        .transpose()?;
    let walk_errors = non_empty(parsed.walk_errors.as_deref())
        .map(|s| s.parse::<WalkErrorPolicy>().map_err(|e| anyhow!(e)))
        .transpose()?;
    let log_file = non_empty(parsed.log_file.as_deref()).map(PathBuf::from);

    if parsed.max_collisions == Some(0) {
        return Err(anyhow!("max_collisions must be at least 1"));
    }

    Ok(FileSettings {
        log_level,
        log_file,
        max_collisions: parsed.max_collisions,
        walk_errors,
    })
}

/// Read settings from `path`; a missing file yields defaults.
pub fn load_config_file(path: &Path) -> Result<FileSettings> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No config file; using defaults");
            return Ok(FileSettings::default());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("read config file {}", path.display()));
        }
    };
    parse_config_xml(&content).with_context(|| format!("config file {}", path.display()))
}

/// Read settings from the default location (or $MEDIA_COLLECT_CONFIG).
pub fn load_config_from_xml() -> Result<FileSettings> {
    match default_config_path() {
        Some(p) => load_config_file(&p),
        None => Ok(FileSettings::default()),
    }
}
