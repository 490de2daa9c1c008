//! Extension filter for media files.
//!
//! Matching is a case-insensitive suffix test on the whole file name, so any
//! name ending in one of the suffixes matches regardless of what precedes it.

use std::ffi::OsStr;

/// Suffixes recognised as media, lower-case, including the dot.
pub const MEDIA_SUFFIXES: [&str; 6] = [".jpg", ".mp4", ".png", ".avi", ".mov", ".tiff"];

/// Fixed filter over [`MEDIA_SUFFIXES`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MediaFilter;

impl MediaFilter {
    pub fn new() -> Self {
        MediaFilter
    }

    /// True when `name` ends (ignoring case) with a recognised suffix.
    pub fn matches(&self, name: &OsStr) -> bool {
        // Lossy conversion only touches invalid sequences; the suffixes are ASCII.
        let lower = name.to_string_lossy().to_ascii_lowercase();
        MEDIA_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix))
    }
}
