//! Destination path resolution.
//!
//! Policy:
//! - Use `dest_dir/<name>` when nothing exists there.
//! - Otherwise probe `stem-1.ext`, `stem-2.ext`, ... with the extension lower-cased,
//!   until a free name is found or `max_collisions` names have been tried.
//!
//! Notes:
//! - This only decides the path based on current filesystem state; nothing is
//!   locked, so a concurrent writer could still claim the name before the copy.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tracing::trace;

use crate::errors::CollectError;

use super::MediaFs;

/// Pick a destination for `name` (the base name of `src`) inside `dest_dir`
/// that does not collide.
pub fn resolve_destination<F: MediaFs + ?Sized>(
    fs: &F,
    dest_dir: &Path,
    src: &Path,
    name: &OsStr,
    max_collisions: u64,
) -> Result<PathBuf, CollectError> {
    let candidate = dest_dir.join(name);
    if !fs.exists(&candidate) {
        return Ok(candidate);
    }

    let (stem, ext) = split_name(name);
    for n in 1..=max_collisions {
        let mut new_name = stem.clone();
        new_name.push(format!("-{n}"));
        new_name.push(&ext);

        let candidate = dest_dir.join(&new_name);
        if !fs.exists(&candidate) {
            return Ok(candidate);
        }
        if n == 3 {
            trace!(name = ?name, dir = %dest_dir.display(), "multiple collisions, still probing");
        }
    }

    Err(CollectError::TooManyCollisions {
        src: src.to_path_buf(),
        name: name.to_os_string(),
        dir: dest_dir.to_path_buf(),
        limit: max_collisions,
    })
}

/// Split at the last '.' into (stem, lower-cased extension including the dot).
///
/// - "photo.JPG" -> ("photo", ".jpg")
/// - ".png" -> ("", ".png")
/// - "a.b.mov" -> ("a.b", ".mov")
/// - "noext" -> ("noext", "")
pub fn split_name(name: &OsStr) -> (OsString, String) {
    if let Some(s) = name.to_str() {
        return match s.rfind('.') {
            Some(i) => (OsString::from(&s[..i]), s[i..].to_lowercase()),
            None => (OsString::from(s), String::new()),
        };
    }

    // Non-UTF-8: std's split keeps a leading-dot name whole as the stem.
    let p = Path::new(name);
    let stem = p
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| name.to_os_string());
    let ext = p
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
        .unwrap_or_default();
    (stem, ext)
}
