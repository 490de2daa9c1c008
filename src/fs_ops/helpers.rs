//! I/O hint helpers.
//!
//! Maps an io::Error to a short, actionable hint that is attached to per-file
//! failure logs (`hint = ...`). Raw OS codes are checked first, then ErrorKind.

use std::io;

/// Short platform-aware hint for an I/O error, if one applies.
pub fn io_hint(e: &io::Error) -> Option<&'static str> {
    if let Some(code) = e.raw_os_error()
        && let Some(hint) = os_code_hint(code)
    {
        return Some(hint);
    }

    match e.kind() {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and permissions"),
        io::ErrorKind::NotFound => Some("path not found; it may have been moved or deleted"),
        io::ErrorKind::AlreadyExists => Some("already exists"),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => {
            Some("busy/timed out; retry after the current write finishes")
        }
        _ => None,
    }
}

#[cfg(unix)]
fn os_code_hint(code: i32) -> Option<&'static str> {
    match code {
        libc::EACCES | libc::EPERM => Some("permission denied; check ownership and permissions"),
        libc::ENOENT => Some("path not found; it may have been moved or deleted"),
        libc::ENOSPC => Some("insufficient space on device"),
        libc::EROFS => Some("read-only filesystem; cannot write here"),
        libc::EISDIR => Some("is a directory; cannot copy as a file"),
        libc::ELOOP => Some("too many symbolic link levels; possible symlink cycle"),
        libc::ENAMETOOLONG => Some("filename or path too long"),
        libc::EMFILE => Some("process file descriptor limit reached"),
        libc::ENFILE => Some("system-wide file table overflow"),
        libc::EIO => Some("low-level I/O error; check the device"),
        _ => None,
    }
}

#[cfg(windows)]
fn os_code_hint(code: i32) -> Option<&'static str> {
    match code {
        5 => Some("access denied; check permissions"),    // ERROR_ACCESS_DENIED
        2 | 3 => Some("path not found; it may have been moved or deleted"),
        32 => Some("sharing violation; file is in use"),  // ERROR_SHARING_VIOLATION
        112 => Some("insufficient disk space"),           // ERROR_DISK_FULL
        19 => Some("write protected / read-only media"),  // ERROR_WRITE_PROTECT
        206 => Some("filename or path too long"),         // ERROR_FILENAME_EXCED_RANGE
        _ => None,
    }
}

#[cfg(not(any(unix, windows)))]
fn os_code_hint(_code: i32) -> Option<&'static str> {
    None
}
