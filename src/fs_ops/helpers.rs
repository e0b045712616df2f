//! I/O error helpers.
//!
//! Turns a bare `io::Error` into a message naming the operation, the path and
//! a short hint, so a per-file failure line is actionable on its own.
//!
//! Usage:
//!   fs::rename(src, dst).map_err(io_error_with_help("rename", src))?;

use anyhow::anyhow;
use std::io;
use std::path::Path;

fn hint_for(e: &io::Error) -> Option<&'static str> {
    #[cfg(unix)]
    if let Some(code) = e.raw_os_error() {
        let hint = match code {
            libc::EACCES | libc::EPERM => Some("permission denied; check ownership and write permissions"),
            libc::EXDEV => Some("cross-filesystem; atomic rename not possible"),
            libc::ENOENT => Some("path not found; the destination directory must already exist"),
            libc::ENOTDIR => Some("a path component is not a directory"),
            libc::EISDIR => Some("destination is a directory"),
            libc::ENOTEMPTY => Some("destination is a non-empty directory"),
            libc::EBUSY => Some("resource busy; ensure no other process is using it"),
            libc::ENOSPC => Some("insufficient space on device"),
            libc::EROFS => Some("read-only filesystem; cannot write here"),
            libc::ENAMETOOLONG => Some("filename or path too long; shorten the replacement"),
            _ => None,
        };
        if hint.is_some() {
            return hint;
        }
    }

    match e.kind() {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and write permissions"),
        io::ErrorKind::NotFound => Some("path not found; the destination directory must already exist"),
        io::ErrorKind::AlreadyExists => Some("already exists"),
        _ => None,
    }
}

fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);
    if let Some(hint) = hint_for(e) {
        msg.push_str(" - ");
        msg.push_str(hint);
    }
    if let Some(code) = e.raw_os_error() {
        msg.push_str(&format!(" [os code: {}]", code));
    }
    msg
}

/// Closure for `.map_err(...)` converting `io::Error` into an `anyhow::Error`.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!(build_message(op, path, &e))
}
