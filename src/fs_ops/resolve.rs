//! Collision resolution for a computed destination.
//!
//! Policy:
//! - Overwrite: always proceed at the requested destination.
//! - Suffix: proceed at the first free `stem<n>.ext` (n = 1, 2, ...) when the
//!   destination is taken.
//! - Confirm: proceed directly when free; otherwise ask the notifier.
//!
//! Notes:
//! - This only decides the path based on current filesystem state; another
//!   process may still create the path before the move happens.
//! - A destination that is the source itself under different letter case is
//!   not a collision.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::notify::Notifier;
use crate::request::Policy;

use super::util::{entry_exists, same_entry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedAction {
    /// Move to this path.
    ProceedAt(PathBuf),
    /// Leave the source where it is.
    Abort,
}

/// Decide where `source` (shown to the user as `filename`) may go.
pub fn resolve_collision<N: Notifier + ?Sized>(
    source: &Path,
    filename: &str,
    destination: &Path,
    policy: Policy,
    notifier: &mut N,
) -> ResolvedAction {
    if policy == Policy::Overwrite {
        return ResolvedAction::ProceedAt(destination.to_path_buf());
    }
    if !entry_exists(destination) || same_entry(source, destination) {
        return ResolvedAction::ProceedAt(destination.to_path_buf());
    }

    match policy {
        Policy::Suffix => {
            let free = suffixed_destination(destination);
            debug!(dest = %destination.display(), chosen = %free.display(), "Destination exists; using numbered name");
            ResolvedAction::ProceedAt(free)
        }
        Policy::Confirm => {
            if notifier.confirm_overwrite(filename, destination) {
                debug!(dest = %destination.display(), "Overwrite confirmed");
                ResolvedAction::ProceedAt(destination.to_path_buf())
            } else {
                debug!(dest = %destination.display(), "Overwrite declined");
                ResolvedAction::Abort
            }
        }
        Policy::Overwrite => ResolvedAction::ProceedAt(destination.to_path_buf()),
    }
}

/// First `stem<n>.ext` next to `destination` that does not exist, for n >= 1.
///
/// Examples:
/// - "song.mp3" -> "song1.mp3", "song2.mp3", ...
/// - "archive.tar.gz" -> "archive.tar1.gz"
/// - ".env" / "README" -> ".env1" / "README1"
pub fn suffixed_destination(destination: &Path) -> PathBuf {
    let mut n: u64 = 1;
    loop {
        let candidate = numbered_path(destination, n);
        if !entry_exists(&candidate) {
            return candidate;
        }
        if n % 100 == 0 {
            trace!(dest = %destination.display(), tried = n, "Still searching for a free numbered name");
        }
        n += 1;
    }
}

/// `destination` with `n` inserted before the final extension.
pub fn numbered_path(destination: &Path, n: u64) -> PathBuf {
    let file_name = Path::new(destination.file_name().unwrap_or(destination.as_os_str()));
    let stem = file_name
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| file_name.as_os_str().to_os_string());

    let mut name = OsString::new();
    name.push(&stem);
    name.push(n.to_string());
    if let Some(ext) = file_name.extension() {
        name.push(".");
        name.push(ext);
    }
    destination.with_file_name(name)
}
