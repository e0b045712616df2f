//! Atomic rename helper.
//! - Returns the raw `io::Error` so the caller can detect cross-device moves.
//! - On Unix, best-effort fsync of the destination directory after rename.

use std::fs;
use std::io;
use std::path::Path;

pub(super) fn try_atomic_move(src: &Path, dst: &Path) -> io::Result<()> {
    fs::rename(src, dst)?;

    // Ignore fsync errors to avoid turning a successful rename into a failure.
    #[cfg(unix)]
    let _ = super::util::fsync_dir(super::util::parent_dir(dst));

    Ok(())
}
