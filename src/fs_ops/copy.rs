//! Cross-filesystem fallback for a single file:
//! - Copies to a temp file in the destination directory (created exclusively, fsynced)
//! - Carries over permissions and timestamps
//! - Atomically renames temp -> dest
//! - Removes the source; if that fails the new copy is removed again so the
//!   file only ever lives in one place

use anyhow::{Result, bail};
use filetime::FileTime;
use std::fs::{self, File, Metadata, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, warn};

use super::helpers::io_error_with_help;
use super::util::{fsync_dir, parent_dir, unique_temp_path};

const BUF_SIZE: usize = 1024 * 1024;

/// Move `src` to `dest` by copy + remove.
pub(super) fn copy_then_remove(src: &Path, dest: &Path) -> Result<()> {
    let meta = fs::metadata(src).map_err(io_error_with_help("stat source", src))?;
    if !meta.is_file() {
        bail!(
            "cannot move '{}' to '{}' across filesystems: only regular files can be copied",
            src.display(),
            dest.display()
        );
    }

    let dest_dir = parent_dir(dest);
    let tmp = unique_temp_path(dest_dir);

    let staged = copy_streaming(src, &tmp)
        .map_err(io_error_with_help("copy to temporary file", &tmp))
        .map(|bytes| {
            preserve_metadata(&tmp, &meta);
            bytes
        });
    let bytes = match staged {
        Ok(b) => b,
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
    };

    if let Err(e) = fs::rename(&tmp, dest) {
        let _ = fs::remove_file(&tmp);
        return Err(io_error_with_help("rename temporary file into place", dest)(e));
    }
    let _ = fsync_dir(dest_dir);
    debug!(src = %src.display(), dest = %dest.display(), bytes, "Copied across filesystems");

    if let Err(e) = fs::remove_file(src) {
        if let Err(cleanup) = fs::remove_file(dest) {
            warn!(dest = %dest.display(), error = %cleanup, "Could not remove copy after failing to remove source");
        }
        return Err(io_error_with_help("remove original file", src)(e));
    }
    Ok(())
}

/// Copy `src` into the new file `dst` and fsync it. Never clobbers `dst`.
fn copy_streaming(src: &Path, dst: &Path) -> io::Result<u64> {
    let src_f = File::open(src)?;
    let dst_f = OpenOptions::new().write(true).create_new(true).open(dst)?;

    let mut reader = BufReader::with_capacity(BUF_SIZE, src_f);
    let mut writer = BufWriter::with_capacity(BUF_SIZE, dst_f);
    let bytes = io::copy(&mut reader, &mut writer)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(bytes)
}

/// Best-effort: permissions, access and modification times.
fn preserve_metadata(dst: &Path, meta: &Metadata) {
    if let Err(e) = fs::set_permissions(dst, meta.permissions()) {
        warn!(path = %dst.display(), error = %e, "Failed to copy permissions");
    }
    let atime = FileTime::from_last_access_time(meta);
    let mtime = FileTime::from_last_modification_time(meta);
    if let Err(e) = filetime::set_file_times(dst, atime, mtime) {
        warn!(path = %dst.display(), error = %e, "Failed to copy timestamps");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn copy_then_remove_moves_content() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src.bin");
        let dst = dir.path().join("dst.bin");
        let data: Vec<u8> = (0..BUF_SIZE + 77).map(|i| (i % 251) as u8).collect();
        fs::write(&src, &data).unwrap();

        copy_then_remove(&src, &dst).unwrap();

        assert!(!src.exists());
        assert_eq!(fs::read(&dst).unwrap(), data);
    }

    #[test]
    fn copy_then_remove_replaces_existing_destination() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("new.txt");
        let dst = dir.path().join("old.txt");
        fs::write(&src, b"new").unwrap();
        fs::write(&dst, b"old").unwrap();

        copy_then_remove(&src, &dst).unwrap();

        assert_eq!(fs::read(&dst).unwrap(), b"new");
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with(".xmv."))
            .collect();
        assert!(leftovers.is_empty(), "temp files left behind");
    }

    #[test]
    fn copy_then_remove_keeps_mtime() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("a.txt");
        let dst = dir.path().join("b.txt");
        fs::write(&src, b"x").unwrap();
        let ts = FileTime::from_unix_time(1_700_000_000, 0);
        filetime::set_file_mtime(&src, ts).unwrap();

        copy_then_remove(&src, &dst).unwrap();

        let meta = fs::metadata(&dst).unwrap();
        assert_eq!(FileTime::from_last_modification_time(&meta).unix_seconds(), ts.unix_seconds());
    }

    #[test]
    fn missing_destination_dir_leaves_source() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("a.txt");
        fs::write(&src, b"x").unwrap();
        let dst = dir.path().join("missing").join("a.txt");

        let err = copy_then_remove(&src, &dst).unwrap_err();
        assert!(err.to_string().contains("copy to temporary file"));
        assert!(src.exists());
    }

    #[test]
    fn directories_are_refused() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("sub");
        fs::create_dir(&src).unwrap();
        let err = copy_then_remove(&src, &dir.path().join("other")).unwrap_err();
        assert!(err.to_string().contains("only regular files"));
        assert!(src.exists());
    }
}
