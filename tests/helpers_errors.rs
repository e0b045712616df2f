use std::io;
use std::path::Path;

use xmv::fs_ops::io_error_with_help;

#[test]
fn notfound_hint_includes_path() {
    let p = Path::new("/nonexistent/path/for/test");
    let err = io_error_with_help("rename", p)(io::Error::from(io::ErrorKind::NotFound));
    let msg = err.to_string();
    assert!(msg.contains("rename"));
    assert!(msg.contains(p.to_string_lossy().as_ref()));
    assert!(msg.contains("must already exist"));
}

#[cfg(unix)]
#[test]
fn exdev_hint_present() {
    let p = Path::new("/tmp");
    let msg = io_error_with_help("rename", p)(io::Error::from_raw_os_error(libc::EXDEV)).to_string();
    assert!(msg.contains("cross-filesystem"), "msg was: {}", msg);
    assert!(msg.contains("os code"), "should include os code in message");
}

#[cfg(unix)]
#[test]
fn directory_hints_present() {
    let p = Path::new("/tmp");
    let isdir = io_error_with_help("rename", p)(io::Error::from_raw_os_error(libc::EISDIR)).to_string();
    let notdir = io_error_with_help("rename", p)(io::Error::from_raw_os_error(libc::ENOTDIR)).to_string();
    assert!(isdir.contains("is a directory"));
    assert!(notdir.contains("not a directory"));
}

#[cfg(unix)]
#[test]
fn erofs_hint_present() {
    let p = Path::new("/tmp");
    let msg = io_error_with_help("write", p)(io::Error::from_raw_os_error(libc::EROFS)).to_string();
    assert!(msg.contains("read-only filesystem"), "msg was: {}", msg);
}
