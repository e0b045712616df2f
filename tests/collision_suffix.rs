use std::fs;
use std::path::Path;
use tempfile::tempdir;

use xmv::fs_ops::{entry_exists, numbered_path, suffixed_destination};

#[test]
fn first_collision_gets_one() {
    let td = tempdir().unwrap();
    let dest = td.path().join("song.mp3");
    fs::write(&dest, b"x").unwrap();
    assert_eq!(suffixed_destination(&dest), td.path().join("song1.mp3"));
}

#[test]
fn skips_taken_numbers() {
    let td = tempdir().unwrap();
    for name in ["song.mp3", "song1.mp3", "song2.mp3", "song4.mp3"] {
        fs::write(td.path().join(name), b"x").unwrap();
    }
    let free = suffixed_destination(&td.path().join("song.mp3"));
    assert_eq!(free, td.path().join("song3.mp3"));
    assert!(!entry_exists(&free));
}

#[test]
fn directories_count_as_taken() {
    let td = tempdir().unwrap();
    fs::create_dir(td.path().join("album")).unwrap();
    fs::create_dir(td.path().join("album1")).unwrap();
    assert_eq!(suffixed_destination(&td.path().join("album")), td.path().join("album2"));
}

#[test]
fn number_goes_before_last_extension_only() {
    assert_eq!(
        numbered_path(Path::new("dir/archive.tar.gz"), 7),
        Path::new("dir/archive.tar7.gz")
    );
    assert_eq!(numbered_path(Path::new("name."), 1), Path::new("name1."));
}
