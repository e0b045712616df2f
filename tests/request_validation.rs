use assert_fs::prelude::*;
use predicates::prelude::*;

use xmv::{Policy, RenameRequest, XmvError};

#[test]
fn overwrite_and_suffix_conflict() {
    let err = RenameRequest::from_flags("*", "^a", "b", false, true, true, false).unwrap_err();
    assert!(matches!(err, XmvError::ConflictingPolicies));
    assert!(err.is_config_error());
}

#[test]
fn conflict_rejected_before_touching_files() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("a_song.mp3").write_str("x").unwrap();
    let glob = format!("{}/*", glob::Pattern::escape(&temp.path().to_string_lossy()));

    assert!(RenameRequest::from_flags(glob, "^a_", "", false, true, true, false).is_err());

    temp.child("a_song.mp3").assert("x");
    temp.child("song.mp3").assert(predicate::path::missing());
}

#[test]
fn flags_select_policy() {
    let req = RenameRequest::from_flags("*", "^a", "b", false, false, false, false).unwrap();
    assert_eq!(req.policy(), Policy::Confirm);
    let req = RenameRequest::from_flags("*", "^a", "b", false, true, false, false).unwrap();
    assert_eq!(req.policy(), Policy::Overwrite);
    let req = RenameRequest::from_flags("*", "^a", "b", false, false, true, false).unwrap();
    assert_eq!(req.policy(), Policy::Suffix);
}

#[test]
fn request_keeps_its_inputs() {
    let req = RenameRequest::new("*.mp3", r"^HIM-(.+)$", r"HIM/\1", true, Policy::Suffix, true).unwrap();
    assert_eq!(req.source_glob(), "*.mp3");
    assert_eq!(req.pattern(), r"^HIM-(.+)$");
    assert_eq!(req.replacement(), r"HIM/\1");
    assert!(req.ignore_case());
    assert!(req.verbose());
    assert_eq!(req.substitution().template(), "HIM/${1}");
}

#[test]
fn invalid_inputs_are_config_errors() {
    let cases = [
        RenameRequest::new("*", "(", "", false, Policy::Confirm, false).unwrap_err(),
        RenameRequest::new("[", "a", "", false, Policy::Confirm, false).unwrap_err(),
        RenameRequest::new("*", "(a)", r"\3", false, Policy::Confirm, false).unwrap_err(),
    ];
    for err in cases {
        assert!(err.is_config_error(), "{err}");
    }
}
