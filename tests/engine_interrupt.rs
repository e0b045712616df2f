//! Interrupt handling lives in its own test binary: the stop flag is
//! process-wide, so nothing else here may run a batch.

use assert_fs::prelude::*;
use std::path::Path;

use xmv::{FsMover, Notifier, Policy, RenameEngine, RenameRequest, shutdown};

struct Silent;

impl Notifier for Silent {
    fn notify_moved(&mut self, _filename: &str, _destination: &Path) {}

    fn confirm_overwrite(&mut self, _filename: &str, _destination: &Path) -> bool {
        false
    }
}

#[test]
fn interrupt_stops_between_candidates() {
    let temp = assert_fs::TempDir::new().unwrap();
    for name in ["a_1", "a_2", "a_3"] {
        temp.child(name).write_str(name).unwrap();
    }
    let source = format!("{}/*", glob::Pattern::escape(&temp.path().to_string_lossy()));
    let req = RenameRequest::new(source, "^a_", "b_", false, Policy::Confirm, false).unwrap();

    let mut engine = RenameEngine::new(FsMover, Silent).with_destination_root(temp.path());
    let mut outcomes = engine.run(&req).unwrap();

    assert!(outcomes.next().unwrap().is_moved());
    temp.child("b_1").assert("a_1");

    shutdown::request();
    assert!(outcomes.next().is_none());
    assert!(outcomes.next().is_none());

    temp.child("a_2").assert("a_2");
    temp.child("a_3").assert("a_3");
    temp.child("b_2").assert(predicates::path::missing());
}
