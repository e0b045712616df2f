//! Core library for `xmv`.
//!
//! Renames or moves the files matched by a glob, computing each destination by
//! regex substitution on the file name. The pieces, leaf first:
//! - `fs_ops`: moving one path (`PathMover`) and resolving name collisions
//! - `notify`: the user-facing collaborator (`Notifier`) for reports and prompts
//! - `engine`: the batch driver (`RenameEngine`) producing `MoveOutcome`s lazily
//! - `request`: the immutable, validated `RenameRequest`

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod fs_ops;
pub mod notify;
pub mod output;
pub mod request;
pub mod shutdown;
pub mod substitute;

pub use config::{Config, LogLevel};
pub use engine::{Candidate, MoveOutcome, Outcomes, RenameEngine, SkipReason, Summary};
pub use errors::XmvError;
pub use fs_ops::{DryRunMover, FsMover, PathMover, ResolvedAction, resolve_collision};
pub use notify::{ConsoleNotifier, Notifier};
pub use request::{Policy, RenameRequest};
pub use substitute::Substitution;
