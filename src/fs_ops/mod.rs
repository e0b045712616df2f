//! Filesystem operations: collision resolution and single-path moves.

mod atomic;
mod copy;
mod helpers;
mod mover;
mod resolve;
mod util;

pub use helpers::io_error_with_help;
pub use mover::{DryRunMover, FsMover, PathMover};
pub use resolve::{ResolvedAction, numbered_path, resolve_collision, suffixed_destination};
pub use util::{entry_exists, same_entry};
