//! Moving one path to its final destination.
//! Attempts an atomic rename; only a cross-device error falls back to copy + remove.
//! Missing destination directories are never created.

use anyhow::Result;
use std::path::Path;
use tracing::{debug, info, warn};

use super::atomic::try_atomic_move;
use super::copy::copy_then_remove;
use super::helpers::io_error_with_help;
use super::util::is_cross_device;

/// Places a source path at a destination chosen by the caller.
///
/// Implementations perform no matching or collision handling: the
/// destination is either known to be free or explicitly allowed to be
/// replaced.
pub trait PathMover {
    fn move_path(&mut self, src: &Path, dest: &Path) -> Result<()>;

    /// True when `move_path` leaves the filesystem untouched.
    fn is_dry_run(&self) -> bool {
        false
    }
}

impl<M: PathMover + ?Sized> PathMover for &mut M {
    fn move_path(&mut self, src: &Path, dest: &Path) -> Result<()> {
        (**self).move_path(src, dest)
    }

    fn is_dry_run(&self) -> bool {
        (**self).is_dry_run()
    }
}

/// The real filesystem mover.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsMover;

impl PathMover for FsMover {
    fn move_path(&mut self, src: &Path, dest: &Path) -> Result<()> {
        match try_atomic_move(src, dest) {
            Ok(()) => {
                debug!(src = %src.display(), dest = %dest.display(), "Renamed atomically");
                Ok(())
            }
            Err(e) if is_cross_device(&e) => {
                warn!(error = %e, src = %src.display(), dest = %dest.display(), "Cross-filesystem move; using copy+remove");
                copy_then_remove(src, dest)
            }
            Err(e) => {
                let op = format!("move to '{}' from", dest.display());
                Err(io_error_with_help(&op, src)(e))
            }
        }
    }
}

/// Logs the planned move and leaves the filesystem untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunMover;

impl PathMover for DryRunMover {
    fn move_path(&mut self, src: &Path, dest: &Path) -> Result<()> {
        info!(src = %src.display(), dest = %dest.display(), "dry-run: would move");
        Ok(())
    }

    fn is_dry_run(&self) -> bool {
        true
    }
}
