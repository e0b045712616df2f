//! Application orchestrator.
//! Merges config, initializes logging, installs the interrupt handler, builds the
//! request and drives the rename engine, reporting each failure as it happens.

use anyhow::Result;
use std::sync::{Arc, Mutex};
use tracing::{debug, error};

use xmv::cli::Args;
use xmv::output as out;
use xmv::{
    Config, ConsoleNotifier, DryRunMover, FsMover, MoveOutcome, PathMover, RenameEngine, Summary,
    XmvError, shutdown,
};

use crate::logging::init_tracing;

/// Run the CLI application. Per-file failures never change the exit status;
/// only an invalid request (or an interrupt) does.
pub fn run(args: Args) -> Result<()> {
    let mut cfg = Config::from_env();
    args.apply_overrides(&mut cfg);

    let guard_opt = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), cfg.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;

    // Guard needs to be dropped on interrupt to flush file logs
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        let installed = ctrlc::set_handler(move || {
            if shutdown::is_requested() {
                // Second interrupt, e.g. while blocked on a prompt
                if let Ok(mut g) = guard_slot.lock() {
                    let _ = g.take();
                }
                std::process::exit(130);
            }
            shutdown::request();
            out::print_warn("Interrupted; finishing the current file (press Ctrl-C again to abort now)");
        });
        if let Err(e) = installed {
            debug!(error = %e, "Could not install interrupt handler");
        }
    }

    debug!("Starting xmv: {:?}", args);

    let result = (|| -> Result<()> {
        let request = args.to_request().map_err(|e| {
            error!(code = e.code(), error = %e, "Invalid request");
            e
        })?;

        let mut mover: Box<dyn PathMover> = if cfg.dry_run {
            Box::new(DryRunMover)
        } else {
            Box::new(FsMover)
        };
        let mut engine = RenameEngine::new(&mut *mover, ConsoleNotifier::stdio());

        let mut summary = Summary::default();
        for outcome in engine.run(&request)? {
            summary.record(&outcome);
            match &outcome {
                MoveOutcome::Planned { source, destination } => {
                    out::print_info(&format!(
                        "Dry-run: would move '{}' -> '{}'",
                        source.display(),
                        destination.display()
                    ));
                }
                MoveOutcome::Failed { source, error } => {
                    out::print_error(&format!("{}: {:#}", source.display(), error));
                }
                _ => {}
            }
        }

        if request.verbose() || summary.failed > 0 || summary.skipped > 0 {
            out::print_summary(&summary);
        }
        if shutdown::is_requested() {
            return Err(XmvError::Interrupted.into());
        }
        Ok(())
    })();

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    result
}
