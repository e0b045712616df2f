//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - `-o/--overwrite` and `-s/--suffix` conflict; neither means "ask before overwriting".
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};
use crate::errors::XmvError;
use crate::request::{DEFAULT_SOURCE_GLOB, RenameRequest};

/// Move files whose names match PATTERN to the path given by REPLACEMENT.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "xmv",
    author,
    version,
    about = "Move files matching a regular expression to the name produced by substitution",
    after_help = "Examples:\n  xmv '^\\[hdreactor\\]_*' '' \n  xmv '^HIM-(.+)$' 'HIM/\\1' '*.mp3'"
)]
pub struct Args {
    /// Regular expression matched against each file name.
    pub pattern: String,

    /// Replacement template; `\1`, `\g<name>` and `\g<0>` refer to groups. May contain `/`.
    #[arg(allow_hyphen_values = true)]
    pub replacement: String,

    /// Shell-style glob selecting the files to consider.
    #[arg(default_value = DEFAULT_SOURCE_GLOB, value_hint = ValueHint::AnyPath)]
    pub source: String,

    /// Overwrite existing destinations without asking.
    #[arg(short = 'o', long, conflicts_with = "suffix")]
    pub overwrite: bool,

    /// Append a sequence number before the extension when the destination exists.
    #[arg(short = 's', long)]
    pub suffix: bool,

    /// Match the pattern case-insensitively.
    #[arg(short = 'i', long)]
    pub ignore_case: bool,

    /// Print one line per moved file.
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Show what would be moved without touching the filesystem.
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging (shorthand for --log-level debug).
    #[arg(long)]
    pub debug: bool,

    /// Diagnostic log level on stderr: quiet, normal, info, debug.
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Also append logs to this file.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON.
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(file) = &self.log_file {
            cfg.log_file = Some(file.clone());
        }
        if self.json {
            cfg.json = true;
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
    }

    /// Build the immutable request for this run.
    pub fn to_request(&self) -> Result<RenameRequest, XmvError> {
        RenameRequest::from_flags(
            self.source.clone(),
            self.pattern.clone(),
            self.replacement.clone(),
            self.ignore_case,
            self.overwrite,
            self.suffix,
            self.verbose,
        )
    }
}

pub fn parse() -> Args {
    Args::parse()
}
