//! Typed error definitions for xmv.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum XmvError {
    #[error("--overwrite and --suffix cannot be used together")]
    ConflictingPolicies,

    #[error("Invalid regular expression '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Invalid source glob '{glob}': {reason}")]
    InvalidGlob { glob: String, reason: String },

    #[error("Invalid replacement '{replacement}': {reason}")]
    InvalidReplacement { replacement: String, reason: String },

    #[error("File name is not valid UTF-8: {0}")]
    NonUtf8Name(PathBuf),

    #[error("Operation interrupted by user")]
    Interrupted,
}

impl XmvError {
    /// Stable numeric code attached to structured log events.
    pub fn code(&self) -> u16 {
        match self {
            XmvError::ConflictingPolicies => 10,
            XmvError::InvalidPattern { .. } => 11,
            XmvError::InvalidGlob { .. } => 12,
            XmvError::InvalidReplacement { .. } => 13,
            XmvError::NonUtf8Name(_) => 20,
            XmvError::Interrupted => 130,
        }
    }

    /// True for errors raised while building the request (before any file is touched).
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            XmvError::ConflictingPolicies
                | XmvError::InvalidPattern { .. }
                | XmvError::InvalidGlob { .. }
                | XmvError::InvalidReplacement { .. }
        )
    }
}
