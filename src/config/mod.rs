//! Run configuration.
//! Built-in defaults, overridden by environment variables, overridden by CLI flags.

pub mod types;

pub use types::{Config, LogLevel};

/// Environment variable selecting the log level.
pub const ENV_LOG_LEVEL: &str = "XMV_LOG_LEVEL";
/// Environment variable enabling file logging.
pub const ENV_LOG_FILE: &str = "XMV_LOG_FILE";
