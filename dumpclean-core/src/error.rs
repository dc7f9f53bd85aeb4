//! Error types for dumpclean operations.

use std::path::PathBuf;

use thiserror::Error;

/// All error types that dumpclean operations can produce.
#[derive(Error, Debug)]
pub enum DumpCleanError {
    /// Invalid or missing configuration (TOML parse errors, missing explicit config file, etc.).
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The source dump could not be read (missing file, permission denied, invalid UTF-8).
    #[error("Failed to read dump '{}': {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The cleaned dump could not be written to its destination.
    #[error("Failed to write cleaned dump '{}': {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configured output path points at the input dump.
    #[error("Output path '{}' is the same as the input dump. The input is never overwritten.", path.display())]
    SamePath { path: PathBuf },
}

/// Convenience type alias for `Result<T, DumpCleanError>`.
pub type Result<T> = std::result::Result<T, DumpCleanError>;
