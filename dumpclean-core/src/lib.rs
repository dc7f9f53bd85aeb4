//! Strip Cloudflare D1 migration bookkeeping from SQL dumps before re-import.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use dumpclean_core::config::{CliOverrides, DumpCleanConfig};
//! use dumpclean_core::DumpClean;
//!
//! # fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = DumpCleanConfig::load(None, &CliOverrides::default())?;
//! let dc = DumpClean::new(config);
//! let report = dc.clean_dump(false)?;
//! println!("Removed {} migration statement(s)", report.removed());
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Path configuration (TOML, env vars, CLI overrides)
//! - [`sanitize`]: Regex patterns and pure text transforms
//! - [`commands`]: File-level `dump` and `data` commands
//! - [`error`]: Error types

pub mod commands;
pub mod config;
pub mod error;
pub mod sanitize;

use config::DumpCleanConfig;
use error::Result;

pub use commands::{Cleaned, SanitizeReport, SanitizerKind};
pub use config::CliOverrides;
pub use error::DumpCleanError;

/// Main entry point for the dumpclean library.
///
/// Holds the resolved configuration; each method runs one sanitizer against
/// the paths configured for it.
#[derive(Debug, Clone)]
pub struct DumpClean {
    pub config: DumpCleanConfig,
}

impl DumpClean {
    /// Create a new DumpClean instance from a resolved config.
    pub fn new(config: DumpCleanConfig) -> Self {
        Self { config }
    }

    /// Remove the migration table and its rows from the full dump.
    pub fn clean_dump(&self, dry_run: bool) -> Result<SanitizeReport> {
        commands::dump::execute(&self.config.dump, dry_run)
    }

    /// Remove migration rows from the data dump and prepend the clear header.
    pub fn clean_data(&self, dry_run: bool) -> Result<SanitizeReport> {
        commands::data::execute(&self.config.data, dry_run)
    }

    /// Run both sanitizers in order, stopping at the first failure.
    pub fn clean_all(&self, dry_run: bool) -> Result<Vec<SanitizeReport>> {
        Ok(vec![self.clean_dump(dry_run)?, self.clean_data(dry_run)?])
    }
}
