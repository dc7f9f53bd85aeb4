//! Command implementations: dump, data.
//!
//! Each command reads its input dump once, transforms it in memory and writes
//! the result once to a separate output file.

pub mod data;
pub mod dump;

use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::SanitizerPaths;
use crate::error::{DumpCleanError, Result};
use crate::sanitize::{normalize_newlines, MIGRATIONS_TABLE};

/// Which sanitizer produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SanitizerKind {
    /// Full schema+data dump.
    Dump,
    /// Data-only dump.
    Data,
}

impl fmt::Display for SanitizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SanitizerKind::Dump => write!(f, "dump"),
            SanitizerKind::Data => write!(f, "data"),
        }
    }
}

/// Outcome of running one sanitizer.
#[derive(Debug, Clone, Serialize)]
pub struct SanitizeReport {
    /// Sanitizer that ran.
    pub kind: SanitizerKind,
    /// Dump that was read.
    pub input: PathBuf,
    /// Destination of the cleaned dump.
    pub output: PathBuf,
    /// Size of the input file in bytes, before line-ending normalization.
    pub input_bytes: usize,
    /// Size of the cleaned dump in bytes.
    pub output_bytes: usize,
    /// Number of `CREATE TABLE d1_migrations` blocks removed.
    pub tables_removed: usize,
    /// Number of `INSERT INTO "d1_migrations"` lines removed.
    pub inserts_removed: usize,
    /// Number of `DELETE FROM` statements prepended.
    pub header_statements: usize,
    /// False on a dry run.
    pub written: bool,
}

impl SanitizeReport {
    /// Total number of migration statements removed.
    pub fn removed(&self) -> usize {
        self.tables_removed + self.inserts_removed
    }

    fn new(
        kind: SanitizerKind,
        paths: &SanitizerPaths,
        input_bytes: usize,
        cleaned: &Cleaned,
    ) -> Self {
        Self {
            kind,
            input: paths.input.clone(),
            output: paths.output.clone(),
            input_bytes,
            output_bytes: cleaned.sql.len(),
            tables_removed: cleaned.tables_removed,
            inserts_removed: cleaned.inserts_removed,
            header_statements: cleaned.header_statements,
            written: false,
        }
    }
}

/// In-memory result of a sanitizer, before anything is written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cleaned {
    /// The transformed dump text.
    pub sql: String,
    /// Number of `CREATE TABLE d1_migrations` blocks removed.
    pub tables_removed: usize,
    /// Number of `INSERT INTO "d1_migrations"` lines removed.
    pub inserts_removed: usize,
    /// Number of `DELETE FROM` statements prepended.
    pub header_statements: usize,
}

/// Read `paths.input`, normalize its line endings to `\n`, transform it with
/// `clean`, and write `paths.output` unless `dry_run` is set.
fn run(
    kind: SanitizerKind,
    paths: &SanitizerPaths,
    dry_run: bool,
    clean: fn(&str) -> Cleaned,
) -> Result<SanitizeReport> {
    paths.validate()?;

    let raw = read_dump(&paths.input)?;
    let sql = normalize_newlines(&raw);
    if let Cow::Owned(_) = sql {
        log::debug!("Normalized CR/CRLF line endings; path={}", paths.input.display());
    }
    let cleaned = clean(&sql);

    log::debug!(
        "Sanitized {} dump; tables_removed={}, inserts_removed={}, header_statements={}",
        kind,
        cleaned.tables_removed,
        cleaned.inserts_removed,
        cleaned.header_statements
    );
    if cleaned.tables_removed + cleaned.inserts_removed == 0 {
        log::warn!(
            "No {} statements found in {}; migration statements are left as-is",
            MIGRATIONS_TABLE,
            paths.input.display()
        );
    }

    let mut report = SanitizeReport::new(kind, paths, raw.len(), &cleaned);
    if dry_run {
        log::info!("Dry run: not writing {}", paths.output.display());
    } else {
        write_dump(&paths.output, &cleaned.sql)?;
        report.written = true;
    }
    Ok(report)
}

fn read_dump(path: &Path) -> Result<String> {
    let sql = std::fs::read_to_string(path).map_err(|source| DumpCleanError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Read dump; path={}, bytes={}", path.display(), sql.len());
    Ok(sql)
}

fn write_dump(path: &Path, sql: &str) -> Result<()> {
    std::fs::write(path, sql).map_err(|source| DumpCleanError::WriteFailed {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!(
        "Wrote cleaned dump; path={}, bytes={}",
        path.display(),
        sql.len()
    );
    Ok(())
}
