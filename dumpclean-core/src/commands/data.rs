//! Clean a data-only dump.
//!
//! Drops rows inserted into `d1_migrations` and prepends `DELETE FROM`
//! statements so the dump replays into a database that already holds data
//! without primary-key or uniqueness conflicts.

use crate::config::SanitizerPaths;
use crate::error::Result;
use crate::sanitize::{prepend_clear_header, remove_migration_inserts, CLEAR_TABLES};

use super::{Cleaned, SanitizeReport, SanitizerKind};

/// Remove migration inserts, then prepend the clear header.
pub fn clean(sql: &str) -> Cleaned {
    let inserts = remove_migration_inserts(sql);
    Cleaned {
        sql: prepend_clear_header(&inserts.sql),
        tables_removed: 0,
        inserts_removed: inserts.removed,
        header_statements: CLEAR_TABLES.len(),
    }
}

/// Execute the data command.
pub fn execute(paths: &SanitizerPaths, dry_run: bool) -> Result<SanitizeReport> {
    super::run(SanitizerKind::Data, paths, dry_run, clean)
}
