//! Clean a full schema+data dump.
//!
//! Drops the `d1_migrations` table definition and every row inserted into it,
//! so the dump can be replayed into a database whose migrations are tracked
//! separately.

use crate::config::SanitizerPaths;
use crate::error::Result;
use crate::sanitize::{remove_migration_inserts, remove_migrations_table};

use super::{Cleaned, SanitizeReport, SanitizerKind};

/// Remove the migration table definition, then its inserts.
pub fn clean(sql: &str) -> Cleaned {
    let table = remove_migrations_table(sql);
    let inserts = remove_migration_inserts(&table.sql);
    Cleaned {
        sql: inserts.sql,
        tables_removed: table.removed,
        inserts_removed: inserts.removed,
        header_statements: 0,
    }
}

/// Execute the dump command.
pub fn execute(paths: &SanitizerPaths, dry_run: bool) -> Result<SanitizeReport> {
    super::run(SanitizerKind::Dump, paths, dry_run, clean)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DumpCleanError;
    use std::fs;
    use tempfile::TempDir;

    fn paths_in(dir: &TempDir) -> SanitizerPaths {
        SanitizerPaths {
            input: dir.path().join("backup.sql"),
            output: dir.path().join("backup_clean.sql"),
        }
    }

    #[test]
    fn test_clean_reference_example() {
        let cleaned = clean(
            "CREATE TABLE d1_migrations(id INT);\nINSERT INTO \"d1_migrations\" VALUES (1);\nCREATE TABLE articles(id INT);\n",
        );
        assert_eq!(cleaned.sql, "CREATE TABLE articles(id INT);\n");
        assert_eq!(cleaned.tables_removed, 1);
        assert_eq!(cleaned.inserts_removed, 1);
        assert_eq!(cleaned.header_statements, 0);
    }

    #[test]
    fn test_clean_without_migrations_is_identity() {
        let sql = "PRAGMA defer_foreign_keys=TRUE;\nCREATE TABLE volumes(id TEXT);\n";
        let cleaned = clean(sql);
        assert_eq!(cleaned.sql, sql);
        assert_eq!(cleaned.tables_removed + cleaned.inserts_removed, 0);
    }

    #[test]
    fn test_execute_writes_output_and_keeps_input() {
        let dir = TempDir::new().unwrap();
        let paths = paths_in(&dir);
        let original = "CREATE TABLE d1_migrations(id INT);\nINSERT INTO \"d1_migrations\" VALUES (1);\nCREATE TABLE articles(id INT);\n";
        fs::write(&paths.input, original).unwrap();

        let report = execute(&paths, false).unwrap();

        assert!(report.written);
        assert_eq!(report.kind, SanitizerKind::Dump);
        assert_eq!(report.removed(), 2);
        assert_eq!(report.input_bytes, original.len());
        assert_eq!(
            fs::read_to_string(&paths.output).unwrap(),
            "CREATE TABLE articles(id INT);\n"
        );
        assert_eq!(report.output_bytes, "CREATE TABLE articles(id INT);\n".len());
        assert_eq!(fs::read_to_string(&paths.input).unwrap(), original);
    }

    #[test]
    fn test_execute_crlf_dump() {
        let dir = TempDir::new().unwrap();
        let paths = paths_in(&dir);
        let original = "CREATE TABLE d1_migrations(id INT);\r\nINSERT INTO \"d1_migrations\" VALUES(1);\r\nCREATE TABLE articles(id INT);\r\n";
        fs::write(&paths.input, original).unwrap();

        let report = execute(&paths, false).unwrap();

        assert_eq!(report.tables_removed, 1);
        assert_eq!(report.inserts_removed, 1);
        assert_eq!(report.input_bytes, original.len());
        assert_eq!(
            fs::read_to_string(&paths.output).unwrap(),
            "CREATE TABLE articles(id INT);\n"
        );
        assert_eq!(fs::read_to_string(&paths.input).unwrap(), original);
    }

    #[test]
    fn test_execute_lone_cr_dump() {
        let dir = TempDir::new().unwrap();
        let paths = paths_in(&dir);
        fs::write(
            &paths.input,
            "INSERT INTO \"d1_migrations\" VALUES(1);\rSELECT 1;\r",
        )
        .unwrap();

        let report = execute(&paths, false).unwrap();

        assert_eq!(report.inserts_removed, 1);
        assert_eq!(fs::read_to_string(&paths.output).unwrap(), "SELECT 1;\n");
    }

    #[test]
    fn test_execute_overwrites_existing_output() {
        let dir = TempDir::new().unwrap();
        let paths = paths_in(&dir);
        fs::write(&paths.input, "SELECT 1;\n").unwrap();
        fs::write(&paths.output, "stale content that is longer than the new one\n").unwrap();

        execute(&paths, false).unwrap();

        assert_eq!(fs::read_to_string(&paths.output).unwrap(), "SELECT 1;\n");
    }

    #[test]
    fn test_execute_dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let paths = paths_in(&dir);
        fs::write(&paths.input, "INSERT INTO \"d1_migrations\" VALUES (1);\n").unwrap();

        let report = execute(&paths, true).unwrap();

        assert!(!report.written);
        assert_eq!(report.inserts_removed, 1);
        assert!(!paths.output.exists());
    }

    #[test]
    fn test_execute_missing_input() {
        let dir = TempDir::new().unwrap();
        let paths = paths_in(&dir);

        let err = execute(&paths, false).unwrap_err();

        assert!(matches!(err, DumpCleanError::ReadFailed { .. }));
        assert!(!paths.output.exists());
    }

    #[test]
    fn test_execute_unwritable_output() {
        let dir = TempDir::new().unwrap();
        let paths = SanitizerPaths {
            input: dir.path().join("backup.sql"),
            output: dir.path().join("missing_dir").join("backup_clean.sql"),
        };
        fs::write(&paths.input, "SELECT 1;\n").unwrap();

        let err = execute(&paths, false).unwrap_err();

        assert!(matches!(err, DumpCleanError::WriteFailed { .. }));
    }

    #[test]
    fn test_execute_refuses_in_place() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("backup.sql");
        fs::write(&input, "INSERT INTO \"d1_migrations\" VALUES (1);\n").unwrap();
        let paths = SanitizerPaths {
            input: input.clone(),
            output: input.clone(),
        };

        let err = execute(&paths, false).unwrap_err();

        assert!(matches!(err, DumpCleanError::SamePath { .. }));
        assert_eq!(
            fs::read_to_string(&input).unwrap(),
            "INSERT INTO \"d1_migrations\" VALUES (1);\n"
        );
    }
}
