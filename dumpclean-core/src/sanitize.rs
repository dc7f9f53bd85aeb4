//! Regex-based removal of D1 migration bookkeeping from SQL dump text.
//!
//! Nothing here parses SQL. A statement is recognised only by its literal
//! layout: it must end with `;` directly followed by `\n`. Dumps that quote
//! or name the migration table differently pass through untouched.
//! Line endings are normalised to `\n` by [`normalize_newlines`] before
//! matching.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex_lite::Regex;

/// Name of the bookkeeping table Wrangler uses to record applied D1 migrations.
pub const MIGRATIONS_TABLE: &str = "d1_migrations";

/// Tables cleared by the data header, in the order they are cleared.
///
/// `sqlite_sequence` holds the AUTOINCREMENT counters and must come last.
pub const CLEAR_TABLES: [&str; 3] = ["articles", "volumes", "sqlite_sequence"];

/// `CREATE TABLE d1_migrations(` through the first `);\n`, across lines.
static CREATE_MIGRATIONS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?s)CREATE TABLE {}\(.*?\);\n",
        regex_lite::escape(MIGRATIONS_TABLE)
    ))
    .unwrap()
});

/// `INSERT INTO "d1_migrations" ...;\n` on a single line.
static INSERT_MIGRATIONS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r#"INSERT INTO "{}".*?;\n"#,
        regex_lite::escape(MIGRATIONS_TABLE)
    ))
    .unwrap()
});

/// Turn `\r\n` and lone `\r` line endings into `\n`.
///
/// Borrows when the text has no `\r` at all.
pub fn normalize_newlines(sql: &str) -> Cow<'_, str> {
    if !sql.contains('\r') {
        return Cow::Borrowed(sql);
    }
    Cow::Owned(sql.replace("\r\n", "\n").replace('\r', "\n"))
}

/// Result of a removal pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    /// The text with every matched span cut out.
    pub sql: String,
    /// How many spans were cut.
    pub removed: usize,
}

/// Remove every `CREATE TABLE d1_migrations(...);` block.
pub fn remove_migrations_table(sql: &str) -> Removal {
    remove_matches(&CREATE_MIGRATIONS_RE, sql)
}

/// Remove every `INSERT INTO "d1_migrations" ...;` line.
pub fn remove_migration_inserts(sql: &str) -> Removal {
    remove_matches(&INSERT_MIGRATIONS_RE, sql)
}

/// The `DELETE FROM` statements that empty [`CLEAR_TABLES`], one per line.
pub fn clear_header() -> String {
    CLEAR_TABLES
        .iter()
        .map(|table| format!("DELETE FROM {};\n", table))
        .collect()
}

/// Prepend [`clear_header`] to the given SQL.
///
/// Not idempotent: running it twice yields the header twice.
pub fn prepend_clear_header(sql: &str) -> String {
    let header = clear_header();
    let mut result = String::with_capacity(header.len() + sql.len());
    result.push_str(&header);
    result.push_str(sql);
    result
}

fn remove_matches(re: &Regex, sql: &str) -> Removal {
    let mut result = String::with_capacity(sql.len());
    let mut last_end = 0;
    let mut removed = 0;

    for m in re.find_iter(sql) {
        result.push_str(&sql[last_end..m.start()]);
        last_end = m.end();
        removed += 1;
    }

    result.push_str(&sql[last_end..]);
    Removal {
        sql: result,
        removed,
    }
}
