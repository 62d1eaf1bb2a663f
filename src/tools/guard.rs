//! Read-path guard for the read_sql tool.
//!
//! A lexical check: the trimmed, lower-cased query must not start with one of
//! the mutating keywords. It does not parse SQL, so a mutation hidden behind a
//! leading comment or batched after a SELECT is not caught. Read-only
//! connections are the real boundary for writes; this only steers agents
//! towards write_sql.

use crate::error::{DbError, DbResult};

/// Statement-leading keywords rejected by read_sql.
pub const MUTATING_KEYWORDS: &[&str] = &[
    "insert", "update", "delete", "drop", "alter", "create", "truncate", "grant", "revoke",
];

pub const READ_REJECTED_MESSAGE: &str =
    "Write operations are not allowed in read_sql. Use write_sql instead.";

/// Return the mutating keyword the query starts with, if any.
///
/// # Examples
///
/// ```
/// use mcp_database_manager::tools::guard::leading_mutating_keyword;
///
/// assert_eq!(leading_mutating_keyword("  DELETE FROM users"), Some("delete"));
/// assert_eq!(leading_mutating_keyword("SELECT * FROM users"), None);
/// ```
pub fn leading_mutating_keyword(sql: &str) -> Option<&'static str> {
    let normalized = sql.trim().to_lowercase();
    MUTATING_KEYWORDS
        .iter()
        .copied()
        .find(|kw| normalized.starts_with(kw))
}

/// Reject a read query that starts with a mutating keyword.
pub fn validate_read_query(sql: &str) -> DbResult<()> {
    match leading_mutating_keyword(sql) {
        Some(_) => Err(DbError::invalid_input(READ_REJECTED_MESSAGE)),
        None => Ok(()),
    }
}
