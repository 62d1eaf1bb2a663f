//! Output formatting for MCP tools.
//!
//! The schema report is markdown: one section per table with a column table
//! underneath. Query results are pretty-printed JSON.

use crate::error::{DbError, DbResult};
use crate::models::TableSchema;
use serde::Serialize;

/// Rendered in the Default cell when a column has no default.
pub const NO_DEFAULT: &str = "NULL";

/// Render the schema report for a connection.
///
/// ```text
/// # Schema for <connection>
///
/// ## Table: <table>
///
/// | Column | Type | Nullable | Default |
/// |---|---|---|---|
/// | id | INTEGER | true | NULL |
///
/// ```
pub fn format_schema_markdown(connection_name: &str, tables: &[TableSchema]) -> String {
    let mut output = format!("# Schema for {}\n\n", connection_name);

    for table in tables {
        output.push_str(&format!("## Table: {}\n\n", table.name));
        if !table.columns.is_empty() {
            output.push_str("| Column | Type | Nullable | Default |\n");
            output.push_str("|---|---|---|---|\n");
            for col in &table.columns {
                output.push_str(&format!(
                    "| {} | {} | {} | {} |\n",
                    col.name,
                    col.data_type,
                    col.nullable,
                    col.default_value.as_deref().unwrap_or(NO_DEFAULT)
                ));
            }
        }
        output.push('\n');
    }

    output
}

/// Pretty-print a tool payload as JSON.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> DbResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| DbError::internal(format!("Failed to serialize result: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ColumnDefinition;

    #[test]
    fn test_schema_markdown_layout() {
        let tables = vec![TableSchema::new(
            "users",
            vec![
                ColumnDefinition::new("id", "INTEGER", false),
                ColumnDefinition::new("name", "VARCHAR(50)", true).with_default("'anon'"),
            ],
        )];

        let report = format_schema_markdown("main", &tables);
        assert_eq!(
            report,
            "# Schema for main\n\n\
             ## Table: users\n\n\
             | Column | Type | Nullable | Default |\n\
             |---|---|---|---|\n\
             | id | INTEGER | false | NULL |\n\
             | name | VARCHAR(50) | true | 'anon' |\n\
             \n"
        );
    }

    #[test]
    fn test_schema_markdown_no_tables() {
        assert_eq!(format_schema_markdown("empty", &[]), "# Schema for empty\n\n");
    }

    #[test]
    fn test_schema_markdown_table_without_columns() {
        let tables = vec![TableSchema::new("bare", vec![])];
        assert_eq!(
            format_schema_markdown("db", &tables),
            "# Schema for db\n\n## Table: bare\n\n\n"
        );
    }

    #[test]
    fn test_pretty_json() {
        let json = to_pretty_json(&serde_json::json!([{"x": 1}])).unwrap();
        assert_eq!(json, "[\n  {\n    \"x\": 1\n  }\n]");
    }
}
