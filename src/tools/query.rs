//! Read-path tool.
//!
//! Implements `read_sql`: resolve the connection, reject statements that
//! start with a mutating keyword, then run the query and return every row.

use crate::db::executor;
use crate::db::ConnectionManager;
use crate::error::DbResult;
use crate::models::Row;
use crate::tools::guard;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Input for the read_sql tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ReadSqlInput {
    /// Connection name from list_connections
    pub connection_name: String,
    /// SQL query to execute. Statements starting with INSERT, UPDATE, DELETE, DROP, ALTER,
    /// CREATE, TRUNCATE, GRANT or REVOKE are rejected; use write_sql for those.
    pub query: String,
}

/// Handler for read queries.
pub struct QueryToolHandler {
    connection_manager: Arc<ConnectionManager>,
}

impl QueryToolHandler {
    pub fn new(connection_manager: Arc<ConnectionManager>) -> Self {
        Self { connection_manager }
    }

    /// Run a read query and return its rows as ordered JSON objects.
    ///
    /// The connection lookup happens before the denylist check, so an unknown
    /// name is reported as such even for a rejected statement.
    pub async fn read(&self, input: ReadSqlInput) -> DbResult<Vec<Row>> {
        self.connection_manager.get_config(&input.connection_name)?;
        guard::validate_read_query(&input.query)?;

        let pool = self
            .connection_manager
            .get_pool(&input.connection_name)
            .await?;
        let rows = executor::fetch_rows(&pool, &input.query).await?;

        info!(
            connection = %input.connection_name,
            rows = rows.len(),
            "Read query executed"
        );
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::models::ConnectionConfig;

    fn handler(readonly: bool) -> QueryToolHandler {
        let manager = ConnectionManager::new(vec![ConnectionConfig::new(
            "mem",
            "sqlite::memory:",
            readonly,
        )])
        .unwrap();
        QueryToolHandler::new(Arc::new(manager))
    }

    fn input(connection_name: &str, query: &str) -> ReadSqlInput {
        ReadSqlInput {
            connection_name: connection_name.to_string(),
            query: query.to_string(),
        }
    }

    #[test]
    fn test_query_description_lists_every_rejected_keyword() {
        let schema = serde_json::to_string(&schemars::schema_for!(ReadSqlInput)).unwrap();
        for kw in guard::MUTATING_KEYWORDS {
            assert!(schema.contains(&kw.to_uppercase()), "missing {kw}");
        }
    }

    #[tokio::test]
    async fn test_read_select_literal() {
        let rows = handler(false).read(input("mem", "SELECT 1 AS x")).await.unwrap();
        assert_eq!(serde_json::to_value(&rows).unwrap(), serde_json::json!([{"x": 1}]));
    }

    #[tokio::test]
    async fn test_read_rejects_mutation_without_engine() {
        let handler = handler(false);
        let err = handler
            .read(input("mem", "  delete from users"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::InvalidInput { .. }));
        assert_eq!(err.to_string(), guard::READ_REJECTED_MESSAGE);
        assert!(!handler.connection_manager.is_connected("mem"));
    }

    #[tokio::test]
    async fn test_read_unknown_connection_checked_first() {
        let err = handler(true)
            .read(input("nope", "DROP TABLE users"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ConnectionNotFound { .. }));
    }
}
