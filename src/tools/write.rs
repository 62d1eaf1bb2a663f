//! Write-path tool.
//!
//! Implements `write_sql`. The read-only flag is checked before any engine is
//! created; writable connections run the statement in a transaction.

use crate::db::executor;
use crate::db::ConnectionManager;
use crate::error::{DbError, DbResult};
use crate::models::WriteResult;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Input for the write_sql tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct WriteSqlInput {
    /// Connection name from list_connections. Must not be read-only.
    pub connection_name: String,
    /// SQL statement to execute (INSERT, UPDATE, DELETE or DDL)
    pub query: String,
}

/// Handler for write statements.
pub struct WriteToolHandler {
    connection_manager: Arc<ConnectionManager>,
}

impl WriteToolHandler {
    pub fn new(connection_manager: Arc<ConnectionManager>) -> Self {
        Self { connection_manager }
    }

    /// Execute a write statement and commit it.
    pub async fn write(&self, input: WriteSqlInput) -> DbResult<WriteResult> {
        if self.connection_manager.is_readonly(&input.connection_name)? {
            warn!(
                connection = %input.connection_name,
                "Write rejected on read-only connection"
            );
            return Err(DbError::permission(&input.connection_name));
        }

        let pool = self
            .connection_manager
            .get_pool(&input.connection_name)
            .await?;
        let rows_affected = executor::execute_write(&pool, &input.query).await?;

        info!(
            connection = %input.connection_name,
            rows_affected,
            "Write statement committed"
        );
        Ok(WriteResult::success(rows_affected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConnectionConfig;

    fn handler(readonly: bool) -> WriteToolHandler {
        let manager = ConnectionManager::new(vec![ConnectionConfig::new(
            "mem",
            "sqlite::memory:",
            readonly,
        )])
        .unwrap();
        WriteToolHandler::new(Arc::new(manager))
    }

    fn input(query: &str) -> WriteSqlInput {
        WriteSqlInput {
            connection_name: "mem".to_string(),
            query: query.to_string(),
        }
    }

    #[tokio::test]
    async fn test_write_on_readonly_creates_no_engine() {
        let handler = handler(true);
        let err = handler
            .write(input("CREATE TABLE t (id INTEGER)"))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Connection 'mem' is configured as READ-ONLY."
        );
        assert!(!handler.connection_manager.is_connected("mem"));
    }

    #[tokio::test]
    async fn test_write_reports_rows_affected() {
        let handler = handler(false);
        handler
            .write(input("CREATE TABLE t (id INTEGER)"))
            .await
            .unwrap();
        let result = handler
            .write(input("INSERT INTO t VALUES (1), (2)"))
            .await
            .unwrap();
        assert_eq!(result, WriteResult::success(2));
    }

    #[tokio::test]
    async fn test_write_unknown_connection() {
        let handler = handler(false);
        let err = handler
            .write(WriteSqlInput {
                connection_name: "other".to_string(),
                query: "DELETE FROM t".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ConnectionNotFound { .. }));
    }
}
