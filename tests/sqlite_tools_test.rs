//! Integration tests for the database tools against SQLite files.
//!
//! Tests verify that:
//! - Reads return ordered row objects
//! - Writes commit and report affected rows, and failed writes commit nothing
//! - Read-only connections reject writes without opening the database
//! - Unknown connection names are reported by every tool
//! - The schema report lists tables and columns with their declared types

use mcp_database_manager::db::ConnectionManager;
use mcp_database_manager::error::DbError;
use mcp_database_manager::models::{ConnectionConfig, WriteResult};
use mcp_database_manager::tools::{
    GetSchemaInput, QueryToolHandler, ReadSqlInput, SchemaToolHandler, WriteSqlInput,
    WriteToolHandler,
};
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

struct TestDb {
    // Keeps the database directory alive for the test.
    _dir: TempDir,
    url: String,
}

impl TestDb {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite:{}", dir.path().join("test.db").display());
        Self { _dir: dir, url }
    }

    fn manager(&self, readonly: bool) -> Arc<ConnectionManager> {
        Arc::new(
            ConnectionManager::new(vec![ConnectionConfig::new("main", &self.url, readonly)])
                .unwrap(),
        )
    }
}

async fn write(manager: &Arc<ConnectionManager>, query: &str) -> Result<WriteResult, DbError> {
    WriteToolHandler::new(manager.clone())
        .write(WriteSqlInput {
            connection_name: "main".to_string(),
            query: query.to_string(),
        })
        .await
}

async fn read(
    manager: &Arc<ConnectionManager>,
    query: &str,
) -> Result<serde_json::Value, DbError> {
    let rows = QueryToolHandler::new(manager.clone())
        .read(ReadSqlInput {
            connection_name: "main".to_string(),
            query: query.to_string(),
        })
        .await?;
    Ok(serde_json::to_value(rows).unwrap())
}

async fn schema(
    manager: &Arc<ConnectionManager>,
    table_names: Option<Vec<String>>,
) -> Result<String, DbError> {
    SchemaToolHandler::new(manager.clone())
        .get_schema(GetSchemaInput {
            connection_name: "main".to_string(),
            table_names,
        })
        .await
}

async fn seeded(db: &TestDb) -> Arc<ConnectionManager> {
    let manager = db.manager(false);
    write(&manager, "CREATE TABLE t (id INTEGER PRIMARY KEY, a INTEGER NOT NULL)")
        .await
        .unwrap();
    write(&manager, "INSERT INTO t (id, a) VALUES (1, 0), (2, 0)")
        .await
        .unwrap();
    manager
}

#[tokio::test]
async fn test_select_literal() {
    let db = TestDb::new();
    let manager = db.manager(false);
    assert_eq!(read(&manager, "SELECT 1 AS x").await.unwrap(), json!([{"x": 1}]));
}

#[tokio::test]
async fn test_rows_keep_column_order() {
    let db = TestDb::new();
    let manager = seeded(&db).await;
    let rows = QueryToolHandler::new(manager.clone())
        .read(ReadSqlInput {
            connection_name: "main".to_string(),
            query: "SELECT a, id FROM t ORDER BY id".to_string(),
        })
        .await
        .unwrap();
    let keys: Vec<&str> = rows[0].keys().map(String::as_str).collect();
    assert_eq!(keys, ["a", "id"]);
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn test_update_one_row() {
    let db = TestDb::new();
    let manager = seeded(&db).await;

    let result = write(&manager, "UPDATE t SET a=1 WHERE id=1").await.unwrap();
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({"status": "success", "rows_affected": 1})
    );
    assert_eq!(
        read(&manager, "SELECT id, a FROM t ORDER BY id").await.unwrap(),
        json!([{"id": 1, "a": 1}, {"id": 2, "a": 0}])
    );
}

#[tokio::test]
async fn test_failed_write_commits_nothing() {
    let db = TestDb::new();
    let manager = seeded(&db).await;

    let err = write(
        &manager,
        "INSERT INTO t (id, a) VALUES (3, 0); INSERT INTO missing VALUES (1)",
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DbError::Database { .. }));

    // Violates NOT NULL on the second row.
    let err = write(&manager, "INSERT INTO t (id, a) VALUES (4, 0), (5, NULL)")
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::Database { .. }));

    assert_eq!(
        read(&manager, "SELECT COUNT(*) AS n FROM t").await.unwrap(),
        json!([{"n": 2}])
    );
}

#[tokio::test]
async fn test_readonly_connection_rejects_writes() {
    let db = TestDb::new();
    seeded(&db).await;
    let manager = db.manager(true);

    for query in ["UPDATE t SET a = 5", "DROP TABLE t", "SELECT 1"] {
        let err = write(&manager, query).await.unwrap_err();
        assert!(matches!(err, DbError::Permission { .. }));
        assert_eq!(
            err.to_string(),
            "Connection 'main' is configured as READ-ONLY."
        );
    }
    assert!(!manager.is_connected("main"));

    // Reads still work and see the unchanged data.
    assert_eq!(
        read(&manager, "SELECT SUM(a) AS total FROM t").await.unwrap(),
        json!([{"total": 0}])
    );
    assert!(manager.is_connected("main"));
}

#[tokio::test]
async fn test_readonly_file_is_opened_read_only() {
    let db = TestDb::new();
    seeded(&db).await;
    let manager = db.manager(true);

    // The denylist does not see a leading comment; the read-only open still blocks it.
    let err = read(&manager, "/* sneaky */ DELETE FROM t").await.unwrap_err();
    assert!(matches!(err, DbError::Database { .. }));
    assert_eq!(
        read(&manager, "SELECT COUNT(*) AS n FROM t").await.unwrap(),
        json!([{"n": 2}])
    );
}

#[tokio::test]
async fn test_unknown_connection_everywhere() {
    let db = TestDb::new();
    let manager = db.manager(false);

    let not_found = |err: DbError| {
        assert!(matches!(err, DbError::ConnectionNotFound { .. }), "{err:?}");
        assert_eq!(
            err.to_string(),
            "Connection 'ghost' not found in configuration."
        );
    };

    not_found(
        QueryToolHandler::new(manager.clone())
            .read(ReadSqlInput {
                connection_name: "ghost".to_string(),
                query: "SELECT 1".to_string(),
            })
            .await
            .unwrap_err(),
    );
    not_found(
        WriteToolHandler::new(manager.clone())
            .write(WriteSqlInput {
                connection_name: "ghost".to_string(),
                query: "DELETE FROM t".to_string(),
            })
            .await
            .unwrap_err(),
    );
    not_found(
        SchemaToolHandler::new(manager.clone())
            .get_schema(GetSchemaInput {
                connection_name: "ghost".to_string(),
                table_names: None,
            })
            .await
            .unwrap_err(),
    );

    assert!(!manager.is_connected("main"));
}

#[tokio::test]
async fn test_schema_report_users_and_orders() {
    let db = TestDb::new();
    let manager = db.manager(false);
    write(&manager, "CREATE TABLE users (id INT, name VARCHAR(50))")
        .await
        .unwrap();
    write(&manager, "CREATE TABLE orders (id INT, user_id INT)")
        .await
        .unwrap();
    write(&manager, "CREATE VIEW user_names AS SELECT name FROM users")
        .await
        .unwrap();

    let report = schema(&manager, None).await.unwrap();
    assert_eq!(
        report,
        "# Schema for main\n\n\
         ## Table: orders\n\n\
         | Column | Type | Nullable | Default |\n\
         |---|---|---|---|\n\
         | id | INT | true | NULL |\n\
         | user_id | INT | true | NULL |\n\
         \n\
         ## Table: users\n\n\
         | Column | Type | Nullable | Default |\n\
         |---|---|---|---|\n\
         | id | INT | true | NULL |\n\
         | name | VARCHAR(50) | true | NULL |\n\
         \n"
    );

    let filtered = schema(&manager, Some(vec!["users".to_string()])).await.unwrap();
    assert!(filtered.contains("## Table: users"));
    assert!(!filtered.contains("## Table: orders"));

    let err = schema(&manager, Some(vec!["nope".to_string()]))
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::Schema { .. }));
    assert!(err.to_string().contains("Table 'nope' not found"));
}

#[tokio::test]
async fn test_schema_report_defaults_and_not_null() {
    let db = TestDb::new();
    let manager = db.manager(false);
    write(
        &manager,
        "CREATE TABLE settings (key TEXT NOT NULL, value TEXT DEFAULT 'on')",
    )
    .await
    .unwrap();

    let report = schema(&manager, Some(vec!["settings".to_string()]))
        .await
        .unwrap();
    assert!(report.contains("| key | TEXT | false | NULL |\n"));
    assert!(report.contains("| value | TEXT | true | 'on' |\n"));
}
