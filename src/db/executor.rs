//! Statement execution.
//!
//! Reads run the query text as-is against the pool and return every row.
//! Writes run inside a transaction that is committed only after the statement
//! succeeds; a failed statement drops the transaction, which rolls it back.
//!
//! Both paths send raw SQL without bind parameters, so statements the driver
//! cannot prepare (DDL, multi-statement batches) still work.
//!
//! # Architecture
//!
//! The executor uses database-specific implementations organized in submodules:
//! - `mysql`: MySQL-specific read and write operations
//! - `postgres`: PostgreSQL-specific read and write operations
//! - `sqlite`: SQLite-specific read and write operations

use crate::db::pool::DbPool;
use crate::db::types::RowToJson;
use crate::error::DbResult;
use crate::models::Row;
use std::time::Instant;
use tracing::debug;

/// Run a read query and return every row in driver order.
pub async fn fetch_rows(pool: &DbPool, sql: &str) -> DbResult<Vec<Row>> {
    let start = Instant::now();
    debug!(sql = %sql, db_type = %pool.db_type(), "Executing read query");

    let rows = match pool {
        DbPool::MySql(p) => mysql::fetch_rows(p, sql).await?,
        DbPool::Postgres(p) => postgres::fetch_rows(p, sql).await?,
        DbPool::SQLite(p) => sqlite::fetch_rows(p, sql).await?,
    };

    debug!(
        rows = rows.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Read query finished"
    );
    Ok(rows)
}

/// Run a statement in a transaction, commit it, and return the affected row count.
pub async fn execute_write(pool: &DbPool, sql: &str) -> DbResult<u64> {
    let start = Instant::now();
    debug!(sql = %sql, db_type = %pool.db_type(), "Executing write statement");

    let rows_affected = match pool {
        DbPool::MySql(p) => mysql::execute_write(p, sql).await?,
        DbPool::Postgres(p) => postgres::execute_write(p, sql).await?,
        DbPool::SQLite(p) => sqlite::execute_write(p, sql).await?,
    };

    debug!(
        rows_affected,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Write committed"
    );
    Ok(rows_affected)
}

// =============================================================================
// Database-Specific Implementations
// =============================================================================
//
// Each module below provides the same interface adapted to its database type.

mod mysql {
    use super::*;
    use sqlx::{Executor, MySqlPool};

    pub async fn fetch_rows(pool: &MySqlPool, sql: &str) -> DbResult<Vec<Row>> {
        let rows = pool.fetch_all(sql).await?;
        Ok(rows.iter().map(RowToJson::to_json_map).collect())
    }

    pub async fn execute_write(pool: &MySqlPool, sql: &str) -> DbResult<u64> {
        let mut tx = pool.begin().await?;
        let result = (&mut *tx).execute(sql).await?;
        tx.commit().await?;
        Ok(result.rows_affected())
    }
}

mod postgres {
    use super::*;
    use sqlx::{Executor, PgPool};

    pub async fn fetch_rows(pool: &PgPool, sql: &str) -> DbResult<Vec<Row>> {
        let rows = pool.fetch_all(sql).await?;
        Ok(rows.iter().map(RowToJson::to_json_map).collect())
    }

    pub async fn execute_write(pool: &PgPool, sql: &str) -> DbResult<u64> {
        let mut tx = pool.begin().await?;
        let result = (&mut *tx).execute(sql).await?;
        tx.commit().await?;
        Ok(result.rows_affected())
    }
}

mod sqlite {
    use super::*;
    use sqlx::{Executor, SqlitePool};

    pub async fn fetch_rows(pool: &SqlitePool, sql: &str) -> DbResult<Vec<Row>> {
        let rows = pool.fetch_all(sql).await?;
        Ok(rows.iter().map(RowToJson::to_json_map).collect())
    }

    pub async fn execute_write(pool: &SqlitePool, sql: &str) -> DbResult<u64> {
        let mut tx = pool.begin().await?;
        let result = (&mut *tx).execute(sql).await?;
        tx.commit().await?;
        Ok(result.rows_affected())
    }
}
