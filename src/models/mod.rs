//! Data models for the database manager.
//!
//! This module re-exports all model types used throughout the application.

pub mod connection;
pub mod query;
pub mod schema;

pub use connection::{ConnectionConfig, ConnectionSummary, DatabaseType};
pub use query::{Row, WRITE_STATUS_SUCCESS, WriteResult};
pub use schema::{ColumnDefinition, TableSchema};
