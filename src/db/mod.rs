//! Database abstraction layer.
//!
//! This module provides database access functionality:
//! - Connection registry and lazily created engines
//! - Read and transactional write execution
//! - Schema introspection
//! - Row to JSON conversion

pub mod executor;
pub mod pool;
pub mod schema;
pub mod types;

pub use pool::{ConnectionManager, DbPool};
pub use schema::SchemaInspector;
