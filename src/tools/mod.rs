//! MCP tool implementations.
//!
//! This module contains the database tool handlers:
//! - `schema`: Markdown schema report (`get_schema`)
//! - `query`: Read queries (`read_sql`)
//! - `write`: Transactional write statements (`write_sql`)
//! - `guard`: Mutating-keyword denylist for the read path
//! - `format`: Report and JSON rendering

pub mod format;
pub mod guard;
pub mod query;
pub mod schema;
pub mod write;

pub use query::{QueryToolHandler, ReadSqlInput};
pub use schema::{GetSchemaInput, SchemaToolHandler};
pub use write::{WriteSqlInput, WriteToolHandler};
