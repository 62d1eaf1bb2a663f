//! MCP Database Manager Library
//!
//! This library provides MCP (Model Context Protocol) tools that let AI
//! assistants inspect and query named SQL connections (SQLite, PostgreSQL,
//! MySQL) with a per-connection read-only policy.

pub mod config;
pub mod db;
pub mod error;
pub mod mcp;
pub mod models;
pub mod tools;
pub mod transport;

pub use config::Config;
pub use error::DbError;
pub use mcp::DbService;
