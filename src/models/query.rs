//! Query-related data models.
//!
//! This module defines the shapes returned by the read and write paths.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One result row: column name to value, in the order the driver returned the columns.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Status reported by a committed write.
pub const WRITE_STATUS_SUCCESS: &str = "success";

/// Result of a committed write statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WriteResult {
    pub status: String,
    pub rows_affected: u64,
}

impl WriteResult {
    pub fn success(rows_affected: u64) -> Self {
        Self {
            status: WRITE_STATUS_SUCCESS.to_string(),
            rows_affected,
        }
    }
}
