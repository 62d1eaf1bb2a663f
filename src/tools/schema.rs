//! Schema report tool.
//!
//! Implements `get_schema`: describe the tables of a connection and render
//! them as a markdown report.

use crate::db::ConnectionManager;
use crate::db::schema::SchemaInspector;
use crate::error::DbResult;
use crate::tools::format::format_schema_markdown;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Input for the get_schema tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetSchemaInput {
    /// Connection name from list_connections
    pub connection_name: String,
    /// Tables to describe. Omit or pass an empty list to describe every table.
    #[serde(default)]
    pub table_names: Option<Vec<String>>,
}

/// Handler for the schema report.
pub struct SchemaToolHandler {
    connection_manager: Arc<ConnectionManager>,
}

impl SchemaToolHandler {
    pub fn new(connection_manager: Arc<ConnectionManager>) -> Self {
        Self { connection_manager }
    }

    /// Build the markdown schema report for a connection.
    pub async fn get_schema(&self, input: GetSchemaInput) -> DbResult<String> {
        let config = self.connection_manager.get_config(&input.connection_name)?;
        let pool = self.connection_manager.get_pool(&config.name).await?;

        let tables = SchemaInspector::inspect(&pool, input.table_names.as_deref()).await?;

        info!(
            connection = %input.connection_name,
            tables = tables.len(),
            "Schema report built"
        );
        Ok(format_schema_markdown(&input.connection_name, &tables))
    }
}
