//! MCP service implementation using rmcp.
//!
//! This module defines the DbService struct with the four database tools
//! exposed via the MCP protocol using the rmcp framework's macros.
//!
//! Argument validation failures are returned as protocol errors. Anything that
//! fails inside a tool body is returned as a normal tool result whose text
//! starts with `Error: `.

use crate::db::ConnectionManager;
use crate::error::{DbError, DbResult};
use crate::tools::format::to_pretty_json;
use crate::tools::{
    GetSchemaInput, QueryToolHandler, ReadSqlInput, SchemaToolHandler, WriteSqlInput,
    WriteToolHandler,
};
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub struct DbService {
    /// Shared connection manager for all database operations
    connection_manager: Arc<ConnectionManager>,
    /// Tool router for MCP tool dispatch (auto-generated)
    tool_router: ToolRouter<Self>,
}

impl DbService {
    /// Create a new DbService instance.
    pub fn new(connection_manager: Arc<ConnectionManager>) -> Self {
        Self {
            connection_manager,
            tool_router: Self::tool_router(),
        }
    }

    /// Ensure every required argument is present and non-blank.
    ///
    /// `message` names the arguments the tool requires.
    fn require_args(args: &[&str], message: &str) -> Result<(), McpError> {
        if args.iter().any(|arg| arg.trim().is_empty()) {
            Err(DbError::invalid_input(format!(
                "{}. Call list_connections first to get available connection names.",
                message
            ))
            .into())
        } else {
            Ok(())
        }
    }

    /// Render a tool body outcome as a text result.
    fn render(tool: &str, outcome: DbResult<String>) -> CallToolResult {
        match outcome {
            Ok(text) => CallToolResult::success(vec![Content::text(text)]),
            Err(e) => {
                warn!(tool, error = %e, "Tool call failed");
                CallToolResult::error(vec![Content::text(format!("Error: {}", e))])
            }
        }
    }
}

#[tool_router]
impl DbService {
    #[tool(description = "List available database connections and their permission status.")]
    async fn list_connections(&self) -> Result<CallToolResult, McpError> {
        let connections = self.connection_manager.list_connections();
        Ok(Self::render(
            "list_connections",
            to_pretty_json(&connections),
        ))
    }

    #[tool(
        description = "Get the schema of a specific database. By default, returns a summary of all tables. Provide 'table_names' to get detailed column information for specific tables."
    )]
    async fn get_schema(
        &self,
        Parameters(mut input): Parameters<GetSchemaInput>,
    ) -> Result<CallToolResult, McpError> {
        Self::require_args(&[&input.connection_name], "connection_name is required")?;
        input.connection_name = input.connection_name.trim().to_string();

        let handler = SchemaToolHandler::new(self.connection_manager.clone());
        Ok(Self::render("get_schema", handler.get_schema(input).await))
    }

    #[tool(description = "Execute a read-only SQL query.")]
    async fn read_sql(
        &self,
        Parameters(mut input): Parameters<ReadSqlInput>,
    ) -> Result<CallToolResult, McpError> {
        Self::require_args(
            &[&input.connection_name, &input.query],
            "connection_name and query are required",
        )?;
        input.connection_name = input.connection_name.trim().to_string();

        let handler = QueryToolHandler::new(self.connection_manager.clone());
        let outcome = handler
            .read(input)
            .await
            .and_then(|rows| to_pretty_json(&rows));
        Ok(Self::render("read_sql", outcome))
    }

    #[tool(
        description = "Execute a write SQL query (INSERT, UPDATE, DELETE). Only works if connection is not read-only."
    )]
    async fn write_sql(
        &self,
        Parameters(mut input): Parameters<WriteSqlInput>,
    ) -> Result<CallToolResult, McpError> {
        Self::require_args(
            &[&input.connection_name, &input.query],
            "connection_name and query are required",
        )?;
        input.connection_name = input.connection_name.trim().to_string();

        let handler = WriteToolHandler::new(self.connection_manager.clone());
        let outcome = handler
            .write(input)
            .await
            .and_then(|result| to_pretty_json(&result));
        Ok(Self::render("write_sql", outcome))
    }
}

#[tool_handler]
impl ServerHandler for DbService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "mcp-database-manager".to_owned(),
                title: Some("MCP Database Manager".to_owned()),
                version: env!("CARGO_PKG_VERSION").to_owned(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Database tools for inspecting and querying configured SQL connections.\n\
                \n\
                ## Workflow\n\
                1. Call `list_connections` to get the connection names and their read-only flag\n\
                2. Call `get_schema` with a `connection_name` to see tables and columns\n\
                3. Use `read_sql` for queries and `write_sql` for INSERT/UPDATE/DELETE/DDL\n\
                \n\
                ## Notes\n\
                - `read_sql` rejects statements starting with INSERT, UPDATE, DELETE, DROP, ALTER, CREATE, TRUNCATE, GRANT or REVOKE\n\
                - `write_sql` only works on connections with `readonly: false`; each call is committed on success\n\
                - Failures are returned as text starting with `Error: `"
                    .to_string(),
            ),
        }
    }
}
