//! MCP service implementation using rmcp.
//!
//! Registers the two tools, `listTables` and `executeQuery`, and maps
//! each call onto the query executor. Every failure is caught at this
//! boundary and converted into a tool-call result with `isError` set; no
//! error crosses the protocol boundary unhandled, and error text carries
//! the underlying message unmodified.

use crate::db::{PoolManager, QueryExecutor};
use crate::models::{QueryRequest, QueryResult};
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use serde_json::json;
use std::sync::Arc;
use tracing::warn;

/// Statement behind the listTables tool.
const LIST_TABLES_SQL: &str = "SHOW TABLES";

#[derive(Clone)]
pub struct MySqlService {
    /// Shared owner of the process-wide connection pool
    pool_manager: Arc<PoolManager>,
    /// Stateless query executor
    executor: Arc<QueryExecutor>,
    /// Tool router for MCP tool dispatch (auto-generated)
    tool_router: ToolRouter<Self>,
}

impl MySqlService {
    /// Create a new service around the shared pool manager.
    pub fn new(pool_manager: Arc<PoolManager>) -> Self {
        Self {
            pool_manager,
            executor: Arc::new(QueryExecutor::new()),
            tool_router: Self::tool_router(),
        }
    }
}

/// Pretty-print result rows for the text content payload.
fn render_rows(result: &QueryResult) -> String {
    serde_json::to_string_pretty(&result.rows).unwrap_or_else(|_| "[]".to_string())
}

#[tool_router]
impl MySqlService {
    #[tool(
        name = "listTables",
        description = "Lists all tables in the MySQL database"
    )]
    pub async fn list_tables(&self) -> Result<CallToolResult, McpError> {
        match self
            .executor
            .execute(&self.pool_manager, LIST_TABLES_SQL, &[])
            .await
        {
            Ok(result) => Ok(CallToolResult::success(vec![Content::text(format!(
                "Tables in database:\n{}",
                render_rows(&result)
            ))])),
            Err(e) => {
                warn!(error = %e, "listTables failed");
                Ok(CallToolResult::error(vec![Content::text(format!(
                    "Error listing tables: {e}"
                ))]))
            }
        }
    }

    #[tool(
        name = "executeQuery",
        description = "Executes an arbitrary SQL statement against the MySQL database.\nSupports positional parameters (? placeholders) bound server-side.\nMutating statements are permitted."
    )]
    pub async fn execute_query(
        &self,
        Parameters(input): Parameters<QueryRequest>,
    ) -> Result<CallToolResult, McpError> {
        match self
            .executor
            .execute(&self.pool_manager, &input.statement, &input.params)
            .await
        {
            Ok(result) => {
                let mut call_result = CallToolResult::success(vec![Content::text(format!(
                    "Query results:\n{}",
                    render_rows(&result)
                ))]);
                call_result.structured_content = Some(json!({ "columns": result.columns }));
                Ok(call_result)
            }
            Err(e) => {
                warn!(error = %e, "executeQuery failed");
                Ok(CallToolResult::error(vec![Content::text(format!(
                    "Error executing query: {e}"
                ))]))
            }
        }
    }
}

#[tool_handler]
impl ServerHandler for MySqlService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "mysql-mcp-server".to_owned(),
                title: Some("MySQL MCP Server".to_owned()),
                version: env!("CARGO_PKG_VERSION").to_owned(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Tools for querying a MySQL database.\n\
                \n\
                - `listTables`: list all tables in the configured database\n\
                - `executeQuery`: run an arbitrary SQL statement with optional\n\
                  positional parameters (use ? placeholders)\n\
                \n\
                executeQuery accepts any SQL the connected user may run,\n\
                including INSERT/UPDATE/DELETE. Failed statements return an\n\
                error result carrying the server's message."
                    .to_string(),
            ),
        }
    }
}
