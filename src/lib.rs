//! MySQL MCP Server Library
//!
//! This library exposes a MySQL database to MCP (Model Context Protocol)
//! consumers through two tools: listTables and executeQuery. A single
//! process-wide connection pool backs both.

pub mod config;
pub mod db;
pub mod error;
pub mod mcp;
pub mod models;
pub mod transport;

pub use config::{Config, ConnectionConfig, ConnectionOverrides};
pub use db::{PoolManager, QueryExecutor};
pub use error::{DbError, DbResult};
pub use mcp::MySqlService;
