//! Data models for the MySQL MCP Server.

pub mod query;

pub use query::{QueryParam, QueryRequest, QueryResult};
