//! Query execution engine.
//!
//! Each call borrows a dedicated connection from the pool, runs the
//! statement, and lets the RAII handle return the connection on every exit
//! path; a failed statement never holds a connection past the call.

use crate::db::pool::PoolManager;
use crate::db::types::{column_names, row_to_json};
use crate::error::{DbError, DbResult};
use crate::models::{QueryParam, QueryResult};
use sqlx::mysql::{MySqlArguments, MySqlRow};
use tracing::debug;

/// Stateless executor; one instance serves all calls.
#[derive(Debug, Default)]
pub struct QueryExecutor;

impl QueryExecutor {
    /// Create a new query executor.
    pub fn new() -> Self {
        Self
    }

    /// Execute an arbitrary statement with positional parameters.
    ///
    /// Returns the result rows as ordered column-name → value maps plus the
    /// ordered column names; both are empty when the statement produces no
    /// result set. Driver failures propagate as [`DbError::Query`].
    pub async fn execute(
        &self,
        manager: &PoolManager,
        statement: &str,
        params: &[QueryParam],
    ) -> DbResult<QueryResult> {
        let mut conn = manager.acquire().await?;

        debug!(
            statement = %statement,
            params = params.len(),
            "executing statement"
        );

        // Statements without parameters run unprepared: some SQL (SHOW,
        // DDL) does not go through the prepared-statement path cleanly.
        let rows: Vec<MySqlRow> = if params.is_empty() {
            use sqlx::Executor;
            (&mut *conn).fetch_all(statement).await.map_err(DbError::from)?
        } else {
            let mut query = sqlx::query(statement);
            for param in params {
                query = bind_param(query, param);
            }
            query.fetch_all(&mut *conn).await.map_err(DbError::from)?
        };
        // `conn` drops here, returning the connection to the pool. The `?`
        // above takes the same path on failure.

        let columns = rows.first().map(column_names).unwrap_or_default();
        let json_rows = rows.iter().map(row_to_json).collect();

        Ok(QueryResult {
            columns,
            rows: json_rows,
        })
    }
}

/// Bind a parameter to a MySQL query.
fn bind_param<'q>(
    query: sqlx::query::Query<'q, sqlx::MySql, MySqlArguments>,
    param: &'q QueryParam,
) -> sqlx::query::Query<'q, sqlx::MySql, MySqlArguments> {
    match param {
        QueryParam::Null => query.bind(None::<String>),
        QueryParam::Bool(v) => query.bind(*v),
        QueryParam::Int(v) => query.bind(*v),
        QueryParam::Float(v) => query.bind(*v),
        QueryParam::String(v) => query.bind(v.as_str()),
        QueryParam::Json(v) => query.bind(sqlx::types::Json(v)),
    }
}
