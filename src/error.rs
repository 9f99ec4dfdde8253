//! Error types for the MySQL MCP Server.
//!
//! All fallible operations return [`DbResult`]. The taxonomy is small by
//! design: pool construction failures are fatal at startup, everything else
//! is surfaced to the specific tool call that triggered it. Driver messages
//! are carried verbatim; diagnostic transparency is preferred over
//! information hiding.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    /// The connection pool could not be built (bad host, refused
    /// connection, invalid credentials). Fatal during startup.
    #[error("failed to create connection pool: {message}")]
    Pool { message: String },

    /// No connection became available within the acquire timeout. The pool
    /// limit is the only admission control; callers beyond it wait here.
    #[error("timed out acquiring a database connection from the pool")]
    AcquireTimeout,

    /// The statement failed at the driver: malformed SQL, constraint
    /// violation, or the connection dropped mid-execution. Display renders
    /// the driver's message verbatim.
    #[error("{message}")]
    Query {
        message: String,
        /// e.g. "42S02" for unknown table
        sql_state: Option<String>,
    },

    /// The pool was shut down. Further use fails loudly rather than
    /// silently reconnecting.
    #[error("connection pool is closed")]
    PoolClosed,

    #[error("internal error: {message}")]
    Internal { message: String },
}

impl DbError {
    /// Create a pool construction error.
    pub fn pool(message: impl Into<String>) -> Self {
        Self::Pool {
            message: message.into(),
        }
    }

    /// Create a query error without an SQLSTATE code.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
            sql_state: None,
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// The SQLSTATE code reported by the server, if any.
    pub fn sql_state(&self) -> Option<&str> {
        match self {
            Self::Query { sql_state, .. } => sql_state.as_deref(),
            _ => None,
        }
    }

    /// Whether retrying the operation could succeed without intervention.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::AcquireTimeout)
    }
}

/// Convert sqlx errors into our taxonomy.
///
/// Anything raised by the server itself becomes a `Query` error carrying
/// the driver message; pool lifecycle failures keep their own variants so
/// the gateway can distinguish backpressure from broken statements.
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => DbError::Query {
                message: db_err.message().to_string(),
                sql_state: db_err.code().map(|c| c.to_string()),
            },
            sqlx::Error::PoolTimedOut => DbError::AcquireTimeout,
            sqlx::Error::PoolClosed => DbError::PoolClosed,
            sqlx::Error::Configuration(msg) => DbError::pool(msg.to_string()),
            sqlx::Error::Io(io_err) => DbError::query(format!("I/O error: {io_err}")),
            sqlx::Error::Tls(tls_err) => DbError::pool(format!("TLS error: {tls_err}")),
            sqlx::Error::Protocol(msg) => DbError::query(format!("protocol error: {msg}")),
            sqlx::Error::RowNotFound => DbError::query("no rows returned"),
            sqlx::Error::ColumnDecode { index, source } => {
                DbError::internal(format!("failed to decode column {index}: {source}"))
            }
            sqlx::Error::Decode(source) => DbError::internal(format!("decode error: {source}")),
            sqlx::Error::WorkerCrashed => DbError::internal("database worker crashed"),
            other => DbError::internal(format!("unexpected database error: {other}")),
        }
    }
}

/// Result type alias for database operations.
pub type DbResult<T> = Result<T, DbError>;
