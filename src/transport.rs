//! Stdio transport and process lifecycle.
//!
//! The server speaks JSON-RPC over standard input/output, the standard mode
//! for CLI-based MCP integrations. This module also owns the shutdown
//! contract: on SIGINT or SIGTERM the pool is drained and closed exactly
//! once, then the process exits with a success code.

use crate::db::PoolManager;
use crate::error::{DbError, DbResult};
use crate::mcp::MySqlService;
use rmcp::{ServiceExt, transport::stdio};
use std::sync::Arc;
use tokio::signal;
use tracing::info;

/// Stdio transport implementation.
pub struct StdioTransport {
    pool_manager: Arc<PoolManager>,
}

impl StdioTransport {
    /// Create a new stdio transport around the shared pool manager.
    pub fn new(pool_manager: Arc<PoolManager>) -> Self {
        Self { pool_manager }
    }

    /// Serve MCP calls until the session ends or a shutdown signal arrives.
    pub async fn run(&self) -> DbResult<()> {
        info!("starting MCP server with stdio transport");

        let service = MySqlService::new(self.pool_manager.clone());

        let transport = stdio();
        let running_service = service
            .serve(transport)
            .await
            .map_err(|e| DbError::internal(format!("failed to start stdio transport: {e}")))?;

        let shutdown_requested = tokio::select! {
            result = running_service.waiting() => {
                match result {
                    Ok(_quit_reason) => {
                        info!("stdio transport completed normally");
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "stdio transport error");
                        return Err(DbError::internal(format!("stdio transport error: {e}")));
                    }
                }
                false
            }
            _ = wait_for_signal() => {
                info!("shutdown signal received, shutting down gracefully (send again to force exit)");
                true
            }
        };

        if shutdown_requested {
            // Second signal forces exit immediately
            tokio::spawn(async {
                wait_for_signal().await;
                tracing::warn!("received second signal, forcing immediate exit");
                std::process::exit(1);
            });
        }

        // Close the pool exactly once on the way out; shutdown is
        // idempotent and a shutdown failure cannot reach us here.
        info!("closing connection pool");
        self.pool_manager.shutdown().await;

        if shutdown_requested {
            // tokio::select! cannot interrupt the blocking stdin read, so
            // exit explicitly once the pool is closed.
            info!("exiting process");
            std::process::exit(0);
        }

        Ok(())
    }
}

/// Wait for a shutdown signal (SIGINT or SIGTERM).
async fn wait_for_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("received SIGINT");
        }
        _ = terminate => {
            info!("received SIGTERM");
        }
    }
}
