//! MySQL MCP Server - Main entry point.
//!
//! Builds the connection pool eagerly at startup, then serves MCP tool
//! calls over stdio until terminated.

use clap::Parser;
use mysql_mcp_server::config::Config;
use mysql_mcp_server::db::PoolManager;
use mysql_mcp_server::transport::StdioTransport;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber for logging.
///
/// Logs go to stderr so they cannot corrupt the stdio protocol stream.
fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse configuration from command line and environment
    let config = Config::parse();

    // Initialize logging
    init_tracing(&config);

    let conn_config = config.connection_config();
    info!(
        host = %conn_config.host,
        port = conn_config.port,
        database = %conn_config.database,
        "Starting MySQL MCP Server v{}",
        env!("CARGO_PKG_VERSION")
    );

    let pool_manager = Arc::new(PoolManager::new(conn_config));

    // Eager pool construction: an unreachable database fails the process
    // at startup instead of on the first tool call.
    if let Err(e) = pool_manager.ensure_pool().await {
        error!(error = %e, "failed to initialize connection pool");
        return Err(e.into());
    }

    let transport = StdioTransport::new(pool_manager);
    let result = transport.run().await;

    if let Err(e) = result {
        error!(error = %e, "Server error");
        return Err(e.into());
    }

    info!("Server shutdown complete");
    Ok(())
}
