//! Pool lifecycle tests that run without a database server.

use mysql_mcp_server::config::{ConnectionConfig, ConnectionOverrides};
use mysql_mcp_server::db::{PoolManager, QueryExecutor};
use mysql_mcp_server::error::DbError;
use std::sync::Arc;

fn manager() -> PoolManager {
    PoolManager::new(ConnectionConfig::default())
}

#[tokio::test]
async fn shutdown_without_pool_is_a_noop() {
    let manager = manager();
    manager.shutdown().await;
    assert!(!manager.is_active().await);
}

#[tokio::test]
async fn shutdown_twice_produces_no_error() {
    let manager = manager();
    manager.shutdown().await;
    manager.shutdown().await;
}

#[tokio::test]
async fn use_before_initialization_fails_loudly() {
    let manager = manager();
    assert!(matches!(manager.pool().await, Err(DbError::PoolClosed)));
    assert!(matches!(manager.acquire().await, Err(DbError::PoolClosed)));
}

#[tokio::test]
async fn executor_propagates_closed_pool_error() {
    let manager = Arc::new(manager());
    let executor = QueryExecutor::new();
    let result = executor.execute(&manager, "SELECT 1", &[]).await;
    assert!(matches!(result, Err(DbError::PoolClosed)));
}

#[tokio::test]
async fn concurrent_shutdown_calls_are_safe() {
    let manager = Arc::new(manager());
    let mut handles = Vec::new();
    for _ in 0..8 {
        let m = Arc::clone(&manager);
        handles.push(tokio::spawn(async move {
            m.shutdown().await;
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }
    assert!(!manager.is_active().await);
}

#[test]
fn resolved_config_is_fully_defined_for_the_pool_builder() {
    let config = ConnectionConfig::resolve(ConnectionOverrides {
        password: Some(String::new()),
        ..ConnectionOverrides::default()
    });
    assert!(!config.host.is_empty());
    assert!(config.port > 0);
    assert!(!config.user.is_empty());
    assert!(!config.database.is_empty());
    assert!(config.connection_limit > 0);
}
