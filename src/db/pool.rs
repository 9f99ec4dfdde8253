//! Connection pool management.
//!
//! The process owns exactly one [`sqlx::MySqlPool`], held by [`PoolManager`]
//! behind an explicit lifecycle: uninitialized → active → closed. Pool
//! construction is idempotent and guarded against concurrent
//! double-construction; after shutdown, further use fails with
//! [`DbError::PoolClosed`] instead of silently reconnecting.

use crate::config::ConnectionConfig;
use crate::error::{DbError, DbResult};
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::pool::PoolConnection;
use sqlx::{MySql, MySqlPool};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Owner of the process-wide connection pool.
pub struct PoolManager {
    config: ConnectionConfig,
    pool: RwLock<Option<MySqlPool>>,
}

impl PoolManager {
    /// Create a manager in the uninitialized state. No connection is made
    /// until [`ensure_pool`](Self::ensure_pool) runs.
    pub fn new(config: ConnectionConfig) -> Self {
        Self {
            config,
            pool: RwLock::new(None),
        }
    }

    /// The configuration this manager was built with.
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Build the pool if it does not exist yet, otherwise return the
    /// existing one unchanged. Idempotent: concurrent callers race for the
    /// write lock and the losers observe the winner's pool.
    pub async fn ensure_pool(&self) -> DbResult<MySqlPool> {
        {
            let guard = self.pool.read().await;
            if let Some(pool) = guard.as_ref() {
                return Ok(pool.clone());
            }
        }

        let mut guard = self.pool.write().await;
        // Re-check: another task may have built the pool while we waited.
        if let Some(pool) = guard.as_ref() {
            return Ok(pool.clone());
        }

        let pool = self.build_pool().await?;
        info!(
            host = %self.config.host,
            port = self.config.port,
            database = %self.config.database,
            connection_limit = self.config.connection_limit,
            "MySQL connection pool created"
        );
        *guard = Some(pool.clone());
        Ok(pool)
    }

    /// Get the active pool, failing loudly when uninitialized or closed.
    pub async fn pool(&self) -> DbResult<MySqlPool> {
        let guard = self.pool.read().await;
        guard.as_ref().cloned().ok_or(DbError::PoolClosed)
    }

    /// Borrow a connection from the pool.
    ///
    /// Suspends until a connection frees up or the acquire timeout elapses.
    /// The returned handle gives it back to the pool on drop, on success
    /// and failure paths alike.
    pub async fn acquire(&self) -> DbResult<PoolConnection<MySql>> {
        let pool = self.pool().await?;
        let conn = pool.acquire().await?;
        debug!("database connection acquired from pool");
        Ok(conn)
    }

    /// Whether a live pool currently exists.
    pub async fn is_active(&self) -> bool {
        self.pool.read().await.is_some()
    }

    /// Drain in-flight usage, close all underlying connections, and reset
    /// to the uninitialized state. Safe to call when no pool exists, and a
    /// second call is a no-op.
    pub async fn shutdown(&self) {
        let taken = self.pool.write().await.take();
        match taken {
            Some(pool) => {
                pool.close().await;
                info!("MySQL connection pool closed");
            }
            None => {
                debug!("shutdown requested but no pool exists");
            }
        }
    }

    async fn build_pool(&self) -> DbResult<MySqlPool> {
        let options = MySqlConnectOptions::new()
            .host(&self.config.host)
            .port(self.config.port)
            .username(&self.config.user)
            .password(&self.config.password)
            .database(&self.config.database)
            .charset(&self.config.charset)
            .timezone(Some(self.config.timezone.clone()));

        MySqlPoolOptions::new()
            .max_connections(self.config.connection_limit)
            .acquire_timeout(self.config.acquire_timeout())
            .idle_timeout(Some(self.config.idle_timeout()))
            .test_before_acquire(self.config.reconnect)
            .connect_with(options)
            .await
            .map_err(|e| {
                warn!(error = %e, "failed to create MySQL connection pool");
                DbError::pool(e.to_string())
            })
    }
}

impl std::fmt::Debug for PoolManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoolManager")
            .field("host", &self.config.host)
            .field("port", &self.config.port)
            .field("database", &self.config.database)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> PoolManager {
        PoolManager::new(ConnectionConfig::default())
    }

    #[tokio::test]
    async fn test_new_manager_is_uninitialized() {
        let manager = manager();
        assert!(!manager.is_active().await);
    }

    #[tokio::test]
    async fn test_pool_fails_before_initialization() {
        let manager = manager();
        let result = manager.pool().await;
        assert!(matches!(result, Err(DbError::PoolClosed)));
    }

    #[tokio::test]
    async fn test_acquire_fails_before_initialization() {
        let manager = manager();
        let result = manager.acquire().await;
        assert!(matches!(result, Err(DbError::PoolClosed)));
    }

    #[tokio::test]
    async fn test_shutdown_without_pool_is_noop() {
        let manager = manager();
        manager.shutdown().await;
        assert!(!manager.is_active().await);
    }

    #[tokio::test]
    async fn test_shutdown_is_idempotent() {
        let manager = manager();
        manager.shutdown().await;
        manager.shutdown().await;
        assert!(!manager.is_active().await);
    }
}
