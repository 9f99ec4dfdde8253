//! Configuration handling for the MySQL MCP Server.
//!
//! Connection settings are resolved in two layers: the CLI (with
//! environment-variable fallbacks via clap's `env` attribute) produces a set
//! of optional overrides, and [`ConnectionConfig::resolve`] merges those
//! onto hardcoded defaults. Resolution never fails; every field has a
//! usable default.

use clap::Parser;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 3306;
pub const DEFAULT_USER: &str = "root";
pub const DEFAULT_PASSWORD: &str = "";
pub const DEFAULT_DATABASE: &str = "test";

// Fixed operational settings, not overridable from the CLI.
pub const CHARSET: &str = "utf8mb4";
pub const TIMEZONE: &str = "+00:00";
pub const DEFAULT_CONNECTION_LIMIT: u32 = 10;
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;

/// Caller-supplied overrides for the connection configuration.
///
/// `None` fields fall back to the defaults in [`ConnectionConfig::resolve`].
#[derive(Debug, Clone, Default)]
pub struct ConnectionOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
}

/// Resolved configuration for the MySQL connection pool.
///
/// Immutable once the pool is built from it.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub charset: String,
    pub timezone: String,
    /// Upper bound on live connections; the only admission control.
    pub connection_limit: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    /// Mapped to sqlx's test_before_acquire: broken idle connections are
    /// replaced transparently instead of being handed to callers.
    pub reconnect: bool,
}

impl ConnectionConfig {
    /// Merge overrides onto the defaults. Pure, cannot fail.
    pub fn resolve(overrides: ConnectionOverrides) -> Self {
        Self {
            host: overrides.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: overrides.port.unwrap_or(DEFAULT_PORT),
            user: overrides.user.unwrap_or_else(|| DEFAULT_USER.to_string()),
            password: overrides
                .password
                .unwrap_or_else(|| DEFAULT_PASSWORD.to_string()),
            database: overrides
                .database
                .unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            charset: CHARSET.to_string(),
            timezone: TIMEZONE.to_string(),
            connection_limit: DEFAULT_CONNECTION_LIMIT,
            acquire_timeout_secs: DEFAULT_ACQUIRE_TIMEOUT_SECS,
            idle_timeout_secs: DEFAULT_IDLE_TIMEOUT_SECS,
            reconnect: true,
        }
    }

    /// Get the acquire timeout as a Duration.
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Get the idle timeout as a Duration.
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self::resolve(ConnectionOverrides::default())
    }
}

/// Command line configuration for the MySQL MCP Server.
///
/// Database flags fall back to `DB_*` environment variables, which are read
/// once at startup; there is no hot-reload.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mysql-mcp-server",
    about = "MCP server exposing a MySQL database via listTables and executeQuery tools",
    version,
    author
)]
pub struct Config {
    /// MySQL server hostname
    #[arg(long, env = "DB_HOST")]
    pub host: Option<String>,

    /// MySQL server port
    #[arg(long, env = "DB_PORT")]
    pub port: Option<u16>,

    /// MySQL user
    #[arg(long, env = "DB_USER")]
    pub user: Option<String>,

    /// MySQL password
    #[arg(long, env = "DB_PASSWORD")]
    pub password: Option<String>,

    /// Database name
    #[arg(long, env = "DB_NAME")]
    pub database: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "MCP_LOG_LEVEL")]
    pub log_level: String,

    /// Enable JSON logging format
    #[arg(long, env = "MCP_JSON_LOGS")]
    pub json_logs: bool,
}

impl Config {
    /// Collect the connection overrides from the parsed arguments.
    pub fn connection_overrides(&self) -> ConnectionOverrides {
        ConnectionOverrides {
            host: self.host.clone(),
            port: self.port,
            user: self.user.clone(),
            password: self.password.clone(),
            database: self.database.clone(),
        }
    }

    /// Resolve the full connection configuration.
    pub fn connection_config(&self) -> ConnectionConfig {
        ConnectionConfig::resolve(self.connection_overrides())
    }

    /// Create a default configuration (useful for testing).
    pub fn default_config() -> Self {
        Self {
            host: None,
            port: None,
            user: None,
            password: None,
            database: None,
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_without_overrides_uses_defaults() {
        let config = ConnectionConfig::resolve(ConnectionOverrides::default());
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.user, DEFAULT_USER);
        assert_eq!(config.password, DEFAULT_PASSWORD);
        assert_eq!(config.database, DEFAULT_DATABASE);
    }

    #[test]
    fn test_resolve_leaves_no_field_undefined() {
        let config = ConnectionConfig::resolve(ConnectionOverrides::default());
        assert!(!config.host.is_empty());
        assert!(config.port != 0);
        assert!(!config.user.is_empty());
        assert!(!config.charset.is_empty());
        assert!(!config.timezone.is_empty());
        assert!(config.connection_limit > 0);
        assert!(config.acquire_timeout_secs > 0);
        assert!(config.idle_timeout_secs > 0);
    }

    #[test]
    fn test_resolve_applies_overrides() {
        let overrides = ConnectionOverrides {
            host: Some("db.internal".to_string()),
            port: Some(3307),
            user: Some("app".to_string()),
            password: Some("secret".to_string()),
            database: Some("sales".to_string()),
        };
        let config = ConnectionConfig::resolve(overrides);
        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, 3307);
        assert_eq!(config.user, "app");
        assert_eq!(config.password, "secret");
        assert_eq!(config.database, "sales");
        // Operational settings stay fixed regardless of overrides
        assert_eq!(config.charset, CHARSET);
        assert_eq!(config.timezone, TIMEZONE);
        assert_eq!(config.connection_limit, DEFAULT_CONNECTION_LIMIT);
    }

    #[test]
    fn test_resolve_partial_overrides() {
        let overrides = ConnectionOverrides {
            host: Some("db.internal".to_string()),
            ..ConnectionOverrides::default()
        };
        let config = ConnectionConfig::resolve(overrides);
        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.user, DEFAULT_USER);
    }

    #[test]
    fn test_timeout_durations() {
        let config = ConnectionConfig::default();
        assert_eq!(
            config.acquire_timeout(),
            Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS)
        );
        assert_eq!(
            config.idle_timeout(),
            Duration::from_secs(DEFAULT_IDLE_TIMEOUT_SECS)
        );
    }

    #[test]
    fn test_cli_config_produces_overrides() {
        let config = Config {
            host: Some("example.com".to_string()),
            port: Some(3310),
            ..Config::default()
        };
        let resolved = config.connection_config();
        assert_eq!(resolved.host, "example.com");
        assert_eq!(resolved.port, 3310);
        assert_eq!(resolved.database, DEFAULT_DATABASE);
    }
}
