//! Database abstraction layer.
//!
//! This module provides database access functionality:
//! - Connection pool management with an explicit lifecycle
//! - Query execution with positional parameter binding
//! - MySQL-to-JSON type mappings

pub mod executor;
pub mod pool;
pub mod types;

pub use executor::QueryExecutor;
pub use pool::PoolManager;
