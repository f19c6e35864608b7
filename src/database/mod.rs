//! Database access abstraction
//!
//! This module provides the blocking session layer every other component
//! talks to:
//! - DuckDB: embedded database, the default backend
//! - PostgreSQL: server deployments (behind the `postgres-backend` feature)
//!
//! A [`ConnectionProvider`] hands out exclusive [`Session`]s. Sessions are
//! never shared between threads; the loader opens one per worker.

use std::path::Path;

use crate::config::{DatabaseBackendType, TpcdsConfig};
use crate::value::Value;

#[cfg(feature = "duckdb-backend")]
pub mod duckdb;

#[cfg(feature = "postgres-backend")]
pub mod postgres;

pub mod catalog;
pub mod dialect;

pub use dialect::{ColumnKind, Dialect};

/// Error type for database operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DatabaseError {
    /// Failed to obtain a session; fatal to the operation
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// A catalog entry (table, principal) does not exist
    #[error("Not found in catalog: {0}")]
    CatalogMissing(String),

    /// The session lacks a required privilege
    #[error("Privilege denied: {0}")]
    PrivilegeDenied(String),

    /// A data row could not be interpreted
    #[error("Data format error: {0}")]
    DataFormat(String),

    /// A statement was rejected by the database
    #[error("Statement failed: {0}")]
    StatementFailed(String),

    /// A query could not be run or its rows read
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(String),
}

impl DatabaseError {
    /// Classify a database message from a rejected statement
    pub fn from_statement(message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_lowercase();
        if lower.contains("permission denied")
            || lower.contains("insufficient privilege")
            || lower.contains("must be owner")
        {
            DatabaseError::PrivilegeDenied(message)
        } else {
            DatabaseError::StatementFailed(message)
        }
    }

    /// Check if this error is a privilege failure
    pub fn is_privilege_error(&self) -> bool {
        matches!(self, DatabaseError::PrivilegeDenied(_))
    }
}

/// Result type for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// A result row
pub type Row = Vec<Value>;

/// An exclusive, blocking database session
///
/// Statements use `$1, $2, ...` placeholders on every backend. With
/// autocommit off a transaction is opened lazily by the first statement and
/// closed by [`Session::commit`] or [`Session::rollback`].
pub trait Session: Send {
    /// SQL vocabulary of the backend
    fn dialect(&self) -> Dialect;

    /// Execute a statement, returning the affected row count
    fn execute(&mut self, sql: &str, params: &[Value]) -> DatabaseResult<u64>;

    /// Run a query and collect all rows
    fn query(&mut self, sql: &str, params: &[Value]) -> DatabaseResult<Vec<Row>>;

    /// Switch between autocommit and explicit transactions
    fn set_autocommit(&mut self, enabled: bool) -> DatabaseResult<()>;

    /// Commit the open transaction, if any
    fn commit(&mut self) -> DatabaseResult<()>;

    /// Roll back the open transaction, if any
    fn rollback(&mut self) -> DatabaseResult<()>;

    /// Name of the schema unqualified names resolve to
    fn current_schema(&mut self) -> DatabaseResult<String> {
        let rows = self.query(self.dialect().current_schema_sql(), &[])?;
        rows.into_iter()
            .next()
            .and_then(|row| row.into_iter().next())
            .and_then(|v| v.as_str().map(str::to_string))
            .ok_or_else(|| DatabaseError::QueryFailed("No current schema".to_string()))
    }
}

/// Source of database sessions
pub trait ConnectionProvider: Send + Sync {
    /// SQL vocabulary of the sessions this provider opens
    fn dialect(&self) -> Dialect;

    /// Open a session as the configured user
    fn connect(&self) -> DatabaseResult<Box<dyn Session>>;

    /// Open a session with rights to create principals
    fn connect_elevated(&self) -> DatabaseResult<Box<dyn Session>> {
        Err(DatabaseError::PrivilegeDenied(
            "No elevated connection configured".to_string(),
        ))
    }
}

/// Open a session and run a trivial query on it
pub fn check_connection(provider: &dyn ConnectionProvider) -> DatabaseResult<()> {
    let mut session = provider.connect()?;
    session
        .query("SELECT 1", &[])
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;
    Ok(())
}

/// Build the provider selected by the configuration
///
/// # Arguments
/// * `config` - Loaded configuration
/// * `base` - Directory relative DuckDB paths resolve against
pub fn open_provider(
    config: &TpcdsConfig,
    base: &Path,
) -> DatabaseResult<Box<dyn ConnectionProvider>> {
    match config.database.backend {
        DatabaseBackendType::DuckDB => open_duckdb(config, base),
        DatabaseBackendType::Postgres => open_postgres(config),
    }
}

#[cfg(feature = "duckdb-backend")]
fn open_duckdb(config: &TpcdsConfig, base: &Path) -> DatabaseResult<Box<dyn ConnectionProvider>> {
    let provider = self::duckdb::DuckDbProvider::open(config.get_duckdb_path(base))?;
    Ok(Box::new(provider))
}

#[cfg(not(feature = "duckdb-backend"))]
fn open_duckdb(
    _config: &TpcdsConfig,
    _base: &Path,
) -> DatabaseResult<Box<dyn ConnectionProvider>> {
    Err(DatabaseError::ConfigError(
        "DuckDB backend not enabled. Rebuild with --features duckdb-backend".to_string(),
    ))
}

#[cfg(feature = "postgres-backend")]
fn open_postgres(config: &TpcdsConfig) -> DatabaseResult<Box<dyn ConnectionProvider>> {
    let url = config.get_postgres_connection_string().ok_or_else(|| {
        DatabaseError::ConfigError("PostgreSQL connection string not configured".to_string())
    })?;
    let provider = self::postgres::PostgresProvider::new(url)
        .with_admin(config.database.admin_connection_string.clone())
        .with_password(config.database.password.clone());
    Ok(Box::new(provider))
}

#[cfg(not(feature = "postgres-backend"))]
fn open_postgres(_config: &TpcdsConfig) -> DatabaseResult<Box<dyn ConnectionProvider>> {
    Err(DatabaseError::ConfigError(
        "PostgreSQL backend not enabled. Rebuild with --features postgres-backend".to_string(),
    ))
}
