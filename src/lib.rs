//! TPC-DS utility - synthetic benchmark data and schema-aware loading
//!
//! Provides:
//! - Synthetic generation of dimension and fact tables with referential integrity
//! - Pipe-delimited flat file output, one `<table>.dat` per table
//! - DDL script splitting, schema qualification and execution
//! - Principal/privilege management with an elevated-connection fallback
//! - Parallel, type-coerced bulk loading with row-level failure isolation
//! - Table copying between schemas
//!
//! Database access goes through the [`database::Session`] and
//! [`database::ConnectionProvider`] traits. DuckDB is the default embedded
//! backend; PostgreSQL is available behind the `postgres-backend` feature.

pub mod config;
pub mod database;
pub mod generator;
pub mod loader;
pub mod outcome;
pub mod schema;
pub mod tables;
pub mod value;

#[cfg(feature = "cli")]
pub mod cli;

// Re-export commonly used types
pub use config::TpcdsConfig;
pub use database::{ConnectionProvider, DatabaseError, DatabaseResult, Dialect, Session};
pub use generator::{GenerateError, GeneratorConfig, SyntheticGenerator};
pub use loader::{BulkLoader, LoadOptions, LoadReport};
pub use outcome::Outcome;
pub use schema::{ExecutionMode, PrivilegeManager, SchemaCopier, SchemaExecutor, SchemaManager};
pub use tables::TpcdsTable;
pub use value::Value;

#[cfg(feature = "duckdb-backend")]
pub use database::duckdb::DuckDbProvider;

#[cfg(feature = "postgres-backend")]
pub use database::postgres::PostgresProvider;
