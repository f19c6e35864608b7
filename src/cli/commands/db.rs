//! Connection check and status CLI commands

use std::path::Path;

use serde::Serialize;

use super::OutputFormat;
use super::schema::{SchemaTargetArgs, handle_schema_info};
use crate::cli::error::CliError;
use crate::config::{DatabaseBackendType, TpcdsConfig};
use crate::database::{ConnectionProvider, check_connection};
use crate::schema::SchemaManager;
use crate::schema::resolver::resolve;

/// Configuration, connectivity and table overview
#[derive(Debug, Clone, Serialize)]
pub struct Status {
    /// `.tpcds.toml` was found in the config directory
    pub config_file: bool,
    pub backend: DatabaseBackendType,
    /// The backend has everything it needs to connect
    pub configured: bool,
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_error: Option<String>,
    pub schema: String,
    /// Known tables present in the target schema
    pub tables: usize,
}

impl Status {
    fn new(config: &TpcdsConfig, config_file: bool) -> Self {
        let configured = match config.database.backend {
            DatabaseBackendType::DuckDB => !config.database.path.is_empty(),
            DatabaseBackendType::Postgres => config.get_postgres_connection_string().is_some(),
        };
        Self {
            config_file,
            backend: config.database.backend,
            configured,
            connected: false,
            connection_error: None,
            schema: resolve(None, config.configured_schema()),
            tables: 0,
        }
    }

    /// Check the connection and count the tables of the configured schema
    fn inspect(&mut self, config: &TpcdsConfig, provider: &dyn ConnectionProvider) {
        if let Err(e) = check_connection(provider) {
            self.connection_error = Some(e.to_string());
            return;
        }
        self.connected = true;

        let manager =
            SchemaManager::new(provider).with_configured_schema(config.schema_name.clone());
        match manager.table_info(None) {
            Ok(info) => self.tables = info.len(),
            Err(e) => tracing::warn!("Failed to list tables: {}", e),
        }
    }
}

/// Gather the status of the configuration in `dir`
pub fn collect_status(dir: &Path) -> Result<Status, CliError> {
    let config = super::load_config(dir)?;
    let mut status = Status::new(&config, TpcdsConfig::exists(dir));
    match super::connect(&config, dir) {
        Ok(provider) => status.inspect(&config, provider.as_ref()),
        Err(e) => status.connection_error = Some(e.to_string()),
    }
    Ok(status)
}

/// Check that the configured database answers
pub fn handle_db_test(dir: &Path) -> Result<(), CliError> {
    let config = super::load_config(dir)?;
    println!("Testing {} connection...", config.database.backend);

    let provider = super::connect(&config, dir)?;
    match check_connection(provider.as_ref()) {
        Ok(()) => {
            println!("Connection successful");
            Ok(())
        }
        Err(e) => Err(CliError::OperationFailed(format!(
            "{}. Check the configuration with `config show`",
            e
        ))),
    }
}

/// Print row counts of the tables in the target schema
pub fn handle_db_info(args: &SchemaTargetArgs) -> Result<(), CliError> {
    handle_schema_info(args)
}

/// Print configuration, connectivity and table status
pub fn handle_status(dir: &Path, format: OutputFormat) -> Result<(), CliError> {
    let status = collect_status(dir)?;
    if format == OutputFormat::Json {
        return super::print_json(&status);
    }

    let config = if !status.config_file {
        "not found, using defaults"
    } else if status.configured {
        "complete"
    } else {
        "incomplete"
    };
    println!("Configuration: {}", config);
    println!("Backend:       {}", status.backend);
    match &status.connection_error {
        None => println!("Database:      connected"),
        Some(e) => println!("Database:      failed ({})", e),
    }
    let schema = if status.schema.is_empty() {
        "current schema"
    } else {
        status.schema.as_str()
    };
    if status.tables > 0 {
        println!("Schema:        {} tables found in {}", status.tables, schema);
    } else if status.connected {
        println!("Schema:        no tables found in {}", schema);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{DatabaseError, DatabaseResult, Dialect, Session};

    struct Unreachable;

    impl ConnectionProvider for Unreachable {
        fn dialect(&self) -> Dialect {
            Dialect::Postgres
        }

        fn connect(&self) -> DatabaseResult<Box<dyn Session>> {
            Err(DatabaseError::ConnectionFailed("connection refused".to_string()))
        }
    }

    #[test]
    fn test_unreachable_database() {
        let config = TpcdsConfig::postgres("postgresql://tpcds@localhost/tpcds");
        let mut status = Status::new(&config, true);
        assert!(status.configured);

        status.inspect(&config, &Unreachable);
        assert!(!status.connected);
        assert_eq!(status.tables, 0);
        assert!(status.connection_error.unwrap().contains("connection refused"));
    }

    #[test]
    fn test_postgres_without_url_is_incomplete() {
        let mut config = TpcdsConfig::postgres("postgresql://tpcds@localhost/tpcds");
        config.database.connection_string = None;
        let status = Status::new(&config, false);
        assert!(!status.configured);
        assert!(!status.config_file);
    }

    #[cfg(feature = "duckdb-backend")]
    #[test]
    fn test_status_counts_tables() {
        let dir = tempfile::TempDir::new().unwrap();
        TpcdsConfig::duckdb("status.duckdb").save(dir.path()).unwrap();

        let status = collect_status(dir.path()).unwrap();
        assert!(status.config_file);
        assert!(status.connected);
        assert_eq!(status.tables, 0);

        let config = TpcdsConfig::load(dir.path()).unwrap();
        let provider = super::super::connect(&config, dir.path()).unwrap();
        SchemaManager::new(provider.as_ref()).create(None, None).unwrap();
        drop(provider);

        let status = collect_status(dir.path()).unwrap();
        assert_eq!(status.tables, crate::tables::TpcdsTable::KNOWN.len());
        assert!(handle_db_test(dir.path()).is_ok());
    }
}
