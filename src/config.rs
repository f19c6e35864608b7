//! Configuration file support
//!
//! Handles parsing of `.tpcds.toml` configuration files and environment
//! variable overrides. The resulting [`TpcdsConfig`] is built once and passed
//! explicitly to everything that needs it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::database::{DatabaseError, DatabaseResult};

/// Default database filename for DuckDB
pub const DEFAULT_DUCKDB_FILENAME: &str = "tpcds.duckdb";

/// Default configuration filename
pub const CONFIG_FILENAME: &str = ".tpcds.toml";

/// Environment variable for database backend
pub const ENV_DB_BACKEND: &str = "TPCDS_DB_BACKEND";

/// Environment variable for DuckDB path
pub const ENV_DUCKDB_PATH: &str = "TPCDS_DUCKDB_PATH";

/// Environment variable for PostgreSQL connection string
pub const ENV_POSTGRES_URL: &str = "TPCDS_POSTGRES_URL";

/// Environment variable for the elevated PostgreSQL connection string
pub const ENV_POSTGRES_ADMIN_URL: &str = "TPCDS_POSTGRES_ADMIN_URL";

/// Environment variable for the database password
pub const ENV_DB_PASSWORD: &str = "TPCDS_DB_PASSWORD";

/// Environment variable for the target schema
pub const ENV_SCHEMA: &str = "TPCDS_SCHEMA";

/// Database backend type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackendType {
    /// DuckDB embedded database (default)
    #[default]
    DuckDB,
    /// PostgreSQL database
    Postgres,
}

impl std::str::FromStr for DatabaseBackendType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "duckdb" => Ok(DatabaseBackendType::DuckDB),
            "postgres" | "postgresql" => Ok(DatabaseBackendType::Postgres),
            _ => Err(format!(
                "Unknown database backend: {}. Use 'duckdb' or 'postgres'.",
                s
            )),
        }
    }
}

impl std::fmt::Display for DatabaseBackendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatabaseBackendType::DuckDB => write!(f, "duckdb"),
            DatabaseBackendType::Postgres => write!(f, "postgres"),
        }
    }
}

/// Database configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSection {
    /// Database backend type
    #[serde(default)]
    pub backend: DatabaseBackendType,

    /// Path to DuckDB database file (relative to the working directory)
    #[serde(default = "default_duckdb_path")]
    pub path: String,

    /// PostgreSQL connection string (e.g., "postgresql://user@localhost/db")
    #[serde(default)]
    pub connection_string: Option<String>,

    /// Connection string with rights to create principals
    #[serde(default)]
    pub admin_connection_string: Option<String>,

    /// Password for the regular connection and for newly created principals
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
}

fn default_duckdb_path() -> String {
    DEFAULT_DUCKDB_FILENAME.to_string()
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            backend: DatabaseBackendType::default(),
            path: default_duckdb_path(),
            connection_string: None,
            admin_connection_string: None,
            password: None,
        }
    }
}

/// Generation configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateSection {
    /// Scale factor, 0 for the small test data set
    #[serde(default = "default_scale")]
    pub scale: u32,

    /// Directory that receives the `.dat` files
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Seed for reproducible runs
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_scale() -> u32 {
    1
}

fn default_output_dir() -> String {
    "data".to_string()
}

impl Default for GenerateSection {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            output_dir: default_output_dir(),
            seed: None,
        }
    }
}

/// Load configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadSection {
    /// Number of tables loaded concurrently
    #[serde(default = "default_parallel_workers")]
    pub parallel_workers: usize,

    /// Rows per insert batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

fn default_parallel_workers() -> usize {
    4
}

fn default_batch_size() -> usize {
    1000
}

impl Default for LoadSection {
    fn default() -> Self {
        Self {
            parallel_workers: default_parallel_workers(),
            batch_size: default_batch_size(),
        }
    }
}

/// Main configuration structure
///
/// Represents the `.tpcds.toml` configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TpcdsConfig {
    /// Target schema used when no override is given
    #[serde(default)]
    pub schema_name: Option<String>,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseSection,

    /// Generation configuration
    #[serde(default)]
    pub generate: GenerateSection,

    /// Load configuration
    #[serde(default)]
    pub load: LoadSection,
}

impl TpcdsConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a DuckDB configuration
    pub fn duckdb(path: impl Into<String>) -> Self {
        Self {
            database: DatabaseSection {
                backend: DatabaseBackendType::DuckDB,
                path: path.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Create a PostgreSQL configuration
    pub fn postgres(connection_string: impl Into<String>) -> Self {
        Self {
            database: DatabaseSection {
                backend: DatabaseBackendType::Postgres,
                path: String::new(),
                connection_string: Some(connection_string.into()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Load configuration from a directory
    ///
    /// Looks for `.tpcds.toml` in the directory.
    /// Falls back to defaults if not found.
    pub fn load(dir: &Path) -> DatabaseResult<Self> {
        let config_path = dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .map_err(|e| DatabaseError::IoError(format!("Failed to read config: {}", e)))?;

            Self::parse(&content)?
        } else {
            Self::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> DatabaseResult<Self> {
        toml::from_str(content)
            .map_err(|e| DatabaseError::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to a directory
    pub fn save(&self, dir: &Path) -> DatabaseResult<()> {
        let config_path = dir.join(CONFIG_FILENAME);
        let content = self.to_toml()?;

        std::fs::write(&config_path, content)
            .map_err(|e| DatabaseError::IoError(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Convert configuration to TOML string
    pub fn to_toml(&self) -> DatabaseResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| DatabaseError::ConfigError(format!("Failed to serialize config: {}", e)))
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(backend) = std::env::var(ENV_DB_BACKEND)
            && let Ok(backend_type) = backend.parse()
        {
            self.database.backend = backend_type;
        }

        if let Ok(path) = std::env::var(ENV_DUCKDB_PATH) {
            self.database.path = path;
        }

        if let Ok(url) = std::env::var(ENV_POSTGRES_URL) {
            self.database.connection_string = Some(url);
        }

        if let Ok(url) = std::env::var(ENV_POSTGRES_ADMIN_URL) {
            self.database.admin_connection_string = Some(url);
        }

        if let Ok(password) = std::env::var(ENV_DB_PASSWORD)
            && !password.is_empty()
        {
            self.database.password = Some(password);
        }

        if let Ok(schema) = std::env::var(ENV_SCHEMA)
            && !schema.trim().is_empty()
        {
            self.schema_name = Some(schema);
        }
    }

    /// Get the DuckDB database path relative to a base directory
    pub fn get_duckdb_path(&self, base: &Path) -> PathBuf {
        if self.database.path.is_empty() {
            base.join(DEFAULT_DUCKDB_FILENAME)
        } else if Path::new(&self.database.path).is_absolute() {
            PathBuf::from(&self.database.path)
        } else {
            base.join(&self.database.path)
        }
    }

    /// Get the PostgreSQL connection string
    pub fn get_postgres_connection_string(&self) -> Option<&str> {
        self.database.connection_string.as_deref()
    }

    /// Configured target schema, if any
    pub fn configured_schema(&self) -> Option<&str> {
        self.schema_name.as_deref()
    }

    /// Check if configuration exists in a directory
    pub fn exists(dir: &Path) -> bool {
        dir.join(CONFIG_FILENAME).exists()
    }
}

/// Generate a sample configuration file content
pub fn sample_config() -> &'static str {
    r#"# TPC-DS utility configuration

# Schema that receives created and loaded tables (empty: session default)
# schema_name = "TPCDS"

[database]
# Database backend: "duckdb" (default) or "postgres"
backend = "duckdb"

# Path to DuckDB database file (relative, or absolute)
path = "tpcds.duckdb"

# PostgreSQL connection (used when backend = "postgres")
# connection_string = "postgresql://tpcds@localhost:5432/bench"
# admin_connection_string = "postgresql://postgres@localhost:5432/bench"

[generate]
# 0 produces a one-week test data set
scale = 1
output_dir = "data"
# seed = 42

[load]
parallel_workers = 4
batch_size = 1000
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = TpcdsConfig::new();
        assert_eq!(config.database.backend, DatabaseBackendType::DuckDB);
        assert_eq!(config.database.path, DEFAULT_DUCKDB_FILENAME);
        assert_eq!(config.generate.scale, 1);
        assert_eq!(config.load.batch_size, 1000);
        assert!(config.schema_name.is_none());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
schema_name = "sales"

[database]
backend = "duckdb"
path = "custom.duckdb"

[generate]
scale = 0
seed = 7

[load]
parallel_workers = 2
"#;
        let config = TpcdsConfig::parse(toml).unwrap();
        assert_eq!(config.database.backend, DatabaseBackendType::DuckDB);
        assert_eq!(config.database.path, "custom.duckdb");
        assert_eq!(config.configured_schema(), Some("sales"));
        assert_eq!(config.generate.scale, 0);
        assert_eq!(config.generate.seed, Some(7));
        assert_eq!(config.load.parallel_workers, 2);
        assert_eq!(config.load.batch_size, 1000);
    }

    #[test]
    fn test_parse_postgres_config() {
        let toml = r#"
[database]
backend = "postgres"
connection_string = "postgresql://localhost/test"
admin_connection_string = "postgresql://postgres@localhost/test"
"#;
        let config = TpcdsConfig::parse(toml).unwrap();
        assert_eq!(config.database.backend, DatabaseBackendType::Postgres);
        assert_eq!(
            config.get_postgres_connection_string(),
            Some("postgresql://localhost/test")
        );
        assert!(config.database.admin_connection_string.is_some());
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = TpcdsConfig::parse("[database]\nbackend = 3");
        assert!(matches!(result, Err(DatabaseError::ConfigError(_))));
    }

    #[test]
    fn test_sample_config_parses() {
        let config = TpcdsConfig::parse(sample_config()).unwrap();
        assert_eq!(config.load.parallel_workers, 4);
    }

    #[test]
    fn test_save_and_load() {
        let temp = tempdir().unwrap();
        let mut config = TpcdsConfig::duckdb("bench.duckdb");
        config.generate.scale = 3;
        config.database.password = Some("secret".to_string());

        config.save(temp.path()).unwrap();
        assert!(TpcdsConfig::exists(temp.path()));

        let saved = std::fs::read_to_string(temp.path().join(CONFIG_FILENAME)).unwrap();
        assert!(!saved.contains("secret"));

        let loaded = TpcdsConfig::parse(&saved).unwrap();
        assert_eq!(loaded.database.path, "bench.duckdb");
        assert_eq!(loaded.generate.scale, 3);
    }

    #[test]
    fn test_duckdb_path_resolution() {
        let config = TpcdsConfig::duckdb("sub/db.duckdb");
        assert_eq!(
            config.get_duckdb_path(Path::new("/work")),
            PathBuf::from("/work/sub/db.duckdb")
        );

        let config = TpcdsConfig::duckdb("/abs/db.duckdb");
        assert_eq!(
            config.get_duckdb_path(Path::new("/work")),
            PathBuf::from("/abs/db.duckdb")
        );
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!(
            "PostgreSQL".parse::<DatabaseBackendType>().unwrap(),
            DatabaseBackendType::Postgres
        );
        assert!("oracle".parse::<DatabaseBackendType>().is_err());
    }
}
