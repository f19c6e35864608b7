//! PostgreSQL database backend implementation
//!
//! Provides blocking sessions over tokio-postgres for server deployments.
//! Each session owns a current-thread runtime that drives its client and
//! connection task, so sessions can move freely between loader workers.

use tokio_postgres::types::{ToSql, Type};

use super::{ConnectionProvider, DatabaseError, DatabaseResult, Dialect, Row, Session};
use crate::value::Value;

/// PostgreSQL connection provider
pub struct PostgresProvider {
    /// Connection string for regular sessions
    connection_string: String,
    /// Connection string with rights to create roles
    admin_connection_string: Option<String>,
    /// Password applied when the connection string carries none
    password: Option<String>,
}

impl PostgresProvider {
    /// Create a provider for a connection string
    pub fn new(connection_string: impl Into<String>) -> Self {
        Self {
            connection_string: connection_string.into(),
            admin_connection_string: None,
            password: None,
        }
    }

    /// Set the connection string used for elevated sessions
    pub fn with_admin(mut self, admin_connection_string: Option<String>) -> Self {
        self.admin_connection_string = admin_connection_string;
        self
    }

    /// Set the password for regular sessions
    pub fn with_password(mut self, password: Option<String>) -> Self {
        self.password = password;
        self
    }

    /// Get the connection string (masked for security)
    pub fn connection_string_masked(&self) -> String {
        mask_password(&self.connection_string)
    }

    fn open(
        &self,
        connection_string: &str,
        password: Option<&str>,
    ) -> DatabaseResult<PostgresSession> {
        let mut config: tokio_postgres::Config = connection_string.parse().map_err(|e| {
            DatabaseError::ConfigError(format!("Invalid PostgreSQL connection string: {}", e))
        })?;
        if config.get_password().is_none()
            && let Some(password) = password
        {
            config.password(password);
        }

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| {
                DatabaseError::ConnectionFailed(format!("Failed to start runtime: {}", e))
            })?;

        let client = runtime.block_on(async {
            let (client, connection) = config.connect(tokio_postgres::NoTls).await.map_err(|e| {
                DatabaseError::ConnectionFailed(format!(
                    "Failed to connect to PostgreSQL ({}): {}",
                    mask_password(connection_string),
                    e
                ))
            })?;

            tokio::spawn(async move {
                if let Err(e) = connection.await {
                    tracing::warn!("PostgreSQL connection error: {}", e);
                }
            });

            Ok::<_, DatabaseError>(client)
        })?;

        Ok(PostgresSession {
            runtime,
            client,
            autocommit: true,
            in_transaction: false,
        })
    }
}

impl ConnectionProvider for PostgresProvider {
    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }

    fn connect(&self) -> DatabaseResult<Box<dyn Session>> {
        let session = self.open(&self.connection_string, self.password.as_deref())?;
        Ok(Box::new(session))
    }

    fn connect_elevated(&self) -> DatabaseResult<Box<dyn Session>> {
        let admin = self.admin_connection_string.as_deref().ok_or_else(|| {
            DatabaseError::PrivilegeDenied("No admin connection string configured".to_string())
        })?;
        let session = self.open(admin, None)?;
        Ok(Box::new(session))
    }
}

/// Replace the password part of a URL-style connection string
fn mask_password(connection_string: &str) -> String {
    if let Some(at_pos) = connection_string.find('@')
        && let Some(colon_pos) = connection_string[..at_pos].rfind(':')
        && !connection_string[colon_pos + 1..].starts_with("//")
    {
        let prefix = &connection_string[..colon_pos + 1];
        let suffix = &connection_string[at_pos..];
        return format!("{}****{}", prefix, suffix);
    }
    connection_string.to_string()
}

/// A single PostgreSQL connection
pub struct PostgresSession {
    runtime: tokio::runtime::Runtime,
    client: tokio_postgres::Client,
    autocommit: bool,
    in_transaction: bool,
}

impl PostgresSession {
    fn batch(&mut self, sql: &str) -> DatabaseResult<()> {
        self.runtime
            .block_on(self.client.batch_execute(sql))
            .map_err(|e| DatabaseError::StatementFailed(format!("{} failed: {}", sql, e)))
    }

    fn begin_if_needed(&mut self) -> DatabaseResult<()> {
        if !self.autocommit && !self.in_transaction {
            self.batch("BEGIN")?;
            self.in_transaction = true;
        }
        Ok(())
    }

    /// Read a column value by its reported type
    fn get_column_value(row: &tokio_postgres::Row, idx: usize) -> Value {
        let ty = row.columns()[idx].type_().clone();
        let value = if ty == Type::INT2 {
            row.try_get::<_, Option<i16>>(idx)
                .map(|v| v.map(|n| Value::Int(n.into())))
        } else if ty == Type::INT4 {
            row.try_get::<_, Option<i32>>(idx)
                .map(|v| v.map(|n| Value::Int(n.into())))
        } else if ty == Type::INT8 {
            row.try_get::<_, Option<i64>>(idx).map(|v| v.map(Value::Int))
        } else if ty == Type::FLOAT4 {
            row.try_get::<_, Option<f32>>(idx)
                .map(|v| v.map(|f| Value::Decimal(f as f64)))
        } else if ty == Type::FLOAT8 {
            row.try_get::<_, Option<f64>>(idx)
                .map(|v| v.map(Value::Decimal))
        } else if ty == Type::DATE {
            row.try_get::<_, Option<chrono::NaiveDate>>(idx)
                .map(|v| v.map(Value::Date))
        } else if ty == Type::BOOL {
            row.try_get::<_, Option<bool>>(idx)
                .map(|v| v.map(|b| Value::Int(b as i64)))
        } else {
            row.try_get::<_, Option<String>>(idx)
                .map(|v| v.map(Value::Text))
        };

        match value {
            Ok(v) => v.unwrap_or(Value::Null),
            Err(e) => {
                tracing::debug!("Unreadable column {} of type {}: {}", idx, ty, e);
                Value::Null
            }
        }
    }
}

impl Session for PostgresSession {
    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }

    fn execute(&mut self, sql: &str, params: &[Value]) -> DatabaseResult<u64> {
        self.begin_if_needed()?;

        // Bind everything as text; typed placeholders cast on the server
        let string_params: Vec<Option<String>> = params.iter().map(Value::to_text_param).collect();
        let param_refs: Vec<&(dyn ToSql + Sync)> = string_params
            .iter()
            .map(|s| s as &(dyn ToSql + Sync))
            .collect();

        tracing::trace!("postgres execute: {}", sql);
        self.runtime
            .block_on(self.client.execute(sql, &param_refs))
            .map_err(|e| DatabaseError::from_statement(e.to_string()))
    }

    fn query(&mut self, sql: &str, params: &[Value]) -> DatabaseResult<Vec<Row>> {
        self.begin_if_needed()?;

        let string_params: Vec<Option<String>> = params.iter().map(Value::to_text_param).collect();
        let param_refs: Vec<&(dyn ToSql + Sync)> = string_params
            .iter()
            .map(|s| s as &(dyn ToSql + Sync))
            .collect();

        let rows = self
            .runtime
            .block_on(self.client.query(sql, &param_refs))
            .map_err(|e| DatabaseError::QueryFailed(format!("Query failed: {}", e)))?;

        Ok(rows
            .iter()
            .map(|row| {
                (0..row.len())
                    .map(|i| Self::get_column_value(row, i))
                    .collect()
            })
            .collect())
    }

    fn set_autocommit(&mut self, enabled: bool) -> DatabaseResult<()> {
        if enabled && self.in_transaction {
            self.commit()?;
        }
        self.autocommit = enabled;
        Ok(())
    }

    fn commit(&mut self) -> DatabaseResult<()> {
        if self.in_transaction {
            self.in_transaction = false;
            self.batch("COMMIT")?;
        }
        Ok(())
    }

    fn rollback(&mut self) -> DatabaseResult<()> {
        if self.in_transaction {
            self.in_transaction = false;
            self.batch("ROLLBACK")?;
        }
        Ok(())
    }
}
