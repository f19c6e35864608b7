//! DuckDB database backend implementation
//!
//! Provides embedded sessions over a single DuckDB database, either a file
//! or in-memory. Each session is a cloned connection to the same database,
//! so loader workers can insert concurrently.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{ConnectionProvider, DatabaseError, DatabaseResult, Dialect, Row, Session};
use crate::value::Value;

/// DuckDB connection provider
pub struct DuckDbProvider {
    /// Path to the database file (None for in-memory)
    db_path: Option<PathBuf>,
    /// Base connection that sessions are cloned from
    connection: Mutex<duckdb::Connection>,
}

impl DuckDbProvider {
    /// Open a file-based database
    ///
    /// # Arguments
    /// * `db_path` - Path to the DuckDB database file
    pub fn open(db_path: impl AsRef<Path>) -> DatabaseResult<Self> {
        let path = db_path.as_ref().to_path_buf();
        let connection = duckdb::Connection::open(&path).map_err(|e| {
            DatabaseError::ConnectionFailed(format!("Failed to open DuckDB: {}", e))
        })?;

        Ok(Self {
            db_path: Some(path),
            connection: Mutex::new(connection),
        })
    }

    /// Create an in-memory database
    ///
    /// All sessions from this provider share the same in-memory catalog.
    pub fn in_memory() -> DatabaseResult<Self> {
        let connection = duckdb::Connection::open_in_memory().map_err(|e| {
            DatabaseError::ConnectionFailed(format!("Failed to create in-memory DuckDB: {}", e))
        })?;

        Ok(Self {
            db_path: None,
            connection: Mutex::new(connection),
        })
    }

    /// Get the database file path (None for in-memory)
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Check if this is an in-memory database
    pub fn is_in_memory(&self) -> bool {
        self.db_path.is_none()
    }

    /// Open a session as its concrete type
    pub fn session(&self) -> DatabaseResult<DuckDbSession> {
        let conn = self
            .connection
            .lock()
            .map_err(|e| DatabaseError::ConnectionFailed(format!("Lock error: {}", e)))?;

        let cloned = conn.try_clone().map_err(|e| {
            DatabaseError::ConnectionFailed(format!("Failed to open DuckDB session: {}", e))
        })?;

        Ok(DuckDbSession {
            connection: cloned,
            autocommit: true,
            in_transaction: false,
        })
    }
}

impl ConnectionProvider for DuckDbProvider {
    fn dialect(&self) -> Dialect {
        Dialect::DuckDb
    }

    fn connect(&self) -> DatabaseResult<Box<dyn Session>> {
        Ok(Box::new(self.session()?))
    }

    /// DuckDB has no principals, so elevation is the same connection
    fn connect_elevated(&self) -> DatabaseResult<Box<dyn Session>> {
        self.connect()
    }
}

/// A single DuckDB connection
pub struct DuckDbSession {
    connection: duckdb::Connection,
    autocommit: bool,
    in_transaction: bool,
}

impl DuckDbSession {
    /// Open the lazy transaction when autocommit is off
    fn begin_if_needed(&mut self) -> DatabaseResult<()> {
        if !self.autocommit && !self.in_transaction {
            self.connection
                .execute_batch("BEGIN TRANSACTION")
                .map_err(|e| {
                    DatabaseError::StatementFailed(format!("Begin transaction failed: {}", e))
                })?;
            self.in_transaction = true;
        }
        Ok(())
    }

    fn bind(params: &[Value]) -> Vec<Option<String>> {
        params.iter().map(Value::to_text_param).collect()
    }

    /// Convert a DuckDB ValueRef to a cell value
    fn value_ref_to_value(value: duckdb::types::ValueRef) -> Value {
        use duckdb::types::ValueRef;

        match value {
            ValueRef::Null => Value::Null,
            ValueRef::Boolean(b) => Value::Int(b as i64),
            ValueRef::TinyInt(i) => Value::Int(i.into()),
            ValueRef::SmallInt(i) => Value::Int(i.into()),
            ValueRef::Int(i) => Value::Int(i.into()),
            ValueRef::BigInt(i) => Value::Int(i),
            ValueRef::HugeInt(i) => i64::try_from(i)
                .map(Value::Int)
                .unwrap_or_else(|_| Value::Text(i.to_string())),
            ValueRef::UTinyInt(i) => Value::Int(i.into()),
            ValueRef::USmallInt(i) => Value::Int(i.into()),
            ValueRef::UInt(i) => Value::Int(i.into()),
            ValueRef::UBigInt(i) => i64::try_from(i)
                .map(Value::Int)
                .unwrap_or_else(|_| Value::Text(i.to_string())),
            ValueRef::Float(f) => Value::Decimal(f as f64),
            ValueRef::Double(f) => Value::Decimal(f),
            ValueRef::Decimal(d) => d
                .to_string()
                .parse::<f64>()
                .map(Value::Decimal)
                .unwrap_or(Value::Null),
            ValueRef::Text(bytes) => Value::Text(String::from_utf8_lossy(bytes).into_owned()),
            ValueRef::Date32(days) => chrono::NaiveDate::from_num_days_from_ce_opt(days + 719_163)
                .map(Value::Date)
                .unwrap_or(Value::Null),
            other => Value::Text(format!("{:?}", other)),
        }
    }
}

impl Session for DuckDbSession {
    fn dialect(&self) -> Dialect {
        Dialect::DuckDb
    }

    fn execute(&mut self, sql: &str, params: &[Value]) -> DatabaseResult<u64> {
        self.begin_if_needed()?;
        let bound = Self::bind(params);
        tracing::trace!("duckdb execute: {}", sql);
        self.connection
            .execute(sql, duckdb::params_from_iter(bound.iter()))
            .map(|n| n as u64)
            .map_err(|e| DatabaseError::from_statement(e.to_string()))
    }

    fn query(&mut self, sql: &str, params: &[Value]) -> DatabaseResult<Vec<Row>> {
        self.begin_if_needed()?;
        let bound = Self::bind(params);

        let mut stmt = self
            .connection
            .prepare(sql)
            .map_err(|e| DatabaseError::QueryFailed(format!("Prepare failed: {}", e)))?;

        // In DuckDB 1.4+, the column count is known only after execution
        let mut result_rows = stmt
            .query(duckdb::params_from_iter(bound.iter()))
            .map_err(|e| DatabaseError::QueryFailed(format!("Query failed: {}", e)))?;

        let column_count = result_rows.as_ref().map(|r| r.column_count()).unwrap_or(0);

        let mut rows = Vec::new();
        while let Some(row) = result_rows
            .next()
            .map_err(|e| DatabaseError::QueryFailed(format!("Row fetch error: {}", e)))?
        {
            let cells = (0..column_count)
                .map(|i| match row.get_ref(i) {
                    Ok(value_ref) => Self::value_ref_to_value(value_ref),
                    Err(_) => Value::Null,
                })
                .collect();
            rows.push(cells);
        }

        Ok(rows)
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
            self.connection
                .execute_batch("COMMIT")
                .map_err(|e| DatabaseError::StatementFailed(format!("Commit failed: {}", e)))?;
        }
        Ok(())
    }

    fn rollback(&mut self) -> DatabaseResult<()> {
        if self.in_transaction {
            self.in_transaction = false;
            self.connection
                .execute_batch("ROLLBACK")
                .map_err(|e| DatabaseError::StatementFailed(format!("Rollback failed: {}", e)))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::catalog;

    #[test]
    fn test_in_memory_database() {
        let provider = DuckDbProvider::in_memory().unwrap();
        assert!(provider.is_in_memory());
        assert!(provider.db_path().is_none());
        assert_eq!(provider.dialect(), Dialect::DuckDb);
    }

    #[test]
    fn test_sessions_share_catalog() {
        let provider = DuckDbProvider::in_memory().unwrap();
        let mut first = provider.connect().unwrap();
        first
            .execute("CREATE TABLE t (id INTEGER, name VARCHAR)", &[])
            .unwrap();
        first
            .execute("INSERT INTO t VALUES (1, $1)", &["a".into()])
            .unwrap();

        let mut second = provider.connect().unwrap();
        let rows = second.query("SELECT id, name FROM t", &[]).unwrap();
        assert_eq!(rows, vec![vec![Value::Int(1), Value::Text("a".into())]]);
    }

    #[test]
    fn test_current_schema_is_main() {
        let provider = DuckDbProvider::in_memory().unwrap();
        let mut session = provider.connect().unwrap();
        assert_eq!(session.current_schema().unwrap(), "main");
    }

    #[test]
    fn test_rollback_discards_uncommitted_rows() {
        let provider = DuckDbProvider::in_memory().unwrap();
        let mut session = provider.connect().unwrap();
        session.execute("CREATE TABLE t (id INTEGER)", &[]).unwrap();

        session.set_autocommit(false).unwrap();
        session
            .execute("INSERT INTO t VALUES (1), (2)", &[])
            .unwrap();
        session.rollback().unwrap();
        session.execute("INSERT INTO t VALUES (3)", &[]).unwrap();
        session.commit().unwrap();

        let count = catalog::row_count(session.as_mut(), "t").unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_date_and_null_round_trip() {
        let provider = DuckDbProvider::in_memory().unwrap();
        let mut session = provider.connect().unwrap();
        session
            .execute("CREATE TABLE d (day DATE, note VARCHAR)", &[])
            .unwrap();
        let day = chrono::NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        session
            .execute(
                "INSERT INTO d VALUES (CAST(CAST($1 AS VARCHAR) AS DATE), $2)",
                &[Value::Date(day), Value::Null],
            )
            .unwrap();
        let rows = session.query("SELECT day, note FROM d", &[]).unwrap();
        assert_eq!(rows, vec![vec![Value::Date(day), Value::Null]]);
    }

    #[test]
    fn test_catalog_columns() {
        let provider = DuckDbProvider::in_memory().unwrap();
        let mut session = provider.connect().unwrap();
        session
            .execute("CREATE TABLE ITEM (i_item_sk INTEGER, i_rec DATE, i_name VARCHAR(10))", &[])
            .unwrap();

        let columns = catalog::table_columns(session.as_mut(), "main", "item").unwrap();
        let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["i_item_sk", "i_rec", "i_name"]);
        assert_eq!(columns[1].kind, crate::database::ColumnKind::Date);

        let missing = catalog::table_columns(session.as_mut(), "main", "nope");
        assert!(matches!(missing, Err(DatabaseError::CatalogMissing(_))));
    }
}
