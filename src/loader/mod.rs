//! Bulk loading of flat files into destination tables
//!
//! The loader discovers one `<table>.dat` per table, reads the destination's
//! column types from the catalog, coerces each field accordingly and inserts
//! rows in fixed-size multi-row batches. A rejected batch is rolled back and
//! retried one row at a time, so a single bad row costs only itself.
//!
//! With a parallelism above one, tables load concurrently on a rayon pool,
//! each worker with its own session.

pub mod coerce;
pub mod discovery;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::LoadSection;
use crate::database::{
    self, ColumnKind, ConnectionProvider, DatabaseError, DatabaseResult, Dialect, Row, Session,
    catalog,
};
use crate::outcome::{Outcome, retry_narrowed};
use crate::schema::resolver::qualify;
use crate::tables::TpcdsTable;
use crate::value::Value;

pub use coerce::{CoercedRow, coerce_field, coerce_line, decode_line, split_fields};
pub use discovery::{DataFile, discover};

/// Error type for load runs
///
/// These abort the whole run; failures local to one table are reported in
/// its [`TableLoad`] instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoadError {
    /// The table filter names no data table
    #[error("Unknown table: {0}")]
    UnknownTable(String),

    /// Nothing to load
    #[error("No data files: {0}")]
    NoDataFiles(String),

    /// The destination could not be reached
    #[error("Database connection failed: {0}")]
    Connection(String),

    /// Worker pool or file system failure
    #[error("IO error: {0}")]
    Io(String),
}

impl From<DatabaseError> for LoadError {
    fn from(err: DatabaseError) -> Self {
        LoadError::Connection(err.to_string())
    }
}

/// Options of a load run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Tables loaded concurrently; 1 loads sequentially in discovery order
    pub parallelism: usize,
    /// Load only this table
    pub table_filter: Option<String>,
    /// Destination schema, empty for the session's own schema
    pub target_schema: String,
    /// Rows per insert batch
    pub batch_size: usize,
    /// Log progress every this many inserted rows
    pub progress_every: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            parallelism: 1,
            table_filter: None,
            target_schema: String::new(),
            batch_size: 1000,
            progress_every: 5000,
        }
    }
}

impl LoadOptions {
    /// Options from the `[load]` configuration section
    pub fn from_config(section: &LoadSection) -> Self {
        Self {
            parallelism: section.parallel_workers,
            batch_size: section.batch_size,
            ..Self::default()
        }
    }

    pub fn with_parallelism(mut self, parallelism: usize) -> Self {
        self.parallelism = parallelism;
        self
    }

    pub fn with_table(mut self, table: Option<String>) -> Self {
        self.table_filter = table;
        self
    }

    pub fn with_target_schema(mut self, schema: impl Into<String>) -> Self {
        self.target_schema = schema.into();
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }
}

/// Result of loading one table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableLoad {
    pub table: TpcdsTable,
    pub file: PathBuf,
    /// The destination table and its columns were found
    pub columns_found: bool,
    /// Non-blank lines read from the file
    pub rows_read: usize,
    /// One unit per row: inserted or rejected
    pub outcome: Outcome,
    /// Failure that stopped the table early
    pub error: Option<String>,
    #[serde(skip)]
    pub duration: Duration,
}

impl TableLoad {
    fn new(file: &DataFile) -> Self {
        Self {
            table: file.table,
            file: file.path.clone(),
            columns_found: false,
            rows_read: 0,
            outcome: Outcome::new(),
            error: None,
            duration: Duration::ZERO,
        }
    }

    pub fn rows_inserted(&self) -> usize {
        self.outcome.succeeded
    }

    pub fn rows_rejected(&self) -> usize {
        self.outcome.failed
    }

    /// A table succeeds when its columns were found and it either inserted
    /// a row or had none to insert
    pub fn is_success(&self) -> bool {
        self.error.is_none()
            && self.columns_found
            && (self.rows_inserted() > 0 || self.rows_read == 0)
    }

    /// Inserted rows per second
    pub fn throughput(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.rows_inserted() as f64 / secs
        }
    }
}

/// Result of a load run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadReport {
    pub data_dir: PathBuf,
    /// Per-table results in discovery order
    pub tables: Vec<TableLoad>,
    #[serde(skip)]
    pub duration: Duration,
}

impl LoadReport {
    /// True when every discovered table loaded
    pub fn is_success(&self) -> bool {
        self.tables.iter().all(TableLoad::is_success)
    }

    pub fn tables_succeeded(&self) -> usize {
        self.tables.iter().filter(|t| t.is_success()).count()
    }

    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(TableLoad::rows_inserted).sum()
    }

    /// Table-level tally
    pub fn outcome(&self) -> Outcome {
        let mut outcome = Outcome::new();
        for table in &self.tables {
            if table.is_success() {
                outcome.succeed(1);
            } else {
                let reason = table
                    .error
                    .clone()
                    .unwrap_or_else(|| format!("{} rows rejected", table.rows_rejected()));
                outcome.fail(format!("{}: {}", table.table, reason));
            }
        }
        outcome
    }

    pub fn get(&self, table: TpcdsTable) -> Option<&TableLoad> {
        self.tables.iter().find(|t| t.table == table)
    }

    /// Format duration as human-readable string
    pub fn duration_string(&self) -> String {
        let secs = self.duration.as_secs();
        if secs < 60 {
            format!("{}s", secs)
        } else if secs < 3600 {
            format!("{}m {}s", secs / 60, secs % 60)
        } else {
            format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
        }
    }
}

/// Multi-row `INSERT` with one cast placeholder per value
///
/// # Arguments
/// * `dialect` - Backend vocabulary for placeholders
/// * `qualified` - Destination table, schema-qualified if needed
/// * `names` - Column names in declared order
/// * `kinds` - Column kinds, parallel to `names`
/// * `rows` - Number of value tuples
pub fn insert_sql(
    dialect: Dialect,
    qualified: &str,
    names: &[String],
    kinds: &[ColumnKind],
    rows: usize,
) -> String {
    let width = kinds.len();
    let tuples: Vec<String> = (0..rows)
        .map(|r| {
            let placeholders: Vec<String> = kinds
                .iter()
                .enumerate()
                .map(|(c, kind)| dialect.typed_placeholder(r * width + c + 1, *kind))
                .collect();
            format!("({})", placeholders.join(", "))
        })
        .collect();

    format!(
        "INSERT INTO {} ({}) VALUES {}",
        qualified,
        names.join(", "),
        tuples.join(", ")
    )
}

/// Execute and commit, rolling back when the statement fails
fn insert_committed(
    session: &mut dyn Session,
    sql: &str,
    params: &[Value],
) -> DatabaseResult<()> {
    let result = session.execute(sql, params).and_then(|_| session.commit());
    if let Err(e) = result {
        if let Err(rollback) = session.rollback() {
            tracing::debug!("Rollback failed: {}", rollback);
        }
        return Err(e);
    }
    Ok(())
}

/// Prepared insert target of one table
struct InsertTarget {
    dialect: Dialect,
    qualified: String,
    names: Vec<String>,
    kinds: Vec<ColumnKind>,
    /// Statement for a full batch, reused across batches
    full_batch_sql: String,
    batch_size: usize,
}

impl InsertTarget {
    fn sql(&self, rows: usize) -> String {
        if rows == self.batch_size {
            self.full_batch_sql.clone()
        } else {
            insert_sql(self.dialect, &self.qualified, &self.names, &self.kinds, rows)
        }
    }

    /// Insert a batch, falling back to one row at a time
    fn insert(&self, session: &mut dyn Session, batch: &[Row]) -> Outcome {
        let single_sql = insert_sql(self.dialect, &self.qualified, &self.names, &self.kinds, 1);
        retry_narrowed(
            session,
            batch,
            |s, rows| {
                let params: Vec<Value> = rows.iter().flatten().cloned().collect();
                insert_committed(s, &self.sql(rows.len()), &params)
            },
            |s, row| insert_committed(s, &single_sql, row),
        )
    }
}

/// Parallel, type-coercing loader of flat files
pub struct BulkLoader<'a> {
    provider: &'a dyn ConnectionProvider,
    options: LoadOptions,
}

impl<'a> BulkLoader<'a> {
    pub fn new(provider: &'a dyn ConnectionProvider, options: LoadOptions) -> Self {
        Self { provider, options }
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Load every discovered data file
    ///
    /// Fails the whole run when the filter is unknown, no files are found or
    /// the destination cannot be reached. Anything else is reported per
    /// table in the returned [`LoadReport`].
    pub fn load(&self, data_dir: &Path) -> Result<LoadReport, LoadError> {
        let start = Instant::now();
        let files = discover(data_dir, self.options.table_filter.as_deref())?;
        tracing::info!("Loading {} tables from {}", files.len(), data_dir.display());

        self.probe()?;

        let parallelism = self.options.parallelism.max(1);
        let tables: Vec<TableLoad> = if parallelism > 1 && files.len() > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(parallelism)
                .build()
                .map_err(|e| LoadError::Io(format!("Failed to start worker pool: {}", e)))?;
            pool.install(|| files.par_iter().map(|f| self.load_table(f)).collect())
        } else {
            files.iter().map(|f| self.load_table(f)).collect()
        };

        let report = LoadReport {
            data_dir: data_dir.to_path_buf(),
            tables,
            duration: start.elapsed(),
        };

        if report.is_success() {
            tracing::info!(
                "Loaded {} tables ({} rows) in {}",
                report.tables.len(),
                report.total_rows(),
                report.duration_string()
            );
        } else {
            tracing::warn!(
                "Loaded {}/{} tables successfully",
                report.tables_succeeded(),
                report.tables.len()
            );
        }
        Ok(report)
    }

    /// Check the destination answers before any worker starts
    fn probe(&self) -> Result<(), LoadError> {
        Ok(database::check_connection(self.provider)?)
    }

    fn load_table(&self, file: &DataFile) -> TableLoad {
        let start = Instant::now();
        let mut load = TableLoad::new(file);

        if let Err(e) = self.try_load_table(file, &mut load) {
            match &e {
                DatabaseError::CatalogMissing(_) => tracing::warn!(
                    "Table {} not found, create it first with `schema create`",
                    file.table.upper_name()
                ),
                other => tracing::warn!("Failed to load {}: {}", file.table.upper_name(), other),
            }
            load.error = Some(e.to_string());
        }

        load.duration = start.elapsed();
        load
    }

    fn try_load_table(&self, file: &DataFile, load: &mut TableLoad) -> DatabaseResult<()> {
        let table = file.table;
        let mut session = self.provider.connect()?;
        let schema = catalog::effective_schema(session.as_mut(), &self.options.target_schema)?;
        let columns = catalog::table_columns(session.as_mut(), &schema, table.name())?;
        load.columns_found = true;

        let batch_size = self.options.batch_size.max(1);
        let dialect = session.dialect();
        let qualified = qualify(&self.options.target_schema, table.name());
        let names: Vec<String> = columns.iter().map(|c| c.name.clone()).collect();
        let kinds: Vec<ColumnKind> = columns.iter().map(|c| c.kind).collect();
        let target = InsertTarget {
            full_batch_sql: insert_sql(dialect, &qualified, &names, &kinds, batch_size),
            dialect,
            qualified,
            names,
            kinds,
            batch_size,
        };

        session.set_autocommit(false)?;

        let reader = BufReader::new(
            File::open(&file.path)
                .map_err(|e| DatabaseError::IoError(format!("{}: {}", file.path.display(), e)))?,
        );

        let mut warned = false;
        let mut batch: Vec<Row> = Vec::with_capacity(batch_size);
        for (number, bytes) in reader.split(b'\n').enumerate() {
            let bytes = bytes
                .map_err(|e| DatabaseError::IoError(format!("{}: {}", file.path.display(), e)))?;
            let line = match decode_line(&bytes) {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!("Skipping line {} of {}: {}", number + 1, table, e);
                    load.rows_read += 1;
                    load.outcome.fail(format!("line {}: {}", number + 1, e));
                    continue;
                }
            };
            let Some(row) = coerce_line(line, &target.kinds) else {
                continue;
            };
            load.rows_read += 1;

            if row.width_mismatch() && !warned {
                tracing::warn!(
                    "Column mismatch in {}: data has {} columns, table has {}",
                    table,
                    row.field_count,
                    target.kinds.len()
                );
                warned = true;
            }

            batch.push(row.values);
            if batch.len() >= batch_size {
                self.flush(session.as_mut(), &target, &mut batch, load);
            }
        }
        if !batch.is_empty() {
            self.flush(session.as_mut(), &target, &mut batch, load);
        }
        session.commit()?;

        tracing::info!(
            "Inserted {} rows into {} ({} rejected)",
            load.rows_inserted(),
            target.qualified,
            load.rows_rejected()
        );
        Ok(())
    }

    fn flush(
        &self,
        session: &mut dyn Session,
        target: &InsertTarget,
        batch: &mut Vec<Row>,
        load: &mut TableLoad,
    ) {
        let before = load.rows_inserted();
        let outcome = target.insert(session, batch);
        if outcome.failed > 0 {
            tracing::warn!(
                "Batch insert into {} fell back to single rows, {} rejected",
                target.qualified,
                outcome.failed
            );
        }
        load.outcome.merge(outcome);
        batch.clear();

        let every = self.options.progress_every.max(1);
        let after = load.rows_inserted();
        if after / every > before / every {
            tracing::info!("Loaded {} rows into {}", after, target.qualified);
        }
    }

    /// Truncate every known table that exists in the target schema
    ///
    /// Missing tables are skipped, not failed.
    pub fn truncate(&self) -> Result<Outcome, LoadError> {
        let mut session = self.provider.connect()?;
        session.set_autocommit(true)?;
        let dialect = session.dialect();
        let schema = catalog::effective_schema(session.as_mut(), &self.options.target_schema)?;

        let mut outcome = Outcome::new();
        for table in TpcdsTable::KNOWN {
            match catalog::table_exists(session.as_mut(), &schema, table.name()) {
                Ok(true) => {}
                Ok(false) => {
                    tracing::debug!("Table {} does not exist, skipping", table.upper_name());
                    outcome.skip();
                    continue;
                }
                Err(e) => {
                    outcome.fail(format!("{}: {}", table, e));
                    continue;
                }
            }

            let qualified = qualify(&self.options.target_schema, table.name());
            match session.execute(&dialect.truncate_sql(&qualified), &[]) {
                Ok(_) => {
                    tracing::info!("Truncated {}", qualified);
                    outcome.succeed(1);
                }
                Err(e) => {
                    tracing::warn!("Failed to truncate {}: {}", qualified, e);
                    outcome.fail(format!("{}: {}", table, e));
                }
            }
        }
        Ok(outcome)
    }
}
