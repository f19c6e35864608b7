//! Schema lifecycle: create, drop and inspect the TPC-DS tables

use serde::{Deserialize, Serialize};

use super::ddl;
use super::executor::{ExecutionMode, ExecutionReport, SchemaExecutor};
use super::privileges::{EnsureReport, PrivilegeManager};
use super::resolver::{qualify, resolve};
use super::rewriter::rewrite;
use super::splitter::split;
use crate::database::{ConnectionProvider, DatabaseResult, catalog};
use crate::outcome::Outcome;
use crate::tables::TpcdsTable;

/// Result of [`SchemaManager::create`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateReport {
    /// Resolved target schema, empty for the session's own
    pub schema: String,
    /// Principal preparation, when a target schema was given
    pub ensure: Option<EnsureReport>,
    /// Script execution, absent when the schema was not usable
    pub execution: Option<ExecutionReport>,
}

impl CreateReport {
    pub fn is_success(&self) -> bool {
        let ensured = self.ensure.as_ref().is_none_or(|e| e.ready);
        ensured && self.execution.as_ref().is_some_and(|e| e.completed)
    }
}

/// Row count of an existing table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableInfo {
    pub table: TpcdsTable,
    pub rows: i64,
}

/// Creates, drops and inspects the known tables in a target schema
pub struct SchemaManager<'a> {
    provider: &'a dyn ConnectionProvider,
    configured_schema: Option<String>,
    password: Option<String>,
    mode: ExecutionMode,
}

impl<'a> SchemaManager<'a> {
    pub fn new(provider: &'a dyn ConnectionProvider) -> Self {
        Self {
            provider,
            configured_schema: None,
            password: None,
            mode: ExecutionMode::default(),
        }
    }

    /// Schema used when no override is passed
    pub fn with_configured_schema(mut self, schema: Option<String>) -> Self {
        self.configured_schema = schema;
        self
    }

    /// Password for principals created on demand
    pub fn with_password(mut self, password: Option<String>) -> Self {
        self.password = password;
        self
    }

    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Resolve the target schema for an optional override
    pub fn target_schema(&self, override_name: Option<&str>) -> String {
        resolve(override_name, self.configured_schema.as_deref())
    }

    /// Create the tables from a script, or from the built-in definitions
    ///
    /// With a target schema the owning principal is ensured first and the
    /// script is qualified for it. The script is skipped if the schema turns
    /// out not to be usable.
    pub fn create(
        &self,
        script: Option<&str>,
        override_name: Option<&str>,
    ) -> DatabaseResult<CreateReport> {
        let schema = self.target_schema(override_name);

        let ensure = if schema.is_empty() {
            None
        } else {
            let privileges = PrivilegeManager::new(self.provider);
            Some(privileges.ensure_schema(&schema, self.password.as_deref())?)
        };

        if let Some(report) = &ensure
            && !report.ready
        {
            tracing::warn!("Schema {} is not usable, skipping table creation", schema);
            return Ok(CreateReport {
                schema,
                ensure,
                execution: None,
            });
        }

        let default_script;
        let script = match script {
            Some(s) => s,
            None => {
                default_script = ddl::create_script();
                &default_script
            }
        };

        let statements = split(&rewrite(script, &schema));
        if schema.is_empty() {
            tracing::info!("Creating {} objects in the current schema", statements.len());
        } else {
            tracing::info!("Creating {} objects in schema {}", statements.len(), schema);
        }

        let mut session = self.provider.connect()?;
        let execution = SchemaExecutor::new(self.mode).execute(session.as_mut(), &statements);

        Ok(CreateReport {
            schema,
            ensure,
            execution: Some(execution),
        })
    }

    /// Drop the known tables that exist, dependents first
    ///
    /// The schema itself is never dropped.
    pub fn drop(&self, override_name: Option<&str>) -> DatabaseResult<Outcome> {
        let schema = self.target_schema(override_name);
        let mut session = self.provider.connect()?;
        session.set_autocommit(true)?;
        let lookup_schema = catalog::effective_schema(session.as_mut(), &schema)?;
        let dialect = session.dialect();

        let mut outcome = Outcome::new();
        for table in TpcdsTable::drop_order() {
            match catalog::table_exists(session.as_mut(), &lookup_schema, table.name()) {
                Ok(true) => {}
                Ok(false) => {
                    outcome.skip();
                    continue;
                }
                Err(e) => {
                    outcome.fail(format!("{}: {}", table, e));
                    continue;
                }
            }

            let sql = dialect.drop_table_sql(&qualify(&schema, table.name()));
            match session.execute(&sql, &[]) {
                Ok(_) => {
                    tracing::info!("Dropped {}", table.upper_name());
                    outcome.succeed(1);
                }
                Err(e) => {
                    tracing::warn!("Failed to drop {}: {}", table.upper_name(), e);
                    outcome.fail(format!("{}: {}", table, e));
                }
            }
        }

        if outcome.attempted() == 0 {
            tracing::info!("No TPC-DS tables found to drop in {}", lookup_schema);
        }
        Ok(outcome)
    }

    /// Row counts of the known tables that exist
    pub fn table_info(&self, override_name: Option<&str>) -> DatabaseResult<Vec<TableInfo>> {
        let schema = self.target_schema(override_name);
        let mut session = self.provider.connect()?;
        let lookup_schema = catalog::effective_schema(session.as_mut(), &schema)?;

        let mut info = Vec::new();
        for table in TpcdsTable::KNOWN {
            if !catalog::table_exists(session.as_mut(), &lookup_schema, table.name())? {
                continue;
            }
            match catalog::row_count(session.as_mut(), &qualify(&schema, table.name())) {
                Ok(rows) => info.push(TableInfo { table, rows }),
                Err(e) => tracing::warn!("Could not count {}: {}", table.upper_name(), e),
            }
        }
        Ok(info)
    }
}
