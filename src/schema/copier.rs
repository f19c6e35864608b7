//! Copying tables between schemas

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::privileges::PrivilegeManager;
use super::resolver::qualify;
use crate::database::{ConnectionProvider, DatabaseResult, Session, catalog};
use crate::outcome::Outcome;
use crate::tables::TpcdsTable;

/// Result of [`SchemaCopier::copy`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopyReport {
    pub source: String,
    pub target: String,
    /// One unit per requested table; absent sources are skipped
    pub outcome: Outcome,
    /// Post-copy row counts of the copied tables
    pub row_counts: BTreeMap<TpcdsTable, i64>,
}

impl CopyReport {
    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }
}

/// Copies table structure, and optionally data, from one schema to another
pub struct SchemaCopier<'a> {
    provider: &'a dyn ConnectionProvider,
}

impl<'a> SchemaCopier<'a> {
    pub fn new(provider: &'a dyn ConnectionProvider) -> Self {
        Self { provider }
    }

    fn copy_table(
        &self,
        session: &mut dyn Session,
        source: &str,
        target: &str,
        table: TpcdsTable,
        include_data: bool,
    ) -> DatabaseResult<()> {
        let dialect = session.dialect();
        let target_table = qualify(target, table.name());

        if catalog::table_exists(session, target, table.name())? {
            tracing::debug!("Replacing existing {}", target_table);
            session.execute(&dialect.drop_table_sql(&target_table), &[])?;
        }

        let sql = dialect.create_table_as_sql(
            &target_table,
            &qualify(source, table.name()),
            include_data,
        );
        session.execute(&sql, &[])?;
        Ok(())
    }

    /// Copy tables from `source` to `target`
    ///
    /// # Arguments
    /// * `source` - Schema holding the tables
    /// * `target` - Schema receiving them, created if absent
    /// * `tables` - Tables to copy, all known tables when `None`
    /// * `include_data` - Copy rows too, not just structure
    pub fn copy(
        &self,
        source: &str,
        target: &str,
        tables: Option<&[TpcdsTable]>,
        include_data: bool,
    ) -> DatabaseResult<CopyReport> {
        let source = source.trim().to_uppercase();
        let target = target.trim().to_uppercase();
        let all = TpcdsTable::KNOWN;
        let tables: &[TpcdsTable] = tables.unwrap_or(&all);

        let ensured = PrivilegeManager::new(self.provider).ensure_schema(&target, None)?;
        if !ensured.ready {
            tracing::warn!("Target schema {} may not accept new tables", target);
        }

        let mut session = self.provider.connect()?;
        session.set_autocommit(true)?;

        let mut outcome = Outcome::new();
        let mut row_counts = BTreeMap::new();

        for &table in tables {
            match catalog::table_exists(session.as_mut(), &source, table.name()) {
                Ok(true) => {}
                Ok(false) => {
                    tracing::warn!(
                        "Source table {}.{} not found, skipping",
                        source,
                        table.upper_name()
                    );
                    outcome.skip();
                    continue;
                }
                Err(e) => {
                    outcome.fail(format!("{}: {}", table, e));
                    continue;
                }
            }

            match self.copy_table(session.as_mut(), &source, &target, table, include_data) {
                Ok(()) => {
                    outcome.succeed(1);
                    match catalog::row_count(session.as_mut(), &qualify(&target, table.name())) {
                        Ok(rows) => {
                            tracing::info!("Copied {} ({} rows)", table.upper_name(), rows);
                            row_counts.insert(table, rows);
                        }
                        Err(e) => tracing::warn!("Could not count {}: {}", table.upper_name(), e),
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to copy {}: {}", table.upper_name(), e);
                    outcome.fail(format!("{}: {}", table, e));
                }
            }
        }

        tracing::info!("Copy {} -> {}: {}", source, target, outcome);

        Ok(CopyReport {
            source,
            target,
            outcome,
            row_counts,
        })
    }
}
