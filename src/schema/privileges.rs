//! Schema-owning principals and their privileges
//!
//! On PostgreSQL a principal is a login role owning a same-named schema; on
//! DuckDB it is just the schema. Creation is attempted through an elevated
//! connection first and falls back to the caller's own session. Whether the
//! schema is usable is decided by creating and dropping a probe table.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::resolver::qualify;
use crate::database::{ConnectionProvider, DatabaseResult, Dialect, Session, catalog};
use crate::outcome::Outcome;

/// Result of [`PrivilegeManager::ensure_schema`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsureReport {
    /// The probe table could be created and dropped
    pub ready: bool,
    /// The principal was created by this call
    pub created: bool,
    /// One unit per step: existence check, creation, each grant, probe
    pub outcome: Outcome,
    /// What an administrator should run when a step was denied
    pub remediation: Option<String>,
}

/// Result of [`PrivilegeManager::restrict_privileges`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestrictReport {
    pub restricted: bool,
    pub outcome: Outcome,
    /// Limits of the restriction that still apply
    pub note: String,
}

/// Unique probe table name for one run
pub fn probe_table_name() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("TPCDS_PROBE_{}", &id[..8].to_uppercase())
}

/// Manages schema principals through a connection provider
pub struct PrivilegeManager<'a> {
    provider: &'a dyn ConnectionProvider,
}

impl<'a> PrivilegeManager<'a> {
    pub fn new(provider: &'a dyn ConnectionProvider) -> Self {
        Self { provider }
    }

    fn dialect(&self) -> Dialect {
        self.provider.dialect()
    }

    /// Run statements, tolerating "already granted" failures
    fn run_all(
        &self,
        session: &mut dyn Session,
        statements: &[String],
        outcome: &mut Outcome,
    ) -> bool {
        let mut all_ok = true;
        for statement in statements {
            match session.execute(statement, &[]) {
                Ok(_) => outcome.succeed(1),
                Err(e) if self.dialect().is_already_granted(&e.to_string()) => {
                    tracing::debug!("Already in place: {}", statement);
                    outcome.succeed(1);
                }
                Err(e) => {
                    tracing::warn!("{} failed: {}", statement, e);
                    outcome.fail(format!("{}: {}", statement, e));
                    all_ok = false;
                }
            }
        }
        all_ok
    }

    /// Run statements on an elevated session, falling back to `own` once
    ///
    /// The elevated attempt is abandoned as a whole if the connection is
    /// unavailable or any statement is denied.
    fn run_with_fallback(
        &self,
        own: &mut dyn Session,
        statements: &[String],
        outcome: &mut Outcome,
    ) -> bool {
        if statements.is_empty() {
            return true;
        }

        match self.provider.connect_elevated() {
            Ok(mut elevated) => {
                let mut attempt = Outcome::new();
                if self.run_all(elevated.as_mut(), statements, &mut attempt) {
                    match elevated.commit() {
                        Ok(()) => {
                            outcome.merge(attempt);
                            return true;
                        }
                        Err(e) => {
                            tracing::warn!("Elevated commit failed: {}", e);
                            outcome.fail(format!("elevated commit: {}", e));
                        }
                    }
                }
                tracing::warn!("Elevated attempt failed, retrying with own connection");
            }
            Err(e) => {
                tracing::warn!("Elevated connection unavailable ({}), using own connection", e);
                outcome.skip();
            }
        }

        let ok = self.run_all(own, statements, outcome);
        match own.commit() {
            Ok(()) => ok,
            Err(e) => {
                tracing::warn!("Commit failed: {}", e);
                outcome.fail(format!("commit: {}", e));
                false
            }
        }
    }

    /// Create and drop a scratch table in the schema
    fn probe(&self, session: &mut dyn Session, name: &str) -> DatabaseResult<()> {
        let table = qualify(name, &probe_table_name());
        session.execute(&format!("CREATE TABLE {} (id INTEGER)", table), &[])?;
        session.execute(&self.dialect().drop_table_sql(&table), &[])?;
        session.commit()
    }

    /// Make sure a schema-owning principal exists and is usable
    ///
    /// # Arguments
    /// * `name` - Principal / schema name
    /// * `password` - Password for a newly created login role
    ///
    /// # Returns
    /// `Err` only when no session can be opened at all
    pub fn ensure_schema(
        &self,
        name: &str,
        password: Option<&str>,
    ) -> DatabaseResult<EnsureReport> {
        let mut own = self.provider.connect()?;
        own.set_autocommit(true)?;
        let mut outcome = Outcome::new();
        let mut created = false;
        let mut remediation = None;

        let exists = match catalog::principal_exists(own.as_mut(), name) {
            Ok(exists) => {
                outcome.succeed(1);
                exists
            }
            Err(e) => {
                tracing::warn!("Could not check principal {}: {}", name, e);
                outcome.fail(format!("existence check: {}", e));
                false
            }
        };

        if !exists {
            tracing::info!("Creating schema principal {}", name);
            let statements = self.dialect().create_principal_sql(name, password);
            if self.run_with_fallback(own.as_mut(), &statements, &mut outcome) {
                created = true;
            } else {
                remediation = Some(self.dialect().remediation(name));
            }
        }

        let grants = self.dialect().grant_sql(name);
        if !self.run_with_fallback(own.as_mut(), &grants, &mut outcome) {
            remediation.get_or_insert_with(|| self.dialect().remediation(name));
        }

        let ready = match self.probe(own.as_mut(), name) {
            Ok(()) => {
                outcome.succeed(1);
                true
            }
            Err(e) => {
                tracing::warn!("Schema {} is not usable: {}", name, e);
                outcome.fail(format!("probe: {}", e));
                remediation.get_or_insert_with(|| self.dialect().remediation(name));
                false
            }
        };

        if let Some(text) = &remediation {
            tracing::warn!("{}", text);
        }

        Ok(EnsureReport {
            ready,
            created,
            outcome,
            remediation,
        })
    }

    /// Withdraw object creation from a principal, keeping connect
    ///
    /// A schema owner keeps full DML rights over the objects it already
    /// owns; that is reported in the note rather than prevented.
    pub fn restrict_privileges(&self, name: &str) -> DatabaseResult<RestrictReport> {
        let mut own = self.provider.connect()?;
        own.set_autocommit(true)?;
        let mut outcome = Outcome::new();
        let statements = self.dialect().revoke_sql(name);

        if statements.is_empty() {
            let note = format!("{} has no privilege system; nothing was revoked", self.dialect());
            tracing::warn!("{}", note);
            outcome.skip();
            return Ok(RestrictReport {
                restricted: false,
                outcome,
                note,
            });
        }

        let restricted = self.run_with_fallback(own.as_mut(), &statements, &mut outcome);
        let note = format!(
            "{} keeps full DML rights (SELECT, INSERT, UPDATE, DELETE) on tables it owns",
            name
        );
        tracing::warn!("{}", note);

        Ok(RestrictReport {
            restricted,
            outcome,
            note,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_table_name() {
        let a = probe_table_name();
        let b = probe_table_name();
        assert!(a.starts_with("TPCDS_PROBE_"));
        assert_eq!(a.len(), "TPCDS_PROBE_".len() + 8);
        assert_ne!(a, b);
    }
}
