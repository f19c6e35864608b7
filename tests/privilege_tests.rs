//! Principal creation and privilege fallback against a scripted backend

use std::sync::{Arc, Mutex};

use tpcds_util::database::{
    ConnectionProvider, DatabaseError, DatabaseResult, Dialect, Row, Session,
};
use tpcds_util::schema::PrivilegeManager;
use tpcds_util::value::Value;

/// Statements seen by every session, tagged with the session kind
type Log = Arc<Mutex<Vec<(&'static str, String)>>>;

struct ScriptedSession {
    kind: &'static str,
    log: Log,
    principal_exists: bool,
    /// Statement prefixes this session is denied
    denied: Vec<&'static str>,
    commit_fails: bool,
}

impl Session for ScriptedSession {
    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }

    fn execute(&mut self, sql: &str, _params: &[Value]) -> DatabaseResult<u64> {
        if self.denied.iter().any(|p| sql.starts_with(p)) {
            return Err(DatabaseError::PrivilegeDenied(format!("permission denied: {}", sql)));
        }
        self.log.lock().unwrap().push((self.kind, sql.to_string()));
        Ok(0)
    }

    fn query(&mut self, sql: &str, _params: &[Value]) -> DatabaseResult<Vec<Row>> {
        if sql.contains("pg_roles") {
            let count = if self.principal_exists { 1 } else { 0 };
            return Ok(vec![vec![Value::Int(count)]]);
        }
        Ok(Vec::new())
    }

    fn set_autocommit(&mut self, _enabled: bool) -> DatabaseResult<()> {
        Ok(())
    }

    fn commit(&mut self) -> DatabaseResult<()> {
        if self.commit_fails {
            return Err(DatabaseError::StatementFailed("commit rejected".to_string()));
        }
        Ok(())
    }

    fn rollback(&mut self) -> DatabaseResult<()> {
        Ok(())
    }
}

struct ScriptedProvider {
    log: Log,
    principal_exists: bool,
    own_denied: Vec<&'static str>,
    /// `None` when no elevated connection is configured
    elevated_denied: Option<Vec<&'static str>>,
    own_commit_fails: bool,
    elevated_commit_fails: bool,
}

impl ScriptedProvider {
    fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(Vec::new())),
            principal_exists: false,
            own_denied: Vec::new(),
            elevated_denied: None,
            own_commit_fails: false,
            elevated_commit_fails: false,
        }
    }

    fn statements(&self, kind: &str) -> Vec<String> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, sql)| sql.clone())
            .collect()
    }
}

impl ConnectionProvider for ScriptedProvider {
    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }

    fn connect(&self) -> DatabaseResult<Box<dyn Session>> {
        Ok(Box::new(ScriptedSession {
            kind: "own",
            log: self.log.clone(),
            principal_exists: self.principal_exists,
            denied: self.own_denied.clone(),
            commit_fails: self.own_commit_fails,
        }))
    }

    fn connect_elevated(&self) -> DatabaseResult<Box<dyn Session>> {
        match &self.elevated_denied {
            Some(denied) => Ok(Box::new(ScriptedSession {
                kind: "elevated",
                log: self.log.clone(),
                principal_exists: self.principal_exists,
                denied: denied.clone(),
                commit_fails: self.elevated_commit_fails,
            })),
            None => Err(DatabaseError::PrivilegeDenied(
                "No elevated connection configured".to_string(),
            )),
        }
    }
}

#[test]
fn test_creates_principal_with_own_connection_when_not_elevated() {
    let provider = ScriptedProvider::new();
    let report = PrivilegeManager::new(&provider)
        .ensure_schema("SALES", Some("pw"))
        .unwrap();

    assert!(report.ready);
    assert!(report.created);
    assert!(report.remediation.is_none());
    // Elevation was unavailable for both the creation and the grants
    assert_eq!(report.outcome.skipped, 2);

    let own = provider.statements("own");
    assert_eq!(own[0], "CREATE ROLE SALES LOGIN PASSWORD 'pw'");
    assert!(own.iter().any(|s| s.starts_with("GRANT USAGE, CREATE ON SCHEMA SALES")));
    assert!(own.iter().any(|s| s.starts_with("CREATE TABLE SALES.TPCDS_PROBE_")));
    assert!(own.iter().any(|s| s.starts_with("DROP TABLE SALES.TPCDS_PROBE_")));
}

#[test]
fn test_elevated_connection_creates_principal() {
    let mut provider = ScriptedProvider::new();
    provider.own_denied = vec!["CREATE ROLE", "ALTER ROLE"];
    provider.elevated_denied = Some(Vec::new());

    let report = PrivilegeManager::new(&provider)
        .ensure_schema("SALES", None)
        .unwrap();

    assert!(report.ready);
    assert!(report.created);
    assert!(report.outcome.is_success());

    let elevated = provider.statements("elevated");
    assert_eq!(elevated[0], "CREATE ROLE SALES LOGIN");
    assert!(!provider.statements("own").iter().any(|s| s.starts_with("CREATE ROLE")));
}

#[test]
fn test_denied_elevation_falls_back_once() {
    let mut provider = ScriptedProvider::new();
    provider.elevated_denied = Some(vec!["CREATE ROLE"]);

    let report = PrivilegeManager::new(&provider)
        .ensure_schema("SALES", None)
        .unwrap();

    assert!(report.created);
    let own = provider.statements("own");
    assert_eq!(own.iter().filter(|s| s.starts_with("CREATE ROLE")).count(), 1);
}

#[test]
fn test_probe_decides_readiness() {
    let mut provider = ScriptedProvider::new();
    provider.principal_exists = true;
    provider.own_denied = vec!["CREATE TABLE"];

    let report = PrivilegeManager::new(&provider)
        .ensure_schema("SALES", None)
        .unwrap();

    assert!(!report.ready);
    assert!(!report.created);
    let remediation = report.remediation.unwrap();
    assert!(remediation.contains("CREATE ROLE SALES"));
    assert!(report.outcome.failures.iter().any(|f| f.starts_with("probe:")));
}

#[test]
fn test_existing_principal_is_not_recreated() {
    let mut provider = ScriptedProvider::new();
    provider.principal_exists = true;

    let report = PrivilegeManager::new(&provider)
        .ensure_schema("SALES", None)
        .unwrap();

    assert!(report.ready);
    assert!(!report.created);
    assert!(!provider.statements("own").iter().any(|s| s.starts_with("CREATE ROLE")));
}

#[test]
fn test_restrict_privileges() {
    let provider = ScriptedProvider::new();
    let report = PrivilegeManager::new(&provider)
        .restrict_privileges("SALES")
        .unwrap();

    assert!(report.restricted);
    assert!(report.note.contains("DML"));
    assert_eq!(
        provider.statements("own"),
        vec!["REVOKE CREATE ON SCHEMA SALES FROM SALES".to_string()]
    );
}

#[test]
fn test_failed_elevated_commit_retries_with_own_connection() {
    let mut provider = ScriptedProvider::new();
    provider.elevated_denied = Some(Vec::new());
    provider.elevated_commit_fails = true;

    let report = PrivilegeManager::new(&provider)
        .ensure_schema("SALES", None)
        .unwrap();

    assert!(report.created);
    assert!(report.ready);
    assert!(report.outcome.failures.iter().any(|f| f.starts_with("elevated commit:")));
    assert!(provider.statements("own").iter().any(|s| s == "CREATE ROLE SALES LOGIN"));
}

#[test]
fn test_failed_commit_is_not_reported_as_created() {
    let mut provider = ScriptedProvider::new();
    provider.own_commit_fails = true;

    let report = PrivilegeManager::new(&provider)
        .ensure_schema("SALES", None)
        .unwrap();

    assert!(!report.created);
    assert!(!report.ready);
    assert!(report.remediation.is_some());
    assert!(report.outcome.failures.iter().any(|f| f.starts_with("commit:")));
}
