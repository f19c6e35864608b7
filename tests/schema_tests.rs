//! Schema lifecycle against an in-memory DuckDB

#![cfg(feature = "duckdb-backend")]

use tpcds_util::database::catalog;
use tpcds_util::{
    ConnectionProvider, DuckDbProvider, ExecutionMode, SchemaCopier, SchemaManager, TpcdsTable,
};

fn count(provider: &DuckDbProvider, sql: &str) -> i64 {
    let mut session = provider.connect().unwrap();
    catalog::scalar_count(session.as_mut(), sql, &[]).unwrap()
}

fn exists(provider: &DuckDbProvider, schema: &str, table: &str) -> bool {
    let mut session = provider.connect().unwrap();
    catalog::table_exists(session.as_mut(), schema, table).unwrap()
}

fn seed_reason(provider: &DuckDbProvider) {
    let mut session = provider.connect().unwrap();
    session
        .execute(
            "INSERT INTO reason VALUES (1, 'AAAAAAAABAAAAAAA', 'Did not fit'), \
             (2, 'AAAAAAAACAAAAAAA', 'Found a better price')",
            &[],
        )
        .unwrap();
}

#[test]
fn test_create_in_current_schema() {
    let provider = DuckDbProvider::in_memory().unwrap();
    let report = SchemaManager::new(&provider).create(None, None).unwrap();

    assert!(report.is_success());
    assert!(report.schema.is_empty());
    assert!(report.ensure.is_none());
    for table in TpcdsTable::KNOWN {
        assert!(exists(&provider, "main", table.name()), "{} missing", table);
    }
}

#[test]
fn test_create_in_configured_schema() {
    let provider = DuckDbProvider::in_memory().unwrap();
    let manager = SchemaManager::new(&provider).with_configured_schema(Some("sales".to_string()));

    let report = manager.create(None, None).unwrap();
    assert_eq!(report.schema, "SALES");
    assert!(report.ensure.as_ref().unwrap().ready);
    assert!(report.is_success());
    assert!(exists(&provider, "SALES", "store_sales"));
    assert!(!exists(&provider, "main", "store_sales"));
}

#[test]
fn test_create_from_script_with_override() {
    let provider = DuckDbProvider::in_memory().unwrap();
    let script = "-- two tables\n\
                  create table reason (r_reason_sk integer);\n\
                  create table ship_mode (sm_ship_mode_sk integer);\n";

    let report = SchemaManager::new(&provider)
        .with_configured_schema(Some("ignored".to_string()))
        .create(Some(script), Some("TEST"))
        .unwrap();

    assert_eq!(report.schema, "TEST");
    let execution = report.execution.unwrap();
    assert!(execution.completed);
    assert_eq!(execution.outcome.succeeded, 2);
    assert!(exists(&provider, "TEST", "reason"));
    assert!(exists(&provider, "TEST", "ship_mode"));
    assert!(!exists(&provider, "main", "reason"));
}

#[test]
fn test_strict_mode_reports_incomplete_run() {
    let provider = DuckDbProvider::in_memory().unwrap();
    let script = "create table t1 (id integer);\n\
                  create table t1 (id integer);\n\
                  create table t3 (id integer);\n";

    let report = SchemaManager::new(&provider)
        .with_mode(ExecutionMode::Strict)
        .create(Some(script), None)
        .unwrap();

    let execution = report.execution.unwrap();
    assert!(!execution.completed);
    assert_eq!(execution.outcome.succeeded, 2);
    assert_eq!(execution.outcome.failed, 1);
    // The pass keeps going after the failure
    assert!(exists(&provider, "main", "t3"));
}

#[test]
fn test_drop_keeps_schema_and_skips_missing() {
    let provider = DuckDbProvider::in_memory().unwrap();
    let manager = SchemaManager::new(&provider).with_configured_schema(Some("SALES".to_string()));
    manager.create(None, None).unwrap();

    let outcome = manager.drop(None).unwrap();
    assert!(outcome.is_success());
    assert_eq!(outcome.succeeded, TpcdsTable::KNOWN.len());
    assert!(!exists(&provider, "SALES", "store_sales"));
    assert_eq!(
        count(
            &provider,
            "SELECT COUNT(*) FROM information_schema.schemata WHERE lower(schema_name) = 'sales'"
        ),
        1
    );

    let again = manager.drop(None).unwrap();
    assert_eq!(again.attempted(), 0);
    assert_eq!(again.skipped, TpcdsTable::KNOWN.len());
}

#[test]
fn test_table_info_counts_rows() {
    let provider = DuckDbProvider::in_memory().unwrap();
    let manager = SchemaManager::new(&provider);
    assert!(manager.table_info(None).unwrap().is_empty());

    manager.create(None, None).unwrap();
    seed_reason(&provider);

    let info = manager.table_info(None).unwrap();
    assert_eq!(info.len(), TpcdsTable::KNOWN.len());
    let reason = info.iter().find(|i| i.table == TpcdsTable::Reason).unwrap();
    assert_eq!(reason.rows, 2);
}

#[test]
fn test_copy_with_data() {
    let provider = DuckDbProvider::in_memory().unwrap();
    SchemaManager::new(&provider).create(None, None).unwrap();
    seed_reason(&provider);

    let tables = [TpcdsTable::Reason, TpcdsTable::ShipMode];
    let report = SchemaCopier::new(&provider)
        .copy("main", "backup", Some(&tables), true)
        .unwrap();

    assert_eq!(report.target, "BACKUP");
    assert!(report.is_success());
    assert_eq!(report.outcome.succeeded, 2);
    assert_eq!(report.row_counts.get(&TpcdsTable::Reason), Some(&2));
    assert_eq!(report.row_counts.get(&TpcdsTable::ShipMode), Some(&0));
    assert_eq!(count(&provider, "SELECT COUNT(*) FROM BACKUP.REASON"), 2);
    assert!(!exists(&provider, "BACKUP", "store_sales"));
}

#[test]
fn test_copy_structure_only_replaces_target() {
    let provider = DuckDbProvider::in_memory().unwrap();
    SchemaManager::new(&provider).create(None, None).unwrap();
    seed_reason(&provider);

    let copier = SchemaCopier::new(&provider);
    let tables = [TpcdsTable::Reason];
    copier.copy("main", "backup", Some(&tables), true).unwrap();
    let report = copier.copy("main", "backup", Some(&tables), false).unwrap();

    assert!(report.is_success());
    assert_eq!(report.row_counts.get(&TpcdsTable::Reason), Some(&0));
    assert_eq!(count(&provider, "SELECT COUNT(*) FROM BACKUP.REASON"), 0);
}

#[test]
fn test_copy_skips_missing_source_tables() {
    let provider = DuckDbProvider::in_memory().unwrap();
    let report = SchemaCopier::new(&provider)
        .copy("main", "backup", None, true)
        .unwrap();

    assert_eq!(report.outcome.attempted(), 0);
    assert_eq!(report.outcome.skipped, TpcdsTable::KNOWN.len());
    assert!(report.row_counts.is_empty());
}
