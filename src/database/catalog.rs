//! Catalog lookups shared by the schema tools and the loader

use super::{ColumnKind, DatabaseError, DatabaseResult, Session};
use crate::value::Value;

/// A destination column as reported by the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogColumn {
    pub name: String,
    pub data_type: String,
    pub kind: ColumnKind,
}

/// Run a query expected to return a single integer
pub fn scalar_count(
    session: &mut dyn Session,
    sql: &str,
    params: &[Value],
) -> DatabaseResult<i64> {
    let rows = session.query(sql, params)?;
    rows.first()
        .and_then(|row| row.first())
        .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
        .ok_or_else(|| DatabaseError::QueryFailed(format!("Expected a count from: {}", sql)))
}

/// Resolve the schema catalog lookups should use
///
/// An empty target means the session's own schema.
pub fn effective_schema(session: &mut dyn Session, target: &str) -> DatabaseResult<String> {
    if target.is_empty() {
        session.current_schema()
    } else {
        Ok(target.to_string())
    }
}

/// Check whether a table exists
pub fn table_exists(session: &mut dyn Session, schema: &str, table: &str) -> DatabaseResult<bool> {
    let sql = session.dialect().table_exists_sql();
    let count = scalar_count(session, sql, &[schema.into(), table.into()])?;
    Ok(count > 0)
}

/// Fetch a table's columns in declared order
///
/// # Returns
/// `CatalogMissing` when the table does not exist
pub fn table_columns(
    session: &mut dyn Session,
    schema: &str,
    table: &str,
) -> DatabaseResult<Vec<CatalogColumn>> {
    let sql = session.dialect().columns_sql();
    let rows = session.query(sql, &[schema.into(), table.into()])?;

    let columns: Vec<CatalogColumn> = rows
        .into_iter()
        .filter_map(|row| {
            let mut cells = row.into_iter();
            let name = cells.next()?.as_str()?.to_string();
            let data_type = cells.next()?.as_str()?.to_string();
            let kind = ColumnKind::from_sql_type(&data_type);
            Some(CatalogColumn {
                name,
                data_type,
                kind,
            })
        })
        .collect();

    if columns.is_empty() {
        return Err(DatabaseError::CatalogMissing(format!("{}.{}", schema, table)));
    }
    Ok(columns)
}

/// Check whether a schema-owning principal exists
pub fn principal_exists(session: &mut dyn Session, name: &str) -> DatabaseResult<bool> {
    let sql = session.dialect().principal_exists_sql();
    let count = scalar_count(session, sql, &[name.into()])?;
    Ok(count > 0)
}

/// Number of rows in a qualified table
pub fn row_count(session: &mut dyn Session, qualified: &str) -> DatabaseResult<i64> {
    let sql = session.dialect().row_count_sql(qualified);
    scalar_count(session, &sql, &[])
}
