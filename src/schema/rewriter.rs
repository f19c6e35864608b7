//! Schema qualification of DDL scripts
//!
//! A narrow textual rewrite, not SQL parsing: `CREATE TABLE` and
//! `DROP TABLE` of known table names gain a schema prefix, and the
//! "list my own tables" view is redirected to the target schema.

use once_cell::sync::Lazy;
use regex::{Captures, NoExpand, Regex};

use crate::tables::TpcdsTable;

static RE_TABLE_DDL: Lazy<Regex> = Lazy::new(|| {
    let mut names: Vec<&str> = TpcdsTable::KNOWN.iter().map(|t| t.name()).collect();
    names.sort_by_key(|n| std::cmp::Reverse(n.len()));
    let pattern = format!(
        r"(?i)\b((?:CREATE|DROP)\s+TABLE(?:\s+IF(?:\s+NOT)?\s+EXISTS)?\s+)({})\b(\.)?",
        names.join("|")
    );
    Regex::new(&pattern).expect("Invalid regex")
});

static RE_USER_TABLES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\buser_tables\b").expect("Invalid regex"));

/// Qualify known table DDL and own-table catalog queries with a schema
///
/// Keyword and table text keep their original spelling, so
/// `CREATE TABLE ITEM` becomes `CREATE TABLE SALES.ITEM`. Names that are
/// already qualified are left alone. An empty schema returns the script
/// unchanged.
pub fn rewrite(script: &str, schema: &str) -> String {
    if schema.is_empty() {
        return script.to_string();
    }

    let qualified = RE_TABLE_DDL.replace_all(script, |caps: &Captures| {
        if caps.get(3).is_some() {
            return caps[0].to_string();
        }
        format!("{}{}.{}", &caps[1], schema, &caps[2])
    });

    let owner_filter = format!("all_tables WHERE owner = '{}'", schema);
    let redirected = RE_USER_TABLES.replace_all(&qualified, NoExpand(&owner_filter));

    // The original query may have had its own WHERE clause
    let duplicate_where = Regex::new(&format!(
        r"(?i)(WHERE\s+owner\s*=\s*'{}')\s+WHERE\b",
        regex::escape(schema)
    ));
    match duplicate_where {
        Ok(re) => re.replace_all(&redirected, "$1 AND").into_owned(),
        Err(e) => {
            tracing::warn!("Skipping WHERE merge for schema {}: {}", schema, e);
            redirected.into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_table_is_qualified() {
        assert_eq!(
            rewrite("CREATE TABLE ITEM (i_item_sk INTEGER)", "SALES"),
            "CREATE TABLE SALES.ITEM (i_item_sk INTEGER)"
        );
    }

    #[test]
    fn test_case_insensitive_and_whitespace() {
        assert_eq!(
            rewrite("create   table\tstore_sales (x int)", "SALES"),
            "create   table\tSALES.store_sales (x int)"
        );
        assert_eq!(
            rewrite("DROP TABLE IF EXISTS Store;", "SALES"),
            "DROP TABLE IF EXISTS SALES.Store;"
        );
    }

    #[test]
    fn test_empty_schema_is_noop() {
        let script = "CREATE TABLE ITEM (x INTEGER); SELECT * FROM user_tables";
        assert_eq!(rewrite(script, ""), script);
    }

    #[test]
    fn test_already_qualified_untouched() {
        let script = "CREATE TABLE OTHER.ITEM (x INTEGER)";
        assert_eq!(rewrite(script, "SALES"), script);
    }

    #[test]
    fn test_unknown_tables_untouched() {
        let script = "CREATE TABLE ITEMS (x INTEGER);\nCREATE TABLE my_store (x INTEGER)";
        assert_eq!(rewrite(script, "SALES"), script);
    }

    #[test]
    fn test_prefix_table_names() {
        assert_eq!(
            rewrite("DROP TABLE STORE_RETURNS; DROP TABLE STORE;", "S"),
            "DROP TABLE S.STORE_RETURNS; DROP TABLE S.STORE;"
        );
    }

    #[test]
    fn test_user_tables_redirect() {
        assert_eq!(
            rewrite("SELECT table_name FROM user_tables", "SALES"),
            "SELECT table_name FROM all_tables WHERE owner = 'SALES'"
        );
    }

    #[test]
    fn test_user_tables_with_existing_where() {
        assert_eq!(
            rewrite(
                "SELECT table_name FROM user_tables WHERE table_name LIKE 'S%'",
                "SALES"
            ),
            "SELECT table_name FROM all_tables WHERE owner = 'SALES' AND table_name LIKE 'S%'"
        );
    }
}
