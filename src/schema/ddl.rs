//! Default table definitions
//!
//! Renders a portable `CREATE TABLE` script from the table catalog, so
//! tables can be created without an external script and their column order
//! always matches the generated files.

use crate::tables::TpcdsTable;

/// `CREATE TABLE` statement for one table, unqualified
pub fn create_table_sql(table: TpcdsTable) -> String {
    let pk = table.primary_key();
    let mut lines: Vec<String> = table
        .columns()
        .iter()
        .map(|c| {
            let not_null = if pk.contains(&c.name) { " NOT NULL" } else { "" };
            format!("    {} {}{}", c.name, c.sql_type, not_null)
        })
        .collect();

    if !pk.is_empty() {
        lines.push(format!("    PRIMARY KEY ({})", pk.join(", ")));
    }

    format!("CREATE TABLE {} (\n{}\n);", table.upper_name(), lines.join(",\n"))
}

/// Script creating every known table in dependency order
pub fn create_script() -> String {
    let mut script = String::from("-- TPC-DS tables\n\n");
    for table in TpcdsTable::create_order() {
        script.push_str(&create_table_sql(table));
        script.push_str("\n\n");
    }
    script
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::splitter::split;

    #[test]
    fn test_create_table_sql() {
        let sql = create_table_sql(TpcdsTable::IncomeBand);
        assert_eq!(
            sql,
            "CREATE TABLE INCOME_BAND (\n    ib_income_band_sk INTEGER NOT NULL,\n    ib_lower_bound INTEGER,\n    ib_upper_bound INTEGER,\n    PRIMARY KEY (ib_income_band_sk)\n);"
        );
    }

    #[test]
    fn test_composite_key() {
        let sql = create_table_sql(TpcdsTable::StoreSales);
        assert!(sql.contains("PRIMARY KEY (ss_item_sk, ss_ticket_number)"));
        assert!(sql.contains("ss_net_profit DECIMAL(7,2)"));
    }

    #[test]
    fn test_script_splits_into_one_statement_per_table() {
        let statements = split(&create_script());
        assert_eq!(statements.len(), TpcdsTable::KNOWN.len());
        assert!(statements.iter().all(|s| s.starts_with("CREATE TABLE ")));
    }

    #[test]
    fn test_dbgen_version_has_no_key() {
        assert!(!create_table_sql(TpcdsTable::DbgenVersion).contains("PRIMARY KEY"));
    }
}
