//! Backend-specific SQL vocabulary
//!
//! Everything that differs between DuckDB and PostgreSQL lives here, so the
//! schema and loader code can stay backend-agnostic.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse column classification used for field coercion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Passed through as a string
    Text,
    /// Parsed as an integer or decimal
    Number,
    /// Strict `YYYY-MM-DD`
    Date,
}

impl ColumnKind {
    /// Classify a catalog `data_type` string
    pub fn from_sql_type(data_type: &str) -> Self {
        let upper = data_type.trim().to_uppercase();
        if upper == "DATE" {
            return ColumnKind::Date;
        }
        const NUMERIC_MARKERS: [&str; 7] =
            ["INT", "DECIMAL", "NUMERIC", "NUMBER", "DOUBLE", "REAL", "FLOAT"];
        if NUMERIC_MARKERS.iter().any(|m| upper.contains(m)) {
            ColumnKind::Number
        } else {
            ColumnKind::Text
        }
    }
}

/// Supported SQL dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    DuckDb,
    Postgres,
}

impl Dialect {
    /// Positional parameter placeholder (1-based)
    pub fn placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }

    /// Placeholder wrapped in the casts a text-bound parameter needs
    ///
    /// Parameters are bound as text on every backend, so dates and numbers
    /// are cast explicitly before assignment to the target column.
    pub fn typed_placeholder(&self, index: usize, kind: ColumnKind) -> String {
        let p = self.placeholder(index);
        match kind {
            ColumnKind::Text => format!("CAST({} AS VARCHAR)", p),
            ColumnKind::Date => format!("CAST(CAST({} AS VARCHAR) AS DATE)", p),
            ColumnKind::Number => {
                format!("CAST(CAST({} AS VARCHAR) AS {})", p, self.numeric_type())
            }
        }
    }

    /// Intermediate type for numeric parameters
    fn numeric_type(&self) -> &'static str {
        match self {
            Dialect::DuckDb => "DOUBLE",
            Dialect::Postgres => "NUMERIC",
        }
    }

    pub fn current_schema_sql(&self) -> &'static str {
        "SELECT CAST(current_schema() AS VARCHAR)"
    }

    /// Count of tables matching `($1 schema, $2 table)`
    pub fn table_exists_sql(&self) -> &'static str {
        "SELECT COUNT(*) FROM information_schema.tables \
         WHERE lower(table_schema) = lower($1) AND lower(table_name) = lower($2)"
    }

    /// Column names and types of `($1 schema, $2 table)` in declared order
    pub fn columns_sql(&self) -> &'static str {
        "SELECT CAST(column_name AS VARCHAR), CAST(data_type AS VARCHAR) \
         FROM information_schema.columns \
         WHERE lower(table_schema) = lower($1) AND lower(table_name) = lower($2) \
         ORDER BY ordinal_position"
    }

    /// Count of principals named `$1`
    pub fn principal_exists_sql(&self) -> &'static str {
        match self {
            Dialect::DuckDb => {
                "SELECT COUNT(*) FROM information_schema.schemata \
                 WHERE lower(schema_name) = lower($1)"
            }
            Dialect::Postgres => "SELECT COUNT(*) FROM pg_roles WHERE lower(rolname) = lower($1)",
        }
    }

    /// Statements that create a schema-owning principal
    pub fn create_principal_sql(&self, name: &str, password: Option<&str>) -> Vec<String> {
        match self {
            Dialect::DuckDb => vec![format!("CREATE SCHEMA IF NOT EXISTS {}", name)],
            Dialect::Postgres => {
                let role = match password {
                    Some(pw) => format!(
                        "CREATE ROLE {} LOGIN PASSWORD '{}'",
                        name,
                        pw.replace('\'', "''")
                    ),
                    None => format!("CREATE ROLE {} LOGIN", name),
                };
                vec![
                    role,
                    format!("CREATE SCHEMA IF NOT EXISTS {} AUTHORIZATION {}", name, name),
                ]
            }
        }
    }

    /// Fixed privilege set for a schema owner
    ///
    /// Session connect and object creation. Neither backend has a storage
    /// quota to grant.
    pub fn grant_sql(&self, name: &str) -> Vec<String> {
        match self {
            Dialect::DuckDb => vec![format!("CREATE SCHEMA IF NOT EXISTS {}", name)],
            Dialect::Postgres => vec![
                format!("ALTER ROLE {} WITH LOGIN", name),
                format!("CREATE SCHEMA IF NOT EXISTS {} AUTHORIZATION {}", name, name),
                format!("GRANT USAGE, CREATE ON SCHEMA {} TO {}", name, name),
            ],
        }
    }

    /// Statements that withdraw object creation but keep connect
    ///
    /// Empty when the backend has no privilege system.
    pub fn revoke_sql(&self, name: &str) -> Vec<String> {
        match self {
            Dialect::DuckDb => Vec::new(),
            Dialect::Postgres => vec![format!("REVOKE CREATE ON SCHEMA {} FROM {}", name, name)],
        }
    }

    pub fn drop_table_sql(&self, qualified: &str) -> String {
        match self {
            Dialect::DuckDb => format!("DROP TABLE {}", qualified),
            Dialect::Postgres => format!("DROP TABLE {} CASCADE", qualified),
        }
    }

    pub fn truncate_sql(&self, qualified: &str) -> String {
        format!("TRUNCATE TABLE {}", qualified)
    }

    pub fn row_count_sql(&self, qualified: &str) -> String {
        format!("SELECT COUNT(*) FROM {}", qualified)
    }

    /// `CREATE TABLE .. AS SELECT`, optionally structure only
    pub fn create_table_as_sql(&self, target: &str, source: &str, with_data: bool) -> String {
        if with_data {
            format!("CREATE TABLE {} AS SELECT * FROM {}", target, source)
        } else {
            format!("CREATE TABLE {} AS SELECT * FROM {} WHERE 1=0", target, source)
        }
    }

    /// Check whether a failed grant only means the privilege was already held
    pub fn is_already_granted(&self, message: &str) -> bool {
        let lower = message.to_lowercase();
        lower.contains("already exists")
            || lower.contains("already a member")
            || lower.contains("already granted")
    }

    /// Text an administrator can run to fix a missing principal or privilege
    pub fn remediation(&self, name: &str) -> String {
        let statements = match self {
            Dialect::DuckDb => self.create_principal_sql(name, None),
            Dialect::Postgres => {
                let mut stmts = self.create_principal_sql(name, Some("<password>"));
                stmts.extend(self.grant_sql(name));
                stmts
            }
        };
        format!(
            "Ask an administrator to run: {};",
            statements.join("; ")
        )
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::DuckDb => write!(f, "duckdb"),
            Dialect::Postgres => write!(f, "postgres"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_kind_from_sql_type() {
        assert_eq!(ColumnKind::from_sql_type("DATE"), ColumnKind::Date);
        assert_eq!(ColumnKind::from_sql_type("date"), ColumnKind::Date);
        assert_eq!(ColumnKind::from_sql_type("INTEGER"), ColumnKind::Number);
        assert_eq!(ColumnKind::from_sql_type("DECIMAL(7,2)"), ColumnKind::Number);
        assert_eq!(ColumnKind::from_sql_type("numeric"), ColumnKind::Number);
        assert_eq!(ColumnKind::from_sql_type("double precision"), ColumnKind::Number);
        assert_eq!(ColumnKind::from_sql_type("VARCHAR"), ColumnKind::Text);
        assert_eq!(ColumnKind::from_sql_type("character"), ColumnKind::Text);
        assert_eq!(
            ColumnKind::from_sql_type("timestamp without time zone"),
            ColumnKind::Text
        );
    }

    #[test]
    fn test_typed_placeholder() {
        assert_eq!(
            Dialect::Postgres.typed_placeholder(3, ColumnKind::Date),
            "CAST(CAST($3 AS VARCHAR) AS DATE)"
        );
        assert_eq!(
            Dialect::DuckDb.typed_placeholder(1, ColumnKind::Number),
            "CAST(CAST($1 AS VARCHAR) AS DOUBLE)"
        );
    }

    #[test]
    fn test_principal_sql() {
        let stmts = Dialect::Postgres.create_principal_sql("sales", Some("o'k"));
        assert_eq!(stmts[0], "CREATE ROLE sales LOGIN PASSWORD 'o''k'");
        assert!(Dialect::DuckDb.revoke_sql("sales").is_empty());
    }

    #[test]
    fn test_drop_and_copy_sql() {
        assert_eq!(
            Dialect::Postgres.drop_table_sql("S.ITEM"),
            "DROP TABLE S.ITEM CASCADE"
        );
        assert_eq!(
            Dialect::DuckDb.create_table_as_sql("B.ITEM", "A.ITEM", false),
            "CREATE TABLE B.ITEM AS SELECT * FROM A.ITEM WHERE 1=0"
        );
    }

    #[test]
    fn test_already_granted() {
        assert!(Dialect::Postgres.is_already_granted("schema \"sales\" already exists"));
        assert!(!Dialect::Postgres.is_already_granted("permission denied"));
    }
}
