//! Target schema resolution

/// Resolve the effective target schema
///
/// A non-empty override wins over a non-empty configured name. An empty
/// result means the session's own schema, with names left unqualified.
pub fn resolve(override_name: Option<&str>, configured: Option<&str>) -> String {
    [override_name, configured]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|name| !name.is_empty())
        .map(str::to_uppercase)
        .unwrap_or_default()
}

/// Qualify a table name with a schema
///
/// `SCHEMA.TABLE` when a schema is set, `TABLE` otherwise.
pub fn qualify(schema: &str, table: &str) -> String {
    let table = table.to_uppercase();
    if schema.is_empty() {
        table
    } else {
        format!("{}.{}", schema.to_uppercase(), table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins() {
        assert_eq!(resolve(Some("sales"), Some("other")), "SALES");
    }

    #[test]
    fn test_blank_override_falls_back() {
        assert_eq!(resolve(Some("  "), Some("bench")), "BENCH");
        assert_eq!(resolve(None, Some("bench")), "BENCH");
    }

    #[test]
    fn test_nothing_configured() {
        assert_eq!(resolve(None, None), "");
        assert_eq!(resolve(Some(""), Some("")), "");
    }

    #[test]
    fn test_qualify() {
        assert_eq!(qualify("SALES", "item"), "SALES.ITEM");
        assert_eq!(qualify("", "item"), "ITEM");
    }
}
