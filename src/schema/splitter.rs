//! DDL script splitting
//!
//! Splits a script into executable statements. Plain statements end at a
//! trailing `;`. Procedural blocks (anything opened with `BEGIN` or
//! `DECLARE`) keep their inner semicolons and end at a line holding only `/`.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_BLOCK_KEYWORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(BEGIN|DECLARE)\b").expect("Invalid regex"));

fn is_procedural(statement: &str) -> bool {
    RE_BLOCK_KEYWORD.is_match(statement)
}

fn push_line(current: &mut String, line: &str) {
    if !current.is_empty() {
        current.push('\n');
    }
    current.push_str(line);
}

fn emit(statements: &mut Vec<String>, current: &mut String) {
    let statement = current.trim();
    if !statement.is_empty() {
        statements.push(statement.to_string());
    }
    current.clear();
}

/// Split a script into ordered statements
///
/// Blank lines and full-line `--` comments are skipped, each line is
/// trimmed, and a trailing unterminated statement is still returned.
pub fn split(script: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();

    for raw in script.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with("--") {
            continue;
        }

        if line == "/" {
            emit(&mut statements, &mut current);
            continue;
        }

        push_line(&mut current, line);
        if line.ends_with(';') && !is_procedural(&current) {
            current.pop();
            emit(&mut statements, &mut current);
        }
    }

    emit(&mut statements, &mut current);
    statements
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_and_block() {
        let script = "CREATE TABLE T (X NUMBER);\nBEGIN\n  NULL;\nEND;\n/\n";
        let statements = split(script);
        assert_eq!(
            statements,
            vec![
                "CREATE TABLE T (X NUMBER)".to_string(),
                "BEGIN\nNULL;\nEND;".to_string(),
            ]
        );
    }

    #[test]
    fn test_multiline_statement_keeps_line_breaks() {
        let statements = split("CREATE TABLE A (\n  id INTEGER,\n  name VARCHAR(10)\n);");
        assert_eq!(
            statements,
            vec!["CREATE TABLE A (\nid INTEGER,\nname VARCHAR(10)\n)".to_string()]
        );
    }

    #[test]
    fn test_comments_and_blanks_skipped() {
        let script = "-- header\n\nDROP TABLE A;\n   -- indented comment\nDROP TABLE B;\n";
        assert_eq!(split(script), vec!["DROP TABLE A", "DROP TABLE B"]);
    }

    #[test]
    fn test_trailing_statement_without_terminator() {
        assert_eq!(
            split("DROP TABLE A;\nSELECT 1"),
            vec!["DROP TABLE A", "SELECT 1"]
        );
    }

    #[test]
    fn test_declare_block() {
        let script = "declare\n  n integer;\nbegin\n  n := 1;\nend;\n/\nDROP TABLE X;";
        let statements = split(script);
        assert_eq!(statements.len(), 2);
        assert!(statements[0].starts_with("declare"));
        assert!(statements[0].ends_with("end;"));
        assert_eq!(statements[1], "DROP TABLE X");
    }

    #[test]
    fn test_keyword_inside_identifier_is_not_a_block() {
        let statements = split("CREATE TABLE T (d_begin DATE);\nDROP TABLE T;");
        assert_eq!(statements.len(), 2);
    }

    #[test]
    fn test_empty_statements_never_emitted() {
        assert!(split(";\n/\n\n").is_empty());
    }
}
