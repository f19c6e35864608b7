//! Pipe-delimited flat file output

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::GenerateError;
use crate::database::Row;
use crate::tables::TpcdsTable;
use crate::value::FIELD_DELIMITER;

/// What a generation run wrote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSummary {
    pub output_dir: PathBuf,
    /// Rows written per table
    pub rows: BTreeMap<TpcdsTable, usize>,
    /// `*.dat` files present in the output directory afterwards
    pub files_found: usize,
}

impl GenerationSummary {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            rows: BTreeMap::new(),
            files_found: 0,
        }
    }

    pub fn record(&mut self, table: TpcdsTable, rows: usize) {
        self.rows.insert(table, rows);
    }

    pub fn tables_written(&self) -> usize {
        self.rows.len()
    }

    pub fn total_rows(&self) -> usize {
        self.rows.values().sum()
    }
}

/// Render one row as a line, without the newline
///
/// Every field is followed by the delimiter, including the last one, and
/// NULL is an empty field.
pub fn format_row(row: &Row) -> String {
    let mut line = String::new();
    for value in row {
        line.push_str(&value.to_field());
        line.push(FIELD_DELIMITER);
    }
    line
}

/// Write a table's rows to `<dir>/<table>.dat`, replacing any previous file
pub(super) fn write_table(
    dir: &Path,
    table: TpcdsTable,
    rows: &[Row],
) -> Result<PathBuf, GenerateError> {
    let path = dir.join(table.file_name());
    let io_err =
        |e: std::io::Error| GenerateError::Io(format!("Failed to write {}: {}", path.display(), e));

    let file = File::create(&path).map_err(io_err)?;
    let mut out = BufWriter::new(file);
    for row in rows {
        writeln!(out, "{}", format_row(row)).map_err(io_err)?;
    }
    out.flush().map_err(io_err)?;
    Ok(path)
}

/// Count the `*.dat` files in a directory
pub(super) fn count_data_files(dir: &Path) -> Result<usize, GenerateError> {
    let pattern = format!("{}/*.dat", glob::Pattern::escape(&dir.to_string_lossy()));
    let entries = glob::glob(&pattern)
        .map_err(|e| GenerateError::Io(format!("Invalid glob pattern {}: {}", pattern, e)))?;
    Ok(entries.filter_map(Result::ok).filter(|p| p.is_file()).count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_format_row() {
        let row: Row = vec![
            Value::Int(1),
            Value::Text("abc".to_string()),
            Value::Null,
            Value::Decimal(42.5),
            Value::Date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()),
        ];
        assert_eq!(format_row(&row), "1|abc||42.5|2024-01-15|");
    }

    #[test]
    fn test_write_table() {
        let dir = TempDir::new().unwrap();
        let rows: Vec<Row> = vec![
            vec![Value::Int(1), Value::Text("Defective item".to_string())],
            vec![Value::Int(2), Value::Null],
        ];
        let path = write_table(dir.path(), TpcdsTable::Reason, &rows).unwrap();
        assert_eq!(path, dir.path().join("reason.dat"));

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "1|Defective item|\n2||\n");
    }

    #[test]
    fn test_count_data_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("item.dat"), "1|\n").unwrap();
        std::fs::write(dir.path().join("store.dat"), "").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();
        assert_eq!(count_data_files(dir.path()).unwrap(), 2);
    }

    #[test]
    fn test_summary_totals() {
        let mut summary = GenerationSummary::new(Path::new("out"));
        summary.record(TpcdsTable::Item, 3);
        summary.record(TpcdsTable::Store, 1);
        assert_eq!(summary.tables_written(), 2);
        assert_eq!(summary.total_rows(), 4);
    }
}
