//! Data file discovery

use std::fs;
use std::path::{Path, PathBuf};

use super::LoadError;
use crate::tables::TpcdsTable;

/// A per-table data file found on disk
#[derive(Debug, Clone, PartialEq)]
pub struct DataFile {
    pub table: TpcdsTable,
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

/// Find the expected `<table>.dat` files in a directory
///
/// Files that do not name a data table are ignored. The result follows the
/// table catalog order.
///
/// # Arguments
/// * `data_dir` - Directory holding the flat files
/// * `filter` - Restrict discovery to one table by name
///
/// # Returns
/// `UnknownTable` when the filter names no data table, `NoDataFiles` when
/// nothing was found
pub fn discover(data_dir: &Path, filter: Option<&str>) -> Result<Vec<DataFile>, LoadError> {
    let wanted = match filter {
        Some(name) => {
            let table: TpcdsTable = name.parse().map_err(LoadError::UnknownTable)?;
            if !TpcdsTable::DATA_TABLES.contains(&table) {
                return Err(LoadError::UnknownTable(format!("{} holds no data", name)));
            }
            Some(table)
        }
        None => None,
    };

    if !data_dir.is_dir() {
        return Err(LoadError::NoDataFiles(format!(
            "Data directory not found: {}",
            data_dir.display()
        )));
    }

    let pattern = format!("{}/*.dat", glob::Pattern::escape(&data_dir.to_string_lossy()));
    let entries = glob::glob(&pattern)
        .map_err(|e| LoadError::Io(format!("Invalid pattern {}: {}", pattern, e)))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!("Error accessing path: {}", e);
                continue;
            }
        };
        if !path.is_file() {
            continue;
        }
        let Some(table) = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.parse::<TpcdsTable>().ok())
            .filter(|t| TpcdsTable::DATA_TABLES.contains(t))
        else {
            continue;
        };
        if wanted.is_some_and(|w| w != table) {
            continue;
        }

        let size = fs::metadata(&path)
            .map_err(|e| LoadError::Io(format!("{}: {}", path.display(), e)))?
            .len();
        files.push(DataFile { table, path, size });
    }

    if files.is_empty() {
        let what = match wanted {
            Some(table) => table.file_name(),
            None => "TPC-DS data files".to_string(),
        };
        return Err(LoadError::NoDataFiles(format!(
            "No {} found in {}",
            what,
            data_dir.display()
        )));
    }

    files.sort_by_key(|f| TpcdsTable::DATA_TABLES.iter().position(|t| *t == f.table));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "1|x|\n").unwrap();
    }

    #[test]
    fn test_discover_known_files_only() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "store.dat");
        touch(dir.path(), "call_center.dat");
        touch(dir.path(), "dbgen_version.dat");
        touch(dir.path(), "notes.dat");
        touch(dir.path(), "item.csv");

        let files = discover(dir.path(), None).unwrap();
        let tables: Vec<_> = files.iter().map(|f| f.table).collect();
        assert_eq!(tables, vec![TpcdsTable::CallCenter, TpcdsTable::Store]);
        assert!(files.iter().all(|f| f.size > 0));
    }

    #[test]
    fn test_filter() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "store.dat");
        touch(dir.path(), "item.dat");

        let files = discover(dir.path(), Some("ITEM")).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].table, TpcdsTable::Item);

        assert!(matches!(
            discover(dir.path(), Some("nonsense")),
            Err(LoadError::UnknownTable(_))
        ));
        assert!(matches!(
            discover(dir.path(), Some("reason")),
            Err(LoadError::NoDataFiles(_))
        ));
    }

    #[test]
    fn test_empty_or_missing_directory() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(discover(dir.path(), None), Err(LoadError::NoDataFiles(_))));
        let missing = dir.path().join("missing");
        assert!(matches!(discover(&missing, None), Err(LoadError::NoDataFiles(_))));
    }
}
