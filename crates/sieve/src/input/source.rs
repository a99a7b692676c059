//! Loaded table and source metadata.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::inference::classifier::{is_boolean_word, is_date, is_float, is_integer};
use crate::schema::StorageType;

/// Metadata about the source data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path (or the label of pasted data).
    pub file: String,
    /// Full path to the file, empty for in-memory data.
    pub path: PathBuf,
    /// SHA-256 hash of the raw contents.
    pub hash: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Detected encoding.
    pub encoding: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
}

impl SourceMetadata {
    /// Create metadata for parsed data.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            encoding: "utf-8".to_string(),
            row_count,
            column_count,
        }
    }
}

/// Represents parsed tabular data.
///
/// Cells are `None` when missing. Row order is the order of the source and
/// never changes, so row indices are stable across every check.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    /// Column headers.
    pub headers: Vec<String>,
    /// Row data (row-major order).
    pub rows: Vec<Vec<Option<String>>>,
}

impl DataTable {
    /// Create a new data table. Rows shorter than the header are padded with missing cells.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, None);
                row
            })
            .collect();

        Self { headers, rows }
    }

    /// Build a table from raw strings, treating empty or whitespace-only cells as missing.
    pub fn from_strings(headers: Vec<&str>, rows: Vec<Vec<&str>>) -> Self {
        Self::new(
            headers.into_iter().map(String::from).collect(),
            rows.into_iter()
                .map(|row| {
                    row.into_iter()
                        .map(|cell| {
                            if cell.trim().is_empty() {
                                None
                            } else {
                                Some(cell.to_string())
                            }
                        })
                        .collect()
                })
                .collect(),
        )
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// All cells of a column, in row order.
    pub fn column_cells(&self, index: usize) -> impl Iterator<Item = Option<&str>> {
        self.rows
            .iter()
            .map(move |row| row.get(index).and_then(|cell| cell.as_deref()))
    }

    /// Present values of a column with their row index.
    pub fn non_missing(&self, index: usize) -> impl Iterator<Item = (usize, &str)> {
        self.column_cells(index)
            .enumerate()
            .filter_map(|(row, cell)| cell.map(|value| (row, value)))
    }

    /// Get a specific cell value. Missing cells and out-of-range positions are `None`.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .and_then(|cell| cell.as_deref())
    }

    /// Number of missing cells in a column.
    pub fn missing_count(&self, index: usize) -> usize {
        self.column_cells(index).filter(Option::is_none).count()
    }

    /// Approximate bytes held by the table: every cell slot plus the text it owns.
    pub fn memory_bytes(&self) -> usize {
        let slot = std::mem::size_of::<Option<String>>();
        let headers: usize = self.headers.iter().map(|h| slot + h.len()).sum();
        let cells: usize = self
            .rows
            .iter()
            .flatten()
            .map(|cell| slot + cell.as_ref().map_or(0, String::len))
            .sum();
        headers + cells
    }

    /// How the column would be stored by a typed reader.
    ///
    /// Integer and boolean storage cannot hold missing cells; a column of
    /// integers with gaps is stored as floats, and a boolean column with
    /// gaps falls back to untyped storage.
    pub fn storage_type(&self, index: usize) -> StorageType {
        let cells: Vec<Option<&str>> = self.column_cells(index).collect();
        let present: Vec<&str> = cells.iter().flatten().copied().collect();

        if present.is_empty() {
            return StorageType::Object;
        }
        let has_missing = present.len() < cells.len();

        if !has_missing && present.iter().all(|v| is_integer(v)) {
            StorageType::Int64
        } else if !has_missing && present.iter().all(|v| is_boolean_word(v)) {
            StorageType::Bool
        } else if present.iter().all(|v| is_float(v)) {
            StorageType::Float64
        } else if present.iter().all(|v| is_date(v)) {
            StorageType::Datetime64
        } else {
            StorageType::Object
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_column(values: Vec<&str>) -> DataTable {
        DataTable::from_strings(vec!["col"], values.into_iter().map(|v| vec![v]).collect())
    }

    #[test]
    fn test_padding_and_access() {
        let table = DataTable::new(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![Some("1".to_string())]],
        );

        assert_eq!(table.get(0, 0), Some("1"));
        assert_eq!(table.get(0, 1), None);
        assert_eq!(table.rows[0].len(), 2);
    }

    #[test]
    fn test_non_missing_keeps_row_indices() {
        let table = single_column(vec!["1", "", "3", "  "]);
        let present: Vec<(usize, &str)> = table.non_missing(0).collect();

        assert_eq!(present, vec![(0, "1"), (2, "3")]);
        assert_eq!(table.missing_count(0), 2);
    }

    #[test]
    fn test_storage_types() {
        assert_eq!(single_column(vec!["1", "2"]).storage_type(0), StorageType::Int64);
        assert_eq!(single_column(vec!["1", ""]).storage_type(0), StorageType::Float64);
        assert_eq!(single_column(vec!["1.5", "2"]).storage_type(0), StorageType::Float64);
        assert_eq!(single_column(vec!["true", "False"]).storage_type(0), StorageType::Bool);
        assert_eq!(single_column(vec!["true", ""]).storage_type(0), StorageType::Object);
        assert_eq!(
            single_column(vec!["2025-01-01", ""]).storage_type(0),
            StorageType::Datetime64
        );
        assert_eq!(single_column(vec!["34", "NaN"]).storage_type(0), StorageType::Object);
        assert_eq!(single_column(vec!["", ""]).storage_type(0), StorageType::Object);
    }

    #[test]
    fn test_memory_bytes_counts_cell_text() {
        let slot = std::mem::size_of::<Option<String>>();
        let table = single_column(vec!["abcd", ""]);
        assert_eq!(table.memory_bytes(), (slot + 3) + (slot + 4) + slot);
    }
}
