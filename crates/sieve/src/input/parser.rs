//! CSV/TSV parser with delimiter detection.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use super::source::{DataTable, SourceMetadata};
use crate::error::{Result, SieveError};

/// Delimiters to try when auto-detecting, in order of preference.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Lines sampled when auto-detecting the delimiter.
const SNIFF_LINES: usize = 10;

/// File extensions the loader accepts.
const SUPPORTED_EXTENSIONS: &[&str] = &["csv", "tsv", "txt"];

/// Parser configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
    /// Cell values, besides empty cells, that mean "missing".
    ///
    /// Empty by default, so a literal `NaN` is treated as content.
    pub na_values: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
            na_values: Vec::new(),
        }
    }
}

impl ParserConfig {
    /// Check if a raw cell represents a missing value.
    pub fn is_missing(&self, value: &str) -> bool {
        let trimmed = value.trim();
        trimmed.is_empty() || self.na_values.iter().any(|na| na == trimmed)
    }
}

/// Parses tabular data files.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the data table and metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();

        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let mut file = File::open(path).map_err(|e| SieveError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(SieveError::UnsupportedFormat(format!(
                "'{}' is not a CSV/TSV file",
                path.display()
            )));
        }

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(|e| SieveError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        self.parse_contents(path.to_path_buf(), &contents)
    }

    /// Parse in-memory text, such as data pasted by a user.
    ///
    /// `label` stands in for the file name in the returned metadata.
    pub fn parse_str(&self, label: &str, content: &str) -> Result<(DataTable, SourceMetadata)> {
        self.parse_contents(PathBuf::from(label), content.as_bytes())
    }

    fn parse_contents(&self, path: PathBuf, contents: &[u8]) -> Result<(DataTable, SourceMetadata)> {
        if contents.iter().all(u8::is_ascii_whitespace) {
            return Err(SieveError::EmptyData(format!(
                "'{}' is empty or has no data",
                path.display()
            )));
        }

        let delimiter = self
            .config
            .delimiter
            .unwrap_or_else(|| sniff_delimiter(contents, self.config.quote));
        let table = self.read_table(contents, delimiter)?;

        debug!(
            source = %path.display(),
            delimiter = %(delimiter as char).escape_default(),
            rows = table.row_count(),
            columns = table.column_count(),
            "loaded table"
        );

        let metadata = SourceMetadata::new(
            path,
            format!("sha256:{:x}", Sha256::digest(contents)),
            contents.len() as u64,
            format_name(delimiter).to_string(),
            table.row_count(),
            table.column_count(),
        );

        Ok((table, metadata))
    }

    fn reader<'a>(&self, bytes: &'a [u8], delimiter: u8) -> csv::Reader<&'a [u8]> {
        csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .quote(self.config.quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes)
    }

    /// Read every record; the header (or synthesized names) fixes the width.
    fn read_table(&self, bytes: &[u8], delimiter: u8) -> Result<DataTable> {
        let mut records = self.reader(bytes, delimiter).into_records();

        let headers: Vec<String> = if self.config.has_header {
            match records.next().transpose()? {
                Some(header) => header.iter().map(|name| name.trim().to_string()).collect(),
                None => Vec::new(),
            }
        } else {
            Vec::new()
        };

        let limit = self.config.max_rows.unwrap_or(usize::MAX);
        let rows = records
            .take(limit)
            .map(|record| {
                record.map(|record| {
                    record
                        .iter()
                        .map(|cell| (!self.config.is_missing(cell)).then(|| cell.to_string()))
                        .collect::<Vec<_>>()
                })
            })
            .collect::<std::result::Result<Vec<_>, csv::Error>>()?;

        let headers = if self.config.has_header {
            headers
        } else {
            let width = rows.iter().map(Vec::len).max().unwrap_or(0);
            (1..=width).map(|i| format!("column_{}", i)).collect()
        };

        if headers.iter().all(String::is_empty) {
            return Err(SieveError::EmptyData("No columns found".to_string()));
        }
        if rows.is_empty() {
            return Err(SieveError::EmptyData("No data rows found".to_string()));
        }

        let headers = dedupe_headers(headers);

        // Extra cells beyond the header are dropped; short rows are padded
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.truncate(width);
                row
            })
            .collect();

        Ok(DataTable::new(headers, rows))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Rename repeated header names to `name.1`, `name.2`, ... so every column
/// keeps its own key in name-indexed results.
fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(headers.len());
    let mut renamed = Vec::with_capacity(headers.len());

    for name in headers {
        let mut candidate = name.clone();
        let mut suffix = 0;
        while seen.contains(&candidate) {
            suffix += 1;
            candidate = format!("{}.{}", name, suffix);
        }
        if candidate != name {
            warn!(column = %name, renamed = %candidate, "duplicate column header");
        }
        seen.insert(candidate.clone());
        renamed.push(candidate);
    }

    renamed
}

fn format_name(delimiter: u8) -> &'static str {
    match delimiter {
        b'\t' => "tsv",
        b',' => "csv",
        b';' => "csv-semicolon",
        b'|' => "psv",
        _ => "delimited",
    }
}

/// Pick the candidate delimiter that splits the first lines most evenly.
///
/// A delimiter giving every sampled line the same width beats one that
/// does not; wider splits beat narrower ones. Earlier candidates win ties,
/// so tab is preferred. Falls back to comma when nothing splits.
fn sniff_delimiter(bytes: &[u8], quote: u8) -> u8 {
    let mut best = (false, 1, b',');

    for &candidate in DELIMITERS {
        let widths: Vec<usize> = csv::ReaderBuilder::new()
            .delimiter(candidate)
            .quote(quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes)
            .into_records()
            .take(SNIFF_LINES)
            .map_while(|record| record.ok())
            .map(|record| record.len())
            .collect();

        let Some(&first) = widths.first() else {
            continue;
        };
        let consistent = widths.iter().all(|&w| w == first);

        if first > 1 && (consistent, first) > (best.0, best.1) {
            best = (consistent, first, candidate);
        }
    }

    best.2
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(parser: &Parser, data: &str) -> DataTable {
        parser.read_table(data.as_bytes(), b',').unwrap()
    }

    #[test]
    fn test_sniff_comma_and_tab() {
        assert_eq!(sniff_delimiter(b"a,b,c\n1,2,3\n4,5,6", b'"'), b',');
        assert_eq!(sniff_delimiter(b"a\tb\tc\n1\t2\t3\n4\t5\t6", b'"'), b'\t');
    }

    #[test]
    fn test_sniff_ignores_quoted_delimiters() {
        let data = b"name;note\n\"Smith, J\";ok\n\"Doe, A\";late";
        assert_eq!(sniff_delimiter(data, b'"'), b';');
    }

    #[test]
    fn test_sniff_single_column_falls_back_to_comma() {
        assert_eq!(sniff_delimiter(b"age\n34\n45", b'"'), b',');
    }

    #[test]
    fn test_read_table() {
        let t = table(&Parser::new(), "name, age ,city\nAlice,30,NYC\nBob,,LA");

        assert_eq!(t.headers, vec!["name", "age", "city"]);
        assert_eq!(t.row_count(), 2);
        assert_eq!(t.get(0, 0), Some("Alice"));
        assert_eq!(t.get(1, 1), None);
    }

    #[test]
    fn test_nan_is_content_by_default() {
        let t = table(&Parser::new(), "age\n34\nNaN\n");
        assert_eq!(t.get(1, 0), Some("NaN"));

        let parser = Parser::with_config(ParserConfig {
            na_values: vec!["NaN".to_string()],
            ..ParserConfig::default()
        });
        assert_eq!(table(&parser, "age\n34\nNaN\n").get(1, 0), None);
    }

    #[test]
    fn test_ragged_rows() {
        let t = table(&Parser::new(), "a,b\n1\n2,3,4\n");

        assert_eq!(t.get(0, 1), None);
        assert_eq!(t.get(1, 1), Some("3"));
        assert_eq!(t.rows[1].len(), 2);
    }

    #[test]
    fn test_max_rows() {
        let parser = Parser::with_config(ParserConfig {
            max_rows: Some(2),
            ..ParserConfig::default()
        });
        assert_eq!(table(&parser, "a\n1\n2\n3\n").row_count(), 2);
    }

    #[test]
    fn test_header_only_is_empty() {
        let result = Parser::new().parse_str("pasted", "a,b,c\n");
        assert!(matches!(result, Err(SieveError::EmptyData(_))));
    }

    #[test]
    fn test_blank_input_is_empty() {
        assert!(matches!(
            Parser::new().parse_str("pasted", "   \n"),
            Err(SieveError::EmptyData(_))
        ));
    }

    #[test]
    fn test_parse_str_metadata() {
        let (t, meta) = Parser::new().parse_str("pasted.csv", "x,y\n1,2\n3,4\n").unwrap();

        assert_eq!(t.row_count(), 2);
        assert_eq!(meta.file, "pasted.csv");
        assert_eq!(meta.format, "csv");
        assert!(meta.hash.starts_with("sha256:"));
        assert_eq!(meta.column_count, 2);
    }

    #[test]
    fn test_duplicate_headers_are_renamed() {
        let t = table(&Parser::new(), "a,b,a,a\n1,2,3,4\n");
        assert_eq!(t.headers, vec!["a", "b", "a.1", "a.2"]);
        assert_eq!(t.get(0, 2), Some("3"));

        // A literal `a.1` already in the file is not reused
        let t = table(&Parser::new(), "a,a.1,a\n1,2,3\n");
        assert_eq!(t.headers, vec!["a", "a.1", "a.2"]);
    }

    #[test]
    fn test_without_header() {
        let parser = Parser::with_config(ParserConfig {
            has_header: false,
            ..ParserConfig::default()
        });
        let t = table(&parser, "1,2\n3,4\n");

        assert_eq!(t.headers, vec!["column_1", "column_2"]);
        assert_eq!(t.row_count(), 2);
    }
}
