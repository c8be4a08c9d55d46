//! CSV parser for trial data sources.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use super::source::{DataTable, SourceMetadata};
use crate::error::{CohortError, Result};

/// Parses comma-delimited trial data files.
///
/// The parser is forgiving about row shape (short rows are padded, long rows
/// truncated) but strict about structure: unreadable or entirely empty input
/// is an error. A header-only table parses to zero rows; whether that is
/// acceptable is the loader's call.
#[derive(Debug, Default)]
pub struct Parser;

impl Parser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a file and return the data table and source metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| CohortError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(|e| CohortError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let source = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.parse_bytes(&contents, &source)
    }

    /// Parse raw CSV bytes. `source` is a label for provenance (file name,
    /// upload name).
    pub fn parse_bytes(&self, bytes: &[u8], source: &str) -> Result<(DataTable, SourceMetadata)> {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let table = self.parse_table(bytes)?;

        let metadata = SourceMetadata::new(
            source.to_string(),
            hash,
            bytes.len() as u64,
            table.row_count(),
            table.column_count(),
        );

        Ok((table, metadata))
    }

    fn parse_table(&self, bytes: &[u8]) -> Result<DataTable> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();

        if headers.is_empty() || (headers.len() == 1 && headers[0].trim().is_empty()) {
            return Err(CohortError::EmptyData("No columns found".to_string()));
        }

        let expected_cols = headers.len();
        let mut rows = Vec::new();

        for result in reader.records() {
            let record = result?;
            let mut row: Vec<String> = record.iter().map(|s| s.to_string()).collect();

            // Pad short rows, truncate long ones
            while row.len() < expected_cols {
                row.push(String::new());
            }
            row.truncate(expected_cols);

            rows.push(row);
        }

        Ok(DataTable::new(headers, rows))
    }
}
