//! Table-to-report loading.

use crate::error::{CohortError, Result};
use crate::input::DataTable;
use crate::record::{RawRow, RecordValidator};

use super::report::DatasetReport;

/// The six columns every source must carry, in canonical order.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "patient_id",
    "trial_site",
    "enrollment_date",
    "age",
    "adverse_event",
    "completed_trial",
];

/// Applies the validator to every row of a parsed table and partitions the
/// rows into a [`DatasetReport`].
///
/// Row-level failures are classification, not errors: the loader never fails
/// because of bad field values. The only failure here is structural, a table
/// that lacks one of the required columns.
#[derive(Debug, Default)]
pub struct DatasetLoader {
    validator: RecordValidator,
}

impl DatasetLoader {
    pub fn new() -> Self {
        Self {
            validator: RecordValidator::new(),
        }
    }

    /// Load a parsed table into a report.
    pub fn load(&self, table: &DataTable) -> Result<DatasetReport> {
        let columns = self.locate_columns(table)?;

        let mut valid = Vec::new();
        let mut invalid = Vec::new();

        for row in &table.rows {
            let raw = extract_raw(row, &columns);
            match self.validator.validate(raw) {
                Ok(record) => valid.push(record),
                Err(record) => invalid.push(record),
            }
        }

        Ok(DatasetReport::new(valid, invalid))
    }

    /// Resolve required column positions, reporting every absent column.
    fn locate_columns(&self, table: &DataTable) -> Result<[usize; 6]> {
        let mut positions = [0usize; 6];
        let mut missing = Vec::new();

        for (i, name) in REQUIRED_COLUMNS.iter().enumerate() {
            match table.column_index(name) {
                Some(pos) => positions[i] = pos,
                None => missing.push(name.to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(CohortError::MissingColumns(missing));
        }

        Ok(positions)
    }
}

fn extract_raw(row: &[String], columns: &[usize; 6]) -> RawRow {
    let field = |i: usize| row.get(columns[i]).cloned().unwrap_or_default();

    RawRow {
        patient_id: field(0),
        trial_site: field(1),
        enrollment_date: field(2),
        age: field(3),
        adverse_event: field(4),
        completed_trial: field(5),
    }
}
