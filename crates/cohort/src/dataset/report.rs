//! Load result: the valid/invalid row partition.

use serde::{Deserialize, Serialize};

use crate::record::{InvalidRecord, PatientRecord};

/// The outcome of one load: every input row classified as exactly one of
/// valid or invalid, in input order. Created once per load and immutable
/// afterward; a new load builds a new report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetReport {
    pub valid: Vec<PatientRecord>,
    pub invalid: Vec<InvalidRecord>,
}

impl DatasetReport {
    pub fn new(valid: Vec<PatientRecord>, invalid: Vec<InvalidRecord>) -> Self {
        Self { valid, invalid }
    }

    pub fn valid_count(&self) -> usize {
        self.valid.len()
    }

    pub fn invalid_count(&self) -> usize {
        self.invalid.len()
    }

    pub fn total_count(&self) -> usize {
        self.valid.len() + self.invalid.len()
    }
}
