//! Typed patient records and their raw/invalid counterparts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row as read from the source, untyped. Transient: exists only between
/// the loader and the validator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRow {
    pub patient_id: String,
    pub trial_site: String,
    pub enrollment_date: String,
    pub age: String,
    pub adverse_event: String,
    pub completed_trial: String,
}

/// A fully validated patient record.
///
/// A value of this type exists only if every field passed its check; there
/// are no partial records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Non-empty identifier. Uniqueness is not enforced.
    pub patient_id: String,
    /// Non-empty site name, no fixed value set.
    pub trial_site: String,
    /// ISO calendar date of enrollment.
    pub enrollment_date: NaiveDate,
    /// Age in years, 0 to 150 inclusive.
    pub age: u32,
    /// Whether an adverse event was recorded.
    pub adverse_event: bool,
    /// Whether the patient completed the trial.
    pub completed_trial: bool,
}

/// A row that failed validation: the original values plus one defect message
/// per failed check. Excluded from every aggregate; kept for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvalidRecord {
    #[serde(flatten)]
    pub raw: RawRow,
    pub validation_errors: Vec<String>,
}
