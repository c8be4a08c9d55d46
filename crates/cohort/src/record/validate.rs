//! Per-row validation: RawRow in, PatientRecord or InvalidRecord out.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::patient::{InvalidRecord, PatientRecord, RawRow};

/// Strict ISO date shape. Chrono alone accepts unpadded components like
/// `2024-1-5`; the source contract is exactly `YYYY-MM-DD`.
static ISO_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

/// Inclusive age bounds.
const AGE_MIN: u32 = 0;
const AGE_MAX: u32 = 150;

/// Validates one raw row into a typed record or a list of defects.
///
/// Every field check runs independently and defects accumulate in field
/// order, so a row with a bad date and a bad age reports both. The result is
/// always exactly one of the two variants: a record with zero defects or an
/// [`InvalidRecord`] with at least one.
#[derive(Debug, Default)]
pub struct RecordValidator;

impl RecordValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a single row.
    pub fn validate(&self, raw: RawRow) -> Result<PatientRecord, InvalidRecord> {
        let mut defects = Vec::new();

        let patient_id = raw.patient_id.trim();
        if patient_id.is_empty() {
            defects.push("Missing patient ID".to_string());
        }

        let trial_site = raw.trial_site.trim();
        if trial_site.is_empty() {
            defects.push("Missing trial site".to_string());
        }

        let enrollment_date = parse_iso_date(&raw.enrollment_date);
        if enrollment_date.is_none() {
            defects.push("Invalid enrollment date".to_string());
        }

        let age = parse_age(&raw.age);
        if age.is_none() {
            defects.push(format!("Invalid age: {}", raw.age.trim()));
        }

        let adverse_event = parse_bool(&raw.adverse_event);
        if adverse_event.is_none() {
            defects.push(format!("Invalid adverse_event: {}", raw.adverse_event.trim()));
        }

        let completed_trial = parse_bool(&raw.completed_trial);
        if completed_trial.is_none() {
            defects.push(format!("Invalid completed_trial: {}", raw.completed_trial.trim()));
        }

        if !defects.is_empty() {
            return Err(InvalidRecord {
                raw,
                validation_errors: defects,
            });
        }

        // All Options are Some here; the defect list is empty exactly when
        // every parse succeeded.
        Ok(PatientRecord {
            patient_id: patient_id.to_string(),
            trial_site: trial_site.to_string(),
            enrollment_date: enrollment_date.unwrap(),
            age: age.unwrap(),
            adverse_event: adverse_event.unwrap(),
            completed_trial: completed_trial.unwrap(),
        })
    }
}

/// Parse a strict `YYYY-MM-DD` date. Shape-checked first so that chrono's
/// leniency about zero-padding does not widen the contract; chrono then
/// rejects impossible dates like `2024-02-30`.
fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if !ISO_DATE.is_match(trimmed) {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

/// Parse an integer age within bounds. Float-typed ages are rejected.
fn parse_age(value: &str) -> Option<u32> {
    let age: u32 = value.trim().parse().ok()?;
    (AGE_MIN..=AGE_MAX).contains(&age).then_some(age)
}

/// Accepted boolean forms, case-insensitive: true/false/1/0. Anything else
/// is a defect rather than silently false.
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn good_row() -> RawRow {
        RawRow {
            patient_id: "P001".to_string(),
            trial_site: "Boston".to_string(),
            enrollment_date: "2024-01-15".to_string(),
            age: "45".to_string(),
            adverse_event: "false".to_string(),
            completed_trial: "TRUE".to_string(),
        }
    }

    #[test]
    fn test_valid_row() {
        let record = RecordValidator::new().validate(good_row()).unwrap();

        assert_eq!(record.patient_id, "P001");
        assert_eq!(record.trial_site, "Boston");
        assert_eq!(
            record.enrollment_date,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert_eq!(record.age, 45);
        assert!(!record.adverse_event);
        assert!(record.completed_trial);
    }

    #[test]
    fn test_numeric_booleans() {
        let mut row = good_row();
        row.adverse_event = "1".to_string();
        row.completed_trial = "0".to_string();

        let record = RecordValidator::new().validate(row).unwrap();
        assert!(record.adverse_event);
        assert!(!record.completed_trial);
    }

    #[test]
    fn test_unknown_boolean_is_a_defect() {
        let mut row = good_row();
        row.adverse_event = "yes".to_string();

        let invalid = RecordValidator::new().validate(row).unwrap_err();
        assert_eq!(invalid.validation_errors, vec!["Invalid adverse_event: yes"]);
    }

    #[test]
    fn test_defects_accumulate_in_field_order() {
        let mut row = good_row();
        row.enrollment_date = "not-a-date".to_string();
        row.age = "180".to_string();

        let invalid = RecordValidator::new().validate(row).unwrap_err();
        assert_eq!(
            invalid.validation_errors,
            vec!["Invalid enrollment date", "Invalid age: 180"]
        );
    }

    #[test]
    fn test_missing_identifier_fields() {
        let mut row = good_row();
        row.patient_id = "   ".to_string();
        row.trial_site = String::new();

        let invalid = RecordValidator::new().validate(row).unwrap_err();
        assert_eq!(
            invalid.validation_errors,
            vec!["Missing patient ID", "Missing trial site"]
        );
    }

    #[test]
    fn test_age_bounds() {
        for (age, ok) in [("0", true), ("150", true), ("151", false), ("-1", false)] {
            let mut row = good_row();
            row.age = age.to_string();
            assert_eq!(RecordValidator::new().validate(row).is_ok(), ok, "age {age}");
        }
    }

    #[test]
    fn test_age_must_be_integer() {
        let mut row = good_row();
        row.age = "45.5".to_string();

        let invalid = RecordValidator::new().validate(row).unwrap_err();
        assert_eq!(invalid.validation_errors, vec!["Invalid age: 45.5"]);
    }

    #[test]
    fn test_unpadded_date_is_rejected() {
        let mut row = good_row();
        row.enrollment_date = "2024-1-5".to_string();

        let invalid = RecordValidator::new().validate(row).unwrap_err();
        assert_eq!(invalid.validation_errors, vec!["Invalid enrollment date"]);
    }

    #[test]
    fn test_impossible_date_is_rejected() {
        let mut row = good_row();
        row.enrollment_date = "2024-02-30".to_string();

        assert!(RecordValidator::new().validate(row).is_err());
    }

    #[test]
    fn test_invalid_record_keeps_raw_values() {
        let mut row = good_row();
        row.age = "abc".to_string();

        let invalid = RecordValidator::new().validate(row).unwrap_err();
        assert_eq!(invalid.raw.patient_id, "P001");
        assert_eq!(invalid.raw.age, "abc");
    }
}
