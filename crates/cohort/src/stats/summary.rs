//! The six required summary metrics plus data quality.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dataset::DatasetReport;
use crate::record::{InvalidRecord, PatientRecord};

use super::{percentage, round2};

/// Derived summary snapshot. A pure function of one load; recomputed fresh
/// on every request, never cached.
///
/// Serializes to the statistics payload consumed by the JSON export and the
/// web API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub total_patients: usize,
    /// Patient counts per site, keyed alphabetically for reproducible
    /// output.
    pub patients_per_site: BTreeMap<String, usize>,
    pub average_age: f64,
    pub completion_rate_percent: f64,
    pub adverse_event_rate_percent: f64,
    pub completion_rate_with_adverse_percent: f64,
    pub completion_rate_without_adverse_percent: f64,
    pub data_quality: DataQuality,
}

/// Valid/invalid partition counts and the per-row diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataQuality {
    pub valid_records: usize,
    pub invalid_records: usize,
    pub invalid_record_details: Vec<InvalidRecord>,
}

impl SummaryStatistics {
    /// Compute the summary for one load. An empty valid set yields zeros
    /// across the board, not NaN and not an error.
    pub fn from_report(report: &DatasetReport) -> Self {
        let records = &report.valid;
        let total = records.len();

        let mut patients_per_site = BTreeMap::new();
        for record in records {
            *patients_per_site.entry(record.trial_site.clone()).or_insert(0) += 1;
        }

        let completed = records.iter().filter(|r| r.completed_trial).count();
        let adverse = records.iter().filter(|r| r.adverse_event).count();
        let completed_with_adverse = records
            .iter()
            .filter(|r| r.adverse_event && r.completed_trial)
            .count();
        let completed_without_adverse = completed - completed_with_adverse;

        Self {
            total_patients: total,
            patients_per_site,
            average_age: mean_age(records),
            completion_rate_percent: percentage(completed, total),
            adverse_event_rate_percent: percentage(adverse, total),
            completion_rate_with_adverse_percent: percentage(completed_with_adverse, adverse),
            completion_rate_without_adverse_percent: percentage(
                completed_without_adverse,
                total - adverse,
            ),
            data_quality: DataQuality {
                valid_records: total,
                invalid_records: report.invalid_count(),
                invalid_record_details: report.invalid.clone(),
            },
        }
    }
}

fn mean_age(records: &[PatientRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let sum: u64 = records.iter().map(|r| u64::from(r.age)).sum();
    round2(sum as f64 / records.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(site: &str, age: u32, adverse: bool, completed: bool) -> PatientRecord {
        PatientRecord {
            patient_id: format!("P{age}"),
            trial_site: site.to_string(),
            enrollment_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            age,
            adverse_event: adverse,
            completed_trial: completed,
        }
    }

    fn report(valid: Vec<PatientRecord>) -> DatasetReport {
        DatasetReport::new(valid, Vec::new())
    }

    #[test]
    fn test_basic_metrics() {
        let stats = SummaryStatistics::from_report(&report(vec![
            record("Boston", 40, false, true),
            record("Boston", 50, true, false),
            record("Chicago", 60, true, true),
        ]));

        assert_eq!(stats.total_patients, 3);
        assert_eq!(stats.average_age, 50.0);
        assert_eq!(stats.completion_rate_percent, 66.67);
        assert_eq!(stats.adverse_event_rate_percent, 66.67);
        assert_eq!(stats.patients_per_site["Boston"], 2);
        assert_eq!(stats.patients_per_site["Chicago"], 1);
    }

    #[test]
    fn test_site_keys_are_alphabetical() {
        let stats = SummaryStatistics::from_report(&report(vec![
            record("NewYork", 40, false, true),
            record("Boston", 50, false, true),
            record("Chicago", 60, false, true),
        ]));

        let keys: Vec<&String> = stats.patients_per_site.keys().collect();
        assert_eq!(keys, ["Boston", "Chicago", "NewYork"]);
    }

    #[test]
    fn test_conditional_completion_rates() {
        let stats = SummaryStatistics::from_report(&report(vec![
            record("Boston", 40, true, true),
            record("Boston", 45, true, false),
            record("Boston", 50, false, true),
            record("Boston", 55, false, true),
        ]));

        assert_eq!(stats.completion_rate_with_adverse_percent, 50.0);
        assert_eq!(stats.completion_rate_without_adverse_percent, 100.0);
    }

    #[test]
    fn test_zero_adverse_denominator_reports_zero() {
        let stats = SummaryStatistics::from_report(&report(vec![
            record("Boston", 40, false, true),
        ]));

        assert_eq!(stats.completion_rate_with_adverse_percent, 0.0);
        assert_eq!(stats.completion_rate_without_adverse_percent, 100.0);
    }

    #[test]
    fn test_empty_valid_set_is_all_zeros() {
        let stats = SummaryStatistics::from_report(&report(Vec::new()));

        assert_eq!(stats.total_patients, 0);
        assert_eq!(stats.average_age, 0.0);
        assert_eq!(stats.completion_rate_percent, 0.0);
        assert_eq!(stats.adverse_event_rate_percent, 0.0);
        assert_eq!(stats.completion_rate_with_adverse_percent, 0.0);
        assert_eq!(stats.completion_rate_without_adverse_percent, 0.0);
        assert!(stats.patients_per_site.is_empty());
    }

    #[test]
    fn test_rounding_is_half_up() {
        // 1/3 completed: 33.333..% rounds to 33.33; 2/3: 66.666..% to 66.67
        let stats = SummaryStatistics::from_report(&report(vec![
            record("A", 40, false, true),
            record("A", 41, false, false),
            record("A", 42, false, false),
        ]));
        assert_eq!(stats.completion_rate_percent, 33.33);
        assert_eq!(super::super::percentage(2, 3), 66.67);
        assert_eq!(super::super::percentage(1, 8), 12.5);
    }

    #[test]
    fn test_payload_field_names() {
        let stats = SummaryStatistics::from_report(&report(vec![
            record("Boston", 40, false, true),
        ]));
        let value = serde_json::to_value(&stats).unwrap();

        for key in [
            "total_patients",
            "patients_per_site",
            "average_age",
            "completion_rate_percent",
            "adverse_event_rate_percent",
            "completion_rate_with_adverse_percent",
            "completion_rate_without_adverse_percent",
            "data_quality",
        ] {
            assert!(value.get(key).is_some(), "missing payload key {key}");
        }
        assert!(value["data_quality"].get("invalid_record_details").is_some());
    }
}
