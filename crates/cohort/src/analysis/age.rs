//! Fixed age bucket breakdown.

use serde::{Deserialize, Serialize};

use crate::record::PatientRecord;
use crate::stats::percentage;

/// The five fixed demographic buckets. Lower bounds are inclusive, upper
/// bounds exclusive; the top bucket is unbounded, so age 30 lands in
/// `30-39`, age 29 in `<30`, and age 60 and above in `60+`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeBucket {
    Under30,
    Thirties,
    Forties,
    Fifties,
    SixtyPlus,
}

/// All buckets in reporting order.
pub const AGE_BUCKETS: [AgeBucket; 5] = [
    AgeBucket::Under30,
    AgeBucket::Thirties,
    AgeBucket::Forties,
    AgeBucket::Fifties,
    AgeBucket::SixtyPlus,
];

impl AgeBucket {
    /// Assign an age to its bucket.
    pub fn for_age(age: u32) -> Self {
        match age {
            0..=29 => AgeBucket::Under30,
            30..=39 => AgeBucket::Thirties,
            40..=49 => AgeBucket::Forties,
            50..=59 => AgeBucket::Fifties,
            _ => AgeBucket::SixtyPlus,
        }
    }

    /// Position in [`AGE_BUCKETS`].
    fn index(self) -> usize {
        match self {
            AgeBucket::Under30 => 0,
            AgeBucket::Thirties => 1,
            AgeBucket::Forties => 2,
            AgeBucket::Fifties => 3,
            AgeBucket::SixtyPlus => 4,
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            AgeBucket::Under30 => "<30",
            AgeBucket::Thirties => "30-39",
            AgeBucket::Forties => "40-49",
            AgeBucket::Fifties => "50-59",
            AgeBucket::SixtyPlus => "60+",
        }
    }
}

/// Aggregates for one age bucket. Buckets with no members are reported with
/// zero counts and zero rates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgeBucketBreakdown {
    pub bucket: String,
    pub patients: usize,
    pub completed: usize,
    pub completion_rate_percent: f64,
    pub adverse_events: usize,
    pub adverse_rate_percent: f64,
}

/// Assign every record to exactly one bucket and aggregate.
pub fn bucket_breakdown(records: &[PatientRecord]) -> Vec<AgeBucketBreakdown> {
    let mut counts = [(0usize, 0usize, 0usize); 5];

    for record in records {
        let idx = AgeBucket::for_age(record.age).index();
        counts[idx].0 += 1;
        if record.completed_trial {
            counts[idx].1 += 1;
        }
        if record.adverse_event {
            counts[idx].2 += 1;
        }
    }

    AGE_BUCKETS
        .iter()
        .zip(counts)
        .map(|(bucket, (patients, completed, adverse))| AgeBucketBreakdown {
            bucket: bucket.label().to_string(),
            patients,
            completed,
            completion_rate_percent: percentage(completed, patients),
            adverse_events: adverse,
            adverse_rate_percent: percentage(adverse, patients),
        })
        .collect()
}
