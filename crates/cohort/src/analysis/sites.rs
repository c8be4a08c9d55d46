//! Per-site performance ranking.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::record::PatientRecord;
use crate::stats::{percentage, round2};

/// Aggregates for one trial site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitePerformance {
    pub site: String,
    pub patients: usize,
    pub completed: usize,
    pub completion_rate_percent: f64,
    pub adverse_events: usize,
    pub adverse_rate_percent: f64,
    pub mean_age: f64,
}

#[derive(Default)]
struct SiteAccumulator {
    patients: usize,
    completed: usize,
    adverse: usize,
    age_sum: u64,
}

/// Group by site and rank descending by completion rate; ties break by site
/// name ascending so the ordering is total. Best site first, worst last.
pub fn rank_sites(records: &[PatientRecord]) -> Vec<SitePerformance> {
    let mut groups: BTreeMap<&str, SiteAccumulator> = BTreeMap::new();

    for record in records {
        let acc = groups.entry(record.trial_site.as_str()).or_default();
        acc.patients += 1;
        acc.age_sum += u64::from(record.age);
        if record.completed_trial {
            acc.completed += 1;
        }
        if record.adverse_event {
            acc.adverse += 1;
        }
    }

    let mut rankings: Vec<SitePerformance> = groups
        .into_iter()
        .map(|(site, acc)| SitePerformance {
            site: site.to_string(),
            patients: acc.patients,
            completed: acc.completed,
            completion_rate_percent: percentage(acc.completed, acc.patients),
            adverse_events: acc.adverse,
            adverse_rate_percent: percentage(acc.adverse, acc.patients),
            mean_age: round2(acc.age_sum as f64 / acc.patients as f64),
        })
        .collect();

    rankings.sort_by(|a, b| {
        b.completion_rate_percent
            .partial_cmp(&a.completion_rate_percent)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.site.cmp(&b.site))
    });

    rankings
}
