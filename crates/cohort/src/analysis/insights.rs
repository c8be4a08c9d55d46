//! Narrative insight values derived from the valid set.

use serde::{Deserialize, Serialize};

use crate::record::PatientRecord;
use crate::stats::{percentage, round2};

use super::sites::SitePerformance;

/// Signed deltas used by the report's narrative lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyInsights {
    /// Completion rate without adverse events minus completion rate with
    /// adverse events. Negative when the relationship inverts.
    pub adverse_impact_percent: f64,
    /// Mean age of completers minus mean age of non-completers; 0 when
    /// either subgroup is empty.
    pub age_gap_years: f64,
    /// Top-ranked site, if any records exist.
    pub best_site: Option<String>,
    /// Bottom-ranked site.
    pub worst_site: Option<String>,
}

impl KeyInsights {
    pub fn from_records(records: &[PatientRecord], rankings: &[SitePerformance]) -> Self {
        Self {
            adverse_impact_percent: adverse_impact(records),
            age_gap_years: age_gap(records),
            best_site: rankings.first().map(|s| s.site.clone()),
            worst_site: rankings.last().map(|s| s.site.clone()),
        }
    }
}

fn adverse_impact(records: &[PatientRecord]) -> f64 {
    let adverse: Vec<&PatientRecord> = records.iter().filter(|r| r.adverse_event).collect();
    let clear: Vec<&PatientRecord> = records.iter().filter(|r| !r.adverse_event).collect();

    let with_rate = percentage(
        adverse.iter().filter(|r| r.completed_trial).count(),
        adverse.len(),
    );
    let without_rate = percentage(
        clear.iter().filter(|r| r.completed_trial).count(),
        clear.len(),
    );

    round2(without_rate - with_rate)
}

fn age_gap(records: &[PatientRecord]) -> f64 {
    let completers: Vec<u32> = records
        .iter()
        .filter(|r| r.completed_trial)
        .map(|r| r.age)
        .collect();
    let dropouts: Vec<u32> = records
        .iter()
        .filter(|r| !r.completed_trial)
        .map(|r| r.age)
        .collect();

    if completers.is_empty() || dropouts.is_empty() {
        return 0.0;
    }

    round2(mean(&completers) - mean(&dropouts))
}

fn mean(ages: &[u32]) -> f64 {
    ages.iter().map(|a| f64::from(*a)).sum::<f64>() / ages.len() as f64
}
