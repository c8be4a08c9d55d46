//! Advanced analysis: site rankings, age buckets, and key insights.

mod age;
mod insights;
mod sites;

use serde::{Deserialize, Serialize};

pub use age::{AgeBucket, AgeBucketBreakdown, AGE_BUCKETS};
pub use insights::KeyInsights;
pub use sites::SitePerformance;

use crate::record::PatientRecord;

/// Derived analysis snapshot: a pure function of the valid record set,
/// recomputed fresh on each request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvancedAnalysis {
    /// Per-site performance, best completion rate first.
    pub site_rankings: Vec<SitePerformance>,
    /// Fixed five-bucket age breakdown; empty buckets are still present.
    pub age_buckets: Vec<AgeBucketBreakdown>,
    /// Narrative insight values.
    pub insights: KeyInsights,
}

impl AdvancedAnalysis {
    pub fn from_records(records: &[PatientRecord]) -> Self {
        let site_rankings = sites::rank_sites(records);
        let insights = KeyInsights::from_records(records, &site_rankings);

        Self {
            site_rankings,
            age_buckets: age::bucket_breakdown(records),
            insights,
        }
    }
}
