//! The five fixed aggregation queries.
//!
//! Each query is parameterless, reads the persisted `patients` table, and
//! returns an ordered sequence of rows. A query over an empty table returns
//! an empty sequence, never an error.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::stats::round2;

use super::store::PatientStore;

/// Per-site outcome counts (query 1). Ordered by site name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteBreakdown {
    pub site: String,
    pub total: usize,
    pub completed: usize,
    pub incomplete: usize,
    pub with_adverse: usize,
    pub without_adverse: usize,
}

/// Per-site enrollment window (query 2). Ordered by total enrolled
/// descending, then site name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentSpan {
    pub site: String,
    pub total_enrolled: usize,
    pub first_enrollment: String,
    pub last_enrollment: String,
}

/// A patient with an adverse event who did not complete (query 3). Ordered
/// by age descending; equal ages order by patient id for stability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighRiskPatient {
    pub patient_id: String,
    pub site: String,
    pub age: u32,
}

/// Letter grade tiers for site completion rates. Lower bounds are closed:
/// exactly 90 is an A, exactly 70 a B, exactly 50 a C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
}

impl Grade {
    /// Grade from a completion percentage that has already been rounded to
    /// two decimals.
    pub fn from_completion_rate(rate: f64) -> Self {
        if rate >= 90.0 {
            Grade::A
        } else if rate >= 70.0 {
            Grade::B
        } else if rate >= 50.0 {
            Grade::C
        } else {
            Grade::D
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Grade::A => "A (Excellent)",
            Grade::B => "B (Good)",
            Grade::C => "C (Fair)",
            Grade::D => "D (Poor)",
        }
    }
}

/// Graded per-site completion (query 4). Ordered by completion percentage
/// descending, then site name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteGrade {
    pub site: String,
    pub total: usize,
    pub completed: usize,
    pub completion_rate_percent: f64,
    pub grade: Grade,
}

/// Whole-table aggregate summary (query 5). Absent for an empty table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverallSummary {
    pub total_patients: usize,
    pub average_age: f64,
    pub min_age: u32,
    pub max_age: u32,
    pub completion_rate_percent: f64,
    pub adverse_event_rate_percent: f64,
}

/// All five query results bundled for the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResults {
    pub site_breakdown: Vec<SiteBreakdown>,
    pub enrollment_spans: Vec<EnrollmentSpan>,
    pub high_risk_patients: Vec<HighRiskPatient>,
    pub site_grades: Vec<SiteGrade>,
    pub overall_summary: Option<OverallSummary>,
}

impl PatientStore {
    /// Query 1: per-site totals split by outcome and adverse status.
    pub fn site_breakdown(&self) -> Result<Vec<SiteBreakdown>> {
        let mut stmt = self.connection().prepare(
            "SELECT trial_site,
                    COUNT(*) AS total,
                    SUM(CASE WHEN completed_trial = 1 THEN 1 ELSE 0 END) AS completed,
                    SUM(CASE WHEN completed_trial = 0 THEN 1 ELSE 0 END) AS incomplete,
                    SUM(CASE WHEN adverse_event = 1 THEN 1 ELSE 0 END) AS with_adverse,
                    SUM(CASE WHEN adverse_event = 0 THEN 1 ELSE 0 END) AS without_adverse
             FROM patients
             GROUP BY trial_site
             ORDER BY trial_site",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(SiteBreakdown {
                site: row.get(0)?,
                total: row.get::<_, i64>(1)? as usize,
                completed: row.get::<_, i64>(2)? as usize,
                incomplete: row.get::<_, i64>(3)? as usize,
                with_adverse: row.get::<_, i64>(4)? as usize,
                without_adverse: row.get::<_, i64>(5)? as usize,
            })
        })?;

        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Query 2: enrollment volume and date window per site.
    pub fn enrollment_spans(&self) -> Result<Vec<EnrollmentSpan>> {
        let mut stmt = self.connection().prepare(
            "SELECT trial_site,
                    COUNT(*) AS total_enrolled,
                    MIN(enrollment_date) AS first_enrollment,
                    MAX(enrollment_date) AS last_enrollment
             FROM patients
             GROUP BY trial_site
             ORDER BY total_enrolled DESC, trial_site",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(EnrollmentSpan {
                site: row.get(0)?,
                total_enrolled: row.get::<_, i64>(1)? as usize,
                first_enrollment: row.get(2)?,
                last_enrollment: row.get(3)?,
            })
        })?;

        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Query 3: adverse event and did not complete, oldest first.
    pub fn high_risk_patients(&self) -> Result<Vec<HighRiskPatient>> {
        let mut stmt = self.connection().prepare(
            "SELECT patient_id, trial_site, age
             FROM patients
             WHERE adverse_event = 1 AND completed_trial = 0
             ORDER BY age DESC, patient_id",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(HighRiskPatient {
                patient_id: row.get(0)?,
                site: row.get(1)?,
                age: row.get(2)?,
            })
        })?;

        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Query 4: per-site completion percentage with letter grade.
    ///
    /// The grade tiers apply to the rounded percentage, so a site at 89.995
    /// raw grades on its reported 90.0.
    pub fn site_grades(&self) -> Result<Vec<SiteGrade>> {
        let mut stmt = self.connection().prepare(
            "SELECT trial_site,
                    COUNT(*) AS total,
                    SUM(completed_trial) AS completed
             FROM patients
             GROUP BY trial_site",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)? as usize,
                row.get::<_, i64>(2)? as usize,
            ))
        })?;

        let mut grades: Vec<SiteGrade> = rows
            .collect::<std::result::Result<Vec<_>, _>>()?
            .into_iter()
            .map(|(site, total, completed)| {
                let rate = round2(completed as f64 / total as f64 * 100.0);
                SiteGrade {
                    site,
                    total,
                    completed,
                    completion_rate_percent: rate,
                    grade: Grade::from_completion_rate(rate),
                }
            })
            .collect();

        grades.sort_by(|a, b| {
            b.completion_rate_percent
                .partial_cmp(&a.completion_rate_percent)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.site.cmp(&b.site))
        });

        Ok(grades)
    }

    /// Query 5: aggregate summary of the whole table, `None` when empty.
    pub fn overall_summary(&self) -> Result<Option<OverallSummary>> {
        let row = self.connection().query_row(
            "SELECT COUNT(*),
                    AVG(age),
                    MIN(age),
                    MAX(age),
                    SUM(completed_trial),
                    SUM(adverse_event)
             FROM patients",
            [],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, Option<f64>>(1)?,
                    row.get::<_, Option<u32>>(2)?,
                    row.get::<_, Option<u32>>(3)?,
                    row.get::<_, Option<i64>>(4)?,
                    row.get::<_, Option<i64>>(5)?,
                ))
            },
        )?;

        let (total, avg_age, min_age, max_age, completed, adverse) = row;
        if total == 0 {
            return Ok(None);
        }

        let total = total as usize;
        Ok(Some(OverallSummary {
            total_patients: total,
            average_age: round2(avg_age.unwrap_or(0.0)),
            min_age: min_age.unwrap_or(0),
            max_age: max_age.unwrap_or(0),
            completion_rate_percent: round2(
                completed.unwrap_or(0) as f64 / total as f64 * 100.0,
            ),
            adverse_event_rate_percent: round2(
                adverse.unwrap_or(0) as f64 / total as f64 * 100.0,
            ),
        }))
    }

    /// Run the full catalogue.
    pub fn run_all_queries(&self) -> Result<QueryResults> {
        Ok(QueryResults {
            site_breakdown: self.site_breakdown()?,
            enrollment_spans: self.enrollment_spans()?,
            high_risk_patients: self.high_risk_patients()?,
            site_grades: self.site_grades()?,
            overall_summary: self.overall_summary()?,
        })
    }
}
