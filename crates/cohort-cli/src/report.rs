//! Text report rendering.
//!
//! Layout lives entirely here; the core only supplies the derived values.

use cohort::query::QueryResults;
use cohort::AnalysisOutcome;

const RULE: &str =
    "======================================================================";
const LINE: &str =
    "----------------------------------------------------------------------";

/// Render the full console report: summary, advanced analysis, and the five
/// query sections.
pub fn render(outcome: &AnalysisOutcome, queries: &QueryResults) -> String {
    let mut out = Vec::new();

    render_summary(&mut out, outcome);
    render_analysis(&mut out, outcome);
    render_queries(&mut out, queries);

    out.join("\n")
}

fn render_summary(out: &mut Vec<String>, outcome: &AnalysisOutcome) {
    let stats = &outcome.stats;

    out.push(RULE.to_string());
    out.push("CLINICAL TRIAL DATA SUMMARY REPORT".to_string());
    out.push(RULE.to_string());
    out.push(String::new());

    out.push("ENROLLMENT SUMMARY".to_string());
    out.push(format!("  Total Patients Enrolled: {}", stats.total_patients));
    out.push(String::new());

    out.push("PATIENTS PER TRIAL SITE".to_string());
    for (site, count) in &stats.patients_per_site {
        out.push(format!("  {site}: {count}"));
    }
    out.push(String::new());

    out.push("DEMOGRAPHICS".to_string());
    out.push(format!("  Average Age: {} years", stats.average_age));
    out.push(String::new());

    out.push("TRIAL OUTCOMES".to_string());
    out.push(format!("  Completion Rate: {}%", stats.completion_rate_percent));
    out.push(format!(
        "  Adverse Event Rate: {}%",
        stats.adverse_event_rate_percent
    ));
    out.push(String::new());

    out.push("OUTCOME COMPARISON".to_string());
    out.push(format!(
        "  Completion Rate (with adverse events): {}%",
        stats.completion_rate_with_adverse_percent
    ));
    out.push(format!(
        "  Completion Rate (without adverse events): {}%",
        stats.completion_rate_without_adverse_percent
    ));
    out.push(String::new());

    out.push("DATA QUALITY".to_string());
    out.push(format!("  Valid Records: {}", stats.data_quality.valid_records));
    out.push(format!(
        "  Invalid Records: {}",
        stats.data_quality.invalid_records
    ));

    let details = &stats.data_quality.invalid_record_details;
    if !details.is_empty() {
        out.push(String::new());
        out.push("INVALID RECORDS DETAILS".to_string());
        for (i, invalid) in details.iter().take(5).enumerate() {
            let id = if invalid.raw.patient_id.trim().is_empty() {
                "UNKNOWN"
            } else {
                invalid.raw.patient_id.trim()
            };
            out.push(format!("  {}. Patient ID: {id}", i + 1));
            out.push(format!("     Errors: {}", invalid.validation_errors.join(", ")));
        }
        if details.len() > 5 {
            out.push(format!("  ... and {} more (see the validation log)", details.len() - 5));
        }
    }

    out.push(RULE.to_string());
}

fn render_analysis(out: &mut Vec<String>, outcome: &AnalysisOutcome) {
    let analysis = &outcome.analysis;

    out.push(String::new());
    out.push(RULE.to_string());
    out.push("ADVANCED ANALYSIS".to_string());
    out.push(RULE.to_string());

    out.push(String::new());
    out.push("Site Performance Ranking:".to_string());
    out.push(LINE.to_string());
    out.push(format!(
        "{:<15} {:<10} {:<12} {:<12} {:<10}",
        "Site", "Patients", "Rate", "Adverse", "Avg Age"
    ));
    out.push(LINE.to_string());
    for site in &analysis.site_rankings {
        out.push(format!(
            "{:<15} {:<10} {:<12} {:<12} {:<10}",
            site.site,
            site.patients,
            format!("{}%", site.completion_rate_percent),
            site.adverse_events,
            site.mean_age
        ));
    }

    out.push(String::new());
    out.push("Age Group Breakdown:".to_string());
    out.push(LINE.to_string());
    out.push(format!(
        "{:<10} {:<10} {:<15} {:<15}",
        "Bucket", "Patients", "Completion", "Adverse"
    ));
    out.push(LINE.to_string());
    for bucket in &analysis.age_buckets {
        out.push(format!(
            "{:<10} {:<10} {:<15} {:<15}",
            bucket.bucket,
            bucket.patients,
            format!("{}%", bucket.completion_rate_percent),
            format!("{}%", bucket.adverse_rate_percent)
        ));
    }

    out.push(String::new());
    out.push("Key Insights:".to_string());
    out.push(LINE.to_string());
    out.push(format!(
        "  Patients without adverse events are {}% more likely to complete",
        analysis.insights.adverse_impact_percent
    ));
    out.push(format!(
        "  Completers are on average {} years older than non-completers",
        analysis.insights.age_gap_years
    ));
    if let (Some(best), Some(worst)) = (
        analysis.insights.best_site.as_deref(),
        analysis.insights.worst_site.as_deref(),
    ) {
        out.push(format!("  Best Performing Site: {best}"));
        out.push(format!("  Worst Performing Site: {worst}"));
    }

    out.push(RULE.to_string());
}

fn render_queries(out: &mut Vec<String>, queries: &QueryResults) {
    out.push(String::new());
    out.push(RULE.to_string());
    out.push("DATABASE QUERY RESULTS".to_string());
    out.push(RULE.to_string());

    out.push(String::new());
    out.push("Query 1: Patient Report by Site".to_string());
    out.push(LINE.to_string());
    out.push(format!(
        "{:<15} {:<8} {:<12} {:<12} {:<15} {:<12}",
        "Site", "Total", "Completed", "Incomplete", "With Adverse", "No Adverse"
    ));
    for row in &queries.site_breakdown {
        out.push(format!(
            "{:<15} {:<8} {:<12} {:<12} {:<15} {:<12}",
            row.site, row.total, row.completed, row.incomplete, row.with_adverse,
            row.without_adverse
        ));
    }

    out.push(String::new());
    out.push("Query 2: Enrollment Summary by Site".to_string());
    out.push(LINE.to_string());
    out.push(format!(
        "{:<15} {:<15} {:<15} {:<15}",
        "Site", "Total Enrolled", "First Patient", "Last Patient"
    ));
    for row in &queries.enrollment_spans {
        out.push(format!(
            "{:<15} {:<15} {:<15} {:<15}",
            row.site, row.total_enrolled, row.first_enrollment, row.last_enrollment
        ));
    }

    out.push(String::new());
    out.push("Query 3: High-Risk Patients (Adverse Events + Incomplete)".to_string());
    out.push(LINE.to_string());
    out.push(format!("{:<12} {:<15} {:<6} {:<20}", "Patient ID", "Site", "Age", "Status"));
    for row in &queries.high_risk_patients {
        out.push(format!(
            "{:<12} {:<15} {:<6} {:<20}",
            row.patient_id, row.site, row.age, "Adverse + Incomplete"
        ));
    }
    out.push(format!(
        "Total high-risk patients: {}",
        queries.high_risk_patients.len()
    ));

    out.push(String::new());
    out.push("Query 4: Site Performance Ranking".to_string());
    out.push(LINE.to_string());
    out.push(format!(
        "{:<15} {:<8} {:<12} {:<10} {:<15}",
        "Site", "Total", "Completed", "Rate", "Grade"
    ));
    for row in &queries.site_grades {
        out.push(format!(
            "{:<15} {:<8} {:<12} {:<10} {:<15}",
            row.site,
            row.total,
            row.completed,
            format!("{}%", row.completion_rate_percent),
            row.grade.label()
        ));
    }

    out.push(String::new());
    out.push("Query 5: Statistical Summary of All Patients".to_string());
    out.push(LINE.to_string());
    match &queries.overall_summary {
        Some(summary) => {
            out.push(format!("Total Patients: {}", summary.total_patients));
            out.push(format!("Average Age: {} years", summary.average_age));
            out.push(format!(
                "Age Range: {} - {} years",
                summary.min_age, summary.max_age
            ));
            out.push(format!(
                "Overall Completion Rate: {}%",
                summary.completion_rate_percent
            ));
            out.push(format!(
                "Overall Adverse Event Rate: {}%",
                summary.adverse_event_rate_percent
            ));
        }
        None => out.push("No patients in the store.".to_string()),
    }

    out.push(RULE.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use cohort::Analyzer;

    const SAMPLE: &str = "\
patient_id,trial_site,enrollment_date,age,adverse_event,completed_trial
P001,Boston,2024-01-15,45,false,true
P002,Chicago,2024-01-16,52,true,false
P003,,2024-01-17,38,false,true
";

    #[test]
    fn test_report_sections_present() {
        let outcome = Analyzer::new()
            .analyze_bytes(SAMPLE.as_bytes(), "sample.csv")
            .unwrap();

        let mut store = cohort::PatientStore::open_in_memory().unwrap();
        store.replace_all(&outcome.dataset.valid).unwrap();
        let queries = store.run_all_queries().unwrap();

        let text = render(&outcome, &queries);

        assert!(text.contains("CLINICAL TRIAL DATA SUMMARY REPORT"));
        assert!(text.contains("Total Patients Enrolled: 2"));
        assert!(text.contains("Invalid Records: 1"));
        assert!(text.contains("Errors: Missing trial site"));
        assert!(text.contains("ADVANCED ANALYSIS"));
        assert!(text.contains("Query 5: Statistical Summary"));
    }

    #[test]
    fn test_empty_store_section() {
        let outcome = Analyzer::new()
            .analyze_bytes(
                b"patient_id,trial_site,enrollment_date,age,adverse_event,completed_trial\n",
                "empty.csv",
            )
            .unwrap();

        let store = cohort::PatientStore::open_in_memory().unwrap();
        let queries = store.run_all_queries().unwrap();

        let text = render(&outcome, &queries);
        assert!(text.contains("No patients in the store."));
    }
}
