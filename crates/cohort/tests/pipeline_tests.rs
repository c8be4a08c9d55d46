//! End-to-end pipeline tests: CSV in, statistics and query results out.

use std::io::Write;

use cohort::{Analyzer, CohortError, PatientStore};
use tempfile::NamedTempFile;

fn csv_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

const HEADER: &str = "patient_id,trial_site,enrollment_date,age,adverse_event,completed_trial";

/// Thirty records across five sites with fixed per-site profiles:
/// Boston 100% completion / 0% adverse, Chicago 33%/100%,
/// LosAngeles 100%/0%, Miami 0%/100%, NewYork 80%/50% (5 records).
fn canonical_csv() -> String {
    let mut lines = vec![HEADER.to_string()];

    for i in 0..6 {
        lines.push(format!("B{i:02},Boston,2024-01-{:02},{},false,true", i + 1, 40 + i));
    }
    for i in 0..6 {
        lines.push(format!(
            "C{i:02},Chicago,2024-01-{:02},{},true,{}",
            i + 10,
            50 + i,
            i < 2
        ));
    }
    for i in 0..6 {
        lines.push(format!("L{i:02},LosAngeles,2024-01-{:02},{},false,true", i + 1, 30 + i));
    }
    for i in 0..6 {
        lines.push(format!("M{i:02},Miami,2024-01-{:02},{},true,false", i + 4, 60 + i));
    }
    for i in 0..5 {
        lines.push(format!(
            "N{i:02},NewYork,2024-01-{:02},{},{},{}",
            i + 2,
            45 + i,
            // 2 of 5 adverse, 4 of 5 completed
            i < 2,
            i < 4
        ));
    }

    lines.join("\n") + "\n"
}

#[test]
fn canonical_sample_site_ranking() {
    let file = csv_file(&canonical_csv());
    let outcome = Analyzer::new().analyze_file(file.path()).unwrap();

    let order: Vec<&str> = outcome
        .analysis
        .site_rankings
        .iter()
        .map(|s| s.site.as_str())
        .collect();

    // Boston and LosAngeles (both 100%) rank above NewYork (80%), Chicago
    // (33.33%), and Miami (0%); Miami is last.
    assert_eq!(order, ["Boston", "LosAngeles", "NewYork", "Chicago", "Miami"]);
    assert_eq!(outcome.analysis.insights.worst_site.as_deref(), Some("Miami"));
}

#[test]
fn canonical_sample_rates() {
    let file = csv_file(&canonical_csv());
    let outcome = Analyzer::new().analyze_file(file.path()).unwrap();
    let rankings = &outcome.analysis.site_rankings;

    let chicago = rankings.iter().find(|s| s.site == "Chicago").unwrap();
    assert_eq!(chicago.completion_rate_percent, 33.33);
    assert_eq!(chicago.adverse_rate_percent, 100.0);

    let newyork = rankings.iter().find(|s| s.site == "NewYork").unwrap();
    assert_eq!(newyork.completion_rate_percent, 80.0);
    assert_eq!(newyork.adverse_rate_percent, 40.0);
}

#[test]
fn per_site_counts_sum_to_total() {
    let file = csv_file(&canonical_csv());
    let outcome = Analyzer::new().analyze_file(file.path()).unwrap();

    let site_sum: usize = outcome.stats.patients_per_site.values().sum();
    assert_eq!(site_sum, outcome.stats.total_patients);

    let bucket_sum: usize = outcome.analysis.age_buckets.iter().map(|b| b.patients).sum();
    assert_eq!(bucket_sum, outcome.stats.total_patients);
}

#[test]
fn loading_twice_is_idempotent() {
    let content = canonical_csv();
    let file = csv_file(&content);

    let analyzer = Analyzer::new();
    let first = analyzer.analyze_file(file.path()).unwrap();
    let second = analyzer.analyze_file(file.path()).unwrap();

    assert_eq!(
        serde_json::to_string(&first.stats).unwrap(),
        serde_json::to_string(&second.stats).unwrap()
    );
    assert_eq!(first.dataset.valid, second.dataset.valid);
    assert_eq!(first.dataset.invalid_count(), second.dataset.invalid_count());
}

#[test]
fn invalid_rows_are_excluded_from_all_aggregates() {
    let content = format!(
        "{HEADER}\n\
         P001,Boston,2024-01-15,45,false,true\n\
         P002,,2024-01-16,52,true,false\n"
    );
    let file = csv_file(&content);
    let outcome = Analyzer::new().analyze_file(file.path()).unwrap();

    assert_eq!(outcome.stats.total_patients, 1);
    assert!(!outcome.stats.patients_per_site.contains_key(""));
    assert_eq!(outcome.stats.data_quality.invalid_records, 1);
    assert_eq!(
        outcome.stats.data_quality.invalid_record_details[0].validation_errors,
        vec!["Missing trial site"]
    );
    assert_eq!(outcome.analysis.site_rankings.len(), 1);
}

#[test]
fn missing_columns_fail_structurally() {
    let file = csv_file("patient_id,age\nP001,45\n");
    let err = Analyzer::new().analyze_file(file.path()).unwrap_err();
    assert!(matches!(err, CohortError::MissingColumns(_)));
}

#[test]
fn persisted_queries_match_in_memory_aggregates() {
    let file = csv_file(&canonical_csv());
    let outcome = Analyzer::new().analyze_file(file.path()).unwrap();

    let mut store = PatientStore::open_in_memory().unwrap();
    store.replace_all(&outcome.dataset.valid).unwrap();

    // The query layer reaches the same aggregates as the statistics engine.
    let summary = store.overall_summary().unwrap().unwrap();
    assert_eq!(summary.total_patients, outcome.stats.total_patients);
    assert_eq!(summary.average_age, outcome.stats.average_age);
    assert_eq!(summary.completion_rate_percent, outcome.stats.completion_rate_percent);
    assert_eq!(
        summary.adverse_event_rate_percent,
        outcome.stats.adverse_event_rate_percent
    );

    let breakdown = store.site_breakdown().unwrap();
    for row in &breakdown {
        assert_eq!(row.total, outcome.stats.patients_per_site[&row.site]);
    }

    // Grade ordering mirrors the analyzer's site ranking.
    let grade_order: Vec<String> = store
        .site_grades()
        .unwrap()
        .into_iter()
        .map(|g| g.site)
        .collect();
    let ranking_order: Vec<String> = outcome
        .analysis
        .site_rankings
        .iter()
        .map(|s| s.site.clone())
        .collect();
    assert_eq!(grade_order, ranking_order);
}

#[test]
fn high_risk_query_filters_and_orders() {
    let file = csv_file(&canonical_csv());
    let outcome = Analyzer::new().analyze_file(file.path()).unwrap();

    let mut store = PatientStore::open_in_memory().unwrap();
    store.replace_all(&outcome.dataset.valid).unwrap();

    let high_risk = store.high_risk_patients().unwrap();

    // Chicago has 4 adverse non-completers and Miami 6; NewYork's two
    // adverse patients both completed. Only adverse-and-incomplete
    // records appear.
    assert_eq!(high_risk.len(), 10);
    assert!(high_risk.windows(2).all(|w| w[0].age >= w[1].age));
    assert!(high_risk.iter().all(|p| p.site == "Chicago" || p.site == "Miami"));
}

#[test]
fn header_only_file_reports_zeros() {
    let file = csv_file(&format!("{HEADER}\n"));
    let outcome = Analyzer::new().analyze_file(file.path()).unwrap();

    assert_eq!(outcome.stats.total_patients, 0);
    assert_eq!(outcome.stats.completion_rate_percent, 0.0);
    assert!(outcome.analysis.site_rankings.is_empty());
    assert_eq!(outcome.analysis.age_buckets.len(), 5);
}
