//! Analyzer facade: one call from raw source to derived results.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::AdvancedAnalysis;
use crate::dataset::{DatasetLoader, DatasetReport};
use crate::error::Result;
use crate::input::{Parser, SourceMetadata};
use crate::stats::SummaryStatistics;

/// Everything one load produces. Owned by the invocation and discarded when
/// the next load begins; no history is retained in memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    /// Provenance of the ingested source.
    pub source: SourceMetadata,
    /// The valid/invalid partition.
    pub dataset: DatasetReport,
    /// Summary statistics over the valid set.
    pub stats: SummaryStatistics,
    /// Site, age, and insight breakdowns over the valid set.
    pub analysis: AdvancedAnalysis,
}

/// The main analysis pipeline.
///
/// Each call runs an independent parse, validate, and derive cycle; there is
/// no shared state between calls and re-running the same input reproduces
/// the same outcome.
#[derive(Debug, Default)]
pub struct Analyzer {
    parser: Parser,
    loader: DatasetLoader,
}

impl Analyzer {
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
            loader: DatasetLoader::new(),
        }
    }

    /// Analyze a CSV file on disk.
    pub fn analyze_file(&self, path: impl AsRef<Path>) -> Result<AnalysisOutcome> {
        let (table, source) = self.parser.parse_file(path)?;
        self.analyze_table(table, source)
    }

    /// Analyze raw CSV bytes (e.g. an upload). `label` names the source in
    /// the provenance metadata.
    pub fn analyze_bytes(&self, bytes: &[u8], label: &str) -> Result<AnalysisOutcome> {
        let (table, source) = self.parser.parse_bytes(bytes, label)?;
        self.analyze_table(table, source)
    }

    fn analyze_table(
        &self,
        table: crate::input::DataTable,
        source: SourceMetadata,
    ) -> Result<AnalysisOutcome> {
        let dataset = self.loader.load(&table)?;
        let stats = SummaryStatistics::from_report(&dataset);
        let analysis = AdvancedAnalysis::from_records(&dataset.valid);

        Ok(AnalysisOutcome {
            source,
            dataset,
            stats,
            analysis,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const SAMPLE: &str = "\
patient_id,trial_site,enrollment_date,age,adverse_event,completed_trial
P001,Boston,2024-01-15,45,false,true
P002,Chicago,2024-01-16,52,true,false
P003,Boston,bad-date,180,false,true
";

    #[test]
    fn test_analyze_file_end_to_end() {
        let file = create_test_file(SAMPLE);
        let outcome = Analyzer::new().analyze_file(file.path()).unwrap();

        assert_eq!(outcome.source.row_count, 3);
        assert_eq!(outcome.dataset.valid_count(), 2);
        assert_eq!(outcome.dataset.invalid_count(), 1);
        assert_eq!(outcome.stats.total_patients, 2);
        assert_eq!(outcome.analysis.site_rankings.len(), 2);
    }

    #[test]
    fn test_row_with_two_defects() {
        let file = create_test_file(SAMPLE);
        let outcome = Analyzer::new().analyze_file(file.path()).unwrap();

        let invalid = &outcome.dataset.invalid[0];
        assert_eq!(
            invalid.validation_errors,
            vec!["Invalid enrollment date", "Invalid age: 180"]
        );
    }

    #[test]
    fn test_bytes_and_file_agree() {
        let file = create_test_file(SAMPLE);
        let from_file = Analyzer::new().analyze_file(file.path()).unwrap();
        let from_bytes = Analyzer::new()
            .analyze_bytes(SAMPLE.as_bytes(), "upload.csv")
            .unwrap();

        assert_eq!(from_file.source.hash, from_bytes.source.hash);
        assert_eq!(
            serde_json::to_string(&from_file.stats).unwrap(),
            serde_json::to_string(&from_bytes.stats).unwrap()
        );
    }
}
