//! Cohort: validation and analysis engine for clinical trial enrollment data.
//!
//! Cohort ingests a CSV of patient records, partitions the rows into typed
//! valid records and diagnosed invalid records, and derives summary
//! statistics, site/age breakdowns, and a fixed catalogue of aggregation
//! queries over a persisted patient table.
//!
//! # Core Principles
//!
//! - **Strict at the boundary**: untyped rows become [`PatientRecord`] or
//!   [`InvalidRecord`] during validation and nothing untyped flows further
//! - **Row defects are data**: a bad row is excluded and reported, never an
//!   error; only structural problems fail a load
//! - **Deterministic**: the same input reproduces the same partition and
//!   the same statistics, byte for byte
//!
//! # Example
//!
//! ```no_run
//! use cohort::Analyzer;
//!
//! let analyzer = Analyzer::new();
//! let outcome = analyzer.analyze_file("trial_data.csv").unwrap();
//!
//! println!("Valid: {}", outcome.dataset.valid_count());
//! println!("Completion: {}%", outcome.stats.completion_rate_percent);
//! ```

pub mod analysis;
pub mod dataset;
pub mod error;
pub mod export;
pub mod input;
pub mod query;
pub mod record;
pub mod stats;

mod analyzer;

pub use crate::analyzer::{AnalysisOutcome, Analyzer};
pub use analysis::{AdvancedAnalysis, AgeBucketBreakdown, KeyInsights, SitePerformance};
pub use dataset::{DatasetLoader, DatasetReport};
pub use error::{CohortError, Result};
pub use input::{DataTable, Parser, SourceMetadata};
pub use query::{Grade, PatientStore};
pub use record::{InvalidRecord, PatientRecord, RawRow, RecordValidator};
pub use stats::SummaryStatistics;
