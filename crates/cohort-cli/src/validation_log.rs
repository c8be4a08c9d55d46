//! Validation log file: one appended session per run.
//!
//! Defect details stay out of the console; this file is the audit trail the
//! report points at when invalid records are found.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::Local;
use cohort::AnalysisOutcome;

const RULE: &str =
    "======================================================================";

/// Append one validation session to the log file.
pub fn append_session(
    log_path: &Path,
    source: &Path,
    outcome: &AnalysisOutcome,
) -> Result<(), std::io::Error> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    writeln!(file)?;
    writeln!(file, "{RULE}")?;
    writeln!(
        file,
        "VALIDATION SESSION: {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    )?;
    writeln!(file, "{RULE}")?;
    writeln!(file, "File: {}", source.display())?;
    writeln!(file, "Loaded {} record(s)", outcome.source.row_count)?;

    if !outcome.dataset.invalid.is_empty() {
        writeln!(file)?;
        writeln!(file, "INVALID RECORDS:")?;
        for invalid in &outcome.dataset.invalid {
            let id = if invalid.raw.patient_id.trim().is_empty() {
                "UNKNOWN"
            } else {
                invalid.raw.patient_id.trim()
            };
            writeln!(file, "  Patient {id}: {}", invalid.validation_errors.join(", "))?;
        }
    }

    writeln!(file)?;
    writeln!(file, "RESULT:")?;
    writeln!(file, "  Valid: {} record(s)", outcome.dataset.valid_count())?;
    writeln!(file, "  Invalid: {} record(s)", outcome.dataset.invalid_count())?;
    writeln!(file, "{RULE}")?;

    Ok(())
}
