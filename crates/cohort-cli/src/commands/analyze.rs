//! Analyze command - validate a CSV, print the report, export and persist.

use std::path::PathBuf;

use cohort::{Analyzer, PatientStore};
use colored::Colorize;

use crate::report;
use crate::validation_log;

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    db: PathBuf,
    log: PathBuf,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    println!(
        "{} {}",
        "Analyzing".cyan().bold(),
        file.display().to_string().white()
    );

    let outcome = Analyzer::new().analyze_file(&file)?;

    if verbose {
        println!();
        println!("{}", "Source:".yellow().bold());
        println!("  hash:    {}", outcome.source.hash);
        println!("  rows:    {}", outcome.source.row_count);
        println!("  columns: {}", outcome.source.column_count);
    }

    // Defect details go to the log file, not the console
    validation_log::append_session(&log, &file, &outcome)?;

    if outcome.dataset.invalid_count() > 0 {
        println!();
        println!(
            "{} Found {} invalid record(s), excluded from analysis",
            "Warning:".yellow().bold(),
            outcome.dataset.invalid_count().to_string().red()
        );
        println!("See '{}' for details", log.display());
    }

    // Persist the valid set and run the query catalogue against it
    let mut store = PatientStore::open(&db)?;
    store.replace_all(&outcome.dataset.valid)?;
    let queries = store.run_all_queries()?;

    println!();
    println!("{}", report::render(&outcome, &queries));

    let output_path = output.unwrap_or_else(|| PathBuf::from("trial_results.json"));
    outcome.stats.save_json(&output_path)?;

    println!();
    println!(
        "{} {}",
        "JSON exported to".green().bold(),
        output_path.display().to_string().white()
    );
    println!(
        "{} {}",
        "Data loaded to SQLite:".green().bold(),
        db.display().to_string().white()
    );

    Ok(())
}
