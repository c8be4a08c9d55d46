//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Cohort: clinical trial data analyzer
#[derive(Parser)]
#[command(name = "cohort")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a trial data CSV: validate, report, export, and persist
    Analyze {
        /// Path to the trial data file (CSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path for the JSON statistics payload
        /// (default: trial_results.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// SQLite database for the persisted patient table
        #[arg(long, default_value = "trial_data.db")]
        db: PathBuf,

        /// Validation log file (one session appended per run)
        #[arg(long, default_value = "data_validation.log")]
        log: PathBuf,
    },

    /// Start the web dashboard (upload and analyze in the browser)
    Serve {
        /// Port for the web server
        #[arg(short, long, default_value = "5000")]
        port: u16,

        /// SQLite database for the persisted patient table
        #[arg(long, default_value = "trial_data.db")]
        db: PathBuf,

        /// Don't automatically open the browser
        #[arg(long)]
        no_open: bool,
    },
}
