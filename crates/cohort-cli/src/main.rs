//! Cohort CLI - clinical trial data analyzer.

mod cli;
mod commands;
mod report;
mod server;
mod validation_log;
mod web;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            file,
            output,
            db,
            log,
        } => commands::analyze::run(file, output, db, log, cli.verbose),

        Commands::Serve { port, db, no_open } => {
            commands::serve::run(port, db, no_open, cli.verbose)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
