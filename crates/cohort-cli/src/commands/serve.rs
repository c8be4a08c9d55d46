//! Serve command - start the web dashboard.

use std::path::PathBuf;

use colored::Colorize;

use crate::server::{app, state::AppState};

pub fn run(
    port: u16,
    db: PathBuf,
    no_open: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::open(db)?;

    let url = format!("http://localhost:{}", port);
    println!();
    println!(
        "{} {}",
        "Starting dashboard at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!("  Database: {}", state.db_path.display());
    if verbose {
        println!("  Endpoints: /api/health /api/analyze /api/analysis /api/queries");
    }
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    if !no_open {
        if let Err(e) = open::that(&url) {
            eprintln!("{} Could not open browser: {}", "Warning:".yellow(), e);
        }
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        tokio::spawn(async {
            tokio::signal::ctrl_c().await.ok();
            println!();
            println!("{}", "Shutting down...".yellow());
            std::process::exit(0);
        });

        if let Err(e) = app::run_server(state, port).await {
            eprintln!("Server error: {}", e);
        }
    });

    Ok(())
}
