// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Load .env (if any) and parse command-line arguments using clap
// 2. Set up logging
// 3. Run the pipeline (Ctrl-C cancels it)
// 4. Print the report as a table or JSON
// 5. Exit with proper code (0 = all saved, 1 = some items failed, 2 = error)
// =============================================================================

mod cli;
mod config;
mod error;
mod extract;
mod fetch;
mod logging;
mod naming;
mod pipeline;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use cli::Cli;
use pipeline::RunReport;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = every discovered image was saved
//   Ok(1) = the run finished but some items failed
//   Err   = fatal error (exit code 2)
async fn run() -> Result<i32> {
    // A missing .env is fine, the values can come from flags or the real env
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let config = cli.to_pipeline_config()?;
    info!(
        base_url = %config.base_url,
        save_dir = %config.save_dir.display(),
        policy = ?config.policy,
        "starting harvest"
    );

    // Dropping the pipeline future cancels every in-flight request
    let report = tokio::select! {
        result = pipeline::run(&config) => result?,
        _ = tokio::signal::ctrl_c() => return Err(crate::error::Error::Interrupted.into()),
    };

    print_results(&report, cli.json)?;

    Ok(exit_code(&report))
}

fn exit_code(report: &RunReport) -> i32 {
    if report.is_complete() {
        0
    } else {
        1
    }
}

fn print_results(report: &RunReport, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(report)?;
        println!("{}", json_output);
    } else {
        print_table(report);
    }
    Ok(())
}

fn print_table(report: &RunReport) {
    println!("{:<40} {:<10} {:<50}", "NAME / URL", "STATUS", "DETAIL");
    println!("{}", "=".repeat(100));

    for saved in &report.saved {
        println!(
            "{:<40} {:<10} {:<50}",
            truncate(&saved.display_name, 37),
            "SAVED",
            saved.path.display()
        );
    }
    for failure in &report.failures {
        println!(
            "{:<40} {:<10} {:<50}",
            truncate(&failure.url, 37),
            format!("FAILED ({})", failure.stage),
            failure.reason
        );
    }

    println!();
    println!("Summary:");
    println!("   Discovered: {}", report.discovered);
    println!("   Saved:      {}", report.saved.len());
    println!("   Failed:     {}", report.failures.len());
}

// Char-aware so display names with accents don't split a code point
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
