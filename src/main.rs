//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `whois_watch` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use whois_watch::initialization::init_logger_with;
use whois_watch::{run_check, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments into Config. Missing required flags and
    // malformed host:port values exit here, before any I/O.
    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    match run_check(config).await {
        Ok(report) => {
            if report.discrepancies.is_empty() {
                println!(
                    "No changes in {} whois record ({} fields) in {:.1}s",
                    report.zone, report.expected_fields, report.elapsed_seconds
                );
            } else {
                println!(
                    "{} discrepanc{} in {} whois record ({} expected fields, {} observed), report {} in {:.1}s",
                    report.discrepancies.len(),
                    if report.discrepancies.len() == 1 { "y" } else { "ies" },
                    report.zone,
                    report.expected_fields,
                    report.observed_fields,
                    if report.report_sent { "sent" } else { "not sent" },
                    report.elapsed_seconds
                );
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("whois_watch error: {:#}", e);
            process::exit(1);
        }
    }
}
