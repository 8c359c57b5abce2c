//! whois_watch library: WHOIS record change detection
//!
//! Parses a previously captured WHOIS snapshot and a live WHOIS response
//! into normalized field maps, diffs them, and emails a report when the
//! records differ.
//!
//! # Example
//!
//! ```no_run
//! use clap::Parser;
//! use whois_watch::{run_check, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::parse_from([
//!     "whois_watch",
//!     "--zone", "example.com",
//!     "--expect", "expected-output",
//!     "--from", "ww@example.com",
//!     "--to", "alert@example.com",
//! ]);
//!
//! let report = run_check(config).await?;
//! println!("{} discrepancies found", report.discrepancies.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or call library functions within an async context.

#![warn(missing_docs)]

pub mod config;
mod error_handling;
pub mod initialization;
mod mail;
pub mod record;
mod whois;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{FetchError, MailError};
pub use run::{run_check, CheckReport};

// Internal run module (contains the check pipeline)
mod run {
    use std::time::Duration;

    use anyhow::{Context, Result};
    use log::{debug, error, info, warn};

    use crate::config::Config;
    use crate::mail::send_report;
    use crate::record::{diff_records, parse_record, Discrepancy};
    use crate::whois::fetch_record;

    /// Results of a completed WHOIS check run.
    #[derive(Debug, Clone)]
    pub struct CheckReport {
        /// The zone that was checked
        pub zone: String,
        /// Number of distinct fields in the expected snapshot
        pub expected_fields: usize,
        /// Number of distinct fields in the live response
        pub observed_fields: usize,
        /// Every detected difference, in report order
        pub discrepancies: Vec<Discrepancy>,
        /// Whether an email report was successfully handed to the SMTP server
        pub report_sent: bool,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Runs one WHOIS check with the provided configuration.
    ///
    /// This is the main entry point for the library. It loads and parses
    /// the expected snapshot, fetches and parses the live record, diffs the
    /// two, and emails the concatenated report when any discrepancies were
    /// found.
    ///
    /// # Errors
    ///
    /// Fails if the snapshot file is unreadable or the WHOIS fetch fails;
    /// in both cases no comparison happens and no mail is sent. Mail
    /// delivery errors are logged and swallowed: the comparison already
    /// happened, so the run itself still succeeds.
    pub async fn run_check(config: Config) -> Result<CheckReport> {
        let start_time = std::time::Instant::now();

        let snapshot = tokio::fs::read_to_string(&config.expect)
            .await
            .with_context(|| format!("Error reading file {}", config.expect.display()))?;
        let expected = parse_record(&snapshot);
        info!(
            "Loaded {} fields from {}",
            expected.len(),
            config.expect.display()
        );

        let response = fetch_record(
            &config.whois,
            &config.zone,
            Duration::from_secs(config.timeout_seconds),
        )
        .await
        .context("Whois fetch failed")?;
        let observed = parse_record(&response);
        debug!("Live record has {} fields", observed.len());

        let discrepancies = diff_records(&expected, &observed);
        for discrepancy in &discrepancies {
            warn!("{}", discrepancy);
        }

        let mut report_sent = false;
        if !discrepancies.is_empty() {
            let body: String = discrepancies
                .iter()
                .map(|d| format!("{}\n", d))
                .collect();
            match send_report(&config.smtp, &config.from, &config.to, &config.zone, &body).await {
                Ok(()) => report_sent = true,
                Err(e) => error!("{}", e),
            }
        }

        Ok(CheckReport {
            zone: config.zone,
            expected_fields: expected.len(),
            observed_fields: observed.len(),
            discrepancies,
            report_sent,
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        })
    }
}
