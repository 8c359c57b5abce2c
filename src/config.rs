use std::path::PathBuf;

use clap::{Parser, ValueEnum};

// constants (used as defaults)
/// Default WHOIS server to query
pub const DEFAULT_WHOIS_SERVER: &str = "whois.networksolutions.com:43";
/// Default SMTP relay for report delivery
pub const DEFAULT_SMTP_SERVER: &str = "gmail-smtp-in.l.google.com:25";
/// Overall WHOIS fetch timeout in seconds (connect + query + read to EOF)
pub const DEFAULT_WHOIS_TIMEOUT_SECS: u64 = 30;
/// SMTP dialogue timeout in seconds
pub const SMTP_TIMEOUT_SECS: u64 = 30;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to
/// most verbose (Trace). Used with the `--log-level` CLI option.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    Plain,
    Json,
}

/// A non-empty list of report recipients.
///
/// A newtype rather than a bare `Vec<String>` so clap treats the whole
/// comma-separated list as one argument value instead of collecting
/// repeated occurrences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipients(Vec<String>);

impl std::ops::Deref for Recipients {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.0
    }
}

impl Recipients {
    /// The recipient addresses, in the order given on the command line.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// Command-line options and configuration.
///
/// This struct is automatically generated by `clap` from the field
/// attributes. Required values and `host:port` shapes are validated before
/// any I/O happens; a bad invocation exits with a usage message without
/// touching the network.
///
/// # Examples
///
/// ```bash
/// # Capture the expected snapshot once, then watch for changes
/// whois -h whois.networksolutions.com example.com > expected-output
/// whois_watch --zone example.com --expect expected-output \
///     --from ww@example.com --to alert@example.com
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "whois_watch",
    about = "Watches the whois record for a zone and reports differences via email."
)]
pub struct Config {
    /// The zone to check in whois
    #[arg(long)]
    pub zone: String,

    /// File containing the expected output from whois
    #[arg(long, value_parser)]
    pub expect: PathBuf,

    /// Email address to send the report from
    #[arg(long)]
    pub from: String,

    /// Comma-separated list of email addresses to send the report to
    #[arg(long, value_parser = parse_recipients)]
    pub to: Recipients,

    /// Whois server (host:port)
    #[arg(long, default_value = DEFAULT_WHOIS_SERVER, value_parser = parse_host_port)]
    pub whois: String,

    /// SMTP server to deliver the report through (host:port)
    #[arg(long, default_value = DEFAULT_SMTP_SERVER, value_parser = parse_host_port)]
    pub smtp: String,

    /// Overall whois fetch timeout in seconds
    #[arg(long, default_value_t = DEFAULT_WHOIS_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

/// Validates a `host:port` address without resolving it.
///
/// Accepts a non-empty host followed by a colon and a valid port number.
/// A host containing colons (an IPv6 literal) must be bracketed, as in
/// `[::1]:43`; an unbracketed multi-colon host is rejected. Used as a clap
/// value parser so malformed addresses are rejected before any network I/O
/// is attempted.
pub fn parse_host_port(s: &str) -> Result<String, String> {
    let (host, port) = s
        .rsplit_once(':')
        .ok_or_else(|| format!("'{}' must have format host:port", s))?;
    if host.is_empty() {
        return Err(format!("'{}' is missing a host", s));
    }
    if host.contains(':') {
        let bracketed = host
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .filter(|h| !h.is_empty());
        if bracketed.is_none() {
            return Err(format!(
                "'{}' has an unbracketed host containing ':' (IPv6 hosts need [..])",
                s
            ));
        }
    }
    port.parse::<u16>()
        .map_err(|_| format!("'{}' has an invalid port '{}'", s, port))?;
    Ok(s.to_string())
}

/// Splits a comma-separated recipient list, trimming whitespace around each
/// address and rejecting lists with no usable entries.
pub fn parse_recipients(s: &str) -> Result<Recipients, String> {
    let recipients: Vec<String> = s
        .split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect();
    if recipients.is_empty() {
        return Err("recipient list is empty".to_string());
    }
    Ok(Recipients(recipients))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_host_port_valid() {
        assert_eq!(
            parse_host_port("whois.networksolutions.com:43").unwrap(),
            "whois.networksolutions.com:43"
        );
        assert_eq!(parse_host_port("127.0.0.1:2525").unwrap(), "127.0.0.1:2525");
    }

    #[test]
    fn test_parse_host_port_missing_port() {
        assert!(parse_host_port("whois.networksolutions.com").is_err());
    }

    #[test]
    fn test_parse_host_port_bad_port() {
        assert!(parse_host_port("example.com:notaport").is_err());
        assert!(parse_host_port("example.com:99999").is_err());
    }

    #[test]
    fn test_parse_host_port_missing_host() {
        assert!(parse_host_port(":43").is_err());
    }

    #[test]
    fn test_parse_host_port_bracketed_ipv6() {
        assert_eq!(parse_host_port("[::1]:43").unwrap(), "[::1]:43");
        assert_eq!(
            parse_host_port("[2001:db8::25]:2525").unwrap(),
            "[2001:db8::25]:2525"
        );
    }

    #[test]
    fn test_parse_host_port_rejects_unbracketed_multi_colon_host() {
        assert!(parse_host_port("a:b:43").is_err());
        assert!(parse_host_port("::1:43").is_err());
        assert!(parse_host_port("[]:43").is_err());
    }

    #[test]
    fn test_parse_recipients_splits_and_trims() {
        let recipients = parse_recipients("a@example.com, b@example.com ,c@example.com").unwrap();
        assert_eq!(
            recipients.as_slice(),
            ["a@example.com", "b@example.com", "c@example.com"]
        );
    }

    #[test]
    fn test_parse_recipients_rejects_empty_list() {
        assert!(parse_recipients("").is_err());
        assert!(parse_recipients(" , ,").is_err());
    }
}
