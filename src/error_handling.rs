use log::SetLoggerError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Error types for the live WHOIS fetch.
///
/// Any of these aborts the run before the comparison: a partial response
/// must never be diffed against the snapshot.
#[derive(Error, Debug)]
pub enum FetchError {
    /// TCP connection to the whois server failed.
    #[error("Error connecting to {server}: {source}")]
    Connect {
        server: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing the query or reading the response failed mid-stream.
    #[error("Error reading from {server}: {source}")]
    Io {
        server: String,
        #[source]
        source: std::io::Error,
    },

    /// The whole fetch did not complete within the configured timeout.
    #[error("Whois query to {server} timed out after {seconds}s")]
    Timeout { server: String, seconds: u64 },
}

/// Error types for SMTP report delivery.
///
/// Mail errors are logged and swallowed by the caller; a lost notification
/// does not fail the run, since the comparison already happened.
#[derive(Error, Debug)]
pub enum MailError {
    /// TCP connection to the SMTP server failed.
    #[error("Error connecting to SMTP server {server}: {source}")]
    Connect {
        server: String,
        #[source]
        source: std::io::Error,
    },

    /// Socket error in the middle of the SMTP dialogue.
    #[error("SMTP I/O error with {server}: {source}")]
    Io {
        server: String,
        #[source]
        source: std::io::Error,
    },

    /// The server answered a command with an unexpected reply code.
    #[error("SMTP server {server} replied '{reply}' to {command}")]
    UnexpectedReply {
        server: String,
        command: String,
        reply: String,
    },

    /// The SMTP dialogue did not complete within the configured timeout.
    #[error("SMTP delivery via {server} timed out after {seconds}s")]
    Timeout { server: String, seconds: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_messages_name_the_server() {
        let err = FetchError::Timeout {
            server: "whois.example.com:43".into(),
            seconds: 30,
        };
        assert!(err.to_string().contains("whois.example.com:43"));
        assert!(err.to_string().contains("30"));
    }

    #[test]
    fn test_mail_error_unexpected_reply_message() {
        let err = MailError::UnexpectedReply {
            server: "smtp.example.com:25".into(),
            command: "MAIL FROM".into(),
            reply: "550 no".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("MAIL FROM"));
        assert!(msg.contains("550 no"));
    }
}
