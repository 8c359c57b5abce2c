//! Report delivery via a minimal SMTP submission dialogue.
//!
//! The report is plain text and goes to a single relay in one shot, so the
//! full dialogue is HELO / MAIL FROM / RCPT TO / DATA / QUIT over a plain
//! TCP stream, the same way the whois fetch talks to port 43. No AUTH, no
//! STARTTLS, no pipelining.

use std::time::Duration;

use chrono::Local;
use log::{debug, info};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;

use crate::config::SMTP_TIMEOUT_SECS;
use crate::error_handling::MailError;

/// Composes the full report message: RFC 2822 headers, a blank line, then
/// the report body. Pure; the `Date` header uses the local offset in
/// numeric-zone form.
pub fn compose_message(from: &str, to: &[String], zone: &str, body: &str) -> String {
    format!(
        "From: {}\nTo: {}\nDate: {}\nSubject: WARNING! Change in {} whois record\n\n{}",
        from,
        to.join(", "),
        Local::now().to_rfc2822(),
        zone,
        body
    )
}

/// Sends the discrepancy report for a zone via the given SMTP relay.
///
/// Does nothing when `body` is empty (no changes means no mail). Otherwise
/// performs exactly one SMTP submission under an overall timeout. Errors
/// are returned to the caller, which logs and swallows them: losing the
/// notification is not worth failing a run whose comparison already
/// happened.
pub async fn send_report(
    server: &str,
    from: &str,
    to: &[String],
    zone: &str,
    body: &str,
) -> Result<(), MailError> {
    if body.is_empty() {
        return Ok(());
    }

    let message = compose_message(from, to, zone, body);
    let timeout = Duration::from_secs(SMTP_TIMEOUT_SECS);

    info!(
        "Sending whois change report for {} to {} via {}",
        zone,
        to.join(", "),
        server
    );

    let result = tokio::time::timeout(timeout, submit(server, from, to, &message)).await;
    match result {
        Ok(inner) => inner,
        Err(_) => Err(MailError::Timeout {
            server: server.to_string(),
            seconds: timeout.as_secs(),
        }),
    }
}

/// One complete SMTP submission dialogue.
async fn submit(server: &str, from: &str, to: &[String], message: &str) -> Result<(), MailError> {
    let stream = TcpStream::connect(server)
        .await
        .map_err(|source| MailError::Connect {
            server: server.to_string(),
            source,
        })?;
    let (read_half, write_half) = stream.into_split();
    let mut session = Session {
        server,
        reader: BufReader::new(read_half),
        writer: BufWriter::new(write_half),
    };

    session.expect_reply("greeting", b'2').await?;
    session.command("HELO whois_watch", b'2').await?;
    session
        .command(&format!("MAIL FROM:<{}>", from), b'2')
        .await?;
    for recipient in to {
        session
            .command(&format!("RCPT TO:<{}>", recipient), b'2')
            .await?;
    }
    session.command("DATA", b'3').await?;
    session.send_data(message).await?;
    session.expect_reply("end of data", b'2').await?;
    // Best effort: the message is already accepted at this point
    let _ = session.command("QUIT", b'2').await;

    Ok(())
}

struct Session<'a> {
    server: &'a str,
    reader: BufReader<OwnedReadHalf>,
    writer: BufWriter<OwnedWriteHalf>,
}

impl Session<'_> {
    /// Writes one command line and checks the reply's code class.
    async fn command(&mut self, command: &str, expected_class: u8) -> Result<(), MailError> {
        debug!("SMTP >> {}", command);
        self.write_line(command).await?;
        self.expect_reply(command, expected_class).await
    }

    async fn write_line(&mut self, line: &str) -> Result<(), MailError> {
        self.writer
            .write_all(format!("{}\r\n", line).as_bytes())
            .await
            .map_err(|source| self.io_error(source))?;
        self.writer
            .flush()
            .await
            .map_err(|source| self.io_error(source))
    }

    /// Reads one (possibly multi-line) SMTP reply and verifies that its
    /// code starts with `expected_class` (b'2' for 2xx, b'3' for 354).
    async fn expect_reply(&mut self, command: &str, expected_class: u8) -> Result<(), MailError> {
        let reply = self.read_reply().await?;
        debug!("SMTP << {}", reply);
        if reply.as_bytes().first() == Some(&expected_class) {
            Ok(())
        } else {
            Err(MailError::UnexpectedReply {
                server: self.server.to_string(),
                command: command.to_string(),
                reply,
            })
        }
    }

    /// Reads reply lines until the final one (code followed by a space, not
    /// a dash) and returns it.
    async fn read_reply(&mut self) -> Result<String, MailError> {
        loop {
            let mut line = String::new();
            let n = self
                .reader
                .read_line(&mut line)
                .await
                .map_err(|source| self.io_error(source))?;
            if n == 0 {
                return Err(self.io_error(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "connection closed mid-dialogue",
                )));
            }
            let line = line.trim_end().to_string();
            if line.len() < 4 || line.as_bytes()[3] != b'-' {
                return Ok(line);
            }
        }
    }

    /// Transmits the message body with dot-stuffing and the CRLF.CRLF
    /// terminator.
    async fn send_data(&mut self, message: &str) -> Result<(), MailError> {
        for line in message.split('\n') {
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.starts_with('.') {
                self.writer
                    .write_all(b".")
                    .await
                    .map_err(|source| self.io_error(source))?;
            }
            self.writer
                .write_all(line.as_bytes())
                .await
                .map_err(|source| self.io_error(source))?;
            self.writer
                .write_all(b"\r\n")
                .await
                .map_err(|source| self.io_error(source))?;
        }
        self.writer
            .write_all(b".\r\n")
            .await
            .map_err(|source| self.io_error(source))?;
        self.writer
            .flush()
            .await
            .map_err(|source| self.io_error(source))
    }

    fn io_error(&self, source: std::io::Error) -> MailError {
        MailError::Io {
            server: self.server.to_string(),
            source,
        }
    }
}
