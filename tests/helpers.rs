// Shared test helpers: scripted stand-ins for the two network peers
// (whois server and SMTP relay) so the pipeline can be exercised
// end-to-end against localhost.

use std::net::SocketAddr;

use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Spawns a fake whois server that answers every connection with the given
/// response text and then closes the socket (the protocol's EOF framing).
/// Returns the address to point `--whois` at.
#[allow(dead_code)] // Used by other test files
pub async fn spawn_fake_whois(response: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let (mut socket, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => break,
            };
            let mut query = vec![0u8; 256];
            let _ = socket.read(&mut query).await;
            let _ = socket.write_all(response.as_bytes()).await;
        }
    });

    addr
}

/// What the fake SMTP relay saw during its one accepted session.
#[derive(Debug, Default)]
pub struct SmtpCapture {
    pub sessions: usize,
    pub mail_from: Option<String>,
    pub rcpt_to: Vec<String>,
    /// Message content between DATA and the terminating dot, CRLF intact
    pub data: String,
}

/// Spawns a fake SMTP relay that accepts a single session, walks the
/// HELO / MAIL FROM / RCPT TO / DATA / QUIT dialogue, and records what it
/// was told. The returned handle resolves once the session (or the
/// listener, if nothing connects and it is dropped) finishes.
#[allow(dead_code)] // Used by other test files
pub async fn spawn_fake_smtp() -> (SocketAddr, JoinHandle<SmtpCapture>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let mut capture = SmtpCapture::default();

        let (socket, _) = match listener.accept().await {
            Ok(conn) => conn,
            Err(_) => return capture,
        };
        capture.sessions += 1;

        let (read_half, mut write_half) = socket.into_split();
        let mut reader = BufReader::new(read_half);

        write_half.write_all(b"220 fake ESMTP\r\n").await.unwrap();

        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line).await.unwrap_or(0) == 0 {
                break;
            }
            let command = line.trim_end();

            if command.starts_with("HELO") {
                write_half.write_all(b"250 fake\r\n").await.unwrap();
            } else if let Some(sender) = command.strip_prefix("MAIL FROM:") {
                capture.mail_from = Some(sender.trim_matches(['<', '>']).to_string());
                write_half.write_all(b"250 OK\r\n").await.unwrap();
            } else if let Some(recipient) = command.strip_prefix("RCPT TO:") {
                capture
                    .rcpt_to
                    .push(recipient.trim_matches(['<', '>']).to_string());
                write_half.write_all(b"250 OK\r\n").await.unwrap();
            } else if command == "DATA" {
                write_half
                    .write_all(b"354 End data with <CR><LF>.<CR><LF>\r\n")
                    .await
                    .unwrap();
                loop {
                    line.clear();
                    if reader.read_line(&mut line).await.unwrap_or(0) == 0 {
                        break;
                    }
                    if line.trim_end() == "." {
                        break;
                    }
                    capture.data.push_str(&line);
                }
                write_half.write_all(b"250 queued\r\n").await.unwrap();
            } else if command == "QUIT" {
                let _ = write_half.write_all(b"221 bye\r\n").await;
                break;
            } else {
                write_half.write_all(b"500 what\r\n").await.unwrap();
            }
        }

        capture
    });

    (addr, handle)
}
