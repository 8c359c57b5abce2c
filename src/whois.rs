//! Live WHOIS record fetch over TCP.

use std::time::Duration;

use log::{debug, info};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::error_handling::FetchError;

/// Queries a WHOIS server for a zone and returns the raw response text.
///
/// Opens a TCP connection to `server` (`host:port`), writes the query line
/// (`<zone>\r\n`), and reads until the peer closes the connection; the
/// classic port-43 protocol has no framing beyond EOF. The entire exchange
/// runs under one overall `timeout`. The response is decoded as UTF-8 with
/// lossy replacement; registries occasionally emit stray Latin-1 bytes and
/// the field parser only cares about line structure.
pub async fn fetch_record(
    server: &str,
    zone: &str,
    timeout: Duration,
) -> Result<String, FetchError> {
    info!("Querying whois server {} for {}", server, zone);

    let result = tokio::time::timeout(timeout, async {
        let mut stream = TcpStream::connect(server)
            .await
            .map_err(|source| FetchError::Connect {
                server: server.to_string(),
                source,
            })?;

        stream
            .write_all(format!("{}\r\n", zone).as_bytes())
            .await
            .map_err(|source| FetchError::Io {
                server: server.to_string(),
                source,
            })?;

        let mut response = Vec::new();
        stream
            .read_to_end(&mut response)
            .await
            .map_err(|source| FetchError::Io {
                server: server.to_string(),
                source,
            })?;

        Ok(String::from_utf8_lossy(&response).into_owned())
    })
    .await;

    match result {
        Ok(Ok(response)) => {
            debug!(
                "Received {} bytes from {} for {}",
                response.len(),
                server,
                zone
            );
            Ok(response)
        }
        Ok(Err(e)) => Err(e),
        Err(_) => Err(FetchError::Timeout {
            server: server.to_string(),
            seconds: timeout.as_secs(),
        }),
    }
}
