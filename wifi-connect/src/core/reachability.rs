//! Internet reachability check.

use log::debug;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Returns true if a TCP connection to `host:port` opens within `limit`.
///
/// Name resolution counts against the limit. Any failure, including an
/// unresolvable host, is reported as unreachable.
pub async fn is_reachable(host: &str, port: u16, limit: Duration) -> bool {
    match timeout(limit, TcpStream::connect((host, port))).await {
        Ok(Ok(_stream)) => true,
        Ok(Err(e)) => {
            debug!("{host}:{port} unreachable: {e}");
            false
        }
        Err(_) => {
            debug!("{host}:{port} unreachable: timed out after {limit:?}");
            false
        }
    }
}
