//! TCP reachability probing

use crate::inventory::SshEndpoint;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

/// Default connect timeout for reachability checks
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Whether a TCP connection to the endpoint's SSH port can be established
/// within `connect_timeout`. Failures are reported as `false`, never as
/// errors.
pub async fn is_reachable(endpoint: &SshEndpoint, connect_timeout: Duration) -> bool {
    let addr = endpoint.socket_addr();

    match timeout(connect_timeout, TcpStream::connect(&addr)).await {
        Ok(Ok(_)) => true,
        Ok(Err(e)) => {
            debug!("Failed to connect {}: {}", addr, e);
            false
        }
        Err(_) => {
            debug!("Connection to {} timed out", addr);
            false
        }
    }
}
