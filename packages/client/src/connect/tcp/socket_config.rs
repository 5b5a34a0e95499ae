//! TCP socket configuration utilities
//!
//! Applies the low-latency policy (`TCP_NODELAY`) and optional keepalive to
//! a freshly connected stream.

use socket2::{SockRef, TcpKeepalive};
use tokio::net::TcpStream;

use crate::config::TcpConfig;
use crate::error::{self, Result};

/// Configure a connected TCP stream according to `config`.
///
/// # Errors
///
/// Returns a `Kind::Connect` error if the operating system rejects an option.
pub fn configure_tcp_socket(stream: &TcpStream, config: &TcpConfig) -> Result<()> {
    if config.nodelay {
        stream
            .set_nodelay(true)
            .map_err(|e| error::connect(format!("Failed to set TCP_NODELAY: {e}")))?;
    }

    if let Some(idle) = config.keepalive {
        let keepalive = TcpKeepalive::new().with_time(idle);
        SockRef::from(stream)
            .set_tcp_keepalive(&keepalive)
            .map_err(|e| error::connect(format!("Failed to set TCP keepalive: {e}")))?;
        tracing::trace!("TCP keepalive set to {:?}", idle);
    }

    Ok(())
}
