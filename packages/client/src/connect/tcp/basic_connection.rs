//! Basic TCP connection establishment
//!
//! Walks the resolved candidate list in order. The first successful connect
//! wins and the remaining candidates are abandoned; nothing is retried.

use std::io;
use std::net::SocketAddr;

use tokio::net::TcpStream;

use crate::connect::Endpoint;
use crate::error::{self, Result};

/// Connect to the first reachable address in `addrs`.
///
/// # Errors
///
/// Returns a `Kind::Connect` error carrying the last candidate's I/O error
/// when every candidate refuses or is unreachable.
pub async fn connect_to_address_list(addrs: &[SocketAddr], endpoint: &Endpoint) -> Result<TcpStream> {
    let mut last_error: Option<io::Error> = None;

    for addr in addrs {
        tracing::trace!("Connecting to {} ({})", endpoint, addr);
        match TcpStream::connect(addr).await {
            Ok(stream) => {
                tracing::debug!("TCP connection established to {} via {}", endpoint, addr);
                return Ok(stream);
            }
            Err(e) => {
                tracing::debug!("Failed to connect to {}: {}", addr, e);
                last_error = Some(e);
            }
        }
    }

    let cause = last_error
        .unwrap_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "no addresses to connect to"));
    Err(error::connect(cause).with_endpoint(endpoint.clone()))
}
