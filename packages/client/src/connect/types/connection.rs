//! The live connection published by the connection guard
//!
//! A [`Connection`] is built completely off to the side by the connector and
//! only then handed to the guard, so a caller can never observe one that is
//! half constructed.

use std::fmt;
use std::net::SocketAddr;
use std::ops::Deref;
use std::sync::Arc;

use rustls::ProtocolVersion;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::sync::{Mutex, MutexGuard};
use tokio_rustls::client::TlsStream;

use crate::connect::Endpoint;

/// Secure transport stream type carried by a [`Connection`].
pub type SecureStream = TlsStream<TcpStream>;

/// TLS session details captured when the handshake completed.
#[derive(Debug, Clone, Default)]
pub struct TlsInfo {
    /// Negotiated protocol version
    pub protocol_version: Option<ProtocolVersion>,
    /// Protocol selected through ALPN, if any
    pub alpn_protocol: Option<Vec<u8>>,
    /// Peer certificate data (DER, end entity)
    pub peer_certificate: Option<Vec<u8>>,
}

impl TlsInfo {
    pub(crate) fn from_stream(stream: &SecureStream) -> Self {
        let (_, session) = stream.get_ref();
        Self {
            protocol_version: session.protocol_version(),
            alpn_protocol: session.alpn_protocol().map(<[u8]>::to_vec),
            peer_certificate: session
                .peer_certificates()
                .and_then(|chain| chain.first())
                .map(|cert| cert.as_ref().to_vec()),
        }
    }
}

/// A fully established, handshaken connection.
pub struct Connection {
    stream: Mutex<SecureStream>,
    endpoint: Endpoint,
    peer_addr: SocketAddr,
    local_addr: SocketAddr,
    via_proxy: bool,
    tls_info: TlsInfo,
    attempt: u64,
}

impl Connection {
    pub(crate) fn new(
        stream: SecureStream,
        endpoint: Endpoint,
        peer_addr: SocketAddr,
        local_addr: SocketAddr,
        via_proxy: bool,
        attempt: u64,
    ) -> Self {
        let tls_info = TlsInfo::from_stream(&stream);
        Self {
            stream: Mutex::new(stream),
            endpoint,
            peer_addr,
            local_addr,
            via_proxy,
            tls_info,
            attempt,
        }
    }

    /// Borrow the secure stream for the duration of one operation.
    pub async fn stream(&self) -> MutexGuard<'_, SecureStream> {
        self.stream.lock().await
    }

    /// The true destination, regardless of proxying.
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Address the transport is connected to (the proxy when one is set).
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn is_proxy(&self) -> bool {
        self.via_proxy
    }

    pub fn tls_info(&self) -> &TlsInfo {
        &self.tls_info
    }

    /// Identifier of the connect attempt that produced this connection.
    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    /// Send TLS close_notify and shut the transport down.
    pub(crate) async fn shutdown(&self) {
        let mut stream = self.stream.lock().await;
        if let Err(e) = stream.shutdown().await {
            tracing::debug!("Error shutting down connection to {}: {}", self.endpoint, e);
        }
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("endpoint", &self.endpoint)
            .field("peer_addr", &self.peer_addr)
            .field("local_addr", &self.local_addr)
            .field("is_proxy", &self.via_proxy)
            .field("tls_info", &self.tls_info)
            .field("attempt", &self.attempt)
            .finish()
    }
}

/// Shared handle to the live [`Connection`].
///
/// Handles are cheap to clone and compare equal when they came from the
/// same connect attempt.
#[derive(Clone, Debug)]
pub struct ConnectionHandle {
    inner: Arc<Connection>,
}

impl ConnectionHandle {
    pub(crate) fn new(connection: Connection) -> Self {
        Self {
            inner: Arc::new(connection),
        }
    }
}

impl Deref for ConnectionHandle {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        &self.inner
    }
}

impl PartialEq for ConnectionHandle {
    fn eq(&self, other: &Self) -> bool {
        self.inner.attempt == other.inner.attempt
    }
}

impl Eq for ConnectionHandle {}
