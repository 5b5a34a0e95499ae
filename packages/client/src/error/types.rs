use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::connect::Endpoint;

/// A Result alias where the Err case is `seclink_client::Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents errors that can occur while establishing a secure connection.
///
/// Every failure is scoped to a single connection attempt; none of them is
/// fatal to the client that produced it.
#[derive(Clone)]
pub struct Error {
    pub inner: Box<Inner>,
}

#[derive(Clone)]
pub struct Inner {
    pub kind: Kind,
    pub source: Option<Arc<dyn StdError + Send + Sync>>,
    pub endpoint: Option<Endpoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Invalid configuration, or certificate/key material that failed to load
    Config,
    /// The name could not be resolved to any address
    Resolution,
    /// Every candidate address refused or was unreachable
    Connect,
    /// The TLS handshake failed
    Handshake(HandshakeReason),
    /// The attempt deadline elapsed before the sequence completed
    Timeout,
    /// The attempt was abandoned by `invalidate()` while in flight
    Canceled,
}

/// Why a TLS handshake failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeReason {
    /// The peer's chain did not validate against the trust anchors
    VerificationFailed,
    /// No common protocol version, cipher suite or ALPN protocol
    ProtocolMismatch,
    /// A certificate was required but none (or no usable one) was presented
    NoValidIdentity,
    /// The peer closed or reset the stream mid-handshake
    PeerAbort,
    /// The target host is not a valid TLS server name
    InvalidServerName,
    Other,
}

impl fmt::Display for HandshakeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HandshakeReason::VerificationFailed => "verification failed",
            HandshakeReason::ProtocolMismatch => "protocol mismatch",
            HandshakeReason::NoValidIdentity => "no valid identity",
            HandshakeReason::PeerAbort => "peer aborted",
            HandshakeReason::InvalidServerName => "invalid server name",
            HandshakeReason::Other => "handshake failure",
        })
    }
}

impl Error {
    pub fn new(kind: Kind) -> Error {
        Error {
            inner: Box::new(Inner {
                kind,
                source: None,
                endpoint: None,
            }),
        }
    }

    #[must_use = "Error builder methods return a new Error and should be used"]
    pub fn with<E: Into<Box<dyn StdError + Send + Sync>>>(mut self, source: E) -> Error {
        self.inner.source = Some(Arc::from(source.into()));
        self
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.inner.endpoint = Some(endpoint);
        self
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.inner.kind
    }

    /// Get the endpoint this error concerned, if any
    #[must_use]
    pub fn endpoint(&self) -> Option<&Endpoint> {
        self.inner.endpoint.as_ref()
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_struct("seclink::Error");

        f.field("kind", &self.inner.kind);

        if let Some(ref source) = self.inner.source {
            f.field("source", source);
        }

        if let Some(ref endpoint) = self.inner.endpoint {
            f.field("endpoint", endpoint);
        }

        f.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner.kind {
            Kind::Config => f.write_str("configuration error")?,
            Kind::Resolution => f.write_str("address resolution error")?,
            Kind::Connect => f.write_str("connection error")?,
            Kind::Handshake(reason) => write!(f, "TLS handshake error ({reason})")?,
            Kind::Timeout => f.write_str("connection attempt timed out")?,
            Kind::Canceled => f.write_str("connection attempt canceled")?,
        }

        if let Some(ref endpoint) = self.inner.endpoint {
            write!(f, " for {endpoint}")?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .source
            .as_ref()
            .map(|err| &**err as &(dyn StdError + 'static))
    }
}
