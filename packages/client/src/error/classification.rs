use std::error::Error as StdError;
use std::io;

use super::helpers::TimedOut;
use super::types::{Error, HandshakeReason, Kind};

impl Error {
    /// Returns true if the configuration or certificate material was invalid.
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(self.inner.kind, Kind::Config)
    }

    /// Returns true if the name could not be resolved.
    #[must_use]
    pub fn is_resolution(&self) -> bool {
        matches!(self.inner.kind, Kind::Resolution)
    }

    /// Returns true if no candidate address accepted the connection.
    #[must_use]
    pub fn is_connect(&self) -> bool {
        matches!(self.inner.kind, Kind::Connect)
    }

    /// Returns true if the TLS handshake failed.
    #[must_use]
    pub fn is_handshake(&self) -> bool {
        matches!(self.inner.kind, Kind::Handshake(_))
    }

    /// Returns the handshake failure reason, if this is a handshake error.
    #[must_use]
    pub fn handshake_reason(&self) -> Option<HandshakeReason> {
        match self.inner.kind {
            Kind::Handshake(reason) => Some(reason),
            _ => None,
        }
    }

    /// Returns true if the attempt was abandoned by an invalidation.
    #[must_use]
    pub fn is_canceled(&self) -> bool {
        matches!(self.inner.kind, Kind::Canceled)
    }

    /// Returns true if the error is related to a timeout.
    ///
    /// Besides the deadline guard's own `Kind::Timeout`, an I/O timeout
    /// anywhere in the source chain counts.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        if matches!(self.inner.kind, Kind::Timeout) {
            return true;
        }

        let mut source = self.source();

        while let Some(err) = source {
            if err.is::<TimedOut>() {
                return true;
            }
            if let Some(io) = err.downcast_ref::<io::Error>() {
                if io.kind() == io::ErrorKind::TimedOut {
                    return true;
                }
            }
            source = err.source();
        }

        false
    }
}
