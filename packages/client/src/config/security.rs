//! Security Policy Module
//!
//! Trust and identity settings shared by every handshake of a client.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{self, Result};

/// Minimum TLS protocol version offered during the handshake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TlsVersion {
    /// Offer TLS 1.2 and TLS 1.3
    #[default]
    Tls12,
    /// Offer TLS 1.3 only
    Tls13,
}

/// Trust and identity policy for the TLS layer.
///
/// With `verify_peer` set and no `trust_anchors`, the platform roots are used.
/// Configured anchors are added on top of the platform roots. With
/// `verify_peer` cleared no certificate validation happens at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityPolicy {
    pub verify_peer: bool,
    /// PEM bundle of additional trust anchors
    pub trust_anchors: Option<PathBuf>,
    /// PEM certificate chain presented for mutual TLS
    pub identity_cert: Option<PathBuf>,
    /// PEM private key matching `identity_cert`
    pub identity_key: Option<PathBuf>,
    pub min_tls_version: TlsVersion,
    pub alpn_protocols: Vec<Vec<u8>>,
    /// Load the operating system's root store (falls back to the bundled
    /// Mozilla roots when unavailable)
    pub use_native_roots: bool,
}

impl Default for SecurityPolicy {
    fn default() -> Self {
        Self {
            verify_peer: true,
            trust_anchors: None,
            identity_cert: None,
            identity_key: None,
            min_tls_version: TlsVersion::Tls12,
            alpn_protocols: Vec::new(),
            use_native_roots: true,
        }
    }
}

impl SecurityPolicy {
    /// Policy that performs no certificate validation.
    #[must_use]
    pub fn insecure() -> Self {
        Self {
            verify_peer: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_verify_peer(mut self, verify_peer: bool) -> Self {
        self.verify_peer = verify_peer;
        self
    }

    #[must_use]
    pub fn with_trust_anchors(mut self, path: impl Into<PathBuf>) -> Self {
        self.trust_anchors = Some(path.into());
        self
    }

    /// Present a client certificate chain and key during the handshake
    #[must_use]
    pub fn with_identity(mut self, cert: impl Into<PathBuf>, key: impl Into<PathBuf>) -> Self {
        self.identity_cert = Some(cert.into());
        self.identity_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_min_tls_version(mut self, version: TlsVersion) -> Self {
        self.min_tls_version = version;
        self
    }

    #[must_use]
    pub fn with_alpn<I, P>(mut self, protocols: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        self.alpn_protocols = protocols.into_iter().map(|p| p.as_ref().to_vec()).collect();
        self
    }

    #[must_use]
    pub fn with_native_roots(mut self, enabled: bool) -> Self {
        self.use_native_roots = enabled;
        self
    }

    /// Validate the policy
    ///
    /// # Errors
    ///
    /// Returns a `Kind::Config` error if only half of the client identity
    /// (certificate without key, or key without certificate) is configured.
    pub fn validate(&self) -> Result<()> {
        match (&self.identity_cert, &self.identity_key) {
            (Some(_), None) => Err(error::config("identity certificate configured without a private key")),
            (None, Some(_)) => Err(error::config("identity private key configured without a certificate")),
            _ => Ok(()),
        }
    }
}
