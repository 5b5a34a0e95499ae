//! Trust, identity and protocol settings

use std::path::PathBuf;

use seclink_client::{SecurityPolicy, TlsVersion};

use crate::builder::core::SeclinkBuilder;

impl SeclinkBuilder {
    /// Replace the whole security policy
    #[must_use]
    pub fn security(mut self, policy: SecurityPolicy) -> Self {
        self.security = policy;
        self
    }

    /// Validate the server's certificate chain and name (on by default)
    #[must_use]
    pub fn verify_peer(mut self, verify: bool) -> Self {
        self.security = self.security.with_verify_peer(verify);
        self
    }

    /// Skip all certificate validation.
    ///
    /// The connection is still encrypted, but the peer is not
    /// authenticated.
    #[must_use]
    pub fn danger_accept_invalid_certs(self) -> Self {
        self.verify_peer(false)
    }

    /// Trust the certificates in this PEM bundle in addition to the
    /// default roots
    #[must_use]
    pub fn trust_anchors(mut self, path: impl Into<PathBuf>) -> Self {
        self.security = self.security.with_trust_anchors(path);
        self
    }

    /// Present this certificate chain and key for mutual TLS
    #[must_use]
    pub fn identity(mut self, cert: impl Into<PathBuf>, key: impl Into<PathBuf>) -> Self {
        self.security = self.security.with_identity(cert, key);
        self
    }

    #[must_use]
    pub fn min_tls_version(mut self, version: TlsVersion) -> Self {
        self.security = self.security.with_min_tls_version(version);
        self
    }

    /// Offer these ALPN protocols, most preferred first
    #[must_use]
    pub fn alpn<I, P>(mut self, protocols: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        self.security = self.security.with_alpn(protocols);
        self
    }

    /// Use the platform certificate store as the default roots (on by
    /// default); otherwise the bundled Mozilla roots are used
    #[must_use]
    pub fn native_roots(mut self, enabled: bool) -> Self {
        self.security = self.security.with_native_roots(enabled);
        self
    }
}
