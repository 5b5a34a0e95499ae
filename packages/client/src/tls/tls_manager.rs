//! TLS negotiator
//!
//! Builds one immutable rustls client configuration per client from its
//! [`SecurityPolicy`] and runs client-side handshakes over connected TCP
//! streams with it.

use std::fmt;
use std::sync::Arc;

use rustls::pki_types::ServerName;
use rustls::{ClientConfig, SupportedProtocolVersion};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;

use super::certificate::{add_trust_anchors, default_root_store, load_certificates, load_private_key};
use super::errors::TlsError;
use super::handshake::classify;
use super::verifier::NoVerification;
use crate::config::{SecurityPolicy, TlsVersion};
use crate::connect::SecureStream;
use crate::error::{self, HandshakeReason, Result};

/// Shared TLS client state for every handshake a client performs.
#[derive(Clone)]
pub struct TlsManager {
    config: Arc<ClientConfig>,
    connector: TlsConnector,
}

impl fmt::Debug for TlsManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TlsManager")
            .field("alpn_protocols", &self.config.alpn_protocols)
            .finish_non_exhaustive()
    }
}

impl TlsManager {
    /// Build the TLS client configuration described by `policy`.
    ///
    /// Trust anchors from the policy are added to the default roots rather
    /// than replacing them. With `verify_peer` off no chain or name
    /// validation happens at all.
    ///
    /// # Errors
    ///
    /// Returns a [`TlsError`] if a certificate, key or trust anchor file
    /// cannot be loaded, or rustls rejects the resulting configuration.
    pub fn from_policy(policy: &SecurityPolicy) -> std::result::Result<Self, TlsError> {
        let provider = Arc::new(rustls::crypto::ring::default_provider());

        let versions: Vec<&'static SupportedProtocolVersion> = match policy.min_tls_version {
            TlsVersion::Tls12 => vec![&rustls::version::TLS13, &rustls::version::TLS12],
            TlsVersion::Tls13 => vec![&rustls::version::TLS13],
        };

        let builder = ClientConfig::builder_with_provider(Arc::clone(&provider))
            .with_protocol_versions(&versions)?;

        let builder = if policy.verify_peer {
            let mut root_store = default_root_store(policy.use_native_roots);
            if let Some(path) = &policy.trust_anchors {
                add_trust_anchors(&mut root_store, path)?;
            }
            builder.with_root_certificates(root_store)
        } else {
            tracing::warn!("Peer verification disabled, server certificates will not be validated");
            builder
                .dangerous()
                .with_custom_certificate_verifier(Arc::new(NoVerification::new(provider)))
        };

        let mut config = match (&policy.identity_cert, &policy.identity_key) {
            (Some(cert), Some(key)) => {
                let chain = load_certificates(cert)?;
                let key = load_private_key(key)?;
                tracing::debug!("Presenting client identity from {}", cert.display());
                builder.with_client_auth_cert(chain, key)?
            }
            _ => builder.with_no_client_auth(),
        };
        config.alpn_protocols = policy.alpn_protocols.clone();

        let config = Arc::new(config);
        Ok(Self {
            connector: TlsConnector::from(Arc::clone(&config)),
            config,
        })
    }

    /// The rustls configuration shared by every handshake.
    pub fn client_config(&self) -> &Arc<ClientConfig> {
        &self.config
    }

    /// Perform a client handshake over `tcp`, authenticating `host`.
    ///
    /// `host` is always the true destination, so SNI and certificate name
    /// checks are unaffected by proxy addressing. On failure the transport
    /// is shut down before the error is returned.
    ///
    /// # Errors
    ///
    /// Returns `Kind::Handshake` with the classified reason.
    pub async fn handshake(&self, host: &str, mut tcp: TcpStream) -> Result<SecureStream> {
        let server_name = match ServerName::try_from(host.to_string()) {
            Ok(name) => name,
            Err(e) => {
                if let Err(shutdown) = tcp.shutdown().await {
                    tracing::trace!("Transport shutdown after invalid server name: {}", shutdown);
                }
                return Err(error::handshake(HandshakeReason::InvalidServerName, e));
            }
        };

        tracing::debug!("Starting TLS handshake with {}", host);
        match self.connector.connect(server_name, tcp).into_fallible().await {
            Ok(stream) => {
                tracing::debug!("TLS handshake completed with {}", host);
                Ok(stream)
            }
            Err((err, mut tcp)) => {
                let reason = classify(&err);
                if let Err(e) = tcp.shutdown().await {
                    tracing::trace!("Transport shutdown after failed handshake: {}", e);
                }
                tracing::warn!("TLS handshake with {} failed ({}): {}", host, reason, err);
                Err(error::handshake(reason, err))
            }
        }
    }
}
