//! Core secure client implementation
//!
//! `SecureClient` ties one immutable configuration to a resolver, a TLS
//! negotiator and the connection guard that owns its single connection.

use std::sync::Arc;

use tokio::sync::watch;

use super::guard::ConnectionGuard;
use super::state::ConnectionState;
use super::stats::{ClientStats, ClientStatsSnapshot};
use crate::config::ClientConfig;
use crate::connect::{ConnectionHandle, Connector};
use crate::dns::{DynResolver, Resolve};
use crate::error::Result;
use crate::tls::TlsManager;

/// Client holding at most one secure connection to its configured target.
///
/// Clones share the same connection slot and statistics.
#[derive(Debug, Clone)]
pub struct SecureClient {
    config: Arc<ClientConfig>,
    connector: Connector,
    guard: ConnectionGuard,
    stats: Arc<ClientStats>,
}

impl SecureClient {
    /// Create a client resolving names with the system resolver.
    ///
    /// # Errors
    ///
    /// Returns a `Kind::Config` error if the configuration is invalid or its
    /// certificate material cannot be loaded.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_dyn_resolver(config, DynResolver::gai())
    }

    /// Create a client using a custom resolver.
    ///
    /// # Errors
    ///
    /// Same as [`SecureClient::new`].
    pub fn with_resolver(config: ClientConfig, resolver: Arc<dyn Resolve>) -> Result<Self> {
        Self::with_dyn_resolver(config, DynResolver::new(resolver))
    }

    fn with_dyn_resolver(config: ClientConfig, resolver: DynResolver) -> Result<Self> {
        config.validate()?;
        let tls = TlsManager::from_policy(&config.security)?;

        let config = Arc::new(config);
        let stats = Arc::new(ClientStats::new());
        tracing::debug!(
            "Secure client configured for {} (verify_peer: {}, proxy: {})",
            config.target,
            config.security.verify_peer,
            config.proxy.is_some()
        );

        Ok(Self {
            connector: Connector::new(Arc::clone(&config), resolver, tls),
            guard: ConnectionGuard::new(Arc::clone(&stats)),
            config,
            stats,
        })
    }

    /// Return the live connection, establishing it first if needed.
    ///
    /// Concurrent callers share one resolve, connect and handshake sequence
    /// and all observe its outcome. A failure leaves the slot empty and is
    /// never retried here.
    ///
    /// # Errors
    ///
    /// `Kind::Resolution`, `Kind::Connect`, `Kind::Handshake(_)`,
    /// `Kind::Timeout`, or `Kind::Canceled` if [`invalidate`](Self::invalidate)
    /// abandoned the attempt.
    pub async fn ensure_connected(&self) -> Result<ConnectionHandle> {
        self.guard.ensure_connected(&self.connector).await
    }

    /// Drop the current connection (or abort the attempt in flight) so the
    /// next [`ensure_connected`](Self::ensure_connected) starts afresh.
    pub async fn invalidate(&self) {
        self.guard.invalidate().await;
    }

    /// Invalidate only if `handle` is still the current connection.
    pub async fn invalidate_if_current(&self, handle: &ConnectionHandle) -> bool {
        self.guard.invalidate_if_current(handle).await
    }

    /// The live connection while the client is ready.
    pub fn current(&self) -> Option<ConnectionHandle> {
        self.guard.current()
    }

    pub fn state(&self) -> ConnectionState {
        self.guard.state()
    }

    /// Receive every slot state transition.
    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.guard.subscribe()
    }

    pub fn stats(&self) -> ClientStatsSnapshot {
        self.stats.snapshot()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}
