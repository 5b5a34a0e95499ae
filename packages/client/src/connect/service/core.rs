//! Connect pipeline for one attempt
//!
//! Resolve, connect and handshake run strictly in that order, each stage
//! starting only after the previous one finished, all under the attempt's
//! deadline. A stage failure short-circuits with its own error kind.

use std::sync::Arc;

use crate::client::ConnectionState;
use crate::config::ClientConfig;
use crate::connect::deadline::with_deadline;
use crate::connect::tcp::{configure_tcp_socket, connect_to_address_list};
use crate::connect::types::{Connection, ConnectionHandle};
use crate::dns::DynResolver;
use crate::error::{self, Result};
use crate::tls::TlsManager;

/// Builds connections for a single client configuration.
#[derive(Clone, Debug)]
pub struct Connector {
    config: Arc<ClientConfig>,
    resolver: DynResolver,
    tls: TlsManager,
}

impl Connector {
    pub fn new(config: Arc<ClientConfig>, resolver: DynResolver, tls: TlsManager) -> Self {
        let resolver = resolver.prefer_ipv6(config.prefer_ipv6);
        Self {
            config,
            resolver,
            tls,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Run one complete connect attempt.
    ///
    /// `progress` is told when the attempt moves into the handshake.
    ///
    /// # Errors
    ///
    /// Returns the failing stage's error (`Resolution`, `Connect`,
    /// `Handshake`) or `Timeout` when the deadline elapsed first.
    pub async fn establish<P>(&self, attempt: u64, progress: P) -> Result<ConnectionHandle>
    where
        P: Fn(ConnectionState) + Send + Sync,
    {
        with_deadline(
            self.config.attempt_timeout(),
            &self.config.target,
            self.run(attempt, &progress),
        )
        .await
    }

    async fn run<P>(&self, attempt: u64, progress: &P) -> Result<ConnectionHandle>
    where
        P: Fn(ConnectionState) + Send + Sync,
    {
        let target = &self.config.target;
        let dial = self.config.dial_endpoint();
        let via_proxy = self.config.proxy.is_some();

        if via_proxy {
            tracing::debug!("Resolving proxy {} in place of {}", dial, target);
        } else {
            tracing::debug!("Resolving {}", target);
        }

        let addrs = self.resolver.resolve_endpoint(dial).await?;
        let tcp = connect_to_address_list(addrs.as_slice(), dial).await?;
        configure_tcp_socket(&tcp, &self.config.tcp).map_err(|e| e.with_endpoint(dial.clone()))?;

        let peer_addr = tcp
            .peer_addr()
            .map_err(|e| error::connect(e).with_endpoint(dial.clone()))?;
        let local_addr = tcp
            .local_addr()
            .map_err(|e| error::connect(e).with_endpoint(dial.clone()))?;

        progress(ConnectionState::Handshaking);
        let stream = self
            .tls
            .handshake(target.host(), tcp)
            .await
            .map_err(|e| e.with_endpoint(target.clone()))?;

        let connection = Connection::new(
            stream,
            target.clone(),
            peer_addr,
            local_addr,
            via_proxy,
            attempt,
        );
        tracing::info!(
            "Secure connection established to {} ({:?})",
            target,
            connection.tls_info().protocol_version
        );
        Ok(ConnectionHandle::new(connection))
    }
}
