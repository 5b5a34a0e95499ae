//! Core `SeclinkBuilder` structure and build step
//!
//! The builder only records what it is told. Parsing and validation happen
//! once, in [`SeclinkBuilder::config`], so a chain of calls never fails
//! halfway through.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use seclink_client::dns::{HickoryResolver, Resolve};
use seclink_client::{
    ClientConfig, ConnectionHandle, DEFAULT_TLS_PORT, ProxyConfig, Result, SecureClient,
    SecurityPolicy, TcpConfig,
};

/// Which resolver the built client uses.
#[derive(Clone, Default)]
pub(crate) enum ResolverChoice {
    /// Platform `getaddrinfo`
    #[default]
    System,
    Hickory,
    Custom(Arc<dyn Resolve>),
}

impl fmt::Debug for ResolverChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResolverChoice::System => "System",
            ResolverChoice::Hickory => "Hickory",
            ResolverChoice::Custom(_) => "Custom",
        })
    }
}

/// Fluent builder for a [`SecureClient`].
#[derive(Clone, Debug)]
pub struct SeclinkBuilder {
    pub(crate) target: String,
    pub(crate) default_port: u16,
    pub(crate) security: SecurityPolicy,
    pub(crate) proxy: Option<String>,
    pub(crate) timeout: Option<Duration>,
    pub(crate) tcp: TcpConfig,
    pub(crate) prefer_ipv6: bool,
    pub(crate) resolver: ResolverChoice,
    /// Debug logging enabled flag
    pub(crate) debug_enabled: bool,
}

impl SeclinkBuilder {
    /// Start building a client for `target` (`host`, `host:port` or a URL).
    #[must_use]
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            default_port: DEFAULT_TLS_PORT,
            security: SecurityPolicy::default(),
            proxy: None,
            timeout: None,
            tcp: TcpConfig::default(),
            prefer_ipv6: false,
            resolver: ResolverChoice::default(),
            debug_enabled: false,
        }
    }

    /// Port used when the target does not name one
    #[must_use]
    pub fn default_port(mut self, port: u16) -> Self {
        self.default_port = port;
        self
    }

    /// Log the resolved configuration when the client is built
    #[must_use]
    pub fn debug(mut self) -> Self {
        self.debug_enabled = true;
        self
    }

    /// Produce the immutable client configuration.
    ///
    /// # Errors
    ///
    /// Returns a `Kind::Config` error if the target or proxy cannot be parsed
    /// or the resulting configuration is inconsistent.
    pub fn config(&self) -> Result<ClientConfig> {
        let mut config = ClientConfig::parse(&self.target, self.default_port)?
            .with_security(self.security.clone())
            .with_tcp(self.tcp.clone())
            .with_prefer_ipv6(self.prefer_ipv6);

        if let Some(proxy) = &self.proxy {
            config = config.with_proxy(ProxyConfig::parse(proxy)?);
        }
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }

        config.validate()?;
        Ok(config)
    }

    /// Build the client. No network activity happens until the first
    /// `ensure_connected`.
    ///
    /// # Errors
    ///
    /// Returns a `Kind::Config` error for an invalid configuration or
    /// unloadable certificate material.
    pub fn build(self) -> Result<SecureClient> {
        let config = self.config()?;

        if self.debug_enabled {
            tracing::debug!(
                "Building client: target={}, proxy={:?}, timeout={:?}, verify_peer={}, resolver={:?}",
                config.target,
                config.proxy.as_ref().map(ProxyConfig::endpoint),
                config.timeout,
                config.security.verify_peer,
                self.resolver
            );
        }

        match self.resolver {
            ResolverChoice::System => SecureClient::new(config),
            ResolverChoice::Hickory => {
                SecureClient::with_resolver(config, Arc::new(HickoryResolver::new()))
            }
            ResolverChoice::Custom(resolver) => SecureClient::with_resolver(config, resolver),
        }
    }

    /// Build the client and establish its connection.
    ///
    /// # Errors
    ///
    /// Any build error, or the failure of the first connect attempt.
    pub async fn connect(self) -> Result<(SecureClient, ConnectionHandle)> {
        let client = self.build()?;
        let connection = client.ensure_connected().await?;
        Ok((client, connection))
    }
}
