//! Proxy, deadline, socket and resolver settings

use std::sync::Arc;
use std::time::Duration;

use seclink_client::dns::Resolve;

use crate::builder::core::{ResolverChoice, SeclinkBuilder};

impl SeclinkBuilder {
    /// Dial this forward proxy (`host:port`) instead of the target.
    ///
    /// Certificate checks still use the target's name.
    #[must_use]
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Deadline for one resolve, connect and handshake sequence.
    /// Zero disables it.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn nodelay(mut self, nodelay: bool) -> Self {
        self.tcp = self.tcp.with_nodelay(nodelay);
        self
    }

    #[must_use]
    pub fn tcp_keepalive(mut self, idle: Duration) -> Self {
        self.tcp = self.tcp.with_keepalive(idle);
        self
    }

    /// Try IPv6 addresses before IPv4 ones
    #[must_use]
    pub fn prefer_ipv6(mut self, prefer: bool) -> Self {
        self.prefer_ipv6 = prefer;
        self
    }

    /// Resolve names with hickory-dns instead of the system resolver
    #[must_use]
    pub fn hickory_dns(mut self) -> Self {
        self.resolver = ResolverChoice::Hickory;
        self
    }

    /// Resolve names with a custom resolver
    #[must_use]
    pub fn resolver(mut self, resolver: Arc<dyn Resolve>) -> Self {
        self.resolver = ResolverChoice::Custom(resolver);
        self
    }
}
