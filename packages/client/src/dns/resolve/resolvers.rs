//! Resolver front end used by the connector
//!
//! `DynResolver` wraps any [`Resolve`] implementation and turns an
//! [`Endpoint`] into an ordered, non-empty candidate list with ports applied.

use std::net::SocketAddr;
use std::sync::Arc;

use super::traits::Resolve;
use super::types::{DnsResult, Name};
use super::utilities::sort_addresses_by_preference;
use crate::connect::Endpoint;
use crate::dns::GaiResolver;
use crate::error::{self, Result};

#[derive(Clone)]
pub struct DynResolver {
    resolver: Arc<dyn Resolve>,
    prefer_ipv6: bool,
}

impl std::fmt::Debug for DynResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynResolver")
            .field("prefer_ipv6", &self.prefer_ipv6)
            .finish()
    }
}

impl Default for DynResolver {
    fn default() -> Self {
        Self::gai()
    }
}

impl DynResolver {
    pub fn new(resolver: Arc<dyn Resolve>) -> Self {
        Self {
            resolver,
            prefer_ipv6: false,
        }
    }

    /// The system resolver (`getaddrinfo` on a blocking thread).
    pub fn gai() -> Self {
        Self::new(Arc::new(GaiResolver::new()))
    }

    #[must_use]
    pub fn prefer_ipv6(mut self, prefer: bool) -> Self {
        self.prefer_ipv6 = prefer;
        self
    }

    /// Resolve `endpoint` into connectable candidates.
    ///
    /// IP literals skip the resolver entirely. Candidates come back ordered
    /// by address family preference, bounded, and never empty.
    ///
    /// # Errors
    ///
    /// Returns a `Kind::Resolution` error if the resolver fails or yields no
    /// addresses.
    pub async fn resolve_endpoint(&self, endpoint: &Endpoint) -> Result<DnsResult> {
        if let Some(ip) = endpoint.ip() {
            tracing::trace!("{} is an IP literal, skipping DNS", endpoint);
            return Ok(std::iter::once(SocketAddr::new(ip, endpoint.port())).collect());
        }

        let resolved = self
            .resolver
            .resolve(Name::from(endpoint.host()))
            .await
            .map_err(|e| error::resolution(e).with_endpoint(endpoint.clone()))?;

        let mut resolved: Vec<SocketAddr> = resolved
            .into_iter()
            .map(|mut addr| {
                if addr.port() == 0 {
                    addr.set_port(endpoint.port());
                }
                addr
            })
            .collect();

        if resolved.is_empty() {
            return Err(
                error::resolution(format!("no addresses found for {}", endpoint.host()))
                    .with_endpoint(endpoint.clone()),
            );
        }

        // Order the whole answer first so the cap never drops a family
        sort_addresses_by_preference(&mut resolved, self.prefer_ipv6);
        let answered = resolved.len();
        let addrs: DnsResult = resolved.into_iter().collect();
        tracing::debug!(
            "Resolved {} to {} candidate(s) of {} address(es)",
            endpoint,
            addrs.len(),
            answered
        );
        Ok(addrs)
    }
}
