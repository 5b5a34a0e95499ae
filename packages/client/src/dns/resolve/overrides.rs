//! DNS resolver with hostname overrides
//!
//! Static host entries consulted before (or instead of) a real resolver, for
//! testing and for pinning names to known addresses.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use super::traits::{Resolve, Resolving};
use super::types::Name;

/// DNS resolver with hostname overrides for testing and custom routing.
#[derive(Clone)]
pub struct DnsResolverWithOverrides {
    dns_resolver: Option<Arc<dyn Resolve>>,
    overrides: Arc<HashMap<String, Vec<SocketAddr>>>,
}

impl std::fmt::Debug for DnsResolverWithOverrides {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DnsResolverWithOverrides")
            .field("has_fallback", &self.dns_resolver.is_some())
            .field("overrides", &self.overrides.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl DnsResolverWithOverrides {
    /// Overrides in front of a fallback resolver.
    pub fn new(dns_resolver: Arc<dyn Resolve>, overrides: HashMap<String, Vec<SocketAddr>>) -> Self {
        Self {
            dns_resolver: Some(dns_resolver),
            overrides: Arc::new(Self::normalize(overrides)),
        }
    }

    /// Overrides only; names without an entry fail to resolve.
    pub fn fixed(overrides: HashMap<String, Vec<SocketAddr>>) -> Self {
        Self {
            dns_resolver: None,
            overrides: Arc::new(Self::normalize(overrides)),
        }
    }

    fn normalize(overrides: HashMap<String, Vec<SocketAddr>>) -> HashMap<String, Vec<SocketAddr>> {
        overrides
            .into_iter()
            .map(|(host, addrs)| (host.to_ascii_lowercase(), addrs))
            .collect()
    }
}

impl Resolve for DnsResolverWithOverrides {
    fn resolve(&self, name: Name) -> Resolving {
        if let Some(addrs) = self.overrides.get(&name.as_str().to_ascii_lowercase()) {
            tracing::trace!("DNS override hit for {}", name);
            let addrs = addrs.clone();
            return Box::pin(async move { Ok(addrs) });
        }

        match &self.dns_resolver {
            Some(resolver) => resolver.resolve(name),
            None => Box::pin(async move { Err(format!("no override for host {name}").into()) }),
        }
    }
}
