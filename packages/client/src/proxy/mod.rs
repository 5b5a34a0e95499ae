//! Forward proxy addressing
//!
//! When a proxy is configured the transport is dialed to the proxy instead of
//! the destination. Tunnel negotiation over that transport belongs to the
//! protocol layer; this module only performs the address substitution.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::connect::Endpoint;
use crate::error::{self, Result};

/// Forward proxy configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConfig {
    endpoint: Endpoint,
}

impl ProxyConfig {
    #[must_use]
    pub fn new(endpoint: Endpoint) -> Self {
        Self { endpoint }
    }

    /// Parse `host:port` or `scheme://host[:port]`.
    ///
    /// A bare `host:port` must carry its port; a URL falls back to the
    /// scheme's well-known port.
    ///
    /// # Errors
    ///
    /// Returns a `Kind::Config` error if no host or port can be determined.
    pub fn parse(proxy: &str) -> Result<Self> {
        let proxy = proxy.trim();
        if !proxy.contains("://") {
            return Ok(Self::new(Endpoint::parse_required_port(proxy)?));
        }

        let url = Url::parse(proxy)
            .map_err(|e| error::config(format!("invalid proxy URL '{proxy}': {e}")))?;
        let host = url
            .host_str()
            .ok_or_else(|| error::config(format!("proxy URL '{proxy}' has no host")))?;
        let port = url
            .port_or_known_default()
            .ok_or_else(|| error::config(format!("proxy URL '{proxy}' has no port")))?;

        Ok(Self::new(Endpoint::new(host, port)?))
    }

    /// The address the transport connects to.
    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}
