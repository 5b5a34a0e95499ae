//! Client configuration
//!
//! Everything a client needs is fixed at construction time: the target, the
//! security policy, the optional forward proxy, the per-attempt deadline and
//! TCP socket options. A built [`ClientConfig`] is shared read-only by every
//! connection attempt.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub mod network;
pub mod security;
pub mod validation;

pub use network::TcpConfig;
pub use security::{SecurityPolicy, TlsVersion};

use crate::connect::Endpoint;
use crate::error::Result;
use crate::proxy::ProxyConfig;

/// Immutable configuration for a single-connection secure client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// The true destination. Used for SNI and certificate verification even
    /// when the transport goes to a proxy.
    pub target: Endpoint,
    pub security: SecurityPolicy,
    pub proxy: Option<ProxyConfig>,
    /// Deadline covering one resolve + connect + handshake sequence.
    /// `None` (or zero) arms no timer.
    pub timeout: Option<Duration>,
    pub tcp: TcpConfig,
    /// Try IPv6 candidates before IPv4 ones
    pub prefer_ipv6: bool,
}

impl ClientConfig {
    /// Create a configuration for `target` with secure defaults.
    #[must_use]
    pub fn new(target: Endpoint) -> Self {
        Self {
            target,
            security: SecurityPolicy::default(),
            proxy: None,
            timeout: None,
            tcp: TcpConfig::default(),
            prefer_ipv6: false,
        }
    }

    /// Parse `host[:port][/path]` or a URL and fall back to `default_port`.
    ///
    /// # Errors
    ///
    /// Returns a `Kind::Config` error if the target cannot be parsed.
    pub fn parse(target: &str, default_port: u16) -> Result<Self> {
        Ok(Self::new(Endpoint::parse(target, default_port)?))
    }

    /// Set the security policy
    #[must_use]
    pub fn with_security(mut self, security: SecurityPolicy) -> Self {
        self.security = security;
        self
    }

    /// Route the transport through a forward proxy
    #[must_use]
    pub fn with_proxy(mut self, proxy: ProxyConfig) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Set the per-attempt deadline
    ///
    /// A zero duration disables the deadline.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_tcp(mut self, tcp: TcpConfig) -> Self {
        self.tcp = tcp;
        self
    }

    #[must_use]
    pub fn with_prefer_ipv6(mut self, prefer_ipv6: bool) -> Self {
        self.prefer_ipv6 = prefer_ipv6;
        self
    }

    /// The deadline to arm for an attempt, if any.
    #[must_use]
    pub fn attempt_timeout(&self) -> Option<Duration> {
        self.timeout.filter(|t| !t.is_zero())
    }

    /// The endpoint the resolver must look up: the proxy when one is
    /// configured, the target otherwise.
    #[must_use]
    pub fn dial_endpoint(&self) -> &Endpoint {
        match &self.proxy {
            Some(proxy) => proxy.endpoint(),
            None => &self.target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connect::DEFAULT_TLS_PORT;

    #[test]
    fn dial_endpoint_substitutes_proxy() {
        let config = ClientConfig::parse("origin.example:443", DEFAULT_TLS_PORT).expect("config");
        assert_eq!(config.dial_endpoint().host(), "origin.example");

        let config = config.with_proxy(ProxyConfig::parse("proxy.example:3128").expect("proxy"));
        assert_eq!(config.dial_endpoint().host(), "proxy.example");
        assert_eq!(config.dial_endpoint().port(), 3128);
        assert_eq!(config.target.host(), "origin.example");
    }

    #[test]
    fn zero_timeout_arms_nothing() {
        let config = ClientConfig::parse("origin.example", DEFAULT_TLS_PORT).expect("config");
        assert_eq!(config.attempt_timeout(), None);
        let config = config.with_timeout(Duration::ZERO);
        assert_eq!(config.attempt_timeout(), None);
        let config = config.with_timeout(Duration::from_secs(3));
        assert_eq!(config.attempt_timeout(), Some(Duration::from_secs(3)));
    }

    #[test]
    fn deserializes_from_json() {
        let json = r#"{
            "target": { "host": "origin.example", "port": 8443 },
            "security": {
                "verify_peer": false,
                "trust_anchors": null,
                "identity_cert": null,
                "identity_key": null,
                "min_tls_version": "Tls13",
                "alpn_protocols": [],
                "use_native_roots": true
            },
            "proxy": { "endpoint": { "host": "proxy.example", "port": 3128 } },
            "timeout": { "secs": 5, "nanos": 0 },
            "tcp": { "nodelay": true, "keepalive": null },
            "prefer_ipv6": false
        }"#;

        let config: ClientConfig = serde_json::from_str(json).expect("valid config json");
        assert_eq!(config.target.port(), 8443);
        assert!(!config.security.verify_peer);
        assert_eq!(config.security.min_tls_version, TlsVersion::Tls13);
        assert_eq!(config.dial_endpoint().host(), "proxy.example");
        assert_eq!(config.attempt_timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn deserialization_rejects_unusable_endpoints() {
        let with_proxy = |proxy: &str| {
            format!(
                r#"{{
                    "target": {{ "host": "origin.example", "port": 443 }},
                    "security": {{
                        "verify_peer": true,
                        "trust_anchors": null,
                        "identity_cert": null,
                        "identity_key": null,
                        "min_tls_version": "Tls12",
                        "alpn_protocols": [],
                        "use_native_roots": true
                    }},
                    "proxy": {{ "endpoint": {proxy} }},
                    "timeout": null,
                    "tcp": {{ "nodelay": true, "keepalive": null }},
                    "prefer_ipv6": false
                }}"#
            )
        };

        for proxy in [
            r#"{ "host": "", "port": 0 }"#,
            r#"{ "host": "", "port": 3128 }"#,
            r#"{ "host": "proxy.example", "port": 0 }"#,
        ] {
            let json = with_proxy(proxy);
            assert!(serde_json::from_str::<ClientConfig>(&json).is_err(), "{proxy}");
        }

        let json = with_proxy(r#"{ "host": "proxy.example", "port": 3128 }"#);
        let config: ClientConfig = serde_json::from_str(&json).expect("valid config json");
        assert!(config.validate().is_ok());
    }
}
