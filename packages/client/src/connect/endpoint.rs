//! Host/port endpoints and the textual forms they are parsed from
//!
//! Accepts `host`, `host:port`, `[v6]:port`, `host:port/path` and full
//! `scheme://host[:port]/...` URLs. Paths are not this core's concern and are
//! dropped.

use std::fmt;
use std::net::IpAddr;

use http::uri::Authority;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{self, Result};

/// Default port for TLS-secured transport.
pub const DEFAULT_TLS_PORT: u16 = 443;

/// A host and port pair. Immutable once built.
///
/// Deserialization goes through [`Endpoint::new`], so a loaded config obeys
/// the same host and port rules as a parsed one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "EndpointRepr")]
pub struct Endpoint {
    host: String,
    port: u16,
}

#[derive(Deserialize)]
struct EndpointRepr {
    host: String,
    port: u16,
}

impl TryFrom<EndpointRepr> for Endpoint {
    type Error = crate::Error;

    fn try_from(repr: EndpointRepr) -> Result<Self> {
        Endpoint::new(repr.host, repr.port)
    }
}

/// The port written in `authority`, if any.
///
/// `Authority` accepts any digits or even letters after the colon, and its
/// own accessors report those the same as no port at all.
fn explicit_port(authority: &Authority, input: &str) -> Result<Option<u16>> {
    let host_port = authority.as_str().rsplit('@').next().unwrap_or_default();
    let after_host = match host_port.strip_prefix('[') {
        Some(rest) => rest.split_once(']').map_or("", |(_, tail)| tail),
        None => host_port.find(':').map_or("", |i| &host_port[i..]),
    };

    match after_host.strip_prefix(':') {
        None | Some("") => Ok(None),
        Some(port) => port
            .parse::<u16>()
            .map(Some)
            .map_err(|_| error::config(format!("invalid port '{port}' in '{input}'"))),
    }
}

impl Endpoint {
    /// Build an endpoint from parts. Port 0 is rejected.
    pub fn new(host: impl Into<String>, port: u16) -> Result<Self> {
        let host = host.into();
        let host = host
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .map(str::to_string)
            .unwrap_or(host);

        if host.is_empty() {
            return Err(error::config("endpoint host cannot be empty"));
        }
        if port == 0 {
            return Err(error::config(format!("invalid port 0 for host {host}")));
        }

        Ok(Self { host, port })
    }

    /// Parse `host[:port][/path]` or a URL, falling back to `default_port`.
    ///
    /// # Errors
    ///
    /// Returns a `Kind::Config` error if the string has no usable host or the
    /// port is outside 1-65535.
    pub fn parse(input: &str, default_port: u16) -> Result<Self> {
        let input = input.trim();
        if input.contains("://") {
            return Self::parse_url(input, default_port);
        }

        let authority = input.split(['/', '?', '#']).next().unwrap_or_default();
        let authority: Authority = authority
            .parse()
            .map_err(|e| error::config(format!("invalid host:port '{input}': {e}")))?;

        let port = explicit_port(&authority, input)?.unwrap_or(default_port);
        Self::new(authority.host(), port)
    }

    /// Parse a proxy-style `host:port` where the port is mandatory.
    pub fn parse_required_port(input: &str) -> Result<Self> {
        let authority: Authority = input
            .trim()
            .parse()
            .map_err(|e| error::config(format!("invalid host:port '{input}': {e}")))?;

        let port = explicit_port(&authority, input)?
            .ok_or_else(|| error::config(format!("'{input}' is missing a port")))?;

        Self::new(authority.host(), port)
    }

    fn parse_url(input: &str, default_port: u16) -> Result<Self> {
        let url = Url::parse(input)
            .map_err(|e| error::config(format!("invalid URL '{input}': {e}")))?;

        let host = url
            .host_str()
            .ok_or_else(|| error::config(format!("URL '{input}' has no host")))?;

        let port = url.port().unwrap_or_else(|| match url.scheme() {
            "https" | "wss" => DEFAULT_TLS_PORT,
            _ => url.port_or_known_default().unwrap_or(default_port),
        });

        Self::new(host, port)
    }

    /// The host, without IPv6 brackets.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// The host as an IP address when it is a literal.
    #[must_use]
    pub fn ip(&self) -> Option<IpAddr> {
        self.host.parse().ok()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ip() {
            Some(IpAddr::V6(_)) => write!(f, "[{}]:{}", self.host, self.port),
            _ => write!(f, "{}:{}", self.host, self.port),
        }
    }
}
