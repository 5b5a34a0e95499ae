//! Seclink public API
//!
//! Guarded, deadline-bounded TLS client connections behind a fluent builder.
//!
//! ```no_run
//! use std::time::Duration;
//!
//! # async fn run() -> seclink::Result<()> {
//! let client = seclink::Seclink::to("example.com")
//!     .timeout(Duration::from_secs(10))
//!     .build()?;
//!
//! let connection = client.ensure_connected().await?;
//! println!("negotiated {:?}", connection.tls_info().protocol_version);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod builder;

pub use builder::SeclinkBuilder;

// Re-export the types callers need from the client package
pub use seclink_client::dns;
pub use seclink_client::{
    ClientConfig, ClientStatsSnapshot, Connection, ConnectionHandle, ConnectionState, Endpoint,
    Error, HandshakeReason, Kind, ProxyConfig, Result, SecureClient, SecureStream,
    SecurityPolicy, TcpConfig, TlsInfo, TlsVersion,
};

/// Main entry point providing static builder methods
pub struct Seclink;

impl Seclink {
    /// Start building a client for `target`.
    ///
    /// Shorthand for `SeclinkBuilder::new(target)`
    #[must_use]
    pub fn to(target: impl Into<String>) -> SeclinkBuilder {
        SeclinkBuilder::new(target)
    }

    /// Build a client from a ready-made configuration
    ///
    /// # Errors
    ///
    /// Returns a `Kind::Config` error for an invalid configuration or
    /// unloadable certificate material.
    pub fn from_config(config: ClientConfig) -> Result<SecureClient> {
        SecureClient::new(config)
    }
}

/// Start building a client for `target`.
///
/// Shorthand for `Seclink::to(target)`
#[must_use]
pub fn to(target: impl Into<String>) -> SeclinkBuilder {
    SeclinkBuilder::new(target)
}
