//! # Seclink client core
//!
//! Establishes one authenticated, encrypted and optionally proxied TLS
//! connection per client and guards it against concurrent use.
//!
//! ## Features
//!
//! - **Address resolution** through the system resolver, hickory-dns or
//!   static overrides, with proxy substitution before any socket opens
//! - **Sequential transport connect** with `TCP_NODELAY` and optional keepalive
//! - **Rustls TLS** with native roots, extra trust anchors, client identity
//!   (mutual TLS) and an explicit insecure mode
//! - **One deadline per attempt** covering resolve, connect and handshake
//! - **Connection guard** running exactly one sequence for concurrent callers
//!   and never exposing a half-built connection
//!
//! ## Usage
//!
//! ```no_run
//! use seclink_client::{ClientConfig, SecureClient};
//!
//! # async fn run() -> seclink_client::Result<()> {
//! let config = ClientConfig::parse("example.com:443", 443)?
//!     .with_timeout(std::time::Duration::from_secs(10));
//! let client = SecureClient::new(config)?;
//!
//! let connection = client.ensure_connected().await?;
//! println!("connected to {}", connection.peer_addr());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod connect;
pub mod dns;
pub mod error;
pub mod prelude;
pub mod proxy;
pub mod tls;

pub use client::{ClientStatsSnapshot, ConnectionState, SecureClient};
pub use config::{ClientConfig, SecurityPolicy, TcpConfig, TlsVersion};
pub use connect::{Connection, ConnectionHandle, DEFAULT_TLS_PORT, Endpoint, SecureStream, TlsInfo};
pub use dns::{DnsResolverWithOverrides, GaiResolver, HickoryResolver, Resolve};
pub use error::{Error, HandshakeReason, Kind, Result};
pub use proxy::ProxyConfig;
pub use tls::{TlsError, TlsManager};
