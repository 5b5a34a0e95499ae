//! Seclink client prelude
//!
//! The types most callers need to configure a client and use its connection.

pub use crate::client::{ConnectionState, SecureClient};
pub use crate::config::{ClientConfig, SecurityPolicy, TcpConfig, TlsVersion};
pub use crate::connect::{ConnectionHandle, Endpoint, TlsInfo};
pub use crate::error::{Error, HandshakeReason, Kind, Result};
pub use crate::proxy::ProxyConfig;

// Stream I/O on a borrowed connection
pub use tokio::io::{AsyncReadExt, AsyncWriteExt};
