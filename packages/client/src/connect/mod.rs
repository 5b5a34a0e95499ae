//! Connection establishment
//!
//! Endpoints, the TCP transport connector, the per-attempt deadline and the
//! connector service that chains resolution, transport and TLS.

pub mod deadline;
pub mod endpoint;
pub mod service;
pub mod tcp;
pub mod types;

pub use deadline::with_deadline;
pub use endpoint::{DEFAULT_TLS_PORT, Endpoint};
pub use service::Connector;
pub use tcp::{configure_tcp_socket, connect_to_address_list};
pub use types::{Connection, ConnectionHandle, SecureStream, TlsInfo};
