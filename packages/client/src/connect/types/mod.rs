//! Connection types produced by the connector

pub mod connection;

pub use connection::{Connection, ConnectionHandle, SecureStream, TlsInfo};
