//! Connector service
//!
//! Drives one resolve, connect and handshake sequence for a client.

pub mod core;

pub use core::Connector;
