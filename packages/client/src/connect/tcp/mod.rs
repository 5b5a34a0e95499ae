//! TCP transport establishment
//!
//! Sequential candidate connection and per-stream socket options.

pub mod basic_connection;
pub mod socket_config;

pub use basic_connection::connect_to_address_list;
pub use socket_config::configure_tcp_socket;
