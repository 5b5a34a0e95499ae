//! TLS negotiation
//!
//! Policy-driven rustls configuration, certificate loading, handshake
//! failure classification and the insecure-mode verifier.

pub mod certificate;
pub mod errors;
pub mod handshake;
pub mod tls_manager;
pub(crate) mod verifier;

pub use errors::TlsError;
pub use tls_manager::TlsManager;
