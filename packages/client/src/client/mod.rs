//! Secure client modules
//!
//! The client facade, the connection guard owning the single connection
//! slot, its observable state and the establishment statistics.

pub mod core;
pub mod guard;
pub mod state;
pub mod stats;

pub use core::SecureClient;
pub use guard::ConnectionGuard;
pub use state::ConnectionState;
pub use stats::{ClientStats, ClientStatsSnapshot};
