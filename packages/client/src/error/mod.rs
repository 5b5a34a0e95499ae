pub mod classification;
pub mod constructors;
pub mod helpers;
pub mod types;

pub use constructors::*;
pub use helpers::{OperationCanceled, TimedOut};
pub use types::{Error, HandshakeReason, Inner, Kind, Result};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
