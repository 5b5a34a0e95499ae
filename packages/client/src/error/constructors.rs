use super::BoxError;
use super::helpers::{OperationCanceled, TimedOut};
use super::types::{Error, HandshakeReason, Kind};

/// Creates an `Error` for invalid configuration.
pub fn config<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Config).with(e.into())
}

/// Creates an `Error` for a name that could not be resolved.
pub fn resolution<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Resolution).with(e.into())
}

/// Creates an `Error` for a transport connect failure.
pub fn connect<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Connect).with(e.into())
}

/// Creates an `Error` for a failed TLS handshake.
pub fn handshake<E: Into<BoxError>>(reason: HandshakeReason, e: E) -> Error {
    Error::new(Kind::Handshake(reason)).with(e.into())
}

pub fn timeout() -> Error {
    Error::new(Kind::Timeout).with(TimedOut)
}

pub fn canceled() -> Error {
    Error::new(Kind::Canceled).with(OperationCanceled)
}
