//! DNS resolution traits and type aliases

use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;

use super::types::Name;
use crate::error::BoxError;

/// Trait for asynchronous DNS resolution.
///
/// Implementations return addresses for the bare name; ports are applied by
/// [`DynResolver`](super::DynResolver). A port of zero in a returned address
/// means "use the requested port".
pub trait Resolve: Send + Sync + 'static {
    /// Resolve a hostname to socket addresses.
    fn resolve(&self, name: Name) -> Resolving;
}

/// Every address the resolver returned, in resolver order.
///
/// Left unbounded so family ordering sees the whole answer before
/// [`DynResolver`](super::DynResolver) caps it.
pub type Addrs = Vec<SocketAddr>;

/// Future returned by [`Resolve::resolve`].
pub type Resolving = Pin<Box<dyn Future<Output = Result<Addrs, BoxError>> + Send>>;
