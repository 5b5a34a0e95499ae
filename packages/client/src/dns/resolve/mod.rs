//! DNS resolution module
//!
//! Provides the `Resolve` seam, the address container handed to the
//! transport connector, hostname overrides, and the `DynResolver` front end
//! that applies ports, IP-literal fast paths and candidate ordering.

pub mod overrides;
pub mod resolvers;
pub mod traits;
pub mod types;
pub mod utilities;

pub use overrides::DnsResolverWithOverrides;
pub use resolvers::DynResolver;
pub use traits::{Addrs, Resolve, Resolving};
pub use types::{DnsResult, MAX_CANDIDATES, Name};
pub use utilities::sort_addresses_by_preference;
