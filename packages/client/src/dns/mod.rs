//! DNS resolution

pub use gai::GaiResolver;
pub use hickory::HickoryResolver;
pub use resolve::{
    Addrs, DnsResolverWithOverrides, DnsResult, DynResolver, MAX_CANDIDATES, Name, Resolve,
    Resolving, sort_addresses_by_preference,
};

pub mod gai;
pub mod hickory;
pub mod resolve;
