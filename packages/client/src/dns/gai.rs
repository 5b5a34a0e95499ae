//! System resolver backed by `getaddrinfo`

use super::{Addrs, Name, Resolve, Resolving};

/// Resolves names with the platform resolver on tokio's blocking pool.
#[derive(Debug, Default, Clone)]
pub struct GaiResolver {
    _priv: (),
}

impl GaiResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Resolve for GaiResolver {
    fn resolve(&self, name: Name) -> Resolving {
        Box::pin(async move {
            let addrs = tokio::net::lookup_host((name.as_str(), 0))
                .await
                .map_err(|e| format!("GAI resolution failed for {name}: {e}"))?;

            let result: Addrs = addrs.collect();
            if result.is_empty() {
                return Err(format!("No addresses found for {name}").into());
            }
            Ok(result)
        })
    }
}
