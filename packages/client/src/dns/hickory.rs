//! DNS resolution via the [hickory-resolver](https://github.com/hickory-dns/hickory-dns) crate

use std::fmt;
use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};

use hickory_resolver::TokioResolver;
use hickory_resolver::config::{LookupIpStrategy, ResolverConfig};
use hickory_resolver::name_server::TokioConnectionProvider;

use super::{Addrs, Name, Resolve, Resolving};

/// Asynchronous resolver on top of hickory's tokio runtime support.
///
/// Construction reads system configuration, so it is deferred to the first
/// lookup and shared by every clone afterwards.
#[derive(Default, Clone)]
pub struct HickoryResolver {
    state: Arc<OnceLock<TokioResolver>>,
}

impl fmt::Debug for HickoryResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HickoryResolver")
            .field("initialized", &self.state.get().is_some())
            .finish()
    }
}

impl HickoryResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn resolver(&self) -> &TokioResolver {
        self.state.get_or_init(new_resolver)
    }
}

impl Resolve for HickoryResolver {
    fn resolve(&self, name: Name) -> Resolving {
        let this = self.clone();
        Box::pin(async move {
            let lookup = this
                .resolver()
                .lookup_ip(name.as_str())
                .await
                .map_err(|e| format!("DNS lookup failed for {name}: {e}"))?;

            Ok(lookup
                .iter()
                .map(|ip| SocketAddr::new(ip, 0))
                .collect::<Addrs>())
        })
    }
}

/// Build a resolver from the system configuration (`/etc/resolv.conf` on
/// unix), falling back to hickory's defaults when that cannot be read.
/// Both address families are looked up so the connector can fall back
/// between them.
fn new_resolver() -> TokioResolver {
    let mut builder = match TokioResolver::builder_tokio() {
        Ok(builder) => builder,
        Err(e) => {
            tracing::warn!("error reading DNS system conf for hickory-dns: {}", e);
            TokioResolver::builder_with_config(
                ResolverConfig::default(),
                TokioConnectionProvider::default(),
            )
        }
    };
    builder.options_mut().ip_strategy = LookupIpStrategy::Ipv4AndIpv6;
    builder.build()
}
