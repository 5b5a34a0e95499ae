//! DNS resolution utility functions

use std::net::{IpAddr, SocketAddr};

/// Sort socket addresses by preference (IPv4 vs IPv6).
///
/// The sort is stable, so resolver order is kept within each family.
pub fn sort_addresses_by_preference(addrs: &mut [SocketAddr], prefer_ipv6: bool) {
    if prefer_ipv6 {
        addrs.sort_by_key(|addr| match addr.ip() {
            IpAddr::V6(_) => 0,
            IpAddr::V4(_) => 1,
        });
    } else {
        addrs.sort_by_key(|addr| match addr.ip() {
            IpAddr::V4(_) => 0,
            IpAddr::V6(_) => 1,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_sorting_is_stable_per_family() {
        let mut addrs: Vec<SocketAddr> = vec![
            "[::1]:80".parse().expect("v6"),
            "10.0.0.2:80".parse().expect("v4"),
            "10.0.0.1:80".parse().expect("v4"),
        ];

        sort_addresses_by_preference(&mut addrs, false);
        assert_eq!(addrs[0], "10.0.0.2:80".parse::<SocketAddr>().expect("v4"));
        assert_eq!(addrs[1], "10.0.0.1:80".parse::<SocketAddr>().expect("v4"));
        assert!(addrs[2].is_ipv6());

        sort_addresses_by_preference(&mut addrs, true);
        assert!(addrs[0].is_ipv6());
    }
}
