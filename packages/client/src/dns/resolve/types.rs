//! Core DNS types for resolution

use std::net::SocketAddr;

use arrayvec::{ArrayVec, IntoIter as ArrayIntoIter};

/// Upper bound on candidate addresses handed to the connector.
pub const MAX_CANDIDATES: usize = 8;

pub type SocketAddrIter = ArrayIntoIter<SocketAddr, MAX_CANDIDATES>;

/// DNS name representation for hostname resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name(String);

impl Name {
    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Name {
    fn from(s: String) -> Self {
        Name(s)
    }
}

impl From<&str> for Name {
    fn from(s: &str) -> Self {
        Name(s.to_string())
    }
}

/// Ordered candidate addresses produced by resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DnsResult {
    pub addrs: ArrayVec<SocketAddr, MAX_CANDIDATES>,
}

impl DnsResult {
    #[must_use]
    pub fn new() -> Self {
        Self {
            addrs: ArrayVec::new(),
        }
    }

    /// Keep at most [`MAX_CANDIDATES`] addresses, in order.
    pub fn from_vec(vec: Vec<SocketAddr>) -> Self {
        vec.into_iter().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SocketAddr> {
        self.addrs.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.addrs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.addrs.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[SocketAddr] {
        &self.addrs
    }
}

impl FromIterator<SocketAddr> for DnsResult {
    fn from_iter<I: IntoIterator<Item = SocketAddr>>(iter: I) -> Self {
        let mut addrs = ArrayVec::new();
        for addr in iter {
            if addrs.try_push(addr).is_err() {
                break;
            }
        }
        Self { addrs }
    }
}

impl IntoIterator for DnsResult {
    type Item = SocketAddr;
    type IntoIter = SocketAddrIter;

    fn into_iter(self) -> Self::IntoIter {
        self.addrs.into_iter()
    }
}
