//! Client statistics for connection establishment

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::error::{Error, Kind};

/// Connection establishment counters
#[derive(Debug)]
pub struct ClientStats {
    /// Connect sequences started
    pub attempts: AtomicU64,
    /// Sequences that published a connection
    pub successes: AtomicU64,
    pub resolution_failures: AtomicU64,
    pub connect_failures: AtomicU64,
    pub handshake_failures: AtomicU64,
    pub timeouts: AtomicU64,
    /// Sequences abandoned by invalidation
    pub cancellations: AtomicU64,
    /// `ensure_connected` calls answered by the existing connection
    pub reuses: AtomicU64,
    pub invalidations: AtomicU64,
    /// Client creation time
    pub created_at: Instant,
}

impl Default for ClientStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientStats {
    #[must_use]
    pub fn new() -> Self {
        Self {
            attempts: AtomicU64::new(0),
            successes: AtomicU64::new(0),
            resolution_failures: AtomicU64::new(0),
            connect_failures: AtomicU64::new(0),
            handshake_failures: AtomicU64::new(0),
            timeouts: AtomicU64::new(0),
            cancellations: AtomicU64::new(0),
            reuses: AtomicU64::new(0),
            invalidations: AtomicU64::new(0),
            created_at: Instant::now(),
        }
    }

    pub fn record_attempt(&self) {
        self.attempts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_success(&self) {
        self.successes.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed attempt under its error kind
    pub fn record_failure(&self, err: &Error) {
        let counter = match err.kind() {
            Kind::Resolution => &self.resolution_failures,
            Kind::Connect => &self.connect_failures,
            Kind::Handshake(_) => &self.handshake_failures,
            Kind::Timeout => &self.timeouts,
            Kind::Canceled => &self.cancellations,
            Kind::Config => return,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_reuse(&self) {
        self.reuses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_invalidation(&self) {
        self.invalidations.fetch_add(1, Ordering::Relaxed);
    }

    /// Get client age
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    /// Create a snapshot of current statistics
    pub fn snapshot(&self) -> ClientStatsSnapshot {
        ClientStatsSnapshot {
            attempts: self.attempts.load(Ordering::Relaxed),
            successes: self.successes.load(Ordering::Relaxed),
            resolution_failures: self.resolution_failures.load(Ordering::Relaxed),
            connect_failures: self.connect_failures.load(Ordering::Relaxed),
            handshake_failures: self.handshake_failures.load(Ordering::Relaxed),
            timeouts: self.timeouts.load(Ordering::Relaxed),
            cancellations: self.cancellations.load(Ordering::Relaxed),
            reuses: self.reuses.load(Ordering::Relaxed),
            invalidations: self.invalidations.load(Ordering::Relaxed),
            age: self.age(),
        }
    }
}

/// Snapshot of client statistics at a point in time
#[derive(Debug, Clone)]
pub struct ClientStatsSnapshot {
    pub attempts: u64,
    pub successes: u64,
    pub resolution_failures: u64,
    pub connect_failures: u64,
    pub handshake_failures: u64,
    pub timeouts: u64,
    pub cancellations: u64,
    pub reuses: u64,
    pub invalidations: u64,
    pub age: Duration,
}

impl ClientStatsSnapshot {
    /// Failed attempts of every kind
    #[must_use]
    pub fn failures(&self) -> u64 {
        self.resolution_failures
            + self.connect_failures
            + self.handshake_failures
            + self.timeouts
            + self.cancellations
    }
}
