//! Connection guard
//!
//! Owns the client's single connection slot. The slot is only ever empty,
//! holding one in-flight attempt, or holding a complete connection, and all
//! transitions happen under one mutex.
//!
//! An attempt runs as its own task and is shared by every caller that finds
//! the slot in flight, so concurrent callers trigger one sequence and all
//! see its outcome. Attempts carry an id; a completion only publishes if the
//! slot still holds the attempt with that id, so nothing from an abandoned
//! attempt can land in the slot after an invalidation.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::watch;
use tokio::task::AbortHandle;

use super::state::ConnectionState;
use super::stats::ClientStats;
use crate::connect::{ConnectionHandle, Connector};
use crate::error::{self, Error, Kind, Result};

type SharedAttempt = Shared<BoxFuture<'static, Result<ConnectionHandle>>>;

enum Slot {
    Empty,
    Connecting {
        attempt: u64,
        outcome: SharedAttempt,
        abort: AbortHandle,
    },
    Ready(ConnectionHandle),
}

impl Slot {
    fn holds_attempt(&self, id: u64) -> bool {
        matches!(self, Slot::Connecting { attempt, .. } if *attempt == id)
    }
}

struct GuardInner {
    slot: Mutex<Slot>,
    next_attempt: AtomicU64,
    state: watch::Sender<ConnectionState>,
    stats: Arc<ClientStats>,
}

impl GuardInner {
    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn advance(&self, attempt: u64, phase: ConnectionState) {
        let slot = self.lock();
        if slot.holds_attempt(attempt) {
            self.state.send_replace(phase);
        }
    }

    async fn complete(&self, attempt: u64, outcome: Result<ConnectionHandle>) -> Result<ConnectionHandle> {
        let published = {
            let mut slot = self.lock();
            if slot.holds_attempt(attempt) {
                match &outcome {
                    Ok(handle) => {
                        *slot = Slot::Ready(handle.clone());
                        self.state.send_replace(ConnectionState::Ready);
                    }
                    Err(_) => {
                        *slot = Slot::Empty;
                        self.state.send_replace(ConnectionState::Empty);
                    }
                }
                true
            } else {
                false
            }
        };

        if !published {
            tracing::debug!("Discarding outcome of abandoned connect attempt {}", attempt);
            if let Ok(handle) = outcome {
                handle.shutdown().await;
            }
            return Err(error::canceled());
        }

        match &outcome {
            Ok(handle) => {
                self.stats.record_success();
                tracing::debug!("Published connection to {} (attempt {})", handle.endpoint(), attempt);
            }
            Err(e) => {
                self.stats.record_failure(e);
                tracing::debug!("Connect attempt {} failed: {}", attempt, e);
            }
        }
        outcome
    }
}

impl Drop for GuardInner {
    fn drop(&mut self) {
        let slot = self.slot.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Slot::Connecting { abort, .. } = slot {
            abort.abort();
        }
    }
}

/// Serializes creation and reset of a client's connection.
#[derive(Clone)]
pub struct ConnectionGuard {
    inner: Arc<GuardInner>,
}

impl fmt::Debug for ConnectionGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionGuard")
            .field("state", &self.state())
            .finish()
    }
}

impl ConnectionGuard {
    pub fn new(stats: Arc<ClientStats>) -> Self {
        let (state, _) = watch::channel(ConnectionState::Empty);
        Self {
            inner: Arc::new(GuardInner {
                slot: Mutex::new(Slot::Empty),
                next_attempt: AtomicU64::new(0),
                state,
                stats,
            }),
        }
    }

    /// Return the live connection, establishing one with `connector` if
    /// the slot is empty, or joining the attempt already in flight.
    ///
    /// # Errors
    ///
    /// Returns the attempt's failure; every caller sharing the attempt
    /// receives the same error. `Kind::Canceled` means the attempt was
    /// abandoned by [`invalidate`](Self::invalidate).
    pub async fn ensure_connected(&self, connector: &Connector) -> Result<ConnectionHandle> {
        let outcome = {
            let mut slot = self.inner.lock();
            match &*slot {
                Slot::Ready(handle) => {
                    self.inner.stats.record_reuse();
                    return Ok(handle.clone());
                }
                Slot::Connecting { outcome, .. } => outcome.clone(),
                Slot::Empty => {
                    let (attempt, outcome, abort) = self.start(connector.clone());
                    *slot = Slot::Connecting {
                        attempt,
                        outcome: outcome.clone(),
                        abort,
                    };
                    self.inner.state.send_replace(ConnectionState::Connecting);
                    outcome
                }
            }
        };
        outcome.await
    }

    // Called with the slot locked, so the task cannot publish before the
    // slot records it as in flight.
    fn start(&self, connector: Connector) -> (u64, SharedAttempt, AbortHandle) {
        let attempt = self.inner.next_attempt.fetch_add(1, Ordering::Relaxed) + 1;
        self.inner.stats.record_attempt();
        tracing::debug!("Starting connect attempt {} to {}", attempt, connector.config().target);

        let weak = Arc::downgrade(&self.inner);
        let task = tokio::spawn(async move {
            let progress = weak.clone();
            let outcome = connector
                .establish(attempt, move |phase| {
                    if let Some(inner) = progress.upgrade() {
                        inner.advance(attempt, phase);
                    }
                })
                .await;

            match weak.upgrade() {
                Some(inner) => inner.complete(attempt, outcome).await,
                None => outcome,
            }
        });

        let abort = task.abort_handle();
        let outcome = async move {
            match task.await {
                Ok(outcome) => outcome,
                Err(e) if e.is_cancelled() => Err(error::canceled()),
                Err(e) => Err(Error::new(Kind::Canceled).with(e)),
            }
        }
        .boxed()
        .shared();

        (attempt, outcome, abort)
    }

    /// Clear the slot.
    ///
    /// A ready connection is closed (TLS close_notify, then transport
    /// shutdown) after the slot is already empty. An in-flight attempt is
    /// aborted and its callers receive `Kind::Canceled`.
    pub async fn invalidate(&self) {
        let previous = {
            let mut slot = self.inner.lock();
            let previous = std::mem::replace(&mut *slot, Slot::Empty);
            if !matches!(previous, Slot::Empty) {
                self.inner.state.send_replace(ConnectionState::Empty);
            }
            previous
        };

        match previous {
            Slot::Empty => {}
            Slot::Connecting { attempt, abort, .. } => {
                abort.abort();
                self.inner.stats.record_invalidation();
                self.inner.stats.record_failure(&error::canceled());
                tracing::info!("Invalidated in-flight connect attempt {}", attempt);
            }
            Slot::Ready(handle) => {
                self.inner.stats.record_invalidation();
                tracing::info!("Invalidated connection to {}", handle.endpoint());
                handle.shutdown().await;
            }
        }
    }

    /// Invalidate only if `handle` is still the published connection.
    ///
    /// Returns false when the slot already moved on, so a caller reporting
    /// a broken stream cannot tear down a newer connection.
    pub async fn invalidate_if_current(&self, handle: &ConnectionHandle) -> bool {
        let removed = {
            let mut slot = self.inner.lock();
            match &*slot {
                Slot::Ready(current) if current == handle => {
                    *slot = Slot::Empty;
                    self.inner.state.send_replace(ConnectionState::Empty);
                    true
                }
                _ => false,
            }
        };

        if removed {
            self.inner.stats.record_invalidation();
            tracing::info!("Invalidated connection to {}", handle.endpoint());
            handle.shutdown().await;
        }
        removed
    }

    /// The published connection, if the slot is ready.
    pub fn current(&self) -> Option<ConnectionHandle> {
        match &*self.inner.lock() {
            Slot::Ready(handle) => Some(handle.clone()),
            _ => None,
        }
    }

    pub fn state(&self) -> ConnectionState {
        *self.inner.state.borrow()
    }

    /// Watch slot state transitions.
    pub fn subscribe(&self) -> watch::Receiver<ConnectionState> {
        self.inner.state.subscribe()
    }
}
