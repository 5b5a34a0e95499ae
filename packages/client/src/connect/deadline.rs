//! Per-attempt deadline
//!
//! A single timer bounds one whole resolve, connect and handshake sequence.
//! Expiry drops the in-flight future, which cancels whatever stage it was
//! in; completion drops the timer. Exactly one of the two happens, and the
//! timer belongs to its own attempt only.

use std::future::Future;
use std::time::Duration;

use crate::connect::Endpoint;
use crate::error::{self, Result};

/// Run `attempt` under an optional deadline.
///
/// `None` or a zero duration arms no timer.
///
/// # Errors
///
/// Returns `Kind::Timeout` if the deadline elapses first; otherwise the
/// attempt's own outcome.
pub async fn with_deadline<F, T>(limit: Option<Duration>, endpoint: &Endpoint, attempt: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let Some(limit) = limit.filter(|d| !d.is_zero()) else {
        return attempt.await;
    };

    match tokio::time::timeout(limit, attempt).await {
        Ok(outcome) => outcome,
        Err(_elapsed) => {
            tracing::warn!("Connection attempt to {} timed out after {:?}", endpoint, limit);
            Err(error::timeout().with_endpoint(endpoint.clone()))
        }
    }
}
