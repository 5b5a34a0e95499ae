//! Observable connection slot state

use std::fmt;

/// Where the client's single connection slot currently is.
///
/// The slot itself only ever holds nothing, an in-flight attempt, or a
/// complete connection; `Connecting` and `Handshaking` both describe the
/// in-flight case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConnectionState {
    #[default]
    Empty,
    /// Resolving the dial endpoint or opening the transport
    Connecting,
    /// Transport is open, TLS handshake in progress
    Handshaking,
    Ready,
}

impl ConnectionState {
    #[must_use]
    pub fn is_ready(self) -> bool {
        matches!(self, ConnectionState::Ready)
    }

    /// True while an attempt is in flight.
    #[must_use]
    pub fn is_pending(self) -> bool {
        matches!(self, ConnectionState::Connecting | ConnectionState::Handshaking)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConnectionState::Empty => "empty",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Handshaking => "handshaking",
            ConnectionState::Ready => "ready",
        })
    }
}
