//! Handshake failure classification
//!
//! `tokio-rustls` reports TLS failures as `io::Error`s wrapping a
//! `rustls::Error`; transport failures arrive as plain I/O errors.

use std::io;

use rustls::AlertDescription;

use crate::error::HandshakeReason;

/// Map a handshake I/O error onto a [`HandshakeReason`].
pub fn classify(err: &io::Error) -> HandshakeReason {
    if let Some(tls) = err.get_ref().and_then(|inner| inner.downcast_ref::<rustls::Error>()) {
        return classify_rustls(tls);
    }

    match err.kind() {
        io::ErrorKind::UnexpectedEof
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::BrokenPipe => HandshakeReason::PeerAbort,
        _ => HandshakeReason::Other,
    }
}

fn classify_rustls(err: &rustls::Error) -> HandshakeReason {
    match err {
        rustls::Error::InvalidCertificate(_) => HandshakeReason::VerificationFailed,
        rustls::Error::NoCertificatesPresented => HandshakeReason::NoValidIdentity,
        rustls::Error::PeerIncompatible(_) | rustls::Error::NoApplicationProtocol => {
            HandshakeReason::ProtocolMismatch
        }
        rustls::Error::AlertReceived(alert) => classify_alert(*alert),
        _ => HandshakeReason::Other,
    }
}

fn classify_alert(alert: AlertDescription) -> HandshakeReason {
    match alert {
        AlertDescription::ProtocolVersion
        | AlertDescription::HandshakeFailure
        | AlertDescription::InsufficientSecurity
        | AlertDescription::NoApplicationProtocol => HandshakeReason::ProtocolMismatch,
        // The server refused the identity we presented (or the lack of one).
        AlertDescription::CertificateRequired
        | AlertDescription::BadCertificate
        | AlertDescription::UnsupportedCertificate
        | AlertDescription::CertificateRevoked
        | AlertDescription::CertificateExpired
        | AlertDescription::CertificateUnknown
        | AlertDescription::UnknownCA => HandshakeReason::NoValidIdentity,
        _ => HandshakeReason::Other,
    }
}
