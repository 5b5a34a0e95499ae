//! TLS-specific error types for certificate and key loading

use std::path::PathBuf;

use crate::error;

/// Failures while turning a [`SecurityPolicy`](crate::config::SecurityPolicy)
/// into a TLS client configuration.
#[derive(Debug, thiserror::Error)]
pub enum TlsError {
    #[error("File operation failed for {path}: {source}")]
    FileOperation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Certificate parsing failed for {path}: {source}")]
    CertificateParsing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("No certificates found in {0}")]
    NoCertificates(PathBuf),
    #[error("No private key found in {0}")]
    MissingPrivateKey(PathBuf),
    #[error("Trust anchor rejected from {path}: {source}")]
    TrustAnchor {
        path: PathBuf,
        #[source]
        source: rustls::Error,
    },
    #[error("TLS configuration rejected: {0}")]
    Rustls(#[from] rustls::Error),
}

impl From<TlsError> for crate::Error {
    fn from(err: TlsError) -> Self {
        error::config(err)
    }
}
