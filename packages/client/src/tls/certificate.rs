//! Certificate, key and trust anchor loading from PEM files

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rustls::RootCertStore;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};

use super::errors::TlsError;

fn open(path: &Path) -> Result<BufReader<File>, TlsError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| TlsError::FileOperation {
            path: path.to_path_buf(),
            source,
        })
}

/// Load every certificate from a PEM file, in file order.
pub fn load_certificates(path: &Path) -> Result<Vec<CertificateDer<'static>>, TlsError> {
    let mut reader = open(path)?;
    let certs = rustls_pemfile::certs(&mut reader)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| TlsError::CertificateParsing {
            path: path.to_path_buf(),
            source,
        })?;

    if certs.is_empty() {
        return Err(TlsError::NoCertificates(path.to_path_buf()));
    }
    Ok(certs)
}

/// Load the first private key (PKCS#8, PKCS#1 or SEC1) from a PEM file.
pub fn load_private_key(path: &Path) -> Result<PrivateKeyDer<'static>, TlsError> {
    let mut reader = open(path)?;
    rustls_pemfile::private_key(&mut reader)
        .map_err(|source| TlsError::CertificateParsing {
            path: path.to_path_buf(),
            source,
        })?
        .ok_or_else(|| TlsError::MissingPrivateKey(path.to_path_buf()))
}

/// Build the default root store.
///
/// Native roots are used when enabled and loadable; the bundled
/// `webpki-roots` set fills in when they are disabled, empty or partially
/// unreadable.
pub fn default_root_store(use_native_roots: bool) -> RootCertStore {
    let mut root_store = RootCertStore::empty();

    if use_native_roots {
        let cert_result = rustls_native_certs::load_native_certs();
        let (added, ignored) = root_store.add_parsable_certificates(cert_result.certs);
        if ignored > 0 {
            tracing::debug!("Ignored {} unparsable system certificates", ignored);
        }

        for err in &cert_result.errors {
            tracing::warn!("Certificate load error: {}", err);
        }

        if added == 0 || !cert_result.errors.is_empty() {
            root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
        }
        tracing::debug!("Loaded {} root certificates", root_store.len());
    } else {
        root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    }

    root_store
}

/// Add every certificate in `path` to `root_store` as a trust anchor.
pub fn add_trust_anchors(root_store: &mut RootCertStore, path: &Path) -> Result<(), TlsError> {
    for cert in load_certificates(path)? {
        root_store
            .add(cert)
            .map_err(|source| TlsError::TrustAnchor {
                path: path.to_path_buf(),
                source,
            })?;
    }
    tracing::debug!("Added trust anchors from {}", path.display());
    Ok(())
}
