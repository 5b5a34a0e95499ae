//! Peer verification, trust anchors, client identity and version policy.

mod common;

use std::sync::Arc;

use common::{RecordingResolver, TestPki, TlsServer, mutual_tls_server_config, provider, server_config};
use seclink_client::prelude::*;

fn client_for(server: &TlsServer, host: &str, security: SecurityPolicy) -> anyhow::Result<SecureClient> {
    let config = ClientConfig::parse(&format!("{host}:{}", server.port()), 443)?.with_security(security);
    let resolver = RecordingResolver::new(&[(host, server.addr)]);
    Ok(SecureClient::with_resolver(config, Arc::new(resolver))?)
}

#[tokio::test]
async fn untrusted_chain_fails_verification_and_slot_empties() -> anyhow::Result<()> {
    let pki = TestPki::generate("untrusted")?;
    let leaf = pki.issue("server", &["seclink.test"])?;
    let server = TlsServer::spawn(server_config(&leaf)?).await?;

    let client = client_for(&server, "seclink.test", SecurityPolicy::default().with_native_roots(false))?;

    let err = client.ensure_connected().await.unwrap_err();
    assert_eq!(
        err.handshake_reason(),
        Some(HandshakeReason::VerificationFailed),
        "unexpected error: {err:?}"
    );
    assert_eq!(client.state(), ConnectionState::Empty);
    assert!(client.current().is_none());
    assert_eq!(client.stats().handshake_failures, 1);
    Ok(())
}

#[tokio::test]
async fn same_chain_is_accepted_without_verification() -> anyhow::Result<()> {
    let pki = TestPki::generate("unverified")?;
    let leaf = pki.issue("server", &["seclink.test"])?;
    let server = TlsServer::spawn(server_config(&leaf)?).await?;

    let client = client_for(&server, "seclink.test", SecurityPolicy::insecure())?;
    client.ensure_connected().await?;
    assert_eq!(client.state(), ConnectionState::Ready);
    Ok(())
}

#[tokio::test]
async fn configured_trust_anchor_validates_peer() -> anyhow::Result<()> {
    let pki = TestPki::generate("anchored")?;
    let leaf = pki.issue("server", &["seclink.test"])?;
    let server = TlsServer::spawn(server_config(&leaf)?).await?;

    let security = SecurityPolicy::default()
        .with_native_roots(false)
        .with_trust_anchors(&pki.ca_path);
    let client = client_for(&server, "seclink.test", security)?;

    let connection = client.ensure_connected().await?;
    assert_eq!(
        connection.tls_info().peer_certificate.as_deref(),
        Some(leaf.cert_der.as_ref())
    );
    Ok(())
}

#[tokio::test]
async fn name_mismatch_fails_verification() -> anyhow::Result<()> {
    let pki = TestPki::generate("mismatch")?;
    let leaf = pki.issue("server", &["somewhere-else.test"])?;
    let server = TlsServer::spawn(server_config(&leaf)?).await?;

    let security = SecurityPolicy::default()
        .with_native_roots(false)
        .with_trust_anchors(&pki.ca_path);
    let client = client_for(&server, "seclink.test", security)?;

    let err = client.ensure_connected().await.unwrap_err();
    assert_eq!(err.handshake_reason(), Some(HandshakeReason::VerificationFailed));
    Ok(())
}

#[tokio::test]
async fn client_identity_is_presented_for_mutual_tls() -> anyhow::Result<()> {
    let server_pki = TestPki::generate("mtls-server")?;
    let client_pki = TestPki::generate("mtls-client")?;
    let leaf = server_pki.issue("server", &["seclink.test"])?;
    let identity = client_pki.issue("client", &["client.test"])?;
    let server = TlsServer::spawn(mutual_tls_server_config(&leaf, &client_pki)?).await?;

    let security = SecurityPolicy::default()
        .with_native_roots(false)
        .with_trust_anchors(&server_pki.ca_path)
        .with_identity(&identity.cert_path, &identity.key_path);
    let client = client_for(&server, "seclink.test", security)?;

    let connection = client.ensure_connected().await?;

    // The server only echoes once its side of the handshake, including the
    // client certificate check, has succeeded.
    let mut stream = connection.stream().await;
    stream.write_all(b"mtls").await?;
    let mut echo = [0u8; 4];
    stream.read_exact(&mut echo).await?;
    assert_eq!(&echo, b"mtls");
    assert_eq!(server.handshakes(), 1);
    Ok(())
}

#[tokio::test]
async fn no_common_protocol_version_is_protocol_mismatch() -> anyhow::Result<()> {
    let pki = TestPki::generate("versions")?;
    let leaf = pki.issue("server", &["seclink.test"])?;
    let tls12_only = rustls::ServerConfig::builder_with_provider(provider())
        .with_protocol_versions(&[&rustls::version::TLS12])?
        .with_no_client_auth()
        .with_single_cert(leaf.chain(), leaf.key())?;
    let server = TlsServer::spawn(tls12_only).await?;

    let security = SecurityPolicy::insecure().with_min_tls_version(TlsVersion::Tls13);
    let client = client_for(&server, "seclink.test", security)?;

    let err = client.ensure_connected().await.unwrap_err();
    assert_eq!(
        err.handshake_reason(),
        Some(HandshakeReason::ProtocolMismatch),
        "unexpected error: {err:?}"
    );
    assert_eq!(client.state(), ConnectionState::Empty);
    Ok(())
}

#[test]
fn unreadable_identity_is_config_error() {
    let config = ClientConfig::parse("seclink.test:443", 443)
        .expect("target")
        .with_security(
            SecurityPolicy::default()
                .with_native_roots(false)
                .with_identity("/nonexistent/client.pem", "/nonexistent/client.key"),
        );
    let err = SecureClient::new(config).unwrap_err();
    assert!(err.is_config());
}
