//! Concurrent `ensure_connected` callers share one connect sequence.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{RecordingResolver, TestPki, TlsServer, server_config};
use futures::future::join_all;
use seclink_client::prelude::*;

const CALLERS: usize = 16;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_callers_share_one_successful_attempt() -> anyhow::Result<()> {
    let pki = TestPki::generate("concurrent")?;
    let leaf = pki.issue("server", &["seclink.test"])?;
    let server = TlsServer::spawn(server_config(&leaf)?).await?;

    let resolver = RecordingResolver::new(&[("seclink.test", server.addr)])
        .with_delay(Duration::from_millis(100));
    let config = ClientConfig::parse(&format!("seclink.test:{}", server.port()), 443)?
        .with_security(SecurityPolicy::insecure());
    let client = SecureClient::with_resolver(config, Arc::new(resolver.clone()))?;

    let callers = (0..CALLERS).map(|_| {
        let client = client.clone();
        tokio::spawn(async move { client.ensure_connected().await })
    });

    let mut handles = Vec::with_capacity(CALLERS);
    for joined in join_all(callers).await {
        handles.push(joined??);
    }

    assert!(handles.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(resolver.lookups().len(), 1);
    assert_eq!(server.accepted(), 1);

    let stats = client.stats();
    assert_eq!(stats.attempts, 1);
    assert_eq!(stats.successes, 1);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_callers_observe_the_same_failure() -> anyhow::Result<()> {
    let resolver = RecordingResolver::new(&[]).with_delay(Duration::from_millis(100));
    let config = ClientConfig::parse("missing.test:443", 443)?.with_security(SecurityPolicy::insecure());
    let client = SecureClient::with_resolver(config, Arc::new(resolver.clone()))?;

    let callers = (0..CALLERS).map(|_| {
        let client = client.clone();
        tokio::spawn(async move { client.ensure_connected().await })
    });

    for joined in join_all(callers).await {
        let err = joined?.unwrap_err();
        assert!(err.is_resolution(), "unexpected error: {err:?}");
        assert_eq!(err.endpoint().map(|e| e.host()), Some("missing.test"));
    }

    assert_eq!(resolver.lookups().len(), 1);
    assert_eq!(client.state(), ConnectionState::Empty);
    assert_eq!(client.stats().attempts, 1);
    Ok(())
}

#[tokio::test]
async fn callers_dropping_out_do_not_stall_the_attempt() -> anyhow::Result<()> {
    let pki = TestPki::generate("detached")?;
    let leaf = pki.issue("server", &["seclink.test"])?;
    let server = TlsServer::spawn(server_config(&leaf)?).await?;

    let resolver = RecordingResolver::new(&[("seclink.test", server.addr)])
        .with_delay(Duration::from_millis(50));
    let config = ClientConfig::parse(&format!("seclink.test:{}", server.port()), 443)?
        .with_security(SecurityPolicy::insecure());
    let client = SecureClient::with_resolver(config, Arc::new(resolver))?;

    // Give up on the call long before the resolver answers.
    let abandoned = tokio::time::timeout(Duration::from_millis(5), client.ensure_connected()).await;
    assert!(abandoned.is_err());

    let mut states = client.subscribe();
    states.wait_for(|state| state.is_ready()).await?;
    assert!(client.current().is_some());
    Ok(())
}
