//! Shared fixtures: a throwaway PKI, local TLS servers and a resolver that
//! records every lookup.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rcgen::{BasicConstraints, CertificateParams, DnType, IsCa, Issuer, KeyPair};
use rustls::ServerConfig;
use rustls::crypto::CryptoProvider;
use rustls::pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer};
use rustls::server::WebPkiClientVerifier;
use seclink_client::dns::{DnsResolverWithOverrides, Name, Resolve, Resolving};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_rustls::TlsAcceptor;

static NEXT_DIR: AtomicUsize = AtomicUsize::new(0);

pub fn provider() -> Arc<CryptoProvider> {
    Arc::new(rustls::crypto::ring::default_provider())
}

/// A certificate and its key, in memory and on disk.
pub struct Identity {
    pub cert_der: CertificateDer<'static>,
    pub key_der: Vec<u8>,
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
}

impl Identity {
    pub fn chain(&self) -> Vec<CertificateDer<'static>> {
        vec![self.cert_der.clone()]
    }

    pub fn key(&self) -> PrivateKeyDer<'static> {
        PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(self.key_der.clone()))
    }
}

/// A test certificate authority with its files in a private temp directory.
pub struct TestPki {
    dir: PathBuf,
    issuer: Issuer<'static, KeyPair>,
    pub ca_der: CertificateDer<'static>,
    pub ca_path: PathBuf,
}

impl TestPki {
    pub fn generate(label: &str) -> anyhow::Result<Self> {
        let dir = std::env::temp_dir().join(format!(
            "seclink-{}-{}-{}",
            std::process::id(),
            label,
            NEXT_DIR.fetch_add(1, Ordering::Relaxed)
        ));
        std::fs::create_dir_all(&dir)?;

        let mut params = CertificateParams::new(Vec::<String>::new())?;
        params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
        params
            .distinguished_name
            .push(DnType::CommonName, format!("{label} test CA"));

        let key_pair = KeyPair::generate()?;
        let cert = params.clone().self_signed(&key_pair)?;
        let ca_path = dir.join("ca.pem");
        std::fs::write(&ca_path, cert.pem())?;

        Ok(Self {
            ca_der: cert.der().clone(),
            issuer: Issuer::<'static>::new(params, key_pair),
            ca_path,
            dir,
        })
    }

    /// Issue a leaf certificate for `names`, signed by this CA.
    pub fn issue(&self, file_stem: &str, names: &[&str]) -> anyhow::Result<Identity> {
        let params = CertificateParams::new(names.iter().map(|n| (*n).to_string()).collect::<Vec<_>>())?;
        let key_pair = KeyPair::generate()?;
        let cert = params.signed_by(&key_pair, &self.issuer)?;

        let cert_path = self.dir.join(format!("{file_stem}.pem"));
        let key_path = self.dir.join(format!("{file_stem}.key"));
        std::fs::write(&cert_path, cert.pem())?;
        std::fs::write(&key_path, key_pair.serialize_pem())?;

        Ok(Identity {
            cert_der: cert.der().clone(),
            key_der: key_pair.serialize_der(),
            cert_path,
            key_path,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Drop for TestPki {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

/// Server config presenting `identity`, without client authentication.
pub fn server_config(identity: &Identity) -> anyhow::Result<ServerConfig> {
    Ok(ServerConfig::builder_with_provider(provider())
        .with_safe_default_protocol_versions()?
        .with_no_client_auth()
        .with_single_cert(identity.chain(), identity.key())?)
}

/// Server config presenting `identity` and requiring a client certificate
/// issued by `client_ca`.
pub fn mutual_tls_server_config(identity: &Identity, client_ca: &TestPki) -> anyhow::Result<ServerConfig> {
    let mut roots = rustls::RootCertStore::empty();
    roots.add(client_ca.ca_der.clone())?;
    let verifier = WebPkiClientVerifier::builder_with_provider(Arc::new(roots), provider()).build()?;

    Ok(ServerConfig::builder_with_provider(provider())
        .with_safe_default_protocol_versions()?
        .with_client_cert_verifier(verifier)
        .with_single_cert(identity.chain(), identity.key())?)
}

/// Local TLS echo server.
pub struct TlsServer {
    pub addr: SocketAddr,
    accepted: Arc<AtomicUsize>,
    handshakes: Arc<AtomicUsize>,
    task: JoinHandle<()>,
}

impl TlsServer {
    pub async fn spawn(config: ServerConfig) -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let acceptor = TlsAcceptor::from(Arc::new(config));
        let accepted = Arc::new(AtomicUsize::new(0));
        let handshakes = Arc::new(AtomicUsize::new(0));

        let accept_count = Arc::clone(&accepted);
        let handshake_count = Arc::clone(&handshakes);
        let task = tokio::spawn(async move {
            while let Ok((tcp, _)) = listener.accept().await {
                accept_count.fetch_add(1, Ordering::SeqCst);
                let acceptor = acceptor.clone();
                let handshake_count = Arc::clone(&handshake_count);
                tokio::spawn(async move {
                    let Ok(mut tls) = acceptor.accept(tcp).await else {
                        return;
                    };
                    handshake_count.fetch_add(1, Ordering::SeqCst);
                    let mut buf = [0u8; 1024];
                    loop {
                        match tls.read(&mut buf).await {
                            Ok(0) | Err(_) => break,
                            Ok(n) => {
                                if tls.write_all(&buf[..n]).await.is_err() {
                                    break;
                                }
                            }
                        }
                    }
                });
            }
        });

        Ok(Self {
            addr,
            accepted,
            handshakes,
            task,
        })
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// TCP connections accepted so far
    pub fn accepted(&self) -> usize {
        self.accepted.load(Ordering::SeqCst)
    }

    /// Completed server-side handshakes
    pub fn handshakes(&self) -> usize {
        self.handshakes.load(Ordering::SeqCst)
    }
}

impl Drop for TlsServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// A listener that accepts connections and never says anything.
pub struct SilentServer {
    pub addr: SocketAddr,
    task: JoinHandle<()>,
}

impl SilentServer {
    pub async fn spawn() -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let task = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((tcp, _)) = listener.accept().await {
                held.push(tcp);
            }
        });
        Ok(Self { addr, task })
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

impl Drop for SilentServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Resolver over static overrides that records every lookup and can delay
/// its answers to widen race windows.
#[derive(Clone)]
pub struct RecordingResolver {
    inner: DnsResolverWithOverrides,
    lookups: Arc<Mutex<Vec<String>>>,
    delay: Duration,
}

impl RecordingResolver {
    pub fn new(entries: &[(&str, SocketAddr)]) -> Self {
        let overrides: HashMap<String, Vec<SocketAddr>> = entries
            .iter()
            .map(|(host, addr)| ((*host).to_string(), vec![*addr]))
            .collect();
        Self {
            inner: DnsResolverWithOverrides::fixed(overrides),
            lookups: Arc::new(Mutex::new(Vec::new())),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().expect("lookup log").clone()
    }
}

impl Resolve for RecordingResolver {
    fn resolve(&self, name: Name) -> Resolving {
        self.lookups
            .lock()
            .expect("lookup log")
            .push(name.as_str().to_string());
        let lookup = self.inner.resolve(name);
        let delay = self.delay;
        Box::pin(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            lookup.await
        })
    }
}

/// Loopback address with the given port
pub fn loopback(port: u16) -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], port))
}
