//! Shared utilities for integration tests.

use std::fs;
use std::net::SocketAddr;
use std::time::Duration;

use tempfile::TempDir;
use tokio::net::TcpListener;
use urlshort::{AppConfig, HttpServer, RouteStore, Shutdown};

/// A config whose store and overlay files live in a fresh temp dir.
pub struct Fixture {
    pub dir: TempDir,
    pub config: AppConfig,
}

impl Fixture {
    /// Write the overlay documents; the store file is created on first boot.
    pub fn new(yaml: &str, json: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let yaml_path = dir.path().join("urls.yaml");
        let json_path = dir.path().join("urls.json");
        fs::write(&yaml_path, yaml).unwrap();
        fs::write(&json_path, json).unwrap();

        let mut config = AppConfig::default();
        config.listener.bind_address = "127.0.0.1:0".into();
        config.store.path = dir.path().join("urls.db").display().to_string();
        config.overlays.yaml_path = yaml_path.display().to_string();
        config.overlays.json_path = json_path.display().to_string();

        Self { dir, config }
    }

    /// Pre-create the store with a custom seed so boot finds it already seeded.
    pub fn with_store_seed(self, seed: &[(&str, &str)]) -> Self {
        let store = RouteStore::open(&self.config.store.path).unwrap();
        store.ensure_seeded_with(seed).unwrap();
        self
    }
}

/// Boot the chain from `config` and serve it on an ephemeral port.
#[allow(dead_code)]
pub async fn start_server(config: &AppConfig, shutdown: &Shutdown) -> SocketAddr {
    let chain = urlshort::lifecycle::build_chain(config).unwrap();
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(config, chain);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    addr
}

/// Client that reports redirects instead of following them.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
