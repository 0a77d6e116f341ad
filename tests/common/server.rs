//! Test server management.
//!
//! Runs a relayd gateway in-process on an ephemeral loopback port.

use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;

use relayd::{Config, Gateway, Registry};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use super::client::TestClient;

/// A test server instance. Stops accepting when dropped.
pub struct TestServer {
    addr: SocketAddr,
    registry: Arc<Registry>,
    shutdown: Option<oneshot::Sender<()>>,
    #[allow(dead_code)]
    task: JoinHandle<anyhow::Result<()>>,
}

impl TestServer {
    /// Spawn a test server with default settings.
    pub async fn spawn() -> anyhow::Result<Self> {
        Self::spawn_with("").await
    }

    /// Spawn a test server with extra config appended after `[listen]`.
    ///
    /// The config goes through a real file, the same path `main` takes.
    pub async fn spawn_with(extra_toml: &str) -> anyhow::Result<Self> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "[listen]\naddress = \"127.0.0.1:0\"\n\n{extra_toml}")?;
        let config = Config::load(file.path())?;

        let registry = Arc::new(Registry::new());
        let gateway = Gateway::bind(&config, Arc::clone(&registry)).await?;
        let addr = gateway.local_addr()?;

        let (shutdown, stop) = oneshot::channel::<()>();
        let task = tokio::spawn(gateway.run_until(async {
            let _ = stop.await;
        }));

        Ok(Self {
            addr,
            registry,
            shutdown: Some(shutdown),
            task,
        })
    }

    /// Get the server address.
    pub fn address(&self) -> SocketAddr {
        self.addr
    }

    /// Shared registry of the running server.
    #[allow(dead_code)]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Create a new, unregistered test client.
    pub async fn connect(&self) -> anyhow::Result<TestClient> {
        TestClient::connect(self.addr).await
    }

    /// Create a client and register it under `name`.
    #[allow(dead_code)]
    pub async fn join(&self, name: &str) -> anyhow::Result<TestClient> {
        let mut client = self.connect().await?;
        client.register(name).await?;
        Ok(client)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}
