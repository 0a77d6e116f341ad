//! Gateway - TCP listener that accepts incoming connections.
//!
//! The Gateway binds once at startup and spawns a Connection task for each
//! incoming client. A failed accept is logged and the loop keeps going.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info, instrument, warn};

use crate::config::Config;
use crate::network::{Connection, ConnectionSettings};
use crate::state::{Registry, SessionIdGenerator};

/// The Gateway accepts incoming TCP connections and spawns handlers.
pub struct Gateway {
    listener: TcpListener,
    registry: Arc<Registry>,
    settings: Arc<ConnectionSettings>,
    ids: SessionIdGenerator,
}

impl Gateway {
    /// Bind the gateway to the configured address.
    pub async fn bind(config: &Config, registry: Arc<Registry>) -> anyhow::Result<Self> {
        let addr = config.listen.address;
        let listener = TcpListener::bind(addr).await?;
        info!(addr = %listener.local_addr()?, "Listener bound");

        Ok(Self {
            listener,
            registry,
            settings: Arc::new(ConnectionSettings::from(config)),
            ids: SessionIdGenerator::new(),
        })
    }

    /// Address actually bound (useful when the configured port is 0).
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Run the gateway, accepting connections forever.
    pub async fn run(self) -> anyhow::Result<()> {
        self.run_until(std::future::pending()).await
    }

    /// Run the gateway until `shutdown` completes.
    #[instrument(skip_all, name = "gateway")]
    pub async fn run_until<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                () = &mut shutdown => {
                    info!("Shutting down listener");
                    return Ok(());
                }
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, addr)) => {
                        if let Err(e) = stream.set_nodelay(true) {
                            warn!(%addr, error = %e, "Failed to set TCP_NODELAY");
                        }

                        let id = self.ids.next();
                        info!(session = %id, %addr, "Connection accepted");

                        let connection = Connection::new(
                            id,
                            stream,
                            addr,
                            Arc::clone(&self.registry),
                            Arc::clone(&self.settings),
                        );
                        tokio::spawn(async move {
                            if let Err(e) = connection.run().await {
                                warn!(session = %id, %addr, error = %e, "Connection error");
                            }
                            info!(session = %id, %addr, "Connection closed");
                        });
                    }
                    Err(e) => {
                        error!(error = %e, "Failed to accept connection");
                    }
                },
            }
        }
    }
}
