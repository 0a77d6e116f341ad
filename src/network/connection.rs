//! Connection - Handles an individual client connection.
//!
//! Each Connection runs in its own Tokio task:
//!
//! ```text
//!   socket read half ──▶ FramedRead ──▶ dispatch ──▶ Registry
//!                                          │            │
//!                                          ▼            ▼
//!                              own outbound queue ◀── other sessions
//!                                          │
//!   socket write half ◀── FramedWrite ◀── writer task
//! ```
//!
//! The read loop is the only suspension point for incoming traffic; the
//! writer task drains the bounded outbound queue so that senders never wait
//! on this connection's read loop.

use std::net::SocketAddr;
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use relay_proto::{ProtocolError, ServerCommand, ServerSideCodec};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{Instrument, debug, info, instrument, warn};

use crate::config::{Config, PreRegistration};
use crate::error::HandlerError;
use crate::handlers::{Context, dispatch};
use crate::state::{Registry, SessionHandle, SessionId, SessionState};

/// Per-connection settings derived from the config.
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    pub pre_registration: PreRegistration,
    pub max_frame_len: usize,
    pub outbound_queue: usize,
}

impl From<&Config> for ConnectionSettings {
    fn from(config: &Config) -> Self {
        Self {
            pre_registration: config.server.pre_registration,
            max_frame_len: config.limits.max_frame_len,
            outbound_queue: config.limits.outbound_queue,
        }
    }
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// A client connection handler.
pub struct Connection {
    id: SessionId,
    addr: SocketAddr,
    stream: TcpStream,
    registry: Arc<Registry>,
    settings: Arc<ConnectionSettings>,
}

impl Connection {
    pub fn new(
        id: SessionId,
        stream: TcpStream,
        addr: SocketAddr,
        registry: Arc<Registry>,
        settings: Arc<ConnectionSettings>,
    ) -> Self {
        Self {
            id,
            addr,
            stream,
            registry,
            settings,
        }
    }

    /// Run the connection until the client exits or the socket fails.
    ///
    /// Whatever ends the loop, a registered session is removed from the
    /// registry and its departure announced exactly once.
    #[instrument(skip(self), fields(session = %self.id, addr = %self.addr), name = "connection")]
    pub async fn run(self) -> anyhow::Result<()> {
        info!("Client connected");
        let (read_half, write_half) = self.stream.into_split();
        serve(self.id, read_half, write_half, &self.registry, &self.settings).await
    }
}

/// Drive one session over a split transport.
///
/// Ends when the read loop does or when the writer stops, whichever comes
/// first. A writer stopping on its own means a write failed, and the session
/// is torn down the same way as on a read failure.
async fn serve<R, W>(
    id: SessionId,
    read_half: R,
    write_half: W,
    registry: &Registry,
    settings: &ConnectionSettings,
) -> anyhow::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Send + Unpin + 'static,
{
    let mut reader = FramedRead::new(
        read_half,
        ServerSideCodec::with_max_len(settings.max_frame_len),
    );
    let (session, outbound) = SessionHandle::channel(id, settings.outbound_queue);
    let mut writer = tokio::spawn(
        write_loop(FramedWrite::new(write_half, ServerSideCodec::new()), outbound)
            .in_current_span(),
    );

    let mut state = SessionState::default();
    let (result, writer_done) = tokio::select! {
        result = read_loop(&mut reader, &session, &mut state, registry, settings.pre_registration) => {
            (result, false)
        }
        joined = &mut writer => {
            if let Err(e) = joined {
                warn!(error = %e, "Writer task failed");
            }
            (Err(anyhow::anyhow!("write half closed")), true)
        }
    };

    if let Some(name) = registry.leave(id).await {
        info!(%name, "Client left");
    }

    // Last sender gone: the writer flushes what is queued and stops.
    drop(session);
    if writer_done {
        return result;
    }
    if let Err(e) = writer.await {
        warn!(error = %e, "Writer task failed");
    }

    result
}

async fn read_loop<R: AsyncRead + Unpin>(
    reader: &mut FramedRead<R, ServerSideCodec>,
    session: &SessionHandle,
    state: &mut SessionState,
    registry: &Registry,
    policy: PreRegistration,
) -> anyhow::Result<()> {
    loop {
        let item = match reader.next().await {
            Some(Ok(item)) => item,
            Some(Err(e)) => return Err(e.into()),
            None => {
                info!("Client disconnected");
                return Ok(());
            }
        };

        let cmd = match item {
            Ok(cmd) => cmd,
            Err(e) => {
                debug!(kind = e.kind(), error = %e, "Ignoring malformed command");
                continue;
            }
        };
        debug!(command = %cmd, "Received command");

        let mut ctx = Context::new(session, state, registry);
        match dispatch(&mut ctx, cmd).await {
            Ok(()) => {}
            Err(HandlerError::Quit) => return Ok(()),
            Err(HandlerError::Send(e)) => return Err(e.into()),
            Err(HandlerError::NotRegistered) if policy == PreRegistration::Drop => {
                debug!("Dropping command before registration");
            }
            Err(e) => {
                debug!(error_code = e.error_code(), error = %e, "Command rejected");
                if let Some(reply) = e.to_reply() {
                    session.send(reply).await?;
                }
            }
        }
    }
}

async fn write_loop<W: AsyncWrite + Unpin>(
    mut sink: FramedWrite<W, ServerSideCodec>,
    mut outbound: mpsc::Receiver<ServerCommand>,
) {
    while let Some(cmd) = outbound.recv().await {
        match sink.send(cmd).await {
            Ok(()) => {}
            Err(ProtocolError::MessageTooLong { actual, limit }) => {
                warn!(actual, limit, "Dropping oversized outgoing message");
            }
            Err(e) => {
                info!(error = %e, "Write failed");
                break;
            }
        }
    }
}
