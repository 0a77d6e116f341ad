//! Async client connection driver.
//!
//! Owns one framed connection in a background task. The caller gets a
//! [`ClientHandle`] to submit commands and a receiver of [`Event`]s that
//! carries both server notices and connection lifecycle changes.

use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::sync::mpsc;
use tokio_util::codec::Framed;
use tracing::{debug, warn};

use crate::codec::ClientSideCodec;
use crate::command::ClientCommand;
use crate::error::{self, ProtocolError};
use crate::event::Event;

/// Depth of the event queue handed to the consumer.
const EVENT_QUEUE: usize = 1024;

/// Depth of the outgoing command queue.
const COMMAND_QUEUE: usize = 64;

/// Handle for submitting commands to a running connection.
///
/// Cheap to clone. Dropping every handle closes the connection.
#[derive(Clone, Debug)]
pub struct ClientHandle {
    tx: mpsc::Sender<String>,
}

impl ClientHandle {
    /// Ask to register `name`.
    pub async fn register(&self, name: &str) -> error::Result<()> {
        self.command(ClientCommand::Con(name.to_owned())).await
    }

    /// Send a chat line to everyone.
    pub async fn say(&self, text: &str) -> error::Result<()> {
        self.command(ClientCommand::Msg(text.to_owned())).await
    }

    /// Send a private message to `target`.
    pub async fn whisper(&self, target: &str, text: &str) -> error::Result<()> {
        self.command(ClientCommand::Prv {
            target: target.to_owned(),
            text: text.to_owned(),
        })
        .await
    }

    /// Ask for the list of registered names.
    pub async fn request_roster(&self) -> error::Result<()> {
        self.command(ClientCommand::Lus).await
    }

    /// Leave. The server closes the connection afterwards.
    pub async fn quit(&self) -> error::Result<()> {
        self.command(ClientCommand::Exi).await
    }

    /// Send a typed command.
    pub async fn command(&self, cmd: ClientCommand) -> error::Result<()> {
        self.raw(cmd.to_string()).await
    }

    /// Send raw command text, unchecked.
    pub async fn raw(&self, line: impl Into<String>) -> error::Result<()> {
        self.tx
            .send(line.into())
            .await
            .map_err(|_| ProtocolError::ConnectionClosed)
    }
}

/// Connect to a relay server over TCP.
pub async fn connect<A: ToSocketAddrs>(
    addr: A,
) -> error::Result<(ClientHandle, mpsc::Receiver<Event>)> {
    let stream = TcpStream::connect(addr).await?;
    if let Err(e) = stream.set_nodelay(true) {
        warn!(error = %e, "failed to set TCP_NODELAY");
    }
    Ok(connect_with_stream(stream))
}

/// Drive a connection over an already established stream.
///
/// Must be called from within a tokio runtime.
pub fn connect_with_stream<S>(stream: S) -> (ClientHandle, mpsc::Receiver<Event>)
where
    S: AsyncRead + AsyncWrite + Send + Unpin + 'static,
{
    let (event_tx, event_rx) = mpsc::channel(EVENT_QUEUE);
    let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_QUEUE);

    let framed = Framed::new(stream, ClientSideCodec::new());
    tokio::spawn(run_connection(framed, cmd_rx, event_tx));

    (ClientHandle { tx: cmd_tx }, event_rx)
}

async fn run_connection<S>(
    framed: Framed<S, ClientSideCodec>,
    mut cmd_rx: mpsc::Receiver<String>,
    event_tx: mpsc::Sender<Event>,
) where
    S: AsyncRead + AsyncWrite + Send + Unpin + 'static,
{
    if event_tx.send(Event::Connected).await.is_err() {
        return;
    }

    // Polled side by side, so a consumer that stops draining events does
    // not hold up outgoing commands.
    let (mut sink, mut stream) = framed.split::<String>();
    let inbound = async {
        while let Some(incoming) = stream.next().await {
            let event = match incoming {
                Ok(Ok(cmd)) => Event::from(cmd),
                Ok(Err(error)) => {
                    debug!(error = %error, "unparseable server message");
                    Event::Unrecognized { error }
                }
                Err(e) => return Some(e.to_string()),
            };
            if event_tx.send(event).await.is_err() {
                // Consumer is gone; nobody is listening any more.
                return None;
            }
        }
        None
    };
    let outbound = async {
        while let Some(line) = cmd_rx.recv().await {
            if let Err(e) = sink.send(line).await {
                return Some(e.to_string());
            }
        }
        None
    };

    let error = tokio::select! {
        error = inbound => error,
        error = outbound => error,
    };

    let _ = event_tx.send(Event::Closed { error }).await;
}
