//! Test relay client.
//!
//! Speaks the framed protocol directly so tests can send malformed input as
//! well as well-formed commands and assert on every server notice.

use std::net::SocketAddr;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use relay_proto::{ClientCommand, ClientSideCodec, ServerCommand};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_util::codec::Framed;

/// A test relay client.
pub struct TestClient {
    framed: Framed<TcpStream, ClientSideCodec>,
}

#[allow(dead_code)]
impl TestClient {
    /// Connect to a test server.
    pub async fn connect(addr: SocketAddr) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self {
            framed: Framed::new(stream, ClientSideCodec::new()),
        })
    }

    /// Send a typed command.
    pub async fn send(&mut self, cmd: ClientCommand) -> anyhow::Result<()> {
        self.framed.send(cmd).await?;
        Ok(())
    }

    /// Send raw message text in one frame, unchecked.
    pub async fn send_raw(&mut self, text: &str) -> anyhow::Result<()> {
        self.framed.send(text).await?;
        Ok(())
    }

    /// Write bytes straight to the socket, bypassing framing.
    pub async fn send_bytes(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        let stream = self.framed.get_mut();
        stream.write_all(bytes).await?;
        stream.flush().await?;
        Ok(())
    }

    /// Receive a single notice from the server.
    pub async fn recv(&mut self) -> anyhow::Result<ServerCommand> {
        self.recv_timeout(Duration::from_secs(5)).await
    }

    /// Receive a notice with a timeout.
    pub async fn recv_timeout(&mut self, dur: Duration) -> anyhow::Result<ServerCommand> {
        match timeout(dur, self.framed.next()).await? {
            Some(Ok(Ok(cmd))) => Ok(cmd),
            Some(Ok(Err(e))) => anyhow::bail!("unparseable server message: {e}"),
            Some(Err(e)) => Err(e.into()),
            None => anyhow::bail!("connection closed"),
        }
    }

    /// Receive notices until the predicate returns true.
    pub async fn recv_until<F>(&mut self, mut predicate: F) -> anyhow::Result<Vec<ServerCommand>>
    where
        F: FnMut(&ServerCommand) -> bool,
    {
        let mut messages = Vec::new();
        loop {
            let msg = self.recv().await?;
            let done = predicate(&msg);
            messages.push(msg);
            if done {
                return Ok(messages);
            }
        }
    }

    /// Register under `name` and wait for the acceptance.
    pub async fn register(&mut self, name: &str) -> anyhow::Result<()> {
        self.send(ClientCommand::Con(name.to_string())).await?;
        match self.recv().await? {
            ServerCommand::Ok(_) => Ok(()),
            other => anyhow::bail!("registration of {name} failed: {other}"),
        }
    }

    /// Request the roster and return it.
    ///
    /// Also serves as a barrier: the server handles one connection's
    /// commands in order, so anything caused by earlier commands on this
    /// connection has already been queued.
    pub async fn roster(&mut self) -> anyhow::Result<Vec<String>> {
        self.send(ClientCommand::Lus).await?;
        match self.recv().await? {
            ServerCommand::Lst(names) => Ok(names),
            other => anyhow::bail!("expected LST, got {other}"),
        }
    }

    /// Wait for the server to close the connection.
    pub async fn expect_closed(&mut self) -> anyhow::Result<()> {
        match timeout(Duration::from_secs(5), self.framed.next()).await? {
            None | Some(Err(_)) => Ok(()),
            Some(Ok(item)) => anyhow::bail!("expected close, got {item:?}"),
        }
    }

    /// Send EXI.
    pub async fn quit(&mut self) -> anyhow::Result<()> {
        self.send(ClientCommand::Exi).await
    }
}
