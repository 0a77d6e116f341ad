//! Per-connection session identity and state.
//!
//! A session starts [`SessionState::Unregistered`] and moves to
//! [`SessionState::Registered`] exactly once, when the registry accepts its
//! name. The name is never changed afterwards.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use relay_proto::ServerCommand;
use tokio::sync::mpsc;

use crate::error::SessionError;

/// Process-unique identifier of a connection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl From<u64> for SessionId {
    fn from(n: u64) -> Self {
        Self(n)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// Generates session identifiers.
#[derive(Debug, Default)]
pub struct SessionIdGenerator {
    counter: AtomicU64,
}

impl SessionIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate the next unique id.
    pub fn next(&self) -> SessionId {
        SessionId(self.counter.fetch_add(1, Ordering::Relaxed))
    }
}

/// Sending side of a session: its id plus its outbound queue.
///
/// Cloned into the registry on registration; the connection's writer task
/// owns the receiving end.
#[derive(Clone, Debug)]
pub struct SessionHandle {
    id: SessionId,
    tx: mpsc::Sender<ServerCommand>,
}

impl SessionHandle {
    /// Create a handle and the queue its writer drains.
    pub fn channel(id: SessionId, depth: usize) -> (Self, mpsc::Receiver<ServerCommand>) {
        let (tx, rx) = mpsc::channel(depth);
        (Self { id, tx }, rx)
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Queue a notice for this session, waiting while its queue is full.
    pub async fn send(&self, cmd: ServerCommand) -> Result<(), SessionError> {
        self.tx
            .send(cmd)
            .await
            .map_err(|_| SessionError::Closed(self.id))
    }
}

/// Registration state of one connection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Unregistered,
    Registered {
        name: String,
    },
}

impl SessionState {
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Unregistered => None,
            Self::Registered { name } => Some(name),
        }
    }

    pub fn is_registered(&self) -> bool {
        matches!(self, Self::Registered { .. })
    }
}
