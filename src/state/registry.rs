//! The Registry - table of registered sessions.
//!
//! Every operation takes the one lock for its full duration, including the
//! sends it performs, so a check and the mutation or delivery that depends
//! on it always see the same membership. Broadcasts are therefore totally
//! ordered with respect to each other and to joins and leaves.
//!
//! Sends go to bounded per-session queues drained by each connection's
//! writer task. A peer whose queue is full stalls the lock until it drains.

use relay_proto::ServerCommand;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::session::{SessionHandle, SessionId};

struct Member {
    name: String,
    session: SessionHandle,
}

/// Registered sessions in registration order.
#[derive(Default)]
pub struct Registry {
    members: Mutex<Vec<Member>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `session` under `name`.
    ///
    /// Returns `false` without side effects if the name is taken. Otherwise
    /// sends `OK connected` to the session, announces `CON name` to every
    /// other member and appends the session, all under the lock, so the
    /// newcomer's `OK` precedes any chat it receives.
    pub async fn try_register(&self, name: &str, session: &SessionHandle) -> bool {
        let mut members = self.members.lock().await;
        if members.iter().any(|m| m.name == name) {
            return false;
        }

        if let Err(e) = session
            .send(ServerCommand::Ok("connected".to_string()))
            .await
        {
            warn!(session = %session.id(), error = %e, "failed to deliver registration reply");
        }
        deliver(
            &members,
            &ServerCommand::Con(name.to_string()),
            Some(session.id()),
        )
        .await;

        members.push(Member {
            name: name.to_string(),
            session: session.clone(),
        });
        true
    }

    /// Remove a session. No-op if absent.
    ///
    /// Returns the name it was registered under.
    pub async fn unregister(&self, id: SessionId) -> Option<String> {
        let mut members = self.members.lock().await;
        remove(&mut members, id)
    }

    /// Remove a session and announce `EXI name` to the remaining members.
    ///
    /// Only the call that actually removes the session broadcasts, so
    /// repeated teardown of the same session is harmless.
    pub async fn leave(&self, id: SessionId) -> Option<String> {
        let mut members = self.members.lock().await;
        let name = remove(&mut members, id)?;
        deliver(&members, &ServerCommand::Exi(name.clone()), None).await;
        Some(name)
    }

    /// Send `msg` to every member except `exclude`.
    ///
    /// A failed delivery is logged and skipped. Returns how many members
    /// accepted the message.
    pub async fn broadcast(&self, msg: ServerCommand, exclude: Option<SessionId>) -> usize {
        let members = self.members.lock().await;
        deliver(&members, &msg, exclude).await
    }

    /// Deliver a private message from `from` to the member named `target`,
    /// echoing it back to the sender.
    ///
    /// Silently does nothing if the sender is not registered, the target is
    /// absent, or the target is the sender. Returns whether it was delivered.
    pub async fn send_private(&self, from: SessionId, target: &str, text: &str) -> bool {
        let members = self.members.lock().await;
        let Some(sender) = members.iter().find(|m| m.session.id() == from) else {
            return false;
        };
        let Some(recipient) = members.iter().find(|m| m.name == target) else {
            debug!(%target, "private message to absent name");
            return false;
        };
        if recipient.session.id() == from {
            debug!(%target, "private message to self");
            return false;
        }

        let msg = ServerCommand::Prv {
            from: sender.name.clone(),
            text: text.to_string(),
        };
        if let Err(e) = recipient.session.send(msg.clone()).await {
            warn!(session = %recipient.session.id(), error = %e, "failed to deliver private message");
        }
        if let Err(e) = sender.session.send(msg).await {
            warn!(session = %from, error = %e, "failed to echo private message");
        }
        true
    }

    /// Snapshot of registered names in registration order.
    pub async fn list_names(&self) -> Vec<String> {
        let members = self.members.lock().await;
        members.iter().map(|m| m.name.clone()).collect()
    }

    /// Look up a registered session by name.
    pub async fn find(&self, name: &str) -> Option<SessionHandle> {
        let members = self.members.lock().await;
        members
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.session.clone())
    }

    pub async fn len(&self) -> usize {
        self.members.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.members.lock().await.is_empty()
    }
}

fn remove(members: &mut Vec<Member>, id: SessionId) -> Option<String> {
    let index = members.iter().position(|m| m.session.id() == id)?;
    Some(members.remove(index).name)
}

async fn deliver(members: &[Member], msg: &ServerCommand, exclude: Option<SessionId>) -> usize {
    let mut delivered = 0;
    for member in members {
        if Some(member.session.id()) == exclude {
            continue;
        }
        match member.session.send(msg.clone()).await {
            Ok(()) => delivered += 1,
            Err(e) => {
                warn!(session = %member.session.id(), name = %member.name, error = %e, "broadcast delivery failed");
            }
        }
    }
    delivered
}
