//! Client command handlers.
//!
//! [`dispatch`] routes each parsed [`ClientCommand`] to its handler. Every
//! handler receives a [`Context`] borrowing the session's state and the
//! shared [`Registry`]; business rejections come back as
//! [`HandlerError`]s for the connection loop to answer.

mod connection;
mod messaging;
mod query;

use relay_proto::ClientCommand;

use crate::error::{HandlerError, HandlerResult};
use crate::state::{Registry, SessionHandle, SessionState};

/// Everything a handler may touch while processing one command.
pub struct Context<'a> {
    /// The sending side of this session.
    pub session: &'a SessionHandle,
    /// Registration state, owned by the connection task.
    pub state: &'a mut SessionState,
    /// Shared membership table.
    pub registry: &'a Registry,
}

impl<'a> Context<'a> {
    pub fn new(
        session: &'a SessionHandle,
        state: &'a mut SessionState,
        registry: &'a Registry,
    ) -> Self {
        Self {
            session,
            state,
            registry,
        }
    }

    /// Name of the session, or `NotRegistered`.
    pub fn require_name(&self) -> Result<&str, HandlerError> {
        self.state.name().ok_or(HandlerError::NotRegistered)
    }
}

/// Run the handler for `cmd`.
pub async fn dispatch(ctx: &mut Context<'_>, cmd: ClientCommand) -> HandlerResult {
    match cmd {
        ClientCommand::Con(name) => connection::handle_con(ctx, name).await,
        ClientCommand::Exi => connection::handle_exi(ctx),
        ClientCommand::Msg(text) => messaging::handle_msg(ctx, text).await,
        ClientCommand::Prv { target, text } => messaging::handle_prv(ctx, &target, &text).await,
        ClientCommand::Lus => query::handle_lus(ctx).await,
    }
}
