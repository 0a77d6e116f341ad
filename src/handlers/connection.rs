//! Registration and exit handlers (CON, EXI).

use relay_proto::NameExt;
use tracing::{debug, info};

use super::Context;
use crate::error::{HandlerError, HandlerResult};
use crate::state::SessionState;

/// CON: claim a name.
pub(super) async fn handle_con(ctx: &mut Context<'_>, name: String) -> HandlerResult {
    if ctx.state.is_registered() {
        return Err(HandlerError::AlreadyRegistered);
    }

    if !name.is_valid_name() {
        debug!(%name, "rejected invalid name");
        return Err(HandlerError::InvalidName(name));
    }

    if !ctx.registry.try_register(&name, ctx.session).await {
        debug!(%name, "rejected name in use");
        return Err(HandlerError::NameInUse(name));
    }

    info!(session = %ctx.session.id(), %name, "Client registered");
    *ctx.state = SessionState::Registered { name };
    Ok(())
}

/// EXI: leave. Teardown happens in the connection loop.
pub(super) fn handle_exi(ctx: &mut Context<'_>) -> HandlerResult {
    info!(
        session = %ctx.session.id(),
        name = ?ctx.state.name(),
        "Client quit"
    );
    Err(HandlerError::Quit)
}
