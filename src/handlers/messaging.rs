//! Chat handlers (MSG, PRV).

use relay_proto::{MAX_FRAME_LEN, ServerCode, ServerCommand};
use tracing::debug;

use super::Context;
use crate::error::{HandlerError, HandlerResult};

/// MSG: broadcast to every registered session, the sender included.
pub(super) async fn handle_msg(ctx: &mut Context<'_>, text: String) -> HandlerResult {
    let from = ctx.require_name()?.to_string();
    ensure_fits(ServerCode::Cht, &from, &text)?;
    let delivered = ctx
        .registry
        .broadcast(ServerCommand::Cht { from, text }, None)
        .await;
    debug!(session = %ctx.session.id(), delivered, "chat broadcast");
    Ok(())
}

/// PRV: deliver to one session and echo to the sender.
///
/// An absent target or a message to oneself is silently ignored. The size
/// check comes first, so an oversized message is refused either way.
pub(super) async fn handle_prv(ctx: &mut Context<'_>, target: &str, text: &str) -> HandlerResult {
    ensure_fits(ServerCode::Prv, ctx.require_name()?, text)?;
    let delivered = ctx
        .registry
        .send_private(ctx.session.id(), target, text)
        .await;
    debug!(session = %ctx.session.id(), %target, delivered, "private message");
    Ok(())
}

/// Reject a `<code> <from> <text>` notice that would not fit in one frame.
fn ensure_fits(code: ServerCode, from: &str, text: &str) -> HandlerResult {
    let actual = code.as_str().len() + 1 + from.len() + 1 + text.len();
    if actual > MAX_FRAME_LEN {
        return Err(HandlerError::MessageTooLong {
            actual,
            limit: MAX_FRAME_LEN,
        });
    }
    Ok(())
}
