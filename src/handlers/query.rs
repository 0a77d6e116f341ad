//! Roster query handler (LUS).

use relay_proto::ServerCommand;

use super::Context;
use crate::error::HandlerResult;

/// LUS: reply with the registered names in registration order.
pub(super) async fn handle_lus(ctx: &mut Context<'_>) -> HandlerResult {
    ctx.require_name()?;
    let names = ctx.registry.list_names().await;
    ctx.session.send(ServerCommand::Lst(names)).await?;
    Ok(())
}
