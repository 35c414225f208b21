//! KICK handler.

use tracing::debug;

use crate::bot::Bot;
use crate::error::HandlerResult;
use crate::event::Event;
use crate::handlers::helpers::client_leaving_channel;

/// `:op!user@host KICK #chan victim [:reason]`
///
/// Treated exactly like the victim parting.
pub fn handle_kick(bot: &mut Bot, event: &Event) -> HandlerResult {
    let Some(victim) = event.arg(1) else {
        debug!(raw = %event.raw, "KICK without target");
        return Ok(());
    };
    let graph = bot.graph();
    let (Some(client), Some(channel)) =
        (graph.client_id(victim), graph.channel_id(event.destination()))
    else {
        return Ok(());
    };
    client_leaving_channel(bot, client, channel);
    Ok(())
}
