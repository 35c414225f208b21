//! PING handler.

use crate::bot::Bot;
use crate::error::HandlerResult;
use crate::event::Event;

/// `PING :<token>` is answered with the same token.
pub fn handle_ping(bot: &mut Bot, event: &Event) -> HandlerResult {
    let token = event.destination();
    bot.send(&format!("PONG :{token}"))?;
    Ok(())
}
