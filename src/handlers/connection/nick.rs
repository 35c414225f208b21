//! ERR_NICKNAMEINUSE handling during registration.

use tracing::info;

use crate::bot::Bot;
use crate::error::HandlerResult;
use crate::event::Event;

/// `:server 433 * <nick> :Nickname is already in use`
///
/// Registered only between connect and `001`.
pub fn handle_nick_in_use(bot: &mut Bot, _event: &Event) -> HandlerResult {
    let nick = format!("{}_", bot.nick());
    info!(bot = %bot.name(), nick = %nick, "Nick in use, retrying");
    bot.set_nick(&nick);
    bot.send(&format!("NICK {nick}"))?;
    Ok(())
}
